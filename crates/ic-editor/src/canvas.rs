//! The image canvas: a fixed-size stage holding the layer stack.

use ic_core::dataurl::{decode_data_url_image, decode_image};
use ic_core::error::Result;
use ic_core::{CanvasConfig, Layer, LayerId, LayerStack, Rgba, RgbaImage};

#[derive(Debug, Clone)]
pub struct ImageCanvas {
    config: CanvasConfig,
    background: Rgba<u8>,
    pub stack: LayerStack,
}

impl ImageCanvas {
    pub fn new(config: CanvasConfig) -> Result<Self> {
        config.validate()?;
        let background = config.background().to_rgba8();
        Ok(Self {
            config,
            background,
            stack: LayerStack::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.config.width
    }

    pub fn height(&self) -> u32 {
        self.config.height
    }

    pub fn background(&self) -> Rgba<u8> {
        self.background
    }

    /// Decode a data-URL image and append it on top at the origin.
    pub fn add_data_url(&mut self, src: &str) -> Result<LayerId> {
        let pixels = decode_data_url_image(src)?;
        Ok(self.add_pixels(pixels))
    }

    /// Decode encoded image bytes (PNG, JPEG, ...) and append on top.
    pub fn add_encoded(&mut self, bytes: &[u8]) -> Result<LayerId> {
        let pixels = decode_image(bytes)?;
        Ok(self.add_pixels(pixels))
    }

    pub fn add_pixels(&mut self, pixels: RgbaImage) -> LayerId {
        let (w, h) = pixels.dimensions();
        let id = self.stack.push(Layer::new(LayerId::next(), pixels));
        log::debug!("added layer {id} ({w}x{h}), {} in stack", self.stack.len());
        id
    }

    /// Flatten background and layers into one raster at canvas size.
    pub fn render(&self) -> RgbaImage {
        ic_render::composite(&self.stack, self.width(), self.height(), self.background)
    }
}
