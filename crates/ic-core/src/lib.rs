pub mod config;
pub mod dataurl;
pub mod error;
pub mod id;
pub mod mask;
pub mod model;
pub mod threshold;
pub mod viewport;

pub use config::{CanvasConfig, MaskConfig};
pub use dataurl::{Blob, data_url_to_blob, encode_png_data_url};
pub use error::InpaintError;
pub use id::LayerId;
pub use mask::{DrawMode, MaskSurface};
pub use model::*;
pub use threshold::{MASK_THRESHOLD, threshold_mask};
pub use viewport::{Viewport, ZoomDirection};

// Re-export the raster types so downstream crates share one `image` version
pub use image::{Rgba, RgbaImage};
