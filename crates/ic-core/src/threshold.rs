//! Binarize a mask surface into a black/white inpainting mask.

use image::{Rgba, RgbaImage};

/// Channel-sum cutoff: a pixel is white when `R + G + B` exceeds this
/// (out of a maximum of 765). Alpha is not consulted.
pub const MASK_THRESHOLD: u32 = 383;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Map every pixel to opaque white or opaque black by its RGB sum.
pub fn threshold_mask(source: &RgbaImage) -> RgbaImage {
    RgbaImage::from_fn(source.width(), source.height(), |x, y| {
        let [r, g, b, _] = source.get_pixel(x, y).0;
        let sum = u32::from(r) + u32::from(g) + u32::from(b);
        if sum > MASK_THRESHOLD { WHITE } else { BLACK }
    })
}
