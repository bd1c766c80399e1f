//! Error type shared by the core crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InpaintError {
    #[error("invalid canvas dimensions {width}x{height} (expected 1..={max} on each side)")]
    InvalidDimensions { width: u32, height: u32, max: u32 },

    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("malformed data URL: {0}")]
    MalformedDataUrl(String),

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

pub type Result<T, E = InpaintError> = std::result::Result<T, E>;
