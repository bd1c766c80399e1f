//! Data-URL and blob codec.
//!
//! Exports are PNG-encoded and wrapped as `data:image/png;base64,...`.
//! A `Blob` is the decoded form: raw bytes plus their MIME type.

use crate::error::{InpaintError, Result};
use crate::model::hex_val;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD as BASE64};
use base64::engine::DecodePaddingMode;
use base64::{Engine as _, alphabet};
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

pub const PNG_MIME: &str = "image/png";
const DEFAULT_MIME: &str = "text/plain";

/// Incoming payloads may drop their `=` padding, as browsers accept.
const BASE64_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Binary payload with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub bytes: Vec<u8>,
    pub mime: String,
}

impl Blob {
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            bytes,
            mime: mime.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Re-encode as a base64 data URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, BASE64.encode(&self.bytes))
    }
}

/// Split a data URL into its bytes and MIME type.
///
/// The MIME type is the text between `data:` and the first `;` or `,`;
/// the payload is everything after the first `,`. Payloads flagged
/// `;base64` are base64-decoded, others percent-decoded.
pub fn data_url_to_blob(url: &str) -> Result<Blob> {
    let url = url.trim();
    let rest = url
        .get(..5)
        .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
        .map(|_| &url[5..])
        .ok_or_else(|| InpaintError::MalformedDataUrl("missing `data:` scheme".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| InpaintError::MalformedDataUrl("missing `,` separator".into()))?;

    let mut params = header.split(';');
    let mime = params.next().unwrap_or_default().trim();
    let is_base64 = params.any(|p| p.trim().eq_ignore_ascii_case("base64"));

    let bytes = if is_base64 {
        let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        BASE64_LENIENT.decode(compact)?
    } else {
        percent_decode(payload)?
    };

    let mime = if mime.is_empty() { DEFAULT_MIME } else { mime };
    Ok(Blob::new(bytes, mime.to_ascii_lowercase()))
}

fn percent_decode(s: &str) -> Result<Vec<u8>> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = bytes.get(i + 1).copied().and_then(hex_val);
            let lo = bytes.get(i + 2).copied().and_then(hex_val);
            match (hi, lo) {
                (Some(hi), Some(lo)) => out.push(hi << 4 | lo),
                _ => {
                    return Err(InpaintError::MalformedDataUrl(format!(
                        "bad percent escape at byte {i}"
                    )));
                }
            }
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    Ok(out)
}

/// Decode any supported raster format into RGBA8.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage> {
    let img = image::load_from_memory(bytes).map_err(InpaintError::Decode)?;
    Ok(img.to_rgba8())
}

/// Decode an image given as a data URL.
pub fn decode_data_url_image(url: &str) -> Result<RgbaImage> {
    let blob = data_url_to_blob(url)?;
    decode_image(&blob.bytes)
}

pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(InpaintError::Encode)?;
    Ok(bytes)
}

pub fn encode_png_blob(img: &RgbaImage) -> Result<Blob> {
    Ok(Blob::new(encode_png(img)?, PNG_MIME))
}

pub fn encode_png_data_url(img: &RgbaImage) -> Result<String> {
    Ok(encode_png_blob(img)?.to_data_url())
}
