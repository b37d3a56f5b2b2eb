use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{codecs::jpeg::JpegEncoder, DynamicImage, RgbaImage};

pub const JPEG_MIME: &str = "image/jpeg";

/// An image ready to be inlined into a model request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: &'static str,
    pub base64: String,
}

impl EncodedImage {
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }
}

/// Encodes a screenshot as JPEG and wraps it into base64. JPEG has no alpha channel so the
/// image is flattened to RGB first.
pub fn encode_jpeg_base64(image: RgbaImage, quality: u8) -> Result<EncodedImage> {
    let rgb = DynamicImage::ImageRgba8(image).to_rgb8();
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .encode_image(&rgb)
        .context("Failed to encode screenshot as JPEG")?;
    Ok(EncodedImage {
        mime_type: JPEG_MIME,
        base64: STANDARD.encode(&buffer),
    })
}
