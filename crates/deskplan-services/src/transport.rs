use crate::{EncodedImage, ServiceError};
use deskplan_core::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;

/// JPEG-encode a canvas for a backend call. `quality` is clamped to `1..=100`.
pub fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<EncodedImage, ServiceError> {
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100)).encode(
        &img.data,
        img.width as u32,
        img.height as u32,
        ExtendedColorType::Rgb8,
    )?;
    Ok(EncodedImage {
        mime_type: "image/jpeg",
        bytes,
    })
}
