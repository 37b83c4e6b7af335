//! Conversions between `image` crate buffers and the core RGB types.

use crate::core::{RgbImage, RgbImageView};
use image::ExtendedColorType;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum ImageIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("image dimensions {width}x{height} exceed the encoder limits")]
    TooLarge { width: usize, height: usize },
}

/// Borrow an `image::RgbImage` as the lightweight core view type.
pub fn rgb_view(img: &::image::RgbImage) -> RgbImageView<'_> {
    RgbImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

pub fn from_image(img: ::image::RgbImage) -> RgbImage {
    RgbImage {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.into_raw(),
    }
}

/// Decode any supported format from memory into RGB.
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage, ImageIoError> {
    Ok(from_image(image::load_from_memory(bytes)?.to_rgb8()))
}

/// Read and decode an image file into RGB.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<RgbImage, ImageIoError> {
    let img = image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?;
    Ok(from_image(img.to_rgb8()))
}

/// Write `img`, picking the format from the file extension.
pub fn save_rgb(img: &RgbImage, path: impl AsRef<Path>) -> Result<(), ImageIoError> {
    let too_large = || ImageIoError::TooLarge {
        width: img.width,
        height: img.height,
    };
    let w = u32::try_from(img.width).map_err(|_| too_large())?;
    let h = u32::try_from(img.height).map_err(|_| too_large())?;
    image::save_buffer(path, &img.data, w, h, ExtendedColorType::Rgb8)?;
    Ok(())
}
