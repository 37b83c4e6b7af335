//! Geometry core for desk rectification.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete image codec: images are plain row-major RGB
//! buffers ([`RgbImage`] / [`RgbImageView`]).
//!
//! Pipeline pieces, leaf-first:
//! - [`cover_crop_region`] / [`crop_to_viewport`]: reproduce what a viewport
//!   showed under an `object-fit: cover` policy,
//! - [`order_corners`]: canonical TL/TR/BR/BL ordering of 4 tapped points,
//! - [`rectify`]: 4-point homography + perspective warp into an upright canvas.

mod corners;
mod homography;
mod image;
mod logger;
mod rectify;
mod viewport;

pub use corners::{order_corners, Corners};
pub use homography::{homography_from_4pt, warp_perspective_rgb, Homography};
pub use image::{sample_bilinear_rgb, sample_bilinear_rgb_u8, Rgb, RgbImage, RgbImageView};
pub use rectify::{
    rectified_size, rectify, rectify_with_limit, Rectification, RectifyError, MAX_CANVAS_PIXELS,
};
pub use viewport::{
    cover_crop_region, crop_to_viewport, map_taps_to_crop, CropError, CropRegion, Viewport,
};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, level_from_verbosity};
