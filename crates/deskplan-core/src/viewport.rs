//! Reproduce what a fixed-size viewport showed of an image under a
//! "scale to fill, crop the overflow" (`object-fit: cover`) policy.
//!
//! Taps are reported in viewport units relative to that visible part, so the
//! crop has to match the rendered one pixel for pixel before the taps can be
//! used as source coordinates.

use crate::{RgbImage, RgbImageView};
use log::debug;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Size of the rendering container, in its own (CSS) pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Visible part of the source image, in source pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    /// Cover scale (rendered pixels per source pixel).
    pub scale: f64,
}

#[derive(thiserror::Error, Debug)]
pub enum CropError {
    #[error("viewport dimensions must be positive and finite (width={width}, height={height})")]
    InvalidViewport { width: f32, height: f32 },
    #[error("source image is empty (width={width}, height={height})")]
    EmptyImage { width: usize, height: usize },
}

/// Compute the region of an `img_w × img_h` image left visible by a cover fit.
///
/// Offsets are half of the overflow, converted back to source pixels and
/// truncated; the region is clamped to the image and to at least 1×1.
pub fn cover_crop_region(
    img_w: usize,
    img_h: usize,
    viewport: Viewport,
) -> Result<CropRegion, CropError> {
    if !viewport.is_valid() {
        return Err(CropError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    if img_w == 0 || img_h == 0 {
        return Err(CropError::EmptyImage {
            width: img_w,
            height: img_h,
        });
    }

    let (iw, ih) = (img_w as f64, img_h as f64);
    let (cw, ch) = (viewport.width as f64, viewport.height as f64);
    let scale = (cw / iw).max(ch / ih);

    let crop_x = ((iw * scale - cw) / scale / 2.0).trunc() as i64;
    let crop_y = ((ih * scale - ch) / scale / 2.0).trunc() as i64;

    let axis = |crop: i64, len: usize| -> (usize, usize) {
        let len = len as i64;
        let lo = crop.max(0).min(len - 1);
        let hi = (len - crop).min(len);
        (lo as usize, (hi - lo).max(1) as usize)
    };
    let (x, width) = axis(crop_x, img_w);
    let (y, height) = axis(crop_y, img_h);

    debug!(
        "cover crop: source {}x{}, viewport {}x{}, scale {:.3}, visible {}x{} at ({}, {})",
        img_w, img_h, viewport.width, viewport.height, scale, width, height, x, y
    );

    Ok(CropRegion {
        x,
        y,
        width,
        height,
        scale,
    })
}

/// Return the part of `src` a cover-fit viewport displays.
pub fn crop_to_viewport(src: &RgbImageView<'_>, viewport: Viewport) -> Result<RgbImage, CropError> {
    let region = cover_crop_region(src.width, src.height, viewport)?;
    Ok(src.crop(region.x, region.y, region.width, region.height))
}

/// Convert viewport-relative taps into pixels of the cropped image.
///
/// A single factor `crop_width / viewport.width` is applied to both axes;
/// the cover fit preserves aspect ratio so the vertical factor only differs
/// by crop truncation.
pub fn map_taps_to_crop(
    taps: &[Point2<f32>; 4],
    crop_width: usize,
    viewport: Viewport,
) -> [Point2<f32>; 4] {
    let s = crop_width as f32 / viewport.width;
    taps.map(|p| Point2::new(p.x * s, p.y * s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_when_viewport_matches_image() {
        let mut img = RgbImage::new(40, 30);
        img.put_pixel(39, 29, [9, 8, 7]);
        let out = crop_to_viewport(&img.view(), Viewport::new(40.0, 30.0)).expect("crop");
        assert_eq!(out, img);
    }

    #[test]
    fn identity_when_viewport_is_a_uniform_scale() {
        let r = cover_crop_region(400, 300, Viewport::new(200.0, 150.0)).expect("crop");
        assert_eq!((r.x, r.y, r.width, r.height), (0, 0, 400, 300));
    }

    #[test]
    fn tall_viewport_crops_the_sides() {
        // 4000x3000 photo shown in a 390x844 phone viewport
        let r = cover_crop_region(4000, 3000, Viewport::new(390.0, 844.0)).expect("crop");
        let scale = 844.0 / 3000.0;
        assert!((r.scale - scale).abs() < 1e-12);
        let visible_w = 390.0 / scale;
        assert_eq!(r.y, 0);
        assert_eq!(r.height, 3000);
        assert_eq!(r.x, ((4000.0 - visible_w) / 2.0) as usize);
        assert_eq!(r.width, 4000 - 2 * r.x);
    }

    #[test]
    fn wide_viewport_crops_top_and_bottom() {
        let r = cover_crop_region(300, 400, Viewport::new(300.0, 200.0)).expect("crop");
        assert_eq!((r.x, r.width), (0, 300));
        assert_eq!((r.y, r.height), (100, 200));
    }

    #[test]
    fn extreme_viewport_keeps_one_pixel() {
        let r = cover_crop_region(10, 10, Viewport::new(1.0, 10_000.0)).expect("crop");
        assert!(r.width >= 1 && r.height >= 1);
        assert!(r.x + r.width <= 10);
    }

    #[test]
    fn rejects_bad_viewport() {
        assert!(matches!(
            cover_crop_region(10, 10, Viewport::new(0.0, 10.0)),
            Err(CropError::InvalidViewport { .. })
        ));
        assert!(matches!(
            cover_crop_region(10, 10, Viewport::new(f32::NAN, 10.0)),
            Err(CropError::InvalidViewport { .. })
        ));
    }

    #[test]
    fn rejects_empty_image() {
        assert!(matches!(
            cover_crop_region(0, 10, Viewport::new(5.0, 5.0)),
            Err(CropError::EmptyImage { .. })
        ));
    }

    #[test]
    fn taps_scale_into_crop_pixels() {
        let taps = [
            Point2::new(0.0, 0.0),
            Point2::new(195.0, 10.0),
            Point2::new(390.0, 844.0),
            Point2::new(20.0, 422.0),
        ];
        let mapped = map_taps_to_crop(&taps, 1386, Viewport::new(390.0, 844.0));
        let s = 1386.0 / 390.0;
        assert_eq!(mapped[1], Point2::new(195.0 * s, 10.0 * s));
        assert_eq!(mapped[2], Point2::new(390.0 * s, 844.0 * s));
    }
}
