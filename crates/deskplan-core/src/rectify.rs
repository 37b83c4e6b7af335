use crate::{homography_from_4pt, warp_perspective_rgb, Corners, Homography, RgbImage, RgbImageView};
use log::{debug, warn};
use nalgebra::Point2;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Default upper bound on rectified canvas pixels (64 Mpx, 192 MiB of RGB).
pub const MAX_CANVAS_PIXELS: usize = 1 << 26;

#[derive(thiserror::Error, Debug)]
pub enum RectifyError {
    #[error("corner coordinates must be finite, got {corners:?}")]
    InvalidGeometry { corners: [[f32; 2]; 4] },

    #[error("rectified canvas {width}x{height} exceeds the {max_pixels} pixel limit")]
    CanvasTooLarge {
        width: usize,
        height: usize,
        max_pixels: usize,
    },
}

/// Upright top-down canvas plus the mapping back into the source image.
#[derive(Clone, Debug)]
pub struct Rectification {
    pub canvas: RgbImage,
    pub corners: Corners,
    /// `None` when the corners were degenerate and no projective transform exists.
    pub h_img_from_rect: Option<Homography>,
}

impl Rectification {
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.h_img_from_rect.is_none()
    }

    /// Map a canvas pixel back into source image coordinates.
    pub fn rect_to_img(&self, p_rect: Point2<f32>) -> Option<Point2<f32>> {
        self.h_img_from_rect.map(|h| h.apply(p_rect))
    }

    /// Map a source image point into canvas coordinates.
    pub fn img_to_rect(&self, p_img: Point2<f32>) -> Option<Point2<f32>> {
        let inv = self.h_img_from_rect?.inverse()?;
        Some(inv.apply(p_img))
    }
}

/// Canvas size measured from the longer of each pair of opposite edges,
/// rounded and clamped to at least 1×1.
pub fn rectified_size(corners: &Corners) -> (usize, usize) {
    let dist = |a: Point2<f32>, b: Point2<f32>| (a - b).norm();

    let width_a = dist(corners.bottom_right, corners.bottom_left);
    let width_b = dist(corners.top_right, corners.top_left);
    let height_a = dist(corners.top_right, corners.bottom_right);
    let height_b = dist(corners.top_left, corners.bottom_left);

    let out_w = width_a.max(width_b).round().max(1.0) as usize;
    let out_h = height_a.max(height_b).round().max(1.0) as usize;
    (out_w, out_h)
}

/// Warp the region bounded by `corners` into an upright canvas.
///
/// Collinear or coincident corners still yield a canvas of the clamped
/// size, filled black and flagged via [`Rectification::is_degenerate`].
/// Non-finite coordinates and canvases above [`MAX_CANVAS_PIXELS`] are
/// rejected.
pub fn rectify(src: &RgbImageView<'_>, corners: &Corners) -> Result<Rectification, RectifyError> {
    rectify_with_limit(src, corners, MAX_CANVAS_PIXELS)
}

/// [`rectify`] with an explicit bound on `width * height` of the canvas.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(src, corners), fields(width = src.width, height = src.height))
)]
pub fn rectify_with_limit(
    src: &RgbImageView<'_>,
    corners: &Corners,
    max_pixels: usize,
) -> Result<Rectification, RectifyError> {
    if !corners.is_finite() {
        return Err(RectifyError::InvalidGeometry {
            corners: corners.to_array().map(|p| [p.x, p.y]),
        });
    }

    let (out_w, out_h) = rectified_size(corners);
    // edge lengths saturate on the float-to-usize cast, so this also
    // catches sizes whose byte count would overflow
    if out_w
        .checked_mul(out_h)
        .and_then(|n| n.checked_mul(3))
        .is_none_or(|bytes| bytes / 3 > max_pixels)
    {
        warn!("refusing {out_w}x{out_h} canvas, limit is {max_pixels} pixels");
        return Err(RectifyError::CanvasTooLarge {
            width: out_w,
            height: out_h,
            max_pixels,
        });
    }
    let max_x = (out_w - 1) as f32;
    let max_y = (out_h - 1) as f32;
    let rect_pts = [
        Point2::new(0.0, 0.0),
        Point2::new(max_x, 0.0),
        Point2::new(max_x, max_y),
        Point2::new(0.0, max_y),
    ];

    let Some(h_img_from_rect) = homography_from_4pt(&rect_pts, &corners.to_array()) else {
        warn!(
            "degenerate corner configuration {:?}, emitting blank {}x{} canvas",
            corners.to_array(),
            out_w,
            out_h
        );
        return Ok(Rectification {
            canvas: RgbImage::new(out_w, out_h),
            corners: *corners,
            h_img_from_rect: None,
        });
    };

    debug!(
        "rectifying {}x{} source into {}x{} canvas",
        src.width, src.height, out_w, out_h
    );
    let canvas = warp_perspective_rgb(src, h_img_from_rect, out_w, out_h);

    Ok(Rectification {
        canvas,
        corners: *corners,
        h_img_from_rect: Some(h_img_from_rect),
    })
}
