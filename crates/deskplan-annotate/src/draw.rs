//! Raster primitives on [`RgbImage`]: thick lines, arrows, bitmap labels.

use deskplan_core::{Rgb, RgbImage};
use font8x8::{UnicodeFonts, BASIC_FONTS};
use nalgebra::Point2;
use std::f64::consts::FRAC_PI_4;

fn draw_disc(img: &mut RgbImage, cx: f64, cy: f64, radius: f64, color: Rgb) {
    if radius <= 0.5 {
        img.put_pixel(cx.round() as i32, cy.round() as i32, color);
        return;
    }
    let r2 = radius * radius;
    let x0 = (cx - radius).floor() as i32;
    let x1 = (cx + radius).ceil() as i32;
    let y0 = (cy - radius).floor() as i32;
    let y1 = (cy + radius).ceil() as i32;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = f64::from(x) - cx;
            let dy = f64::from(y) - cy;
            if dx * dx + dy * dy <= r2 {
                img.put_pixel(x, y, color);
            }
        }
    }
}

/// Stamp discs of diameter `width` along the segment.
pub fn draw_thick_line(
    img: &mut RgbImage,
    from: Point2<f32>,
    to: Point2<f32>,
    color: Rgb,
    width: f32,
) {
    let (x1, y1) = (f64::from(from.x), f64::from(from.y));
    let dx = f64::from(to.x) - x1;
    let dy = f64::from(to.y) - y1;
    let steps = (dx * dx + dy * dy).sqrt().max(1.0).ceil() as i32;
    let radius = f64::from(width.max(1.0)) / 2.0;
    for step in 0..=steps {
        let t = f64::from(step) / f64::from(steps);
        draw_disc(img, x1 + dx * t, y1 + dy * t, radius, color);
    }
}

/// Arrow with an open head: two strokes at ±45° off the shaft, each
/// `tip_frac` of the arrow length long.
pub fn draw_arrow(
    img: &mut RgbImage,
    from: Point2<f32>,
    to: Point2<f32>,
    color: Rgb,
    width: f32,
    tip_frac: f32,
) {
    draw_thick_line(img, from, to, color, width);

    let dx = f64::from(from.x - to.x);
    let dy = f64::from(from.y - to.y);
    let len = (dx * dx + dy * dy).sqrt();
    if len < 1e-6 {
        return;
    }
    let back = dy.atan2(dx);
    let tip = len * f64::from(tip_frac);
    for side in [back + FRAC_PI_4, back - FRAC_PI_4] {
        let end = Point2::new(
            (f64::from(to.x) + tip * side.cos()) as f32,
            (f64::from(to.y) + tip * side.sin()) as f32,
        );
        draw_thick_line(img, to, end, color, width);
    }
}

fn draw_glyphs(img: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb, scale: i32) {
    let mut cursor_x = x;
    for ch in text.chars() {
        let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
            cursor_x += 8 * scale;
            continue;
        };
        for (row_idx, row) in glyph.iter().enumerate() {
            for col in 0..8 {
                if (row >> col) & 1 == 0 {
                    continue;
                }
                let px = cursor_x + col * scale;
                let py = y + row_idx as i32 * scale;
                for sy in 0..scale {
                    for sx in 0..scale {
                        img.put_pixel(px + sx, py + sy, color);
                    }
                }
            }
        }
        cursor_x += 8 * scale;
    }
}

/// Bitmap text whose baseline sits at `(x, baseline_y)`, with a one-pixel
/// outline so it stays readable on any background.
pub fn draw_label(
    img: &mut RgbImage,
    x: i32,
    baseline_y: i32,
    text: &str,
    color: Rgb,
    outline: Rgb,
    scale: u32,
) {
    let scale = scale.max(1) as i32;
    let top = baseline_y - 8 * scale;
    for (ox, oy) in [(-1, 0), (1, 0), (0, -1), (0, 1), (-1, -1), (1, 1), (-1, 1), (1, -1)] {
        draw_glyphs(img, x + ox, top + oy, text, outline, scale);
    }
    draw_glyphs(img, x, top, text, color, scale);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(img: &RgbImage, color: Rgb) -> usize {
        img.data.chunks_exact(3).filter(|px| *px == color).count()
    }

    #[test]
    fn line_covers_both_endpoints() {
        let mut img = RgbImage::new(20, 20);
        draw_thick_line(
            &mut img,
            Point2::new(2.0, 3.0),
            Point2::new(17.0, 15.0),
            [255, 0, 0],
            3.0,
        );
        assert_eq!(img.pixel(2, 3), Some([255, 0, 0]));
        assert_eq!(img.pixel(17, 15), Some([255, 0, 0]));
        assert_eq!(img.pixel(19, 0), Some([0, 0, 0]));
    }

    #[test]
    fn arrow_head_extends_behind_the_tip() {
        let mut img = RgbImage::new(60, 60);
        draw_arrow(
            &mut img,
            Point2::new(5.0, 30.0),
            Point2::new(45.0, 30.0),
            [0, 255, 0],
            1.0,
            0.25,
        );
        // head strokes end ~7 px back and ~7 px off the shaft
        assert_eq!(img.pixel(38, 23), Some([0, 255, 0]));
        assert_eq!(img.pixel(38, 37), Some([0, 255, 0]));
        assert_eq!(img.pixel(50, 30), Some([0, 0, 0]));
    }

    #[test]
    fn zero_length_arrow_is_a_dot() {
        let mut img = RgbImage::new(10, 10);
        let p = Point2::new(4.0, 4.0);
        draw_arrow(&mut img, p, p, [1, 2, 3], 3.0, 0.25);
        assert_eq!(img.pixel(4, 4), Some([1, 2, 3]));
    }

    #[test]
    fn label_draws_text_and_outline() {
        let mut img = RgbImage::filled(80, 30, [100, 100, 100]);
        draw_label(&mut img, 2, 20, "pen", [255, 255, 255], [0, 0, 0], 1);
        assert!(count(&img, [255, 255, 255]) > 0);
        assert!(count(&img, [0, 0, 0]) > 0);
    }

    #[test]
    fn drawing_near_edges_is_clipped() {
        let mut img = RgbImage::new(8, 8);
        draw_label(&mut img, -20, 2, "clipped", [255, 255, 255], [0, 0, 0], 2);
        draw_arrow(
            &mut img,
            Point2::new(-10.0, -10.0),
            Point2::new(30.0, 30.0),
            [9, 9, 9],
            4.0,
            0.25,
        );
        assert_eq!(img.data.len(), 8 * 8 * 3);
    }
}
