use crate::{sample_bilinear_rgb_u8, RgbImage, RgbImageView};
use nalgebra::{Matrix3, Point2, SMatrix, SVector, Vector2, Vector3};

/// Twice the area of the triangle spanned by three normalized points below
/// which the configuration counts as collinear.
const COLLINEAR_EPS: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Homography {
    pub h: Matrix3<f64>,
}

impl Homography {
    pub fn new(h: Matrix3<f64>) -> Self {
        Self { h }
    }

    #[inline]
    pub fn apply(&self, p: Point2<f32>) -> Point2<f32> {
        let v = self.h * Vector3::new(p.x as f64, p.y as f64, 1.0);
        let w = v[2];
        Point2::new((v[0] / w) as f32, (v[1] / w) as f32)
    }

    pub fn inverse(&self) -> Option<Self> {
        self.h.try_inverse().map(Self::new)
    }
}

/// Similarity that moves the centroid of `pts` to the origin and scales their
/// mean distance from it to sqrt(2). Returns the moved points as well.
fn conditioning(pts: &[Point2<f32>; 4]) -> ([Point2<f64>; 4], Matrix3<f64>) {
    let pts = pts.map(|p| Point2::new(p.x as f64, p.y as f64));
    let centroid = pts.iter().fold(Vector2::zeros(), |acc, p| acc + p.coords) / 4.0;
    let spread = pts.iter().map(|p| (p.coords - centroid).norm()).sum::<f64>() / 4.0;
    let s = if spread > 1e-12 {
        std::f64::consts::SQRT_2 / spread
    } else {
        1.0
    };

    let t = Matrix3::new(
        s, 0.0, -s * centroid.x, //
        0.0, s, -s * centroid.y, //
        0.0, 0.0, 1.0,
    );
    (pts.map(|p| Point2::from((p.coords - centroid) * s)), t)
}

/// A 4-point correspondence is only solvable when no three points are collinear.
fn has_collinear_triple(pts: &[Point2<f64>; 4]) -> bool {
    const TRIPLES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
    TRIPLES.iter().any(|&[a, b, c]| {
        let (ab, ac) = (pts[b] - pts[a], pts[c] - pts[a]);
        (ab.x * ac.y - ab.y * ac.x).abs() < COLLINEAR_EPS
    })
}

/// Compute H such that: dst ~ H * src (projective), using 4 point correspondences.
///
/// Returns `None` when either quad has three collinear (or coincident)
/// points, or when the linear system is singular.
///
/// Corner order must be consistent between `src` and `dst`.
pub fn homography_from_4pt(src: &[Point2<f32>; 4], dst: &[Point2<f32>; 4]) -> Option<Homography> {
    let (src_n, t_src) = conditioning(src);
    let (dst_n, t_dst) = conditioning(dst);

    if has_collinear_triple(&src_n) || has_collinear_triple(&dst_n) {
        return None;
    }

    // With h33 fixed to 1, each pair (x, y) -> (u, v) gives two rows:
    //   [x y 1 0 0 0 -ux -uy] . h = u
    //   [0 0 0 x y 1 -vx -vy] . h = v
    let mut a = SMatrix::<f64, 8, 8>::zeros();
    let mut b = SVector::<f64, 8>::zeros();
    for (k, (s, d)) in src_n.iter().zip(&dst_n).enumerate() {
        for (row, target, offset) in [(2 * k, d.x, 0), (2 * k + 1, d.y, 3)] {
            a[(row, offset)] = s.x;
            a[(row, offset + 1)] = s.y;
            a[(row, offset + 2)] = 1.0;
            a[(row, 6)] = -target * s.x;
            a[(row, 7)] = -target * s.y;
            b[row] = target;
        }
    }

    let x = a.lu().solve(&b)?;
    if x.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let hn = Matrix3::new(x[0], x[1], x[2], x[3], x[4], x[5], x[6], x[7], 1.0);

    let h = t_dst.try_inverse()? * hn * t_src;
    let scale = h[(2, 2)];
    if scale.abs() < 1e-12 {
        return None;
    }
    Some(Homography::new(h / scale))
}

/// Warp into the rectified canvas: each destination pixel `(x, y)` is mapped
/// to the source via `h_img_from_rect` and sampled bilinearly.
///
/// Destination pixel indices are used directly (no half-pixel shift), so a
/// rect corner at `(out_w - 1, 0)` samples exactly the source point it was
/// paired with.
pub fn warp_perspective_rgb(
    src: &RgbImageView<'_>,
    h_img_from_rect: Homography,
    out_w: usize,
    out_h: usize,
) -> RgbImage {
    let mut out = Vec::with_capacity(out_w * out_h * 3);

    for y in 0..out_h {
        for x in 0..out_w {
            let pi = h_img_from_rect.apply(Point2::new(x as f32, y as f32));
            let v = if pi.x.is_finite() && pi.y.is_finite() {
                sample_bilinear_rgb_u8(src, pi.x, pi.y)
            } else {
                [0, 0, 0]
            };
            out.extend_from_slice(&v);
        }
    }

    RgbImage {
        width: out_w,
        height: out_h,
        data: out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Point2<f32>, b: Point2<f32>, tol: f32) {
        let dx = (a.x - b.x).abs();
        let dy = (a.y - b.y).abs();
        assert!(
            dx < tol && dy < tol,
            "expected ({:.6},{:.6}) ~ ({:.6},{:.6}) within {}",
            a.x,
            a.y,
            b.x,
            b.y,
            tol
        );
    }

    #[test]
    fn inverse_round_trips_points() {
        let h = Homography::new(Matrix3::new(
            1.2, 0.1, 5.0, //
            -0.05, 0.9, 3.0, //
            0.001, 0.0005, 1.0,
        ));
        let inv = h.inverse().expect("invertible");

        for p in [
            Point2::new(0.0_f32, 0.0),
            Point2::new(50.0_f32, -20.0),
            Point2::new(320.0_f32, 200.0),
        ] {
            let back = inv.apply(h.apply(p));
            assert_close(back, p, 1e-3);
        }
    }

    #[test]
    fn four_points_recover_ground_truth() {
        let ground_truth = Homography::new(Matrix3::new(
            0.8, 0.05, 120.0, //
            -0.02, 1.1, 80.0, //
            0.0009, -0.0004, 1.0,
        ));

        let rect = [
            Point2::new(0.0_f32, 0.0),
            Point2::new(180.0_f32, 0.0),
            Point2::new(180.0_f32, 130.0),
            Point2::new(0.0_f32, 130.0),
        ];
        let dst = rect.map(|p| ground_truth.apply(p));

        let recovered = homography_from_4pt(&rect, &dst).expect("recoverable");

        for p in [
            Point2::new(0.0_f32, 0.0),
            Point2::new(60.0, 40.0),
            Point2::new(150.0, 120.0),
        ] {
            assert_close(recovered.apply(p), ground_truth.apply(p), 1e-3);
        }
    }

    #[test]
    fn coincident_points_have_no_homography() {
        let rect = [
            Point2::new(0.0_f32, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        let dst = [Point2::new(5.0_f32, 5.0); 4];
        assert!(homography_from_4pt(&rect, &dst).is_none());
    }

    #[test]
    fn collinear_points_have_no_homography() {
        let rect = [
            Point2::new(0.0_f32, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        let dst = [
            Point2::new(0.0_f32, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(20.0, 20.0),
            Point2::new(30.0, 30.0),
        ];
        assert!(homography_from_4pt(&rect, &dst).is_none());
    }

    #[test]
    fn identity_warp_copies_pixels() {
        let mut src = RgbImage::new(4, 3);
        src.put_pixel(2, 1, [255, 10, 20]);
        let out = warp_perspective_rgb(&src.view(), Homography::new(Matrix3::identity()), 4, 3);
        assert_eq!(out, src);
    }
}
