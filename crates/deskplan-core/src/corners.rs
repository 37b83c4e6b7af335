use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Four quad corners in canonical order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Corners {
    pub top_left: Point2<f32>,
    pub top_right: Point2<f32>,
    pub bottom_right: Point2<f32>,
    pub bottom_left: Point2<f32>,
}

impl Corners {
    /// `[TL, TR, BR, BL]`.
    #[inline]
    pub fn to_array(&self) -> [Point2<f32>; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.to_array()
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite())
    }
}

fn arg_by(pts: &[Point2<f32>; 4], key: impl Fn(&Point2<f32>) -> f32, want_max: bool) -> usize {
    let mut best = 0;
    for i in 1..pts.len() {
        let (k, kb) = (key(&pts[i]), key(&pts[best]));
        // strict comparison: ties keep the earliest input point
        if (want_max && k > kb) || (!want_max && k < kb) {
            best = i;
        }
    }
    best
}

/// Order 4 points of a roughly axis-aligned convex quad as TL, TR, BR, BL.
///
/// TL minimises `x + y`, BR maximises it; TR minimises `y - x`, BL maximises
/// it. This breaks down for quads rotated near 45° or self-intersecting
/// inputs; callers are expected to tap roughly along the image axes.
pub fn order_corners(pts: &[Point2<f32>; 4]) -> Corners {
    if pts.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
        // input order, so the bad point survives to validation
        return Corners {
            top_left: pts[0],
            top_right: pts[1],
            bottom_right: pts[2],
            bottom_left: pts[3],
        };
    }

    let sum = |p: &Point2<f32>| p.x + p.y;
    let diff = |p: &Point2<f32>| p.y - p.x;

    Corners {
        top_left: pts[arg_by(pts, sum, false)],
        top_right: pts[arg_by(pts, diff, false)],
        bottom_right: pts[arg_by(pts, sum, true)],
        bottom_left: pts[arg_by(pts, diff, true)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> [Point2<f32>; 4] {
        [
            Point2::new(10.0, 10.0),
            Point2::new(100.0, 12.0),
            Point2::new(98.0, 100.0),
            Point2::new(8.0, 98.0),
        ]
    }

    #[test]
    fn already_ordered_quad_is_unchanged() {
        let pts = quad();
        let c = order_corners(&pts);
        assert_eq!(c.to_array(), pts);
    }

    #[test]
    fn every_permutation_gives_same_order() {
        let pts = quad();
        let expected = order_corners(&pts);

        let mut perms = Vec::new();
        for a in 0..4 {
            for b in 0..4 {
                for c in 0..4 {
                    for d in 0..4 {
                        let idx = [a, b, c, d];
                        let mut seen = [false; 4];
                        idx.iter().for_each(|&i| seen[i] = true);
                        if seen.iter().all(|&s| s) {
                            perms.push(idx.map(|i| pts[i]));
                        }
                    }
                }
            }
        }
        assert_eq!(perms.len(), 24);

        for p in perms {
            assert_eq!(order_corners(&p), expected, "permutation {p:?}");
        }
    }

    #[test]
    fn perspective_trapezoid_is_ordered() {
        // far edge shorter than near edge, as a desk photographed at an angle
        let pts = [
            Point2::new(420.0, 610.0),
            Point2::new(160.0, 140.0),
            Point2::new(60.0, 600.0),
            Point2::new(330.0, 150.0),
        ];
        let c = order_corners(&pts);
        assert_eq!(c.top_left, Point2::new(160.0, 140.0));
        assert_eq!(c.top_right, Point2::new(330.0, 150.0));
        assert_eq!(c.bottom_right, Point2::new(420.0, 610.0));
        assert_eq!(c.bottom_left, Point2::new(60.0, 600.0));
    }

    #[test]
    fn non_finite_corner_survives_ordering() {
        let mut pts = quad();
        pts[3].y = f32::NAN;
        let c = order_corners(&pts);
        assert!(!c.is_finite());
        assert!(c.bottom_left.y.is_nan());
    }
}
