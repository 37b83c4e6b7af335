//! Evenly spaced target points inside a zone.

use crate::{SpreadAxis, ZoneRect};
use nalgebra::Point2;

/// Target for item `index` of `count` in `zone`.
///
/// Along the zone's spread axis the item sits at `(index + 1) / (count + 1)`
/// of the extent; across it, at the midline. For `count >= 1` this keeps
/// every point off the zone boundary.
pub fn target_point(zone: &ZoneRect, index: usize, count: usize) -> Point2<f32> {
    let (x, y) = (zone.x as f64, zone.y as f64);
    let (w, h) = (zone.w as f64, zone.h as f64);
    let t = (index + 1) as f64 / (count + 1) as f64;

    let (px, py) = match zone.kind.spread_axis() {
        SpreadAxis::Horizontal => (x + w * t, y + h / 2.0),
        SpreadAxis::Vertical => (x + w / 2.0, y + h * t),
    };
    Point2::new(px as f32, py as f32)
}

/// Targets for an ordered list of items assigned to `zone`, one per item.
pub fn assign_targets<S: AsRef<str>>(zone: &ZoneRect, items: &[S]) -> Vec<Point2<f32>> {
    let n = items.len();
    (0..n).map(|i| target_point(zone, i, n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{zone_layout, ZoneKind};

    #[test]
    fn support_strip_spreads_horizontally() {
        let zone = ZoneRect {
            kind: ZoneKind::SupportArea,
            x: 0,
            y: 0,
            w: 1000,
            h: 240,
        };
        let pts = assign_targets(&zone, &["pen", "stapler"]);
        let rounded: Vec<(i32, i32)> = pts
            .iter()
            .map(|p| (p.x.round() as i32, p.y.round() as i32))
            .collect();
        assert_eq!(rounded, vec![(333, 120), (667, 120)]);
    }

    #[test]
    fn edge_strip_spreads_vertically() {
        let layout = zone_layout(1000, 800);
        let zone = layout.rect(ZoneKind::EdgeArea);
        let pts = assign_targets(&zone, &["a", "b", "c"]);
        for p in &pts {
            approx::assert_abs_diff_eq!(p.x, 150.0);
        }
        approx::assert_abs_diff_eq!(pts[0].y, 240.0 + 140.0);
        approx::assert_abs_diff_eq!(pts[1].y, 240.0 + 280.0);
        approx::assert_abs_diff_eq!(pts[2].y, 240.0 + 420.0);
    }

    #[test]
    fn targets_are_distinct_and_interior() {
        for (w, h) in [(1000u32, 800u32), (37, 23), (5, 5), (640, 2000)] {
            let layout = zone_layout(w, h);
            for zone in layout.rects() {
                if zone.w == 0 || zone.h == 0 {
                    continue;
                }
                for n in 1..=12usize {
                    let names: Vec<String> = (0..n).map(|i| format!("item{i}")).collect();
                    let pts = assign_targets(zone, &names);
                    assert_eq!(pts.len(), n);
                    for (i, p) in pts.iter().enumerate() {
                        assert!(
                            zone.contains_strictly(*p),
                            "{p:?} not inside {zone:?} (n={n})"
                        );
                        for q in &pts[i + 1..] {
                            assert_ne!(p, q, "duplicate target in {zone:?} (n={n})");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn no_items_no_targets() {
        let zone = zone_layout(100, 100).rect(ZoneKind::MainWorkArea);
        assert!(assign_targets::<&str>(&zone, &[]).is_empty());
    }
}
