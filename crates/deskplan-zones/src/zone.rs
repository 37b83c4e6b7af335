use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named placement region of the canvas.
///
/// Ordering follows the canonical report order: main, support, edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    #[serde(rename = "Main Work Area")]
    MainWorkArea,
    #[serde(rename = "Support Area")]
    SupportArea,
    #[serde(rename = "Edge Area")]
    EdgeArea,
}

/// Direction along which a zone spreads its targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpreadAxis {
    Horizontal,
    Vertical,
}

impl ZoneKind {
    pub const ALL: [ZoneKind; 3] = [
        ZoneKind::MainWorkArea,
        ZoneKind::SupportArea,
        ZoneKind::EdgeArea,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ZoneKind::MainWorkArea => "Main Work Area",
            ZoneKind::SupportArea => "Support Area",
            ZoneKind::EdgeArea => "Edge Area",
        }
    }

    /// Parse a display name as produced by an external classifier.
    ///
    /// Matching ignores ASCII case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(name))
    }

    /// The top strip and the main block spread items left to right; the
    /// narrow left strip stacks them top to bottom.
    pub fn spread_axis(self) -> SpreadAxis {
        match self {
            ZoneKind::EdgeArea => SpreadAxis::Vertical,
            ZoneKind::MainWorkArea | ZoneKind::SupportArea => SpreadAxis::Horizontal,
        }
    }
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Integer rectangle in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRect {
    #[serde(rename = "name")]
    pub kind: ZoneKind,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl ZoneRect {
    #[inline]
    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    /// Half-open containment test.
    pub fn contains(&self, p: Point2<f32>) -> bool {
        let (x0, y0) = (self.x as f32, self.y as f32);
        p.x >= x0 && p.y >= y0 && p.x < x0 + self.w as f32 && p.y < y0 + self.h as f32
    }

    /// True when `p` lies strictly inside, off every edge.
    pub fn contains_strictly(&self, p: Point2<f32>) -> bool {
        let (x0, y0) = (self.x as f32, self.y as f32);
        p.x > x0 && p.y > y0 && p.x < x0 + self.w as f32 && p.y < y0 + self.h as f32
    }

    pub fn overlaps(&self, other: &ZoneRect) -> bool {
        let (ax1, ay1) = (self.x as u64 + self.w as u64, self.y as u64 + self.h as u64);
        let (bx1, by1) = (other.x as u64 + other.w as u64, other.y as u64 + other.h as u64);
        (self.x as u64) < bx1
            && (other.x as u64) < ax1
            && (self.y as u64) < by1
            && (other.y as u64) < ay1
    }
}

/// Where the support strip and the edge strip end, as percentages of the
/// canvas height and width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneSplit {
    /// Height of the top support strip, percent of canvas height.
    pub support_percent: u32,
    /// Width of the left edge strip, percent of canvas width.
    pub edge_percent: u32,
}

impl Default for ZoneSplit {
    fn default() -> Self {
        Self {
            support_percent: 30,
            edge_percent: 30,
        }
    }
}

fn percent_of(len: u32, pct: u32) -> u32 {
    (len as u64 * pct.min(100) as u64 / 100) as u32
}

impl ZoneSplit {
    /// Partition a `width × height` canvas.
    ///
    /// The split lines are floored and the main block takes the remainder,
    /// so the three rectangles tile the canvas exactly for every size.
    pub fn layout(&self, width: u32, height: u32) -> ZoneLayout {
        let split_x = percent_of(width, self.edge_percent);
        let split_y = percent_of(height, self.support_percent);

        ZoneLayout {
            rects: [
                ZoneRect {
                    kind: ZoneKind::MainWorkArea,
                    x: split_x,
                    y: split_y,
                    w: width - split_x,
                    h: height - split_y,
                },
                ZoneRect {
                    kind: ZoneKind::SupportArea,
                    x: 0,
                    y: 0,
                    w: width,
                    h: split_y,
                },
                ZoneRect {
                    kind: ZoneKind::EdgeArea,
                    x: 0,
                    y: split_y,
                    w: split_x,
                    h: height - split_y,
                },
            ],
        }
    }
}

/// The three zone rectangles of one canvas, in [`ZoneKind::ALL`] order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneLayout {
    rects: [ZoneRect; 3],
}

impl ZoneLayout {
    pub fn rect(&self, kind: ZoneKind) -> ZoneRect {
        match kind {
            ZoneKind::MainWorkArea => self.rects[0],
            ZoneKind::SupportArea => self.rects[1],
            ZoneKind::EdgeArea => self.rects[2],
        }
    }

    pub fn rects(&self) -> &[ZoneRect; 3] {
        &self.rects
    }

    /// Zone containing a canvas point, if any.
    pub fn zone_at(&self, p: Point2<f32>) -> Option<ZoneKind> {
        self.rects.iter().find(|r| r.contains(p)).map(|r| r.kind)
    }
}

/// Zone layout with the default 30/70 split.
pub fn zone_layout(width: u32, height: u32) -> ZoneLayout {
    ZoneSplit::default().layout(width, height)
}
