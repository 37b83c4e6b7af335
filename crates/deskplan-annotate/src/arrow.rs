use crate::{draw_arrow, draw_label, ZoneColors};
use deskplan_core::{Rgb, RgbImage};
use deskplan_zones::ZonePlan;
use log::debug;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// One "move this there" mark.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrowSpec {
    pub item_name: String,
    pub from: Point2<f32>,
    pub to: Point2<f32>,
    pub color: Rgb,
}

/// Stroke and label settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrowStyle {
    /// Stroke width in pixels.
    pub thickness: f32,
    /// Head stroke length as a fraction of the arrow length.
    pub tip_length: f32,
    /// Integer upscale of the 8×8 label font.
    pub label_scale: u32,
    pub label_color: Rgb,
    pub label_outline: Rgb,
    /// Label baseline offset above the arrow start.
    pub label_offset: i32,
    /// Labels never sit higher than this baseline.
    pub label_min_baseline: i32,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            thickness: 3.0,
            tip_length: 0.25,
            label_scale: 2,
            label_color: [255, 255, 255],
            label_outline: [0, 0, 0],
            label_offset: 12,
            label_min_baseline: 20,
        }
    }
}

/// Arrows for every resolved item in `plans`.
///
/// Start points are the detected centers clamped into `[0, w) × [0, h)`;
/// unresolved items produce nothing.
pub fn arrows_for_plan(
    plans: &[ZonePlan],
    colors: &ZoneColors,
    width: usize,
    height: usize,
) -> Vec<ArrowSpec> {
    let max_x = width.saturating_sub(1) as f32;
    let max_y = height.saturating_sub(1) as f32;

    plans
        .iter()
        .flat_map(|plan| {
            let color = colors.color(plan.zone.kind);
            plan.resolved().map(move |(item, m)| ArrowSpec {
                item_name: item.name.clone(),
                from: Point2::new(m.center.x.clamp(0.0, max_x), m.center.y.clamp(0.0, max_y)),
                to: item.target,
                color,
            })
        })
        .collect()
}

/// Draw `arrows` onto a copy of `canvas`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip_all, fields(arrows = arrows.len()))
)]
pub fn render_arrows(canvas: &RgbImage, arrows: &[ArrowSpec], style: &ArrowStyle) -> RgbImage {
    let mut out = canvas.clone();
    for a in arrows {
        debug!(
            "arrow {:?}: ({:.0},{:.0}) -> ({:.0},{:.0})",
            a.item_name, a.from.x, a.from.y, a.to.x, a.to.y
        );
        draw_arrow(&mut out, a.from, a.to, a.color, style.thickness, style.tip_length);
    }
    // labels last so no later arrow paints over them
    for a in arrows {
        let baseline = (a.from.y as i32 - style.label_offset).max(style.label_min_baseline);
        draw_label(
            &mut out,
            a.from.x as i32,
            baseline,
            &a.item_name,
            style.label_color,
            style.label_outline,
            style.label_scale,
        );
    }
    out
}
