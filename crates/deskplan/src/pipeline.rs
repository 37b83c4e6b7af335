//! End-to-end planning and checking.
//!
//! A plan request goes through: cover crop → tap mapping → corner ordering →
//! rectification → detection → bounds filtering → classification → zone
//! layout and item matching → arrow rendering, and finally stores the
//! pristine and annotated canvases under a fresh session token.
//!
//! A check request rectifies a second photo the same way and hands the
//! stored canvases plus the new one to a [`Comparator`].

use crate::config::{PlannerConfig, TapScaling};
use crate::session::{SessionStore, SessionToken, StoredPlan};
use deskplan_annotate::{arrows_for_plan, render_arrows, ArrowSpec};
use deskplan_core::{
    cover_crop_region, map_taps_to_crop, order_corners, rectify_with_limit, CropError, CropRegion,
    Rectification, RectifyError, RgbImage, RgbImageView, Viewport,
};
use deskplan_services::{
    fallback, Classifier, ComparisonImages, ComparisonReport, Comparator, Detector, Intent,
};
use deskplan_zones::{
    plan_zones, retain_in_bounds, DetectedItem, DetectionIndex, ZoneKind, ZonePlan,
};
use log::{info, warn};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(thiserror::Error, Debug)]
pub enum PlanError {
    #[error(transparent)]
    Crop(#[from] CropError),

    #[error(transparent)]
    Rectify(#[from] RectifyError),

    #[error("unknown or expired session {0}")]
    UnknownSession(SessionToken),
}

/// A photo with four corner taps made on a viewport that displayed it.
#[derive(Clone, Copy, Debug)]
pub struct DeskPhoto<'a> {
    pub image: RgbImageView<'a>,
    pub viewport: Viewport,
    /// Viewport coordinates, any order.
    pub taps: [Point2<f32>; 4],
}

#[derive(Clone, Debug)]
pub struct PlanRequest<'a> {
    pub photo: DeskPhoto<'a>,
    pub intent: Intent,
}

#[derive(Clone, Debug)]
pub struct CheckRequest<'a> {
    pub token: SessionToken,
    pub photo: DeskPhoto<'a>,
}

/// Item names that ended up in one zone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSummary {
    pub zone: ZoneKind,
    pub items: Vec<String>,
}

/// A finished plan.
#[derive(Clone, Debug)]
pub struct DeskPlan {
    pub token: SessionToken,
    pub rectification: Rectification,
    pub annotated: Arc<RgbImage>,
    /// Detections that survived the bounds check.
    pub items: Vec<DetectedItem>,
    pub plans: Vec<ZonePlan>,
    pub arrows: Vec<ArrowSpec>,
}

impl DeskPlan {
    pub fn canvas(&self) -> &RgbImage {
        &self.rectification.canvas
    }

    /// Non-empty zones with their item names, in canonical zone order.
    pub fn zone_summary(&self) -> Vec<ZoneSummary> {
        self.plans
            .iter()
            .map(|p| ZoneSummary {
                zone: p.zone.kind,
                items: p.items.iter().map(|it| it.name.clone()).collect(),
            })
            .collect()
    }

    /// Serializable digest of the plan, without pixel data.
    pub fn report(&self) -> PlanReport {
        PlanReport {
            token: self.token.to_string(),
            canvas_width: self.canvas().width,
            canvas_height: self.canvas().height,
            degenerate: self.rectification.is_degenerate(),
            zones: self.zone_summary(),
            plans: self.plans.clone(),
            arrows: self.arrows.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanReport {
    pub token: String,
    pub canvas_width: usize,
    pub canvas_height: usize,
    pub degenerate: bool,
    pub zones: Vec<ZoneSummary>,
    pub plans: Vec<ZonePlan>,
    pub arrows: Vec<ArrowSpec>,
}

#[derive(Clone, Debug)]
pub enum PlanOutcome {
    Planned(Box<DeskPlan>),
    /// Nothing usable was detected; the rectified canvas is still returned.
    NoItemsDetected { canvas: RgbImage },
}

#[derive(Clone, Debug)]
pub struct CheckReport {
    pub report: ComparisonReport,
    /// The freshly rectified "after" canvas.
    pub after: RgbImage,
}

fn map_taps(
    taps: &[Point2<f32>; 4],
    region: &CropRegion,
    viewport: Viewport,
    scaling: TapScaling,
) -> [Point2<f32>; 4] {
    match scaling {
        TapScaling::Uniform => map_taps_to_crop(taps, region.width, viewport),
        TapScaling::PerAxis => {
            let sx = region.width as f32 / viewport.width;
            let sy = region.height as f32 / viewport.height;
            taps.map(|p| Point2::new(p.x * sx, p.y * sy))
        }
    }
}

/// Crop `photo` to what its viewport showed and rectify the tapped quad,
/// with tap scaling and the canvas size limit taken from `config`.
pub fn rectify_photo(
    photo: &DeskPhoto<'_>,
    config: &PlannerConfig,
) -> Result<Rectification, PlanError> {
    let region = cover_crop_region(photo.image.width, photo.image.height, photo.viewport)?;
    let visible = photo
        .image
        .crop(region.x, region.y, region.width, region.height);
    let taps = map_taps(&photo.taps, &region, photo.viewport, config.tap_scaling);
    let corners = order_corners(&taps);
    Ok(rectify_with_limit(
        &visible.view(),
        &corners,
        config.max_canvas_pixels,
    )?)
}

/// Runs plan and check requests against injected services.
#[derive(Debug)]
pub struct Planner<D, C> {
    detector: D,
    classifier: C,
    config: PlannerConfig,
    sessions: SessionStore,
}

impl<D: Detector, C: Classifier> Planner<D, C> {
    pub fn new(detector: D, classifier: C, config: PlannerConfig) -> Self {
        let sessions = SessionStore::new(config.session_ttl());
        Self {
            detector,
            classifier,
            config,
            sessions,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Crop to what the viewport showed and rectify the tapped quad.
    pub fn rectify_photo(&self, photo: &DeskPhoto<'_>) -> Result<Rectification, PlanError> {
        rectify_photo(photo, &self.config)
    }

    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip_all, fields(intent = %req.intent))
    )]
    pub fn plan(&self, req: PlanRequest<'_>) -> Result<PlanOutcome, PlanError> {
        let rectification = self.rectify_photo(&req.photo)?;
        let canvas = &rectification.canvas;
        let (w, h) = (canvas.width, canvas.height);
        info!("rectified canvas {w}x{h}");

        let detected = fallback::recover(
            "detector",
            self.detector.detect(canvas),
            fallback::detections,
        );
        let items = retain_in_bounds(detected, w, h);
        if items.is_empty() {
            warn!("no items detected on {w}x{h} canvas");
            return Ok(PlanOutcome::NoItemsDetected {
                canvas: rectification.canvas,
            });
        }

        let names: Vec<String> = items.iter().map(|it| it.name.clone()).collect();
        let assignment = fallback::recover(
            "classifier",
            self.classifier.classify(&names, &req.intent),
            || fallback::assignment(&names),
        );

        let layout = self.config.zones.layout(w as u32, h as u32);
        let plans = plan_zones(&layout, &assignment, &DetectionIndex::new(&items));
        let arrows = arrows_for_plan(&plans, &self.config.colors, w, h);
        let annotated = Arc::new(render_arrows(canvas, &arrows, &self.config.arrows));

        let token = self.sessions.insert(StoredPlan {
            before: Arc::new(canvas.clone()),
            plan: Arc::clone(&annotated),
        });
        info!(
            "planned {} items, {} arrows, session {token}",
            items.len(),
            arrows.len()
        );

        Ok(PlanOutcome::Planned(Box::new(DeskPlan {
            token,
            rectification,
            annotated,
            items,
            plans,
            arrows,
        })))
    }

    /// Compare a new photo against the plan stored under `req.token`.
    #[cfg_attr(feature = "tracing", instrument(level = "info", skip_all))]
    pub fn check<M: Comparator>(
        &self,
        comparator: &M,
        req: CheckRequest<'_>,
    ) -> Result<CheckReport, PlanError> {
        let stored = self
            .sessions
            .get(&req.token)
            .ok_or_else(|| PlanError::UnknownSession(req.token.clone()))?;
        let after = self.rectify_photo(&req.photo)?.canvas;

        let report = fallback::recover(
            "comparator",
            comparator.compare(&ComparisonImages {
                before: &stored.before,
                plan: &stored.plan,
                after: &after,
            }),
            fallback::comparison,
        );
        info!("session {} scored {}", req.token, report.score);
        Ok(CheckReport { report, after })
    }
}
