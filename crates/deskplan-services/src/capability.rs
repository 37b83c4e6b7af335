use crate::{Intent, ServiceError};
use deskplan_core::RgbImage;
use deskplan_zones::{DetectedItem, ZoneAssignment};
use serde::{Deserialize, Serialize};

/// Finds named objects on a rectified canvas.
pub trait Detector {
    fn detect(&self, canvas: &RgbImage) -> Result<Vec<DetectedItem>, ServiceError>;
}

/// Sorts detected item names into zones for a given intent.
pub trait Classifier {
    fn classify(&self, items: &[String], intent: &Intent) -> Result<ZoneAssignment, ServiceError>;
}

/// Scores how well the "after" canvas follows the plan.
pub trait Comparator {
    fn compare(&self, images: &ComparisonImages<'_>) -> Result<ComparisonReport, ServiceError>;
}

impl<T: Detector + ?Sized> Detector for &T {
    fn detect(&self, canvas: &RgbImage) -> Result<Vec<DetectedItem>, ServiceError> {
        (**self).detect(canvas)
    }
}

impl<T: Classifier + ?Sized> Classifier for &T {
    fn classify(&self, items: &[String], intent: &Intent) -> Result<ZoneAssignment, ServiceError> {
        (**self).classify(items, intent)
    }
}

impl<T: Comparator + ?Sized> Comparator for &T {
    fn compare(&self, images: &ComparisonImages<'_>) -> Result<ComparisonReport, ServiceError> {
        (**self).compare(images)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ComparisonImages<'a> {
    pub before: &'a RgbImage,
    pub plan: &'a RgbImage,
    pub after: &'a RgbImage,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackStatus {
    Good,
    Warning,
    Error,
}

/// Assessment of one zone, or of the whole desk when `zone` is `"Overall"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneFeedback {
    pub zone: String,
    pub status: FeedbackStatus,
    pub message: String,
}

impl ZoneFeedback {
    pub fn new(zone: impl Into<String>, status: FeedbackStatus, message: impl Into<String>) -> Self {
        Self {
            zone: zone.into(),
            status,
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// 0..=100.
    pub score: u8,
    pub feedback: Vec<ZoneFeedback>,
}
