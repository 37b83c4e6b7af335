use crate::{
    boundary, encode_jpeg, prompts, Classifier, ComparisonImages, ComparisonReport, Comparator,
    Detector, Intent, PromptPart, ServiceError, TextBackend,
};
use deskplan_core::RgbImage;
use deskplan_zones::{DetectedItem, ZoneAssignment};
use log::debug;

#[cfg(feature = "tracing")]
use tracing::instrument;

pub const DEFAULT_JPEG_QUALITY: u8 = 95;

fn excerpt(reply: &str) -> &str {
    match reply.char_indices().nth(500) {
        Some((i, _)) => &reply[..i],
        None => reply,
    }
}

/// [`Detector`] asking a text backend for object centers.
#[derive(Clone, Debug)]
pub struct PromptDetector<B> {
    backend: B,
    jpeg_quality: u8,
}

impl<B> PromptDetector<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }
}

impl<B: TextBackend> Detector for PromptDetector<B> {
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all))]
    fn detect(&self, canvas: &RgbImage) -> Result<Vec<DetectedItem>, ServiceError> {
        let parts = [
            PromptPart::Text(prompts::detection_prompt(canvas.width, canvas.height)),
            PromptPart::Image(encode_jpeg(canvas, self.jpeg_quality)?),
        ];
        let reply = self.backend.generate(&parts)?;
        debug!("detector reply: {}", excerpt(&reply));
        Ok(boundary::parse_detections(
            &reply,
            canvas.width,
            canvas.height,
        )?)
    }
}

/// [`Classifier`] asking a text backend for a zone assignment.
#[derive(Clone, Debug)]
pub struct PromptClassifier<B> {
    backend: B,
}

impl<B> PromptClassifier<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }
}

impl<B: TextBackend> Classifier for PromptClassifier<B> {
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all))]
    fn classify(&self, items: &[String], intent: &Intent) -> Result<ZoneAssignment, ServiceError> {
        let parts = [PromptPart::Text(prompts::classification_prompt(intent, items))];
        let reply = self.backend.generate(&parts)?;
        debug!("classifier reply: {}", excerpt(&reply));
        Ok(boundary::parse_assignment(&reply)?)
    }
}

/// [`Comparator`] sending before, plan and after images to a text backend.
#[derive(Clone, Debug)]
pub struct PromptComparator<B> {
    backend: B,
    jpeg_quality: u8,
}

impl<B> PromptComparator<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }
}

impl<B: TextBackend> Comparator for PromptComparator<B> {
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all))]
    fn compare(&self, images: &ComparisonImages<'_>) -> Result<ComparisonReport, ServiceError> {
        let [before, plan, after] = prompts::COMPARISON_CAPTIONS;
        let parts = [
            PromptPart::Text(before.to_string()),
            PromptPart::Image(encode_jpeg(images.before, self.jpeg_quality)?),
            PromptPart::Text(plan.to_string()),
            PromptPart::Image(encode_jpeg(images.plan, self.jpeg_quality)?),
            PromptPart::Text(after.to_string()),
            PromptPart::Image(encode_jpeg(images.after, self.jpeg_quality)?),
            PromptPart::Text(prompts::COMPARISON_PROMPT.to_string()),
        ];
        let reply = self.backend.generate(&parts)?;
        debug!("comparator reply: {}", excerpt(&reply));
        Ok(boundary::parse_comparison(&reply)?)
    }
}
