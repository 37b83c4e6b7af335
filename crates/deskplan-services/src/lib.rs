//! External collaborators of the desk planner.
//!
//! The planner needs three services it does not implement itself: an object
//! detector, an item classifier and a before/after comparator. Each is a
//! capability trait ([`Detector`], [`Classifier`], [`Comparator`]) so tests
//! can plug in deterministic fakes.
//!
//! The `Prompt*` adapters implement the traits on top of any
//! [`TextBackend`] (a multimodal text-generation endpoint). Their replies are
//! free text; all parsing goes through [`boundary`], and every service has
//! exactly one deterministic fallback in [`fallback`].

pub mod boundary;
mod backend;
mod capability;
mod error;
pub mod fallback;
mod intent;
mod prompt_adapters;
pub mod prompts;
mod transport;

pub use backend::{EncodedImage, PromptPart, StaticBackend, TextBackend};
pub use capability::{
    Classifier, ComparisonImages, ComparisonReport, Comparator, Detector, FeedbackStatus,
    ZoneFeedback,
};
pub use error::{BoundaryError, ServiceError};
pub use intent::Intent;
pub use prompt_adapters::{
    PromptClassifier, PromptComparator, PromptDetector, DEFAULT_JPEG_QUALITY,
};
pub use transport::encode_jpeg;
