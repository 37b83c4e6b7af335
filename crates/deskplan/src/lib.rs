//! High-level facade crate for the `deskplan-*` workspace.
//!
//! Given a desk photo and four corner taps made on a viewport that
//! displayed it, the planner rectifies the desk surface into an upright
//! canvas, asks external services what lies on it and where each item
//! belongs, and draws one arrow per item from where it is to where it
//! should go. A later photo of the same desk can be checked against the
//! plan.
//!
//! ## Quickstart
//!
//! ```no_run
//! use deskplan::core::Viewport;
//! use deskplan::services::{Intent, PromptClassifier, PromptDetector, StaticBackend};
//! use deskplan::{DeskPhoto, PlanOutcome, PlanRequest, Planner, PlannerConfig};
//! use nalgebra::Point2;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let photo = deskplan::image_io::load_rgb("desk.jpg")?;
//! let planner = Planner::new(
//!     PromptDetector::new(StaticBackend::new(r#"[{"name": "mug", "center": [40, 30]}]"#)),
//!     PromptClassifier::new(StaticBackend::new(r#"{"Support Area": ["mug"]}"#)),
//!     PlannerConfig::default(),
//! );
//! let outcome = planner.plan(PlanRequest {
//!     photo: DeskPhoto {
//!         image: photo.view(),
//!         viewport: Viewport::new(390.0, 844.0),
//!         taps: [
//!             Point2::new(20.0, 100.0),
//!             Point2::new(370.0, 110.0),
//!             Point2::new(360.0, 700.0),
//!             Point2::new(30.0, 690.0),
//!         ],
//!     },
//!     intent: Intent::Work,
//! })?;
//! if let PlanOutcome::Planned(plan) = outcome {
//!     println!("session {}", plan.token);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `deskplan::core`: image types, viewport crop, corner ordering, rectification.
//! - `deskplan::zones`: zone layout, targets, detections, item matching.
//! - `deskplan::annotate`: arrow colors and drawing.
//! - `deskplan::services`: detector/classifier/comparator traits, prompts, reply parsing.
//! - `deskplan::image_io` (feature `image`): load and save with the `image` crate.

pub use deskplan_annotate as annotate;
pub use deskplan_core as core;
pub use deskplan_services as services;
pub use deskplan_zones as zones;

mod config;
mod pipeline;
mod session;

#[cfg(feature = "image")]
pub mod image_io;

pub use config::{ConfigError, PlannerConfig, TapScaling};
pub use pipeline::{
    rectify_photo, CheckReport, CheckRequest, DeskPhoto, DeskPlan, PlanError, PlanOutcome,
    PlanReport, PlanRequest, Planner, ZoneSummary,
};
pub use session::{SessionStore, SessionToken, StoredPlan};
