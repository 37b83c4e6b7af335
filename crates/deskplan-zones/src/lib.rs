//! Zone layout and item matching on a rectified desk canvas.
//!
//! This crate covers everything that happens after rectification and
//! before drawing:
//! - splitting the canvas into three fixed zones ([`ZoneSplit::layout`]),
//! - spreading target points for the items assigned to a zone,
//! - validating detector output against the canvas bounds,
//! - resolving classifier item names to detections ([`match_items`]),
//! - combining the above into per-zone plans ([`plan_zones`]).
//!
//! It performs no detection or classification itself; those come from the
//! capability traits in `deskplan-services`.

mod assignment;
mod detection;
mod matcher;
mod plan;
mod targets;
mod zone;

pub use assignment::ZoneAssignment;
pub use detection::{retain_in_bounds, DetectedItem, DetectionIndex};
pub use matcher::{
    longest_common_substring, match_items, resolve_name, ItemMatch, MatchKind, ResolvedItem,
    ZoneMatches,
};
pub use plan::{plan_zones, PlannedItem, ZonePlan};
pub use targets::{assign_targets, target_point};
pub use zone::{zone_layout, SpreadAxis, ZoneKind, ZoneLayout, ZoneRect, ZoneSplit};
