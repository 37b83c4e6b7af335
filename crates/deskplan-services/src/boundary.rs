//! Validation of free-text service replies.
//!
//! Replies are expected to carry JSON, possibly wrapped in markdown code
//! fences and surrounding chatter. Each parser extracts the outermost JSON
//! value of the expected kind and checks it against an explicit schema.
//! Individually malformed records are skipped with a warning; a reply with no
//! usable JSON at all is a [`BoundaryError`].

use crate::fallback::FALLBACK_SCORE;
use crate::{BoundaryError, ComparisonReport, ZoneFeedback};
use deskplan_zones::{retain_in_bounds, DetectedItem, ZoneAssignment, ZoneKind};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

/// Remove markdown code fences and surrounding whitespace.
pub fn strip_code_fences(raw: &str) -> String {
    raw.trim()
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// From the first `open` to the last `close`, inclusive.
fn json_slice<'a>(
    text: &'a str,
    open: char,
    close: char,
    expected: &'static str,
) -> Result<&'a str, BoundaryError> {
    match (text.find(open), text.rfind(close)) {
        (Some(start), Some(end)) if end > start => Ok(&text[start..=end]),
        _ => Err(BoundaryError::MissingJson { expected }),
    }
}

#[derive(Deserialize)]
struct DetectionRecord {
    name: String,
    center: [f64; 2],
}

/// Parse `[{"name": .., "center": [x, y]}, ..]` and keep only detections
/// inside a `width × height` canvas.
pub fn parse_detections(
    raw: &str,
    width: usize,
    height: usize,
) -> Result<Vec<DetectedItem>, BoundaryError> {
    let text = strip_code_fences(raw);
    let records: Vec<Value> = serde_json::from_str(json_slice(&text, '[', ']', "array")?)?;

    let mut items = Vec::with_capacity(records.len());
    for record in records {
        match serde_json::from_value::<DetectionRecord>(record) {
            Ok(r) if r.name.trim().is_empty() => warn!("skipping unnamed detection"),
            Ok(r) => items.push(DetectedItem::new(
                r.name.trim(),
                r.center[0] as f32,
                r.center[1] as f32,
            )),
            Err(e) => warn!("skipping malformed detection record: {e}"),
        }
    }
    debug!("parsed {} detection records", items.len());
    Ok(retain_in_bounds(items, width, height))
}

/// Parse `{"Main Work Area": [..], "Support Area": [..], "Edge Area": [..]}`.
///
/// Zone names match case-insensitively; unknown zones and non-string item
/// entries are dropped.
pub fn parse_assignment(raw: &str) -> Result<ZoneAssignment, BoundaryError> {
    let text = strip_code_fences(raw);
    let zones: serde_json::Map<String, Value> =
        serde_json::from_str(json_slice(&text, '{', '}', "object")?)?;

    let mut assignment = ZoneAssignment::new();
    for (zone, names) in zones {
        let Some(kind) = ZoneKind::from_name(&zone) else {
            warn!("dropping unknown zone {zone:?}");
            continue;
        };
        let Value::Array(names) = names else {
            warn!("zone {zone:?} is not a list of item names");
            continue;
        };
        assignment.extend(
            kind,
            names.into_iter().filter_map(|n| match n {
                Value::String(s) => Some(s),
                other => {
                    warn!("dropping non-string item {other} in {zone:?}");
                    None
                }
            }),
        );
    }
    Ok(assignment)
}

/// Parse `{"score": n, "feedback": [{zone, status, message}, ..]}`.
///
/// A missing or non-numeric score defaults to the fallback score; numeric
/// scores are rounded and clamped to `0..=100`.
pub fn parse_comparison(raw: &str) -> Result<ComparisonReport, BoundaryError> {
    let text = strip_code_fences(raw);
    let mut body: serde_json::Map<String, Value> =
        serde_json::from_str(json_slice(&text, '{', '}', "object")?)?;

    let score = match body.get("score").and_then(Value::as_f64) {
        Some(s) => s.clamp(0.0, 100.0).round() as u8,
        None => {
            warn!("comparison reply has no numeric score, using {FALLBACK_SCORE}");
            FALLBACK_SCORE
        }
    };

    let feedback = match body.remove("feedback") {
        Some(Value::Array(entries)) => entries
            .into_iter()
            .filter_map(|e| match serde_json::from_value::<ZoneFeedback>(e) {
                Ok(f) => Some(f),
                Err(err) => {
                    warn!("skipping malformed feedback entry: {err}");
                    None
                }
            })
            .collect(),
        _ => Vec::new(),
    };

    Ok(ComparisonReport { score, feedback })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FeedbackStatus;

    #[test]
    fn fences_and_chatter_are_ignored() {
        let raw = "Sure! Here you go:\n```json\n[{\"name\": \"mug\", \"center\": [40, 30]}]\n```\n";
        let items = parse_detections(raw, 100, 100).expect("parse");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "mug");
        assert_eq!((items[0].center.x, items[0].center.y), (40.0, 30.0));
    }

    #[test]
    fn out_of_bounds_and_malformed_detections_are_dropped() {
        let raw = r#"[
            {"name": "mug", "center": [40, 30]},
            {"name": "lamp", "center": [100, 10]},
            {"name": "pen", "center": [-1, 10]},
            {"name": "ruler"},
            {"name": "  ", "center": [1, 1]},
            {"name": "book", "center": [99.5, 99]}
        ]"#;
        let items = parse_detections(raw, 100, 100).expect("parse");
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["mug", "book"]);
    }

    #[test]
    fn missing_json_is_an_error() {
        assert!(matches!(
            parse_detections("I could not see anything.", 10, 10),
            Err(BoundaryError::MissingJson { expected: "array" })
        ));
        assert!(matches!(
            parse_assignment("[1, 2]"),
            Err(BoundaryError::MissingJson { expected: "object" })
        ));
        assert!(matches!(
            parse_comparison("{score: high}"),
            Err(BoundaryError::Json(_))
        ));
    }

    #[test]
    fn unknown_zones_are_dropped() {
        let raw = r#"```json
        {"Main Work Area": ["laptop"], "support area": ["pen", 3], "Shelf": ["book"]}
        ```"#;
        let a = parse_assignment(raw).expect("parse");
        assert_eq!(a.items(ZoneKind::MainWorkArea), ["laptop"]);
        assert_eq!(a.items(ZoneKind::SupportArea), ["pen"]);
        assert!(a.items(ZoneKind::EdgeArea).is_empty());
        assert_eq!(a.item_count(), 2);
    }

    #[test]
    fn comparison_defaults_and_clamps_score() {
        let r = parse_comparison(r#"{"feedback": []}"#).expect("parse");
        assert_eq!(r.score, FALLBACK_SCORE);

        let r = parse_comparison(r#"{"score": 140.2}"#).expect("parse");
        assert_eq!(r.score, 100);
        assert!(r.feedback.is_empty());

        let r = parse_comparison(r#"{"score": 72.6}"#).expect("parse");
        assert_eq!(r.score, 73);
    }

    #[test]
    fn comparison_keeps_valid_feedback_entries() {
        let raw = r#"{"score": 90, "feedback": [
            {"zone": "Support Area", "status": "good", "message": "Tidy"},
            {"zone": "Edge Area", "status": "meh", "message": "?"},
            {"zone": "Overall", "status": "warning", "message": "Almost"}
        ]}"#;
        let r = parse_comparison(raw).expect("parse");
        assert_eq!(r.score, 90);
        assert_eq!(r.feedback.len(), 2);
        assert_eq!(r.feedback[1].status, FeedbackStatus::Warning);
    }
}
