//! Resolve classifier item names to detections.
//!
//! The classifier answers in free text, so its names drift from the
//! detector's ("red mug" vs "mug"). Resolution is:
//! 1. exact match on the lowercased, trimmed name,
//! 2. otherwise, among detections where one name contains the other, the
//!    candidate with the longest common substring wins; ties go to the
//!    earliest detection.

use crate::{DetectedItem, DetectionIndex, ZoneAssignment, ZoneKind};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Substring,
}

/// Detection an assigned name resolved to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolvedItem {
    /// Name as reported by the detector.
    pub detected_name: String,
    pub center: Point2<f32>,
    pub kind: MatchKind,
    /// Position of the detection in the index.
    pub index: usize,
}

/// One assigned name and its resolution, if any.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemMatch {
    pub name: String,
    pub matched: Option<ResolvedItem>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneMatches {
    pub zone: ZoneKind,
    pub items: Vec<ItemMatch>,
}

/// Length in chars of the longest common substring of `a` and `b`.
pub fn longest_common_substring(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // rolling DP row over b
    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];
    let mut best = 0;
    for ca in &a {
        for (j, cb) in b.iter().enumerate() {
            cur[j + 1] = if ca == cb { prev[j] + 1 } else { 0 };
            best = best.max(cur[j + 1]);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    best
}

/// Resolve a single assigned name against the index.
pub fn resolve_name(name: &str, index: &DetectionIndex) -> Option<ResolvedItem> {
    let key = name.trim().to_lowercase();

    if let Some((i, item)) = index.get(&key) {
        return Some(ResolvedItem {
            detected_name: item.name.clone(),
            center: item.center,
            kind: MatchKind::Exact,
            index: i,
        });
    }
    if key.is_empty() {
        return None;
    }

    let mut best: Option<(usize, usize, &DetectedItem)> = None;
    for (i, k, item) in index.iter() {
        if k.is_empty() || !(k.contains(key.as_str()) || key.contains(k)) {
            continue;
        }
        let score = longest_common_substring(&key, k);
        if best.is_none_or(|(s, _, _)| score > s) {
            best = Some((score, i, item));
        }
    }

    let (_, i, item) = best?;
    Some(ResolvedItem {
        detected_name: item.name.clone(),
        center: item.center,
        kind: MatchKind::Substring,
        index: i,
    })
}

/// Resolve every assigned name, zone by zone.
///
/// Unresolved names stay in their zone's list with `matched: None`.
pub fn match_items(assignment: &ZoneAssignment, index: &DetectionIndex) -> Vec<ZoneMatches> {
    assignment
        .iter()
        .map(|(zone, names)| ZoneMatches {
            zone,
            items: names
                .iter()
                .map(|name| ItemMatch {
                    name: name.clone(),
                    matched: resolve_name(name, index),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> DetectionIndex {
        DetectionIndex::new(&[
            DetectedItem::new("scissors", 165.0, 135.0),
            DetectedItem::new("mug", 400.0, 300.0),
            DetectedItem::new("laptop", 600.0, 500.0),
        ])
    }

    #[test]
    fn resolves_exact_substring_and_unresolved() {
        let mut a = ZoneAssignment::new();
        a.push(ZoneKind::SupportArea, "Scissors");
        a.push(ZoneKind::MainWorkArea, "red mug");
        a.push(ZoneKind::EdgeArea, "stapler");

        let out = match_items(&a, &index());
        let find = |zone: ZoneKind| out.iter().find(|z| z.zone == zone).expect("zone");

        let scissors = &find(ZoneKind::SupportArea).items[0];
        let m = scissors.matched.as_ref().expect("scissors resolved");
        assert_eq!(m.kind, MatchKind::Exact);
        assert_eq!(m.detected_name, "scissors");

        let mug = &find(ZoneKind::MainWorkArea).items[0];
        let m = mug.matched.as_ref().expect("mug resolved");
        assert_eq!(m.kind, MatchKind::Substring);
        assert_eq!(m.center, Point2::new(400.0, 300.0));

        let stapler = &find(ZoneKind::EdgeArea).items[0];
        assert_eq!(stapler.name, "stapler");
        assert!(stapler.matched.is_none());
    }

    #[test]
    fn longest_overlap_wins_over_iteration_order() {
        let idx = DetectionIndex::new(&[
            DetectedItem::new("pen", 1.0, 1.0),
            DetectedItem::new("pencil", 2.0, 2.0),
        ]);
        let m = resolve_name("yellow pencil", &idx).expect("resolved");
        assert_eq!(m.detected_name, "pencil");
    }

    #[test]
    fn ties_go_to_earliest_detection() {
        let idx = DetectionIndex::new(&[
            DetectedItem::new("blue cup", 1.0, 1.0),
            DetectedItem::new("red cup", 2.0, 2.0),
        ]);
        let m = resolve_name("cup", &idx).expect("resolved");
        assert_eq!(m.detected_name, "blue cup");
        assert_eq!(m.index, 0);
    }

    #[test]
    fn detected_name_inside_assigned_name_matches() {
        let m = resolve_name("Laptop computer", &index()).expect("resolved");
        assert_eq!(m.detected_name, "laptop");
    }

    #[test]
    fn blank_name_never_matches() {
        assert!(resolve_name("   ", &index()).is_none());
    }

    #[test]
    fn lcs_counts_chars() {
        assert_eq!(longest_common_substring("red mug", "mug"), 3);
        assert_eq!(longest_common_substring("abcdef", "zcdez"), 3);
        assert_eq!(longest_common_substring("", "x"), 0);
        assert_eq!(longest_common_substring("café", "fé"), 2);
    }
}
