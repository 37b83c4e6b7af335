use crate::ZoneKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Item names per zone, as decided by a classifier.
///
/// The order of names inside a zone is the layout ordinal of each item.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneAssignment {
    zones: BTreeMap<ZoneKind, Vec<String>>,
}

impl ZoneAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every item in one zone; the classification fallback.
    pub fn all_in(kind: ZoneKind, names: &[String]) -> Self {
        let mut out = Self::new();
        out.extend(kind, names.iter().cloned());
        out
    }

    pub fn push(&mut self, kind: ZoneKind, name: impl Into<String>) {
        self.zones.entry(kind).or_default().push(name.into());
    }

    pub fn extend(&mut self, kind: ZoneKind, names: impl IntoIterator<Item = String>) {
        self.zones.entry(kind).or_default().extend(names);
    }

    pub fn items(&self, kind: ZoneKind) -> &[String] {
        self.zones.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Non-empty zones in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (ZoneKind, &[String])> {
        self.zones
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (*k, v.as_slice()))
    }

    pub fn item_count(&self) -> usize {
        self.zones.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}
