use log::warn;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A named object reported by the detector, centered in canvas pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectedItem {
    pub name: String,
    pub center: Point2<f32>,
}

impl DetectedItem {
    pub fn new(name: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            name: name.into(),
            center: Point2::new(x, y),
        }
    }

    /// `0 <= x < width` and `0 <= y < height`.
    pub fn is_within(&self, width: usize, height: usize) -> bool {
        let (x, y) = (self.center.x, self.center.y);
        x.is_finite()
            && y.is_finite()
            && x >= 0.0
            && y >= 0.0
            && x < width as f32
            && y < height as f32
    }
}

/// Drop detections whose center falls outside a `width × height` canvas.
pub fn retain_in_bounds(items: Vec<DetectedItem>, width: usize, height: usize) -> Vec<DetectedItem> {
    items
        .into_iter()
        .filter(|it| {
            let keep = it.is_within(width, height);
            if !keep {
                warn!(
                    "dropping detection {:?}: center ({}, {}) outside {}x{} canvas",
                    it.name, it.center.x, it.center.y, width, height
                );
            }
            keep
        })
        .collect()
}

/// Detections keyed by lowercased, trimmed name, in first-seen order.
///
/// A repeated name keeps its first position but takes the later record.
#[derive(Clone, Debug, Default)]
pub struct DetectionIndex {
    entries: Vec<(String, DetectedItem)>,
}

impl DetectionIndex {
    pub fn new(items: &[DetectedItem]) -> Self {
        let mut entries: Vec<(String, DetectedItem)> = Vec::with_capacity(items.len());
        for item in items {
            let key = item.name.trim().to_lowercase();
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = item.clone(),
                None => entries.push((key, item.clone())),
            }
        }
        Self { entries }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact lookup by an already lowercased key.
    pub fn get(&self, key: &str) -> Option<(usize, &DetectedItem)> {
        self.entries
            .iter()
            .position(|(k, _)| k == key)
            .map(|i| (i, &self.entries[i].1))
    }

    /// `(index, lowercased key, item)` in stable order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, &DetectedItem)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, (k, v))| (i, k.as_str(), v))
    }
}
