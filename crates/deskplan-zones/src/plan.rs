use crate::{
    assign_targets, match_items, DetectionIndex, ResolvedItem, ZoneAssignment, ZoneLayout,
    ZoneRect,
};
use log::debug;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// An assigned item with its target and, when resolved, its detection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannedItem {
    pub name: String,
    pub target: Point2<f32>,
    pub matched: Option<ResolvedItem>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZonePlan {
    pub zone: ZoneRect,
    pub items: Vec<PlannedItem>,
}

impl ZonePlan {
    pub fn resolved(&self) -> impl Iterator<Item = (&PlannedItem, &ResolvedItem)> {
        self.items
            .iter()
            .filter_map(|it| it.matched.as_ref().map(|m| (it, m)))
    }
}

/// Targets and resolutions for every non-empty zone of `assignment`.
pub fn plan_zones(
    layout: &ZoneLayout,
    assignment: &ZoneAssignment,
    index: &DetectionIndex,
) -> Vec<ZonePlan> {
    match_items(assignment, index)
        .into_iter()
        .map(|zm| {
            let zone = layout.rect(zm.zone);
            let names: Vec<&str> = zm.items.iter().map(|m| m.name.as_str()).collect();
            let targets = assign_targets(&zone, &names);
            debug!(
                "{}: {} items at x={} y={} w={} h={}",
                zone.kind,
                zm.items.len(),
                zone.x,
                zone.y,
                zone.w,
                zone.h
            );
            let items = zm
                .items
                .into_iter()
                .zip(targets)
                .map(|(m, target)| PlannedItem {
                    name: m.name,
                    target,
                    matched: m.matched,
                })
                .collect();
            ZonePlan { zone, items }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{zone_layout, DetectedItem, ZoneKind};

    #[test]
    fn plans_carry_targets_and_matches() {
        let layout = zone_layout(1000, 800);
        let index = DetectionIndex::new(&[
            DetectedItem::new("pen", 900.0, 700.0),
            DetectedItem::new("stapler", 50.0, 50.0),
        ]);
        let mut a = ZoneAssignment::new();
        a.push(ZoneKind::SupportArea, "pen");
        a.push(ZoneKind::SupportArea, "stapler");
        a.push(ZoneKind::EdgeArea, "ghost");

        let plans = plan_zones(&layout, &a, &index);
        assert_eq!(plans.len(), 2);

        let support = &plans[0];
        assert_eq!(support.zone.kind, ZoneKind::SupportArea);
        assert_eq!(support.items[0].target.x.round(), 333.0);
        assert_eq!(support.items[1].target.x.round(), 667.0);
        assert_eq!(support.resolved().count(), 2);

        let edge = &plans[1];
        assert_eq!(edge.zone.kind, ZoneKind::EdgeArea);
        assert_eq!(edge.items.len(), 1);
        assert_eq!(edge.resolved().count(), 0);
    }
}
