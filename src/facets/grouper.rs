//! Per-facet point groups.
//!
//! Groups live in a dense arena indexed by label value and keep the order in
//! which labels were first encountered. A corner bordering several facets is
//! appended to each of their groups.
use crate::image::labels::LABEL_COUNT;
use crate::image::FacetLabel;
use crate::types::{FacetCornerPoint, FacetGroup};
use nalgebra::Point3;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
#[serde(transparent)]
pub struct FacetGroups {
    groups: Vec<FacetGroup>,
    #[serde(skip)]
    slots: Vec<Option<usize>>,
}

impl Default for FacetGroups {
    fn default() -> Self {
        Self::new()
    }
}

impl FacetGroups {
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            slots: vec![None; LABEL_COUNT],
        }
    }

    /// Append `point` to the group of `label`, creating it on first use.
    pub fn push(&mut self, label: FacetLabel, point: Point3<f64>) {
        let slot = &mut self.slots[label as usize];
        let idx = match *slot {
            Some(idx) => idx,
            None => {
                self.groups.push(FacetGroup {
                    label,
                    points: Vec::new(),
                });
                *slot = Some(self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[idx].points.push(point);
    }

    pub fn get(&self, label: FacetLabel) -> Option<&FacetGroup> {
        self.slots[label as usize].map(|idx| &self.groups[idx])
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in first-seen label order.
    pub fn iter(&self) -> impl Iterator<Item = &FacetGroup> {
        self.groups.iter()
    }

    pub fn labels(&self) -> Vec<FacetLabel> {
        self.groups.iter().map(|g| g.label).collect()
    }
}

/// Build one group per label from the corner points' label sets.
pub fn group_facets(points: &[FacetCornerPoint]) -> FacetGroups {
    let mut groups = FacetGroups::new();
    for point in points {
        for (i, &label) in point.labels.iter().enumerate() {
            if point.labels[..i].contains(&label) {
                continue;
            }
            groups.push(label, point.position);
        }
    }
    groups
}
