//! The static per-item-type catalogue entry.

use crate::{IntensityFn, InteractionFn, ItemError};

/// A single item type's static record (§3).
///
/// `interaction_fns[j]` is the interaction function applied when this type
/// and type `j` co-occur; the length must equal the catalogue's item count,
/// enforced by [`ItemType::validate`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemType {
    pub name: String,
    pub scent: Vec<f64>,
    pub color: Vec<f64>,
    pub required_item_counts: Vec<u32>,
    pub required_item_costs: Vec<u32>,
    pub blocks_movement: bool,
    pub visual_occlusion: f64,
    pub intensity_fn: IntensityFn,
    pub interaction_fns: Vec<InteractionFn>,
}

impl ItemType {
    /// Check the internal consistency required before this type can join a
    /// catalogue of `item_type_count` types.
    pub fn validate(&self, item_type_count: usize) -> Result<(), ItemError> {
        if !(0.0..=1.0).contains(&self.visual_occlusion) {
            return Err(ItemError::InvalidOcclusion(self.name.clone(), self.visual_occlusion));
        }
        if self.interaction_fns.len() != item_type_count {
            return Err(ItemError::InteractionTableSizeMismatch {
                name: self.name.clone(),
                expected: item_type_count,
                got: self.interaction_fns.len(),
            });
        }
        if self.required_item_counts.len() != item_type_count
            || self.required_item_costs.len() != item_type_count
        {
            return Err(ItemError::RequirementTableSizeMismatch(self.name.clone()));
        }
        Ok(())
    }

    /// Largest Chebyshev radius across this type's interaction row; bounds
    /// how far a Gibbs candidate at this type must look for neighbors of a
    /// given other type.
    pub fn support_radius_against(&self, other_type: usize) -> i64 {
        self.interaction_fns
            .get(other_type)
            .map(InteractionFn::support_radius)
            .unwrap_or(0)
    }
}
