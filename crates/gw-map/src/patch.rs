//! A single patch of the map.

use gw_core::{Position, Tick};
use gw_item::ItemInstance;

use crate::PatchCoord;

/// An `n × n` block of the infinite lattice.
///
/// `fixed` is set permanently once [`crate::PatchMap::get_fixed_neighborhood`]
/// has sealed this patch; after that the set of items with
/// `creation_time == Tick::ZERO` never changes (§3 patch invariants).
#[derive(Clone, Debug)]
pub struct Patch {
    pub coord: PatchCoord,
    pub items: Vec<ItemInstance>,
    pub fixed: bool,
}

impl Patch {
    pub fn empty(coord: PatchCoord) -> Self {
        Self {
            coord,
            items: Vec::new(),
            fixed: false,
        }
    }

    /// Items at `world_pos` that are live at `t`. Normally at most one, but
    /// the type does not enforce it directly — callers that need the
    /// single-occupant invariant check it themselves (see
    /// `gw-map::gibbs::cell_candidates`).
    pub fn live_items_at(&self, world_pos: Position, t: Tick) -> impl Iterator<Item = &ItemInstance> {
        self.items
            .iter()
            .filter(move |i| i.location == world_pos && i.is_live_at(t))
    }

    /// All items live at `t`, regardless of location.
    pub fn live_items_at_any(&self, t: Tick) -> impl Iterator<Item = &ItemInstance> {
        self.items.iter().filter(move |i| i.is_live_at(t))
    }

    /// Remove (without tombstoning) any live item at `world_pos` at `t`.
    /// Used only during initial Gibbs sampling, before the patch has any
    /// deletion history worth preserving.
    pub fn clear_cell(&mut self, world_pos: Position, t: Tick) {
        self.items
            .retain(|i| !(i.location == world_pos && i.is_live_at(t)));
    }

    /// World-space bounding box `[min, max)` for this patch.
    pub fn world_bounds(&self, patch_size: i64) -> (Position, Position) {
        let (ox, oy) = self.coord.world_origin(patch_size);
        (
            Position::new(ox, oy),
            Position::new(ox + patch_size, oy + patch_size),
        )
    }
}
