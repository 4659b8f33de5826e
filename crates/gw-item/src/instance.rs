//! A single placed item.

use gw_core::{Position, Tick};

/// An item placed on the map.
///
/// `creation_time == Tick::ZERO` means "existed from the start of the
/// simulation." `deletion_time == None` means "never deleted." Once set,
/// `deletion_time` never changes (§3 patch invariants).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemInstance {
    pub item_type: u32,
    pub location: Position,
    pub creation_time: Tick,
    pub deletion_time: Option<Tick>,
}

impl ItemInstance {
    pub fn new(item_type: u32, location: Position, creation_time: Tick) -> Self {
        Self {
            item_type,
            location,
            creation_time,
            deletion_time: None,
        }
    }

    /// `true` if this item is present on the map at `t`.
    #[inline]
    pub fn is_live_at(&self, t: Tick) -> bool {
        self.creation_time <= t && self.deletion_time.map_or(true, |d| t <= d)
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deletion_time.is_some()
    }

    /// Mark this item deleted as of `t`. A no-op if already deleted — the
    /// caller should not attempt to delete an item twice, but this keeps
    /// deletion monotone (§3) rather than panicking mid-tick.
    pub fn delete_at(&mut self, t: Tick) {
        if self.deletion_time.is_none() {
            self.deletion_time = Some(t);
        }
    }
}
