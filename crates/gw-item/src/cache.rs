//! Precomputed interaction-radius lookup.
//!
//! Gibbs updates need, for a pair of item types, the largest distance at
//! which their interaction can be nonzero — otherwise every candidate cell
//! would have to scan the entire map for neighbors. Computed once when the
//! catalogue is built and reused for the life of the simulator.

use crate::ItemType;

/// `radius[i][j]` = the support radius of type `i`'s interaction with `j`.
pub struct InteractionCache {
    radius: Vec<Vec<i64>>,
    max_radius: i64,
}

impl InteractionCache {
    pub fn build(item_types: &[ItemType]) -> Self {
        let n = item_types.len();
        let mut radius = vec![vec![0i64; n]; n];
        let mut max_radius = 0i64;
        for (i, ty) in item_types.iter().enumerate() {
            for j in 0..n {
                let r = ty.support_radius_against(j);
                radius[i][j] = r;
                max_radius = max_radius.max(r);
            }
        }
        Self { radius, max_radius }
    }

    #[inline]
    pub fn radius(&self, type_i: usize, type_j: usize) -> i64 {
        self.radius[type_i][type_j]
    }

    /// The largest interaction radius across the whole catalogue — the
    /// distance a Gibbs sweep must look outward from any cell to find every
    /// item that could influence it.
    #[inline]
    pub fn max_radius(&self) -> i64 {
        self.max_radius
    }
}
