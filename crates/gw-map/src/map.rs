//! The patch map and the "fix neighborhood" protocol (§4.3).

use std::sync::RwLock;

use gw_core::{Position, SimRng, Tick};
use gw_item::{InteractionCache, ItemType};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{MapError, MapResult};
use crate::gibbs::run_gibbs_sweeps;
use crate::{Patch, PatchCoord};

/// Static configuration needed to build a [`PatchMap`].
pub struct MapConfig {
    pub patch_size: i64,
    pub mcmc_iterations: u32,
    pub item_types: Vec<ItemType>,
}

impl MapConfig {
    fn validate(&self) -> MapResult<()> {
        if self.patch_size <= 0 {
            return Err(MapError::InvalidPatchSize(self.patch_size));
        }
        if self.mcmc_iterations == 0 {
            return Err(MapError::InvalidMcmcIterations(self.mcmc_iterations));
        }
        if self.item_types.is_empty() {
            return Err(MapError::NoItemTypes);
        }
        for ty in &self.item_types {
            ty.validate(self.item_types.len())
                .map_err(|e| MapError::ItemType(ty.name.clone(), e))?;
        }
        Ok(())
    }
}

/// The infinite lattice, realized lazily one patch at a time.
///
/// Internally a single [`RwLock`]-guarded hash map keyed by [`PatchCoord`]:
/// `get_neighborhood` runs under a read lock, `get_fixed_neighborhood`'s
/// materialize-and-sample path takes the write lock only when it actually
/// needs to extend the sampled region.
pub struct PatchMap {
    patch_size: i64,
    mcmc_iterations: u32,
    item_types: Vec<ItemType>,
    cache: InteractionCache,
    patches: RwLock<FxHashMap<PatchCoord, Patch>>,
}

impl PatchMap {
    pub fn new(config: MapConfig) -> MapResult<Self> {
        config.validate()?;
        let cache = InteractionCache::build(&config.item_types);
        Ok(Self {
            patch_size: config.patch_size,
            mcmc_iterations: config.mcmc_iterations,
            item_types: config.item_types,
            cache,
            patches: RwLock::new(FxHashMap::default()),
        })
    }

    /// Rebuild a map from a previously materialized set of patches — the
    /// snapshot reload path (§6, §8 snapshot round-trip law).
    pub fn from_patches(config: MapConfig, patches: Vec<Patch>) -> MapResult<Self> {
        let map = Self::new(config)?;
        let mut guard = map.patches.write().unwrap();
        for patch in patches {
            guard.insert(patch.coord, patch);
        }
        drop(guard);
        Ok(map)
    }

    /// Every materialized patch, in unspecified order — the snapshot save
    /// path (§6).
    pub fn all_patches(&self) -> Vec<Patch> {
        self.patches.read().unwrap().values().cloned().collect()
    }

    #[inline]
    pub fn patch_size(&self) -> i64 {
        self.patch_size
    }

    #[inline]
    pub fn item_types(&self) -> &[ItemType] {
        &self.item_types
    }

    /// The four patches whose 2×2 block contains `world_pos`, without
    /// creating or sampling anything. Patches not yet materialized are
    /// simply absent from the returned vector.
    pub fn get_neighborhood(&self, world_pos: Position) -> Vec<Patch> {
        let coords = core_quadrant(world_pos, self.patch_size);
        let guard = self.patches.read().unwrap();
        coords.iter().filter_map(|c| guard.get(c).cloned()).collect()
    }

    /// The four patches whose 2×2 block contains `world_pos`, each
    /// guaranteed `fixed`. Extends the sampled region and runs Gibbs
    /// sweeps as needed (§4.3).
    pub fn get_fixed_neighborhood(&self, world_pos: Position, rng: &mut SimRng) -> [Patch; 4] {
        let coords = core_quadrant(world_pos, self.patch_size);

        if let Some(result) = self.try_read_all_fixed(&coords) {
            return result;
        }

        let mut guard = self.patches.write().unwrap();
        // Re-check under the write lock: another thread may have fixed
        // these patches while we were waiting for the lock.
        if let Some(result) = all_fixed(&guard, &coords) {
            return result;
        }

        let needed = needed_block(&coords, &guard);
        let missing: Vec<PatchCoord> = needed
            .iter()
            .copied()
            .filter(|c| !guard.contains_key(c))
            .collect();
        for coord in missing {
            let patch = materialize(&guard, coord, self.patch_size, rng);
            guard.insert(coord, patch);
        }

        let resample: Vec<PatchCoord> = needed
            .iter()
            .copied()
            .filter(|c| !guard.get(c).map(|p| p.fixed).unwrap_or(false))
            .collect();

        debug!(?world_pos, count = resample.len(), "running gibbs sweep to fix neighborhood");

        run_gibbs_sweeps(
            &mut guard,
            &resample,
            self.patch_size,
            &self.item_types,
            &self.cache,
            self.mcmc_iterations,
            rng,
        );

        for &coord in &coords {
            guard.get_mut(&coord).unwrap().fixed = true;
        }

        all_fixed(&guard, &coords).expect("just fixed every core coord")
    }

    /// Full history (including already-deleted instances) of items ever
    /// placed at exactly `world_pos`, across whichever patch currently
    /// covers it. Empty if that patch has not been materialized yet.
    pub fn item_history_at(&self, world_pos: Position) -> Vec<gw_item::ItemInstance> {
        let (px, py) = world_pos.patch_coords(self.patch_size);
        let guard = self.patches.read().unwrap();
        guard
            .get(&PatchCoord::new(px, py))
            .map(|p| p.items.iter().filter(|i| i.location == world_pos).copied().collect())
            .unwrap_or_default()
    }

    /// Mark the live item matching `(item_type, creation_time)` at
    /// `world_pos` deleted as of `at` (§4.6 step 4). A no-op if no such live
    /// item exists, which should not happen for a caller that just read the
    /// item from `item_history_at`.
    pub fn mark_deleted(&self, world_pos: Position, item_type: u32, creation_time: Tick, at: Tick) {
        let (px, py) = world_pos.patch_coords(self.patch_size);
        let mut guard = self.patches.write().unwrap();
        if let Some(patch) = guard.get_mut(&PatchCoord::new(px, py)) {
            for item in patch.items.iter_mut() {
                if item.location == world_pos
                    && item.item_type == item_type
                    && item.creation_time == creation_time
                    && item.deletion_time.is_none()
                {
                    item.delete_at(at);
                    break;
                }
            }
        }
    }

    fn try_read_all_fixed(&self, coords: &[PatchCoord; 4]) -> Option<[Patch; 4]> {
        let guard = self.patches.read().unwrap();
        all_fixed(&guard, coords)
    }
}

fn all_fixed(map: &FxHashMap<PatchCoord, Patch>, coords: &[PatchCoord; 4]) -> Option<[Patch; 4]> {
    let mut out: [Option<Patch>; 4] = [None, None, None, None];
    for (i, c) in coords.iter().enumerate() {
        let p = map.get(c)?;
        if !p.fixed {
            return None;
        }
        out[i] = Some(p.clone());
    }
    Some(out.map(|p| p.unwrap()))
}

/// Union of the 3×3 blocks centered on each of the four core coordinates
/// that is not already fixed — up to 4×4 patches (§4.3).
fn needed_block(coords: &[PatchCoord; 4], map: &FxHashMap<PatchCoord, Patch>) -> Vec<PatchCoord> {
    let mut out = Vec::new();
    for &c in coords {
        let already_fixed = map.get(&c).map(|p| p.fixed).unwrap_or(false);
        if already_fixed {
            continue;
        }
        for n in c.block3x3() {
            if !out.contains(&n) {
                out.push(n);
            }
        }
    }
    out
}

/// The 2×2 block of patch coordinates whose quadrant contains `world_pos`.
fn core_quadrant(world_pos: Position, patch_size: i64) -> [PatchCoord; 4] {
    let (px, py) = world_pos.patch_coords(patch_size);
    let (lx, ly) = world_pos.local_coords(patch_size);
    let half = patch_size / 2;
    let dx = if lx < half { -1 } else { 1 };
    let dy = if ly < half { -1 } else { 1 };
    [
        PatchCoord::new(px, py),
        PatchCoord::new(px + dx, py),
        PatchCoord::new(px, py + dy),
        PatchCoord::new(px + dx, py + dy),
    ]
}

/// Build a freshly materialized (empty or warm-started) patch at `coord`.
///
/// If an existing neighboring patch is already present, its items are
/// copied and translated into the new patch's coordinate frame to give the
/// sampler a warm start; otherwise the new patch starts empty.
fn materialize(
    map: &FxHashMap<PatchCoord, Patch>,
    coord: PatchCoord,
    patch_size: i64,
    rng: &mut SimRng,
) -> Patch {
    let existing: Vec<&Patch> = map.values().collect();
    let Some(&source) = (!existing.is_empty()).then(|| existing[rng.gen_range(0..existing.len())])
    else {
        return Patch::empty(coord);
    };

    let dx = (coord.px - source.coord.px) * patch_size;
    let dy = (coord.py - source.coord.py) * patch_size;

    let mut patch = Patch::empty(coord);
    patch.items = source
        .items
        .iter()
        .map(|item| {
            let mut moved = *item;
            moved.location = moved.location + (dx, dy);
            moved
        })
        .collect();
    patch
}
