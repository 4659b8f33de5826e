//! Single-cell Gibbs sampling over a working set of patches (§4.2).

use gw_core::{Position, SimRng, Tick};
use gw_item::{InteractionCache, ItemInstance, ItemType};
use rustc_hash::FxHashMap;

use crate::{Patch, PatchCoord};

/// Run `mcmc_iterations` sweeps of single-cell Gibbs updates over every cell
/// of every patch named in `resample_coords`.
///
/// `working` must already contain every patch in `resample_coords` plus
/// enough of their surrounding ring for `cache.max_radius()` to see real
/// neighbors rather than treating them as empty. Patches not in `working`
/// are treated as entirely empty — this only matters at the outermost edge
/// of the materialized region, which is an accepted boundary approximation
/// (see DESIGN.md's "preview stability" note for the analogous tradeoff).
pub fn run_gibbs_sweeps(
    working: &mut FxHashMap<PatchCoord, Patch>,
    resample_coords: &[PatchCoord],
    patch_size: i64,
    item_types: &[ItemType],
    cache: &InteractionCache,
    mcmc_iterations: u32,
    rng: &mut SimRng,
) {
    for _ in 0..mcmc_iterations {
        for &coord in resample_coords {
            let (ox, oy) = coord.world_origin(patch_size);
            for lx in 0..patch_size {
                for ly in 0..patch_size {
                    let world_pos = Position::new(ox + lx, oy + ly);
                    resample_cell(working, coord, world_pos, patch_size, item_types, cache, rng);
                }
            }
        }
    }
}

/// Resample the single cell at `world_pos` (known to belong to patch
/// `owner`) conditional on every other currently-materialized item.
fn resample_cell(
    working: &mut FxHashMap<PatchCoord, Patch>,
    owner: PatchCoord,
    world_pos: Position,
    patch_size: i64,
    item_types: &[ItemType],
    cache: &InteractionCache,
    rng: &mut SimRng,
) {
    let r = cache.max_radius();
    let neighbors = gather_neighbors(working, world_pos, patch_size, r);

    let k = item_types.len();
    let mut log_weights = Vec::with_capacity(k + 1);
    log_weights.push(0.0); // "no item" option

    for (candidate_type, ty) in item_types.iter().enumerate() {
        let mut w = ty.intensity_fn.evaluate();
        for &(other_type, other_pos) in &neighbors {
            if other_pos == world_pos {
                continue;
            }
            let delta = world_pos.delta_to(other_pos);
            w += ty.interaction_fns[other_type].evaluate(delta);
            // g(i,j) + g(j,i): the neighbor's own row back toward the
            // candidate type also contributes to the effective pairwise energy.
            let delta_back = other_pos.delta_to(world_pos);
            w += item_types[other_type].interaction_fns[candidate_type].evaluate(delta_back);
        }
        log_weights.push(w);
    }

    let choice = rng.categorical_from_log_weights(&log_weights);

    let patch = working.get_mut(&owner).expect("owner patch must be materialized");
    patch.clear_cell(world_pos, Tick::ZERO);
    if choice > 0 {
        patch
            .items
            .push(ItemInstance::new((choice - 1) as u32, world_pos, Tick::ZERO));
    }
}

/// Collect `(item_type, location)` for every live item within Chebyshev
/// radius `r` of `world_pos`, across whichever patches overlap that box and
/// are present in `working`.
fn gather_neighbors(
    working: &FxHashMap<PatchCoord, Patch>,
    world_pos: Position,
    patch_size: i64,
    r: i64,
) -> Vec<(usize, Position)> {
    let mut out = Vec::new();
    if r == 0 {
        return out;
    }

    let min = Position::new(world_pos.x - r, world_pos.y - r);
    let max = Position::new(world_pos.x + r, world_pos.y + r);
    let (min_px, min_py) = min.patch_coords(patch_size);
    let (max_px, max_py) = max.patch_coords(patch_size);

    for px in min_px..=max_px {
        for py in min_py..=max_py {
            let Some(patch) = working.get(&PatchCoord::new(px, py)) else {
                continue;
            };
            for item in patch.live_items_at_any(Tick::ZERO) {
                if world_pos.chebyshev_distance(item.location) <= r {
                    out.push((item.item_type as usize, item.location));
                }
            }
        }
    }
    out
}
