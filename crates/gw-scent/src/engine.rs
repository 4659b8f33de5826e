//! Scent replay (§4.4).
//!
//! `compute` is a pure function of the map's item history: it holds no
//! state of its own, so a scent query is always consistent with the full
//! creation/deletion history of items, including items deleted after the
//! queried cell was last visited.

use gw_core::{Position, Tick};
use gw_item::{ItemInstance, ItemType};
use gw_map::PatchMap;

use crate::ScentParams;

/// `Σ_{τ=start}^{end} λ^(t-τ)`, collapsed to closed form instead of a
/// tick-by-tick loop.
pub(crate) fn geometric_window_sum(lambda: f64, t: u64, start: u64, end: u64) -> f64 {
    if start > end {
        return 0.0;
    }
    let n = (end - start + 1) as i32;
    if lambda.abs() < 1e-12 {
        return if end == t { 1.0 } else { 0.0 };
    }
    if (lambda - 1.0).abs() < 1e-12 {
        return n as f64;
    }
    let exp_tail = lambda.powi((t - end) as i32);
    exp_tail * (1.0 - lambda.powi(n)) / (1.0 - lambda)
}

/// `C(x,y,τ)`: the sum of `item_type.scent` over items live at `x,y` at `τ`.
fn source_term(items: &[ItemInstance], item_types: &[ItemType], tau: u64, dim: usize) -> Vec<f64> {
    let mut out = vec![0.0_f64; dim];
    for item in items {
        if !item.is_live_at(Tick(tau)) {
            continue;
        }
        let Some(ty) = item_types.get(item.item_type as usize) else {
            continue;
        };
        for (d, s) in out.iter_mut().zip(ty.scent.iter()) {
            *d += s;
        }
    }
    out
}

/// Compute the scent vector at `pos` at time `t` by replaying the full
/// lattice recurrence `S(x,y,τ+1) = λ·S(x,y,τ) + C(x,y,τ+1) + α·Σ_neighbors
/// S(neighbor,τ)` forward from `earliest` (the later of tick 0 or `t -
/// deleted_item_lifetime`), rather than only the queried cell's direct
/// neighbors.
///
/// Since each tick of the recurrence moves information at most one cell,
/// a source more than `t - earliest` cells away (Chebyshev) cannot reach
/// `pos` by `t` regardless of how many ticks are replayed — so bounding the
/// replay to a `(2R+1)` square of that radius, with out-of-square neighbors
/// treated as the zero they provably are, is exact, not an approximation.
/// Cost is `O(R^3 · dimension)` for `R = t - earliest`, matching the
/// retention-window bound the contract already requires.
pub fn compute(
    map: &PatchMap,
    item_types: &[ItemType],
    pos: Position,
    t: Tick,
    params: ScentParams,
) -> Vec<f64> {
    let dim = params.dimension;
    let earliest = t.0.saturating_sub(params.deleted_item_lifetime);
    let steps = t.0.saturating_sub(earliest);
    if steps == 0 {
        return vec![0.0; dim];
    }

    let radius = steps as i64;
    let side = (2 * radius + 1) as usize;
    let center = radius as usize;

    let items_grid: Vec<Vec<Vec<ItemInstance>>> = (0..side)
        .map(|ix| {
            let dx = ix as i64 - radius;
            (0..side)
                .map(|iy| {
                    let dy = iy as i64 - radius;
                    map.item_history_at(Position::new(pos.x + dx, pos.y + dy))
                })
                .collect()
        })
        .collect();

    let mut state = vec![vec![vec![0.0_f64; dim]; side]; side];
    for tau in (earliest + 1)..=t.0 {
        let mut next = vec![vec![vec![0.0_f64; dim]; side]; side];
        for ix in 0..side {
            for iy in 0..side {
                let c = source_term(&items_grid[ix][iy], item_types, tau, dim);
                for d in 0..dim {
                    let mut v = params.decay * state[ix][iy][d] + c[d];
                    if ix > 0 {
                        v += params.diffusion * state[ix - 1][iy][d];
                    }
                    if ix + 1 < side {
                        v += params.diffusion * state[ix + 1][iy][d];
                    }
                    if iy > 0 {
                        v += params.diffusion * state[ix][iy - 1][d];
                    }
                    if iy + 1 < side {
                        v += params.diffusion * state[ix][iy + 1][d];
                    }
                    next[ix][iy][d] = v;
                }
            }
        }
        state = next;
    }

    std::mem::take(&mut state[center][center])
}
