use gw_core::{Position, Tick};
use gw_item::{IntensityFn, InteractionFn, ItemType};
use gw_map::{MapConfig, PatchMap};

use crate::engine::geometric_window_sum;
use crate::{compute, ScentParams};

#[test]
fn geometric_sum_single_tick_matches_tick_by_tick() {
    // A single surviving tick contributes exactly lambda^(t - end).
    let v = geometric_window_sum(0.5, 10, 10, 10);
    assert!((v - 1.0).abs() < 1e-9);

    let v = geometric_window_sum(0.5, 10, 9, 9);
    assert!((v - 0.5).abs() < 1e-9);
}

#[test]
fn geometric_sum_matches_naive_loop() {
    let lambda = 0.4;
    let t = 20u64;
    let start = 5u64;
    let end = 15u64;
    let naive: f64 = (start..=end).map(|tau| lambda.powi((t - tau) as i32)).sum();
    let closed = geometric_window_sum(lambda, t, start, end);
    assert!((naive - closed).abs() < 1e-9, "naive={naive} closed={closed}");
}

#[test]
fn geometric_sum_empty_range_is_zero() {
    assert_eq!(geometric_window_sum(0.5, 10, 12, 11), 0.0);
}

#[test]
fn zero_decay_only_counts_the_current_tick() {
    assert_eq!(geometric_window_sum(0.0, 10, 0, 10), 1.0);
    assert_eq!(geometric_window_sum(0.0, 10, 0, 9), 0.0);
}

fn banana_config() -> MapConfig {
    MapConfig {
        patch_size: 16,
        mcmc_iterations: 2,
        item_types: vec![ItemType {
            name: "banana".to_string(),
            scent: vec![0.0, 1.0, 0.0],
            color: vec![0.0, 1.0, 0.0],
            required_item_counts: vec![0],
            required_item_costs: vec![0],
            blocks_movement: false,
            visual_occlusion: 0.0,
            intensity_fn: IntensityFn::Constant(-2.0),
            interaction_fns: vec![InteractionFn::piecewise_box(2, 6, 1.0, -1.0)],
        }],
    }
}

#[test]
fn scent_of_unmaterialized_cell_is_zero() {
    let map = PatchMap::new(banana_config()).unwrap();
    let params = ScentParams {
        dimension: 3,
        decay: 0.4,
        diffusion: 0.14,
        deleted_item_lifetime: 100,
    };
    let scent = compute(&map, map.item_types(), Position::new(0, 0), Tick(5), params);
    assert_eq!(scent, vec![0.0, 0.0, 0.0]);
}

#[test]
fn scent_reaches_two_cells_away_after_enough_hops() {
    // Item at distance 2 created at t=0, never deleted. The diffusion term
    // needs two ticks to reach the origin at all, so by t=3 it should carry
    // a small but nonzero contribution: lambda=0.4, alpha=0.14 gives
    // S(origin,3) ≈ 0.0196, not the 0 a direct-neighbors-only replay would
    // return.
    let mut config = banana_config();
    config.item_types[0].scent = vec![1.0];
    let mut patch = gw_map::Patch::empty(gw_map::PatchCoord::new(0, 0));
    patch.items.push(gw_item::ItemInstance::new(0, Position::new(2, 0), Tick(0)));
    let map = PatchMap::from_patches(config, vec![patch]).unwrap();

    let params = ScentParams {
        dimension: 1,
        decay: 0.4,
        diffusion: 0.14,
        deleted_item_lifetime: 100,
    };
    let scent = compute(&map, map.item_types(), Position::new(0, 0), Tick(3), params);
    assert!((scent[0] - 0.0196).abs() < 1e-9, "got {scent:?}");
}

#[test]
fn scent_has_configured_dimension() {
    let map = PatchMap::new(banana_config()).unwrap();
    let params = ScentParams {
        dimension: 3,
        decay: 0.4,
        diffusion: 0.14,
        deleted_item_lifetime: 100,
    };
    let scent = compute(&map, map.item_types(), Position::new(100, 100), Tick(0), params);
    assert_eq!(scent.len(), 3);
}
