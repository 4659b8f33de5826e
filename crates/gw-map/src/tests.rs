use gw_core::{Position, SimRng};
use gw_item::{IntensityFn, InteractionFn, ItemType};

use crate::{MapConfig, PatchMap};

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
fn rejects_zero_patch_size() {
    let mut cfg = banana_config();
    cfg.patch_size = 0;
    assert!(PatchMap::new(cfg).is_err());
}

#[test]
fn rejects_empty_item_catalogue() {
    let mut cfg = banana_config();
    cfg.item_types.clear();
    assert!(PatchMap::new(cfg).is_err());
}

#[test]
fn get_neighborhood_does_not_materialize() {
    let map = PatchMap::new(banana_config()).unwrap();
    let found = map.get_neighborhood(Position::new(0, 0));
    assert!(found.is_empty(), "no patch should exist before any fixing");
}

#[test]
fn get_fixed_neighborhood_marks_four_patches_fixed() {
    let map = PatchMap::new(banana_config()).unwrap();
    let mut rng = SimRng::new(0);
    let patches = map.get_fixed_neighborhood(Position::new(0, 0), &mut rng);
    assert_eq!(patches.len(), 4);
    for p in &patches {
        assert!(p.fixed);
    }
}

#[test]
fn fixed_items_stay_within_patch_bounds() {
    let map = PatchMap::new(banana_config()).unwrap();
    let mut rng = SimRng::new(1);
    let patches = map.get_fixed_neighborhood(Position::new(0, 0), &mut rng);
    for p in &patches {
        let (min, max) = p.world_bounds(map.patch_size());
        for item in &p.items {
            assert!(item.location.x >= min.x && item.location.x < max.x);
            assert!(item.location.y >= min.y && item.location.y < max.y);
        }
    }
}

#[test]
fn fixing_a_distant_region_does_not_disturb_already_fixed_patches() {
    let map = PatchMap::new(banana_config()).unwrap();
    let mut rng = SimRng::new(2);

    let first = map.get_fixed_neighborhood(Position::new(0, 0), &mut rng);
    let far_pos = Position::new(10 * 16 * 10, 0);
    let _second = map.get_fixed_neighborhood(far_pos, &mut rng);

    let first_again = map.get_neighborhood(Position::new(0, 0));
    assert_eq!(first_again.len(), 4);
    for p in &first {
        let p_again = first_again.iter().find(|q| q.coord == p.coord).unwrap();
        assert_eq!(p_again.items.len(), p.items.len());
        for item in &p.items {
            assert!(p_again.items.contains(item));
        }
    }
}

#[test]
fn patch_wire_roundtrip() {
    use gw_proto::{Decode, Encode};
    use std::io::Cursor;

    let map = PatchMap::new(banana_config()).unwrap();
    let mut rng = SimRng::new(4);
    let patches = map.get_fixed_neighborhood(Position::new(0, 0), &mut rng);
    for patch in &patches {
        let mut buf = Vec::new();
        patch.encode(&mut buf).unwrap();
        let mut cursor = Cursor::new(buf);
        let decoded = crate::Patch::decode(&mut cursor).unwrap();
        assert_eq!(decoded.coord, patch.coord);
        assert_eq!(decoded.fixed, patch.fixed);
        assert_eq!(decoded.items.len(), patch.items.len());
    }
}

#[test]
fn refixing_same_region_is_idempotent() {
    let map = PatchMap::new(banana_config()).unwrap();
    let mut rng = SimRng::new(3);
    let first = map.get_fixed_neighborhood(Position::new(0, 0), &mut rng);
    let second = map.get_fixed_neighborhood(Position::new(0, 0), &mut rng);
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.coord, b.coord);
        assert_eq!(a.items.len(), b.items.len());
    }
}
