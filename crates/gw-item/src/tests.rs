use gw_core::{Position, Tick};

use crate::{IntensityFn, InteractionFn, ItemInstance, ItemType, InteractionCache};

fn banana() -> ItemType {
    ItemType {
        name: "banana".to_string(),
        scent: vec![0.0, 1.0, 0.0],
        color: vec![0.0, 1.0, 0.0],
        required_item_counts: vec![0],
        required_item_costs: vec![0],
        blocks_movement: false,
        visual_occlusion: 0.0,
        intensity_fn: IntensityFn::Constant(-5.3),
        interaction_fns: vec![InteractionFn::piecewise_box(10, 200, 0.0, -6.0)],
    }
}

#[test]
fn validate_accepts_matching_table_sizes() {
    assert!(banana().validate(1).is_ok());
}

#[test]
fn validate_rejects_wrong_interaction_table_size() {
    let mut b = banana();
    b.interaction_fns = vec![];
    assert!(b.validate(1).is_err());
}

#[test]
fn piecewise_box_zero_at_origin() {
    let g = InteractionFn::piecewise_box(10, 200, 1.0, 2.0);
    assert_eq!(g.evaluate((0, 0)), 0.0);
    assert_eq!(g.evaluate((5, 0)), 1.0);
    assert_eq!(g.evaluate((50, 0)), 2.0);
    assert_eq!(g.evaluate((500, 0)), 0.0);
}

#[test]
fn cross_is_axis_aligned_only() {
    let g = InteractionFn::Cross { radius: 3, value: 5.0 };
    assert_eq!(g.evaluate((2, 0)), 5.0);
    assert_eq!(g.evaluate((0, -3)), 5.0);
    assert_eq!(g.evaluate((1, 1)), 0.0);
    assert_eq!(g.evaluate((4, 0)), 0.0);
    assert_eq!(g.evaluate((0, 0)), 0.0);
}

#[test]
fn interaction_cache_reports_max_radius() {
    let cache = InteractionCache::build(&[banana()]);
    assert_eq!(cache.radius(0, 0), 200);
    assert_eq!(cache.max_radius(), 200);
}

#[test]
fn item_instance_liveness_window() {
    let mut item = ItemInstance::new(0, Position::new(0, 0), Tick(5));
    assert!(!item.is_live_at(Tick(4)));
    assert!(item.is_live_at(Tick(5)));
    assert!(item.is_live_at(Tick(1000)));

    item.delete_at(Tick(20));
    assert!(item.is_live_at(Tick(20)));
    assert!(!item.is_live_at(Tick(21)));

    // Deleting twice does not move the deletion time.
    item.delete_at(Tick(30));
    assert_eq!(item.deletion_time, Some(Tick(20)));
}

#[test]
fn item_instance_wire_roundtrip() {
    use gw_proto::{Decode, Encode};
    use std::io::Cursor;

    for item in [
        ItemInstance::new(3, Position::new(-1, 2), Tick(0)),
        {
            let mut i = ItemInstance::new(1, Position::new(5, 5), Tick(10));
            i.delete_at(Tick(20));
            i
        },
    ] {
        let mut buf = Vec::new();
        item.encode(&mut buf).unwrap();
        let mut cursor = Cursor::new(buf);
        assert_eq!(ItemInstance::decode(&mut cursor).unwrap(), item);
    }
}

#[test]
fn item_type_wire_roundtrip() {
    use gw_proto::{Decode, Encode};
    use std::io::Cursor;

    let ty = banana();
    let mut buf = Vec::new();
    ty.encode(&mut buf).unwrap();
    let mut cursor = Cursor::new(buf);
    assert_eq!(ItemType::decode(&mut cursor).unwrap(), ty);
}
