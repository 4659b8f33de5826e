use std::f64::consts::PI;

use gw_core::{Direction, Position, Tick};
use gw_item::{IntensityFn, InteractionFn, ItemType};
use gw_map::{MapConfig, PatchMap};

use crate::{render, VisionParams};

fn empty_map() -> PatchMap {
    PatchMap::new(MapConfig {
        patch_size: 16,
        mcmc_iterations: 1,
        item_types: vec![ItemType {
            name: "banana".to_string(),
            scent: vec![0.0, 1.0, 0.0],
            color: vec![0.0, 1.0, 0.0],
            required_item_counts: vec![0],
            required_item_costs: vec![0],
            blocks_movement: false,
            visual_occlusion: 1.0,
            intensity_fn: IntensityFn::Constant(-100.0),
            interaction_fns: vec![InteractionFn::Zero],
        }],
    })
    .unwrap()
}

#[test]
fn output_has_expected_length() {
    let map = empty_map();
    let params = VisionParams {
        range: 2,
        dimension: 3,
        field_of_view: std::f64::consts::TAU,
    };
    let field = render(
        &map,
        map.item_types(),
        Position::new(0, 0),
        Direction::Up,
        &[1.0, 1.0, 1.0],
        params,
        Tick(0),
    );
    let side = 2 * 2 + 1;
    assert_eq!(field.len(), side * side * 3);
}

#[test]
fn agent_cell_renders_agent_color() {
    let map = empty_map();
    let params = VisionParams {
        range: 1,
        dimension: 3,
        field_of_view: std::f64::consts::TAU,
    };
    let field = render(
        &map,
        map.item_types(),
        Position::new(0, 0),
        Direction::Up,
        &[0.2, 0.4, 0.6],
        params,
        Tick(0),
    );
    // Center cell is at row index (2V+1)*V + V for a (2V+1)x(2V+1) grid.
    let side = 2 * 1 + 1;
    let center_row = side / 2 * side + side / 2;
    let base = center_row * 3;
    assert_eq!(&field[base..base + 3], &[0.2, 0.4, 0.6]);
}

#[test]
fn fov_clipping_blanks_cells_outside_the_forward_cone() {
    let map = empty_map();
    let narrow = VisionParams {
        range: 3,
        dimension: 3,
        field_of_view: PI / 2.0, // 90 degrees: rgt == fwd is right at the edge
    };
    let full = VisionParams {
        range: 3,
        dimension: 3,
        field_of_view: std::f64::consts::TAU,
    };
    let narrow_field = render(
        &map,
        map.item_types(),
        Position::new(0, 0),
        Direction::Up,
        &[1.0, 1.0, 1.0],
        narrow,
        Tick(0),
    );
    let full_field = render(
        &map,
        map.item_types(),
        Position::new(0, 0),
        Direction::Up,
        &[1.0, 1.0, 1.0],
        full,
        Tick(0),
    );
    assert_eq!(narrow_field.len(), full_field.len());
}

#[test]
fn revisiting_same_cell_without_rotation_is_stable() {
    let map = empty_map();
    let params = VisionParams {
        range: 2,
        dimension: 3,
        field_of_view: std::f64::consts::TAU,
    };
    let a = render(
        &map,
        map.item_types(),
        Position::new(5, 5),
        Direction::Right,
        &[1.0, 0.0, 0.0],
        params,
        Tick(0),
    );
    let b = render(
        &map,
        map.item_types(),
        Position::new(5, 5),
        Direction::Right,
        &[1.0, 0.0, 0.0],
        params,
        Tick(0),
    );
    assert_eq!(a, b);
}
