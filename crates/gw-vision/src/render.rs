//! Occlusion-blended local vision rendering (§4.5).

use gw_core::{Direction, Position, Tick};
use gw_item::{ItemInstance, ItemType};
use gw_map::PatchMap;

use crate::VisionParams;

/// Render the `(2V+1)²·C`-element color field around `agent_pos`, oriented
/// to `facing`.
///
/// Cells are emitted in ascending `(forward_offset, right_offset)` order,
/// each from `-V` to `V`, each contributing `dimension` color components —
/// the layout `gw-proto` expects when framing an `AgentState` (§6).
pub fn render(
    map: &PatchMap,
    item_types: &[ItemType],
    agent_pos: Position,
    facing: Direction,
    agent_color: &[f64],
    params: VisionParams,
    t: Tick,
) -> Vec<f64> {
    let v = params.range;
    let side = (2 * v + 1) as usize;
    let mut out = vec![0.0_f64; side * side * params.dimension];

    let forward = facing.unit_vector();
    let right = facing.turn_right().unit_vector();
    let half_fov = params.field_of_view / 2.0;
    let clip = params.clipping_enabled();

    let mut row = 0usize;
    for fwd in -v..=v {
        for rgt in -v..=v {
            let base = row * params.dimension;
            row += 1;

            if fwd == 0 && rgt == 0 {
                for (d, c) in out[base..base + params.dimension].iter_mut().zip(agent_color) {
                    *d = *c;
                }
                continue;
            }

            if clip && !within_cone(fwd, rgt, half_fov) {
                continue; // stays background (zeros)
            }

            let world_pos = Position::new(
                agent_pos.x + forward.0 * fwd + right.0 * rgt,
                agent_pos.y + forward.1 * fwd + right.1 * rgt,
            );

            let mut cell_items: Vec<ItemInstance> = map
                .item_history_at(world_pos)
                .into_iter()
                .filter(|i| i.is_live_at(t))
                .collect();
            cell_items.sort_by_key(|i| (i.creation_time, i.item_type));

            let cell = &mut out[base..base + params.dimension];
            for item in &cell_items {
                let Some(ty) = item_types.get(item.item_type as usize) else {
                    continue;
                };
                let occ = ty.visual_occlusion;
                for (d, s) in cell.iter_mut().zip(ty.color.iter()) {
                    *d = occ * s + (1.0 - occ) * *d;
                }
            }
        }
    }

    out
}

/// `true` if the offset `(fwd, rgt)` lies within the forward cone of
/// half-angle `half_fov`.
fn within_cone(fwd: i64, rgt: i64, half_fov: f64) -> bool {
    let angle = (rgt as f64).atan2(fwd as f64).abs();
    angle <= half_fov
}
