use gw_core::{Direction, Position};

use crate::{Action, AgentTable};

#[test]
fn add_agent_assigns_ascending_ids() {
    let table = AgentTable::new();
    let a = table.add_agent(Position::new(0, 0), Direction::Up, 1);
    let b = table.add_agent(Position::new(1, 0), Direction::Up, 1);
    assert!(a.0 < b.0);
    assert_eq!(table.ids_ascending(), vec![a, b]);
}

#[test]
fn request_action_rejects_unknown_agent() {
    let table = AgentTable::new();
    let fake = gw_core::AgentId(999);
    assert!(table.request_action(fake, Action::DoNothing).is_err());
}

#[test]
fn request_action_rejects_double_acting() {
    let table = AgentTable::new();
    let a = table.add_agent(Position::new(0, 0), Direction::Up, 1);
    table.request_action(a, Action::DoNothing).unwrap();
    assert!(table.request_action(a, Action::Move(Direction::Up)).is_err());
}

#[test]
fn all_active_requested_tracks_every_active_agent() {
    let table = AgentTable::new();
    let a = table.add_agent(Position::new(0, 0), Direction::Up, 1);
    let b = table.add_agent(Position::new(1, 0), Direction::Up, 1);
    assert!(!table.all_active_requested());

    table.request_action(a, Action::DoNothing).unwrap();
    assert!(!table.all_active_requested());

    table.request_action(b, Action::DoNothing).unwrap();
    assert!(table.all_active_requested());
}

#[test]
fn inactive_agents_do_not_block_the_tick() {
    let table = AgentTable::new();
    let a = table.add_agent(Position::new(0, 0), Direction::Up, 1);
    let b = table.add_agent(Position::new(1, 0), Direction::Up, 1);
    table.set_active(b, false).unwrap();
    table.request_action(a, Action::DoNothing).unwrap();
    assert!(table.all_active_requested());
}

#[test]
fn reset_clears_pending_action_and_state() {
    let table = AgentTable::new();
    let a = table.add_agent(Position::new(0, 0), Direction::Up, 1);
    table.request_action(a, Action::DoNothing).unwrap();
    table.reset_all_for_next_tick();
    assert!(table.request_action(a, Action::DoNothing).is_ok());
}

#[test]
fn collect_pending_actions_is_ascending_and_only_includes_requested() {
    let table = AgentTable::new();
    let a = table.add_agent(Position::new(0, 0), Direction::Up, 1);
    let b = table.add_agent(Position::new(1, 0), Direction::Up, 1);
    table.request_action(b, Action::Turn(Direction::Left)).unwrap();
    table.request_action(a, Action::DoNothing).unwrap();
    let collected = table.collect_pending_actions();
    assert_eq!(collected.len(), 2);
    assert_eq!(collected[0].0, a);
    assert_eq!(collected[1].0, b);
}

#[test]
fn agent_state_wire_roundtrip_preserves_observable_fields() {
    use gw_proto::{Decode, Encode};
    use std::io::Cursor;

    let table = AgentTable::new();
    let id = table.add_agent(Position::new(3, 4), Direction::Right, 2);
    let mut state = table.snapshot(id).unwrap();
    state.scent = vec![0.1, 0.2];
    state.vision = vec![1.0; 9];
    state.collected_items = vec![5, 9];

    let mut buf = Vec::new();
    state.encode(&mut buf).unwrap();
    let mut cursor = Cursor::new(buf);
    let decoded = gw_agent_state_decode(&mut cursor);

    assert_eq!(decoded.id, state.id);
    assert_eq!(decoded.position, state.position);
    assert_eq!(decoded.facing, state.facing);
    assert_eq!(decoded.scent, state.scent);
    assert_eq!(decoded.vision, state.vision);
    assert_eq!(decoded.collected_items, state.collected_items);
    assert_eq!(decoded.active, state.active);

    fn gw_agent_state_decode(cursor: &mut Cursor<Vec<u8>>) -> crate::AgentState {
        crate::AgentState::decode(cursor).unwrap()
    }
}
