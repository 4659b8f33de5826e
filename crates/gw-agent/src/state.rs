//! Per-agent state and the action an agent may request each tick (§3, §4.6).

use gw_core::{AgentId, Direction, Position};

/// One of the actions an agent may request on a given tick.
///
/// Movement and turning both name an absolute world direction (not a
/// relative offset from the current facing) — the `allowed_movement_directions`
/// / `allowed_rotations` configuration arrays gate each of the four
/// directions independently for each action kind (§6).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Action {
    /// Move up to `max_steps_per_movement` cells towards `Direction`,
    /// stopping at the first blocking item. Also turns the agent to face
    /// `Direction`.
    Move(Direction),
    /// Turn to face `Direction` without moving.
    Turn(Direction),
    /// Consume the tick without moving or turning.
    DoNothing,
}

/// The per-tick lifecycle of a single agent's pending action (§4.6).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum ActionState {
    #[default]
    Idle,
    ActionRequested,
}

/// Full per-agent record.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentState {
    pub id: AgentId,
    pub position: Position,
    pub facing: Direction,
    pub scent: Vec<f64>,
    pub vision: Vec<f64>,
    pub collected_items: Vec<u64>,
    pub active: bool,
    pub action_state: ActionState,
    pub pending_action: Option<Action>,
    /// Order in which this agent's currently pending action was requested,
    /// relative to other agents this tick — the tie-break `FirstComeFirstServed`
    /// collision resolution uses (§4.6 step 3, §5). Meaningless once
    /// `action_state` resets to `Idle`.
    pub request_seq: u64,
}

impl AgentState {
    pub fn new(id: AgentId, position: Position, facing: Direction, item_type_count: usize) -> Self {
        Self {
            id,
            position,
            facing,
            scent: Vec::new(),
            vision: Vec::new(),
            collected_items: vec![0; item_type_count],
            active: true,
            action_state: ActionState::Idle,
            pending_action: None,
            request_seq: 0,
        }
    }

    /// `true` if this agent still needs to request an action this tick.
    #[inline]
    pub fn is_waiting(&self) -> bool {
        self.active && self.action_state == ActionState::Idle
    }

    /// Reset to `Idle` with no pending action, ready for the next tick.
    pub fn reset_for_next_tick(&mut self) {
        self.action_state = ActionState::Idle;
        self.pending_action = None;
    }
}
