//! The simulator's agent table (§4.6, §5).
//!
//! Agents are kept in a `BTreeMap<AgentId, Arc<Mutex<AgentState>>>` behind a
//! single `RwLock`: the map's natural ascending key order gives tick
//! execution its required lock-acquisition order for free, and each
//! agent's state has its own mutex so concurrent `request_action` calls
//! from different connections never contend with each other, only with a
//! tick in progress for that specific agent.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use gw_core::{AgentId, Direction, Position};

use crate::error::{AgentError, AgentResult};
use crate::state::{Action, ActionState, AgentState};

pub struct AgentTable {
    next_id: AtomicU64,
    next_request_seq: AtomicU64,
    agents: RwLock<BTreeMap<AgentId, Arc<Mutex<AgentState>>>>,
}

impl Default for AgentTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentTable {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            next_request_seq: AtomicU64::new(0),
            agents: RwLock::new(BTreeMap::new()),
        }
    }

    /// Add a new agent and return its freshly allocated id.
    pub fn add_agent(&self, position: Position, facing: Direction, item_type_count: usize) -> AgentId {
        let id = AgentId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let state = AgentState::new(id, position, facing, item_type_count);
        self.agents.write().unwrap().insert(id, Arc::new(Mutex::new(state)));
        id
    }

    /// Rebuild a table from previously snapshotted states (§6 snapshot
    /// reload path), preserving each agent's id and resuming id allocation
    /// above the highest one seen.
    pub fn from_states(states: Vec<AgentState>) -> Self {
        let next_id = states.iter().map(|s| s.id.0).max().map(|m| m + 1).unwrap_or(0);
        let mut agents = BTreeMap::new();
        for state in states {
            agents.insert(state.id, Arc::new(Mutex::new(state)));
        }
        Self {
            next_id: AtomicU64::new(next_id),
            next_request_seq: AtomicU64::new(0),
            agents: RwLock::new(agents),
        }
    }

    /// A point-in-time clone of every agent's state, in ascending id order —
    /// the shape the step callback and `GET_AGENT_STATES` both need (§4.6,
    /// §6).
    pub fn all_snapshots_ascending(&self) -> Vec<AgentState> {
        self.agents
            .read()
            .unwrap()
            .values()
            .map(|a| a.lock().unwrap().clone())
            .collect()
    }

    /// Number of agents ever added (active or not).
    pub fn len(&self) -> usize {
        self.agents.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Direct handle to one agent's locked state, for readers/writers that
    /// need more than a snapshot (e.g. `gw-sim` writing post-tick vision).
    pub fn handle(&self, id: AgentId) -> AgentResult<Arc<Mutex<AgentState>>> {
        self.agents
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(AgentError::UnknownAgent(id))
    }

    /// A point-in-time clone of one agent's state.
    pub fn snapshot(&self, id: AgentId) -> AgentResult<AgentState> {
        let handle = self.handle(id)?;
        let guard = handle.lock().unwrap();
        Ok(guard.clone())
    }

    /// All agent ids in ascending order.
    pub fn ids_ascending(&self) -> Vec<AgentId> {
        self.agents.read().unwrap().keys().copied().collect()
    }

    /// Queue `action` for `id`. Fails if the agent doesn't exist or has
    /// already acted this tick (§4.6 failure semantics).
    pub fn request_action(&self, id: AgentId, action: Action) -> AgentResult<()> {
        let handle = self.handle(id)?;
        let mut state = handle.lock().unwrap();
        if state.action_state == ActionState::ActionRequested {
            return Err(AgentError::AlreadyActed(id));
        }
        state.pending_action = Some(action);
        state.action_state = ActionState::ActionRequested;
        state.request_seq = self.next_request_seq.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    pub fn set_active(&self, id: AgentId, active: bool) -> AgentResult<()> {
        let handle = self.handle(id)?;
        handle.lock().unwrap().active = active;
        Ok(())
    }

    pub fn is_active(&self, id: AgentId) -> AgentResult<bool> {
        Ok(self.handle(id)?.lock().unwrap().active)
    }

    /// `true` once every active agent has a pending action — the predicate
    /// that fires a tick (§4.6).
    pub fn all_active_requested(&self) -> bool {
        let agents = self.agents.read().unwrap();
        if agents.is_empty() {
            return false;
        }
        agents.values().all(|a| {
            let a = a.lock().unwrap();
            !a.active || a.action_state == ActionState::ActionRequested
        })
    }

    /// Collect every active agent's pending action, in ascending id order,
    /// together with the sequence number it was requested in, without
    /// clearing it — `reset_for_next_tick` does that once the tick has
    /// fully committed.
    pub fn collect_pending_actions(&self) -> Vec<(AgentId, Action, u64)> {
        let agents = self.agents.read().unwrap();
        agents
            .iter()
            .filter_map(|(id, a)| {
                let a = a.lock().unwrap();
                a.pending_action.map(|action| (*id, action, a.request_seq))
            })
            .collect()
    }

    /// Reset every agent's action slot to `Idle` — the last step of a tick.
    pub fn reset_all_for_next_tick(&self) {
        let agents = self.agents.read().unwrap();
        for a in agents.values() {
            a.lock().unwrap().reset_for_next_tick();
        }
    }
}
