//! Per-message-kind callback table (§4.9).
//!
//! Requests are fire-and-forget at the send site; the listener thread
//! correlates a response to its request only by message kind (and, for
//! `AddAgent`, the agent id the server echoes back) — there is no per-call
//! future or request id on the wire. A struct of optional closures stands
//! in for a single pluggable-behavior trait, since there is no single
//! implementor type to dispatch through on the client side.

use gw_agent::AgentState;
use gw_core::{AgentId, Tick};
use gw_map::Patch;
use gw_proto::ResponseCode;

type Callback<T> = Box<dyn Fn(T) + Send>;

/// Every field defaults to `None`; set only the callbacks a caller cares
/// about with the builder methods below.
#[derive(Default)]
pub struct Callbacks {
    pub(crate) on_add_agent: Option<Callback<(ResponseCode, Option<AgentId>)>>,
    pub(crate) on_move: Option<Callback<ResponseCode>>,
    pub(crate) on_turn: Option<Callback<ResponseCode>>,
    pub(crate) on_do_nothing: Option<Callback<ResponseCode>>,
    pub(crate) on_get_map: Option<Callback<(ResponseCode, Vec<Patch>)>>,
    pub(crate) on_get_agent_ids: Option<Callback<(ResponseCode, Vec<AgentId>)>>,
    pub(crate) on_get_agent_states: Option<Callback<(ResponseCode, Vec<AgentState>)>>,
    pub(crate) on_set_active: Option<Callback<ResponseCode>>,
    pub(crate) on_is_active: Option<Callback<(ResponseCode, bool)>>,
    pub(crate) on_step: Option<Callback<(Tick, Vec<AgentState>)>>,
    pub(crate) on_lost_connection: Option<Callback<()>>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_add_agent(mut self, f: impl Fn(ResponseCode, Option<AgentId>) + Send + 'static) -> Self {
        self.on_add_agent = Some(Box::new(move |(code, id)| f(code, id)));
        self
    }

    pub fn on_move(mut self, f: impl Fn(ResponseCode) + Send + 'static) -> Self {
        self.on_move = Some(Box::new(f));
        self
    }

    pub fn on_turn(mut self, f: impl Fn(ResponseCode) + Send + 'static) -> Self {
        self.on_turn = Some(Box::new(f));
        self
    }

    pub fn on_do_nothing(mut self, f: impl Fn(ResponseCode) + Send + 'static) -> Self {
        self.on_do_nothing = Some(Box::new(f));
        self
    }

    pub fn on_get_map(mut self, f: impl Fn(ResponseCode, Vec<Patch>) + Send + 'static) -> Self {
        self.on_get_map = Some(Box::new(move |(code, patches)| f(code, patches)));
        self
    }

    pub fn on_get_agent_ids(mut self, f: impl Fn(ResponseCode, Vec<AgentId>) + Send + 'static) -> Self {
        self.on_get_agent_ids = Some(Box::new(move |(code, ids)| f(code, ids)));
        self
    }

    pub fn on_get_agent_states(mut self, f: impl Fn(ResponseCode, Vec<AgentState>) + Send + 'static) -> Self {
        self.on_get_agent_states = Some(Box::new(move |(code, states)| f(code, states)));
        self
    }

    pub fn on_set_active(mut self, f: impl Fn(ResponseCode) + Send + 'static) -> Self {
        self.on_set_active = Some(Box::new(f));
        self
    }

    pub fn on_is_active(mut self, f: impl Fn(ResponseCode, bool) + Send + 'static) -> Self {
        self.on_is_active = Some(Box::new(move |(code, value)| f(code, value)));
        self
    }

    pub fn on_step(mut self, f: impl Fn(Tick, Vec<AgentState>) + Send + 'static) -> Self {
        self.on_step = Some(Box::new(move |(tick, agents)| f(tick, agents)));
        self
    }

    pub fn on_lost_connection(mut self, f: impl Fn() + Send + 'static) -> Self {
        self.on_lost_connection = Some(Box::new(move |()| f()));
        self
    }

    pub(crate) fn dispatch(&self, msg: crate::protocol::ServerMessage) {
        use crate::protocol::ServerMessage as M;
        match msg {
            M::AddAgent { code, agent_id } => call(&self.on_add_agent, (code, agent_id)),
            M::Move { code } => call(&self.on_move, code),
            M::Turn { code } => call(&self.on_turn, code),
            M::DoNothing { code } => call(&self.on_do_nothing, code),
            M::GetMap { code, patches } => call(&self.on_get_map, (code, patches)),
            M::GetAgentIds { code, agent_ids } => call(&self.on_get_agent_ids, (code, agent_ids)),
            M::GetAgentStates { code, states } => call(&self.on_get_agent_states, (code, states)),
            M::SetActive { code } => call(&self.on_set_active, code),
            M::IsActive { code, value } => call(&self.on_is_active, (code, value)),
            M::Step { tick, agents } => call(&self.on_step, (tick, agents)),
        }
    }

    pub(crate) fn lost_connection(&self) {
        if let Some(f) = &self.on_lost_connection {
            f(());
        }
    }
}

fn call<T>(slot: &Option<Callback<T>>, value: T) {
    if let Some(f) = slot {
        f(value);
    }
}
