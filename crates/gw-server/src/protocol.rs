//! Request framing and response writing (§4.7 wire shape, §6 "Wire messages").
//!
//! `gw-proto` only defines the kind tag and response code; the payload shape
//! for each kind is this crate's concern, since only `gw-server` combines
//! the wire codec with the domain types (`AgentState`, `Patch`) it carries.

use std::io::{self, Read, Write};

use gw_agent::AgentState;
use gw_core::{AgentId, Direction, Position};
use gw_map::Patch;
use gw_proto::{Decode, Encode, MessageKind, ResponseCode};

use crate::error::{ServerError, ServerResult};

/// A decoded client request, one per `MessageKind` that a client may send
/// (everything except `StepResponse`, which only ever flows server → client).
#[derive(Debug)]
pub enum Request {
    AddAgent { position: Position, facing: Direction },
    Move { agent_id: AgentId, direction: Direction },
    Turn { agent_id: AgentId, direction: Direction },
    DoNothing { agent_id: AgentId },
    GetMap { center: Position, radius: i64 },
    GetAgentIds,
    GetAgentStates { agent_ids: Vec<AgentId> },
    SetActive { agent_id: AgentId, active: bool },
    IsActive { agent_id: AgentId },
}

impl Request {
    pub fn kind(&self) -> MessageKind {
        match self {
            Request::AddAgent { .. } => MessageKind::AddAgent,
            Request::Move { .. } => MessageKind::Move,
            Request::Turn { .. } => MessageKind::Turn,
            Request::DoNothing { .. } => MessageKind::DoNothing,
            Request::GetMap { .. } => MessageKind::GetMap,
            Request::GetAgentIds => MessageKind::GetAgentIds,
            Request::GetAgentStates { .. } => MessageKind::GetAgentStates,
            Request::SetActive { .. } => MessageKind::SetActive,
            Request::IsActive { .. } => MessageKind::IsActive,
        }
    }

    /// Read one `{u64 kind, payload}` frame from `r`.
    pub fn read_from<R: Read>(r: &mut R) -> ServerResult<Self> {
        let kind = MessageKind::decode(r).map_err(|e| ServerError::Protocol(e.to_string()))?;
        let req = match kind {
            MessageKind::AddAgent => Request::AddAgent {
                position: Position::decode(r)?,
                facing: Direction::decode(r)?,
            },
            MessageKind::Move => Request::Move {
                agent_id: AgentId::decode(r)?,
                direction: Direction::decode(r)?,
            },
            MessageKind::Turn => Request::Turn {
                agent_id: AgentId::decode(r)?,
                direction: Direction::decode(r)?,
            },
            MessageKind::DoNothing => Request::DoNothing {
                agent_id: AgentId::decode(r)?,
            },
            MessageKind::GetMap => Request::GetMap {
                center: Position::decode(r)?,
                radius: i64::decode(r)?,
            },
            MessageKind::GetAgentIds => Request::GetAgentIds,
            MessageKind::GetAgentStates => Request::GetAgentStates {
                agent_ids: Vec::decode(r)?,
            },
            MessageKind::SetActive => Request::SetActive {
                agent_id: AgentId::decode(r)?,
                active: bool::decode(r)?,
            },
            MessageKind::IsActive => Request::IsActive {
                agent_id: AgentId::decode(r)?,
            },
            MessageKind::StepResponse => {
                return Err(ServerError::Protocol("StepResponse is server-initiated only".into()))
            }
        };
        Ok(req)
    }
}

/// A response payload this server can produce, tagged by the request kind
/// it answers. `code` is always the first byte on the wire (§6).
pub enum Response {
    Empty { code: ResponseCode },
    AgentId { code: ResponseCode, agent_id: Option<AgentId> },
    Map { code: ResponseCode, patches: Vec<Patch> },
    AgentIds { code: ResponseCode, agent_ids: Vec<AgentId> },
    AgentStates { code: ResponseCode, states: Vec<AgentState> },
    Flag { code: ResponseCode, value: bool },
}

impl Response {
    pub fn code(&self) -> ResponseCode {
        match self {
            Response::Empty { code }
            | Response::AgentId { code, .. }
            | Response::Map { code, .. }
            | Response::AgentIds { code, .. }
            | Response::AgentStates { code, .. }
            | Response::Flag { code, .. } => *code,
        }
    }

    /// Write `{u64 kind, u8 code, payload}` to `w`.
    pub fn write_to<W: Write>(&self, kind: MessageKind, w: &mut W) -> io::Result<()> {
        kind.encode(w)?;
        self.code().encode(w)?;
        match self {
            Response::Empty { .. } => Ok(()),
            Response::AgentId { agent_id, .. } => {
                if let Some(id) = agent_id {
                    id.encode(w)?;
                }
                Ok(())
            }
            Response::Map { patches, .. } => patches.encode(w),
            Response::AgentIds { agent_ids, .. } => agent_ids.encode(w),
            Response::AgentStates { states, .. } => states.encode(w),
            Response::Flag { value, .. } => value.encode(w),
        }
    }
}

/// Write a `STEP_RESPONSE` frame carrying one client's agents' updated
/// state (§4.8 "On step").
pub fn write_step_response<W: Write>(w: &mut W, tick: gw_core::Tick, agents: &[AgentState]) -> io::Result<()> {
    MessageKind::StepResponse.encode(w)?;
    tick.encode(w)?;
    agents.to_vec().encode(w)
}
