//! Decoding the responses [`crate::client::Client`] can receive, the
//! mirror image of `gw-server::protocol::Response::write_to`.

use std::io::{self, Read};

use gw_agent::AgentState;
use gw_core::{AgentId, Tick};
use gw_map::Patch;
use gw_proto::{Decode, MessageKind, ResponseCode};

/// A decoded server message, tagged by which request kind it answers (or
/// `Step` for a server-initiated broadcast).
#[derive(Debug)]
pub enum ServerMessage {
    AddAgent { code: ResponseCode, agent_id: Option<AgentId> },
    Move { code: ResponseCode },
    Turn { code: ResponseCode },
    DoNothing { code: ResponseCode },
    GetMap { code: ResponseCode, patches: Vec<Patch> },
    GetAgentIds { code: ResponseCode, agent_ids: Vec<AgentId> },
    GetAgentStates { code: ResponseCode, states: Vec<AgentState> },
    SetActive { code: ResponseCode },
    IsActive { code: ResponseCode, value: bool },
    Step { tick: Tick, agents: Vec<AgentState> },
}

impl ServerMessage {
    /// Read `{u64 kind, ...}` (the kind has already been peeled off the
    /// wire by the caller so the listener loop can log it before dispatch).
    pub fn read_from<R: Read>(kind: MessageKind, r: &mut R) -> io::Result<Self> {
        Ok(match kind {
            MessageKind::AddAgent => {
                let code = ResponseCode::decode(r)?;
                let agent_id = if code == ResponseCode::Success { Some(AgentId::decode(r)?) } else { None };
                ServerMessage::AddAgent { code, agent_id }
            }
            MessageKind::Move => ServerMessage::Move { code: ResponseCode::decode(r)? },
            MessageKind::Turn => ServerMessage::Turn { code: ResponseCode::decode(r)? },
            MessageKind::DoNothing => ServerMessage::DoNothing { code: ResponseCode::decode(r)? },
            MessageKind::GetMap => {
                let code = ResponseCode::decode(r)?;
                let patches = Vec::decode(r)?;
                ServerMessage::GetMap { code, patches }
            }
            MessageKind::GetAgentIds => {
                let code = ResponseCode::decode(r)?;
                let agent_ids = Vec::decode(r)?;
                ServerMessage::GetAgentIds { code, agent_ids }
            }
            MessageKind::GetAgentStates => {
                let code = ResponseCode::decode(r)?;
                let states = Vec::decode(r)?;
                ServerMessage::GetAgentStates { code, states }
            }
            MessageKind::SetActive => ServerMessage::SetActive { code: ResponseCode::decode(r)? },
            MessageKind::IsActive => {
                let code = ResponseCode::decode(r)?;
                let value = bool::decode(r)?;
                ServerMessage::IsActive { code, value }
            }
            MessageKind::StepResponse => {
                let tick = Tick::decode(r)?;
                let agents = Vec::decode(r)?;
                ServerMessage::Step { tick, agents }
            }
        })
    }
}
