//! Wire message kinds and response codes (§4.7, §6).

use std::io::{self, Read, Write};

use crate::codec::{Decode, Encode};

/// Sent as the first `u64` of a new connection. Any other value reconnects
/// with that value as the claimed `ClientId`.
pub const NEW_CLIENT_REQUEST: u64 = 0;

/// `{u64 kind, payload}` message kinds (§6).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u64)]
pub enum MessageKind {
    AddAgent = 0,
    Move = 1,
    Turn = 2,
    DoNothing = 3,
    GetMap = 4,
    GetAgentIds = 5,
    GetAgentStates = 6,
    SetActive = 7,
    IsActive = 8,
    StepResponse = 9,
}

impl Encode for MessageKind {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        (*self as u64).encode(w)
    }
}

impl Decode for MessageKind {
    fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
        Ok(match u64::decode(r)? {
            0 => MessageKind::AddAgent,
            1 => MessageKind::Move,
            2 => MessageKind::Turn,
            3 => MessageKind::DoNothing,
            4 => MessageKind::GetMap,
            5 => MessageKind::GetAgentIds,
            6 => MessageKind::GetAgentStates,
            7 => MessageKind::SetActive,
            8 => MessageKind::IsActive,
            9 => MessageKind::StepResponse,
            other => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("unknown message kind {other}"),
                ))
            }
        })
    }
}

/// The `u8` response code every response payload begins with (§6).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum ResponseCode {
    Failure = 0,
    Success = 1,
    InvalidAgentId = 2,
    ServerParseMessageError = 3,
    ClientParseMessageError = 4,
    PermissionError = 5,
    AgentAlreadyActed = 6,
    OutOfMemory = 7,
    /// Reserved for wire compatibility with a distributed, multi-process
    /// deployment; this single-process server never produces it.
    MpiError = 8,
}

impl Encode for ResponseCode {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        (*self as u8).encode(w)
    }
}

impl Decode for ResponseCode {
    fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
        Ok(match u8::decode(r)? {
            0 => ResponseCode::Failure,
            1 => ResponseCode::Success,
            2 => ResponseCode::InvalidAgentId,
            3 => ResponseCode::ServerParseMessageError,
            4 => ResponseCode::ClientParseMessageError,
            5 => ResponseCode::PermissionError,
            6 => ResponseCode::AgentAlreadyActed,
            7 => ResponseCode::OutOfMemory,
            8 => ResponseCode::MpiError,
            other => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("unknown response code {other}"),
                ))
            }
        })
    }
}
