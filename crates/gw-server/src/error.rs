use thiserror::Error;

use gw_core::{AgentId, ClientId};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("simulator error: {0}")]
    Sim(#[from] gw_sim::SimError),

    #[error("malformed request: {0}")]
    Protocol(String),

    #[error("unknown client {0}")]
    UnknownClient(ClientId),

    #[error("agent {0} not found")]
    InvalidAgentId(AgentId),

    #[error("connection attempted an action its permissions do not allow")]
    PermissionDenied,

    #[error("server is already running")]
    AlreadyStarted,
}

pub type ServerResult<T> = Result<T, ServerError>;
