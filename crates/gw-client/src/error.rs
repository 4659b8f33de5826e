use thiserror::Error;

use gw_core::AgentId;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("server sent a malformed message: {0}")]
    Protocol(String),

    #[error("agent {0} not recognized by this client")]
    UnknownAgent(AgentId),

    #[error("not connected")]
    NotConnected,

    #[error("already connected")]
    AlreadyConnected,
}

pub type ClientResult<T> = Result<T, ClientError>;
