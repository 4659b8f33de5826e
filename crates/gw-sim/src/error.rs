use thiserror::Error;

use gw_core::AgentId;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulator configuration error: {0}")]
    Config(String),

    #[error("agent {0} not found")]
    InvalidAgentId(AgentId),

    #[error("agent {0} already acted this tick")]
    AgentAlreadyActed(AgentId),

    #[error("action not permitted: {0}")]
    PermissionError(String),

    #[error("map error: {0}")]
    Map(#[from] gw_map::MapError),

    #[error("agent table error: {0}")]
    Agent(#[from] gw_agent::AgentError),

    #[error("out of memory while {0}")]
    OutOfMemory(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot is corrupt: {0}")]
    CorruptSnapshot(String),
}

pub type SimResult<T> = Result<T, SimError>;
