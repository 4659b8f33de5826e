use thiserror::Error;

use gw_core::AgentId;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent {0} not found")]
    UnknownAgent(AgentId),

    #[error("agent {0} already acted this tick")]
    AlreadyActed(AgentId),
}

pub type AgentResult<T> = Result<T, AgentError>;
