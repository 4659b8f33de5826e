//! Shared error taxonomy.
//!
//! Every `gw-*` crate defines its own error enum named after its domain and
//! wraps `GwError` as a variant (or converts into it via `#[from]`) rather
//! than inventing a second vocabulary — see `gw-sim::SimError`,
//! `gw-map::MapError`, `gw-server::ServerError`.

use thiserror::Error;

use crate::AgentId;

/// The common error type shared across the workspace.
#[derive(Debug, Error)]
pub enum GwError {
    #[error("agent {0} not found")]
    UnknownAgent(AgentId),

    #[error("agent {0} already acted this tick")]
    AgentAlreadyActed(AgentId),

    #[error("action not permitted: {0}")]
    PermissionDenied(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("out of memory while {0}")]
    OutOfMemory(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `gw-*` crates.
pub type GwResult<T> = Result<T, GwError>;
