//! `gw-agent` — per-agent state and the concurrent agent table (§3, §4.6, §5).
//!
//! | Module    | Contents                                 |
//! |-----------|---------------------------------------------|
//! | [`state`] | `AgentState`, `Action`, `ActionState`        |
//! | [`table`] | `AgentTable`                                 |

pub mod error;
pub mod state;
pub mod table;
pub mod wire;

#[cfg(test)]
mod tests;

pub use error::{AgentError, AgentResult};
pub use state::{Action, ActionState, AgentState};
pub use table::AgentTable;
