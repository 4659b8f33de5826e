//! `gw-server` — the TCP front-end around a [`gw_sim::Simulator`] (§4.8, §5, §6).
//!
//! | Module        | Contents                                              |
//! |---------------|--------------------------------------------------------|
//! | [`error`]     | `ServerError`                                          |
//! | [`permissions`]| `Permissions`, the per-connection capability gate     |
//! | [`protocol`]  | `Request`/`Response`, the payload shapes per message kind |
//! | [`session`]   | `Session`, a connected (or reconnectable) client record |
//! | [`state`]     | `ServerState`, the listener's lifecycle latch          |
//! | [`server`]    | `Server`, `ServerConfig` — the listener, worker pool, and broadcaster |

pub mod error;
pub mod permissions;
pub mod protocol;
pub mod server;
pub mod session;
pub mod state;

#[cfg(test)]
mod tests;

pub use error::{ServerError, ServerResult};
pub use permissions::Permissions;
pub use protocol::{Request, Response};
pub use server::{Server, ServerConfig};
pub use session::Session;
pub use state::ServerState;
