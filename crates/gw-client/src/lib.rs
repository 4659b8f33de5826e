//! `gw-client` — a TCP client for a `gw-server` simulation (§4.9).
//!
//! | Module        | Contents                                            |
//! |---------------|-------------------------------------------------------|
//! | [`error`]     | `ClientError`                                          |
//! | [`callbacks`] | `Callbacks`, the per-message-kind response table       |
//! | [`protocol`]  | `ServerMessage`, decoding the replies a client receives |
//! | [`client`]    | `Client` — handshake, request senders, listener thread |

pub mod callbacks;
pub mod client;
pub mod error;
pub mod protocol;

#[cfg(test)]
mod tests;

pub use callbacks::Callbacks;
pub use client::Client;
pub use error::{ClientError, ClientResult};
pub use protocol::ServerMessage;
