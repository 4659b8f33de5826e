//! `gw-proto` — the byte-exact wire codec (§4.7, §6).
//!
//! This crate only defines the codec mechanism and the message/response
//! vocabulary; it has no knowledge of map, item, or agent types. Domain
//! crates (`gw-item`, `gw-map`, `gw-agent`) implement [`Encode`]/[`Decode`]
//! for their own types, the same way `serde` consumers implement
//! `Serialize`/`Deserialize` downstream of the `serde` crate itself.
//!
//! | Module     | Contents                                   |
//! |------------|-----------------------------------------------|
//! | [`codec`]  | `Encode`, `Decode`, primitive impls            |
//! | [`message`]| `MessageKind`, `ResponseCode`, handshake consts|

pub mod codec;
pub mod error;
pub mod message;

#[cfg(test)]
mod tests;

pub use codec::{Decode, Encode};
pub use error::{ProtoError, ProtoResult};
pub use message::{MessageKind, ResponseCode, NEW_CLIENT_REQUEST};
