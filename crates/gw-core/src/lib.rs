//! `gw-core` — foundational types for the grid-world simulation engine.
//!
//! A dependency of every other `gw-*` crate; has no `gw-*` dependencies of
//! its own and minimal external ones.
//!
//! | Module        | Contents                                      |
//! |---------------|------------------------------------------------|
//! | [`ids`]       | `AgentId`, `ClientId`, `ItemTypeId`            |
//! | [`geometry`]  | `Position`, `Direction`                        |
//! | [`time`]      | `Tick`                                         |
//! | [`rng`]       | `SimRng`, the engine's single source of draws  |
//! | [`error`]     | `GwError`, `GwResult`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|-------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.   |

pub mod error;
pub mod geometry;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

pub use error::{GwError, GwResult};
pub use geometry::{Direction, Position};
pub use ids::{AgentId, ClientId, ItemTypeId};
pub use rng::SimRng;
pub use time::Tick;
