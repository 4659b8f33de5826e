//! `gw-map` — the procedural infinite patch map (§4.2, §4.3).
//!
//! | Module    | Contents                                          |
//! |-----------|-----------------------------------------------------|
//! | [`coord`] | `PatchCoord`                                        |
//! | [`patch`] | `Patch`                                             |
//! | [`gibbs`] | the single-cell Gibbs sweep                         |
//! | [`map`]   | `PatchMap`, `MapConfig`, the fix-neighborhood protocol |

pub mod coord;
pub mod error;
pub mod gibbs;
pub mod map;
pub mod patch;
pub mod wire;

#[cfg(test)]
mod tests;

pub use coord::PatchCoord;
pub use error::{MapError, MapResult};
pub use map::{MapConfig, PatchMap};
pub use patch::Patch;
