//! `gw-item` — the item type catalogue and pairwise energy functions (§4.1).
//!
//! | Module         | Contents                                   |
//! |----------------|----------------------------------------------|
//! | [`intensity`]  | `IntensityFn`                                 |
//! | [`interaction`]| `InteractionFn`                               |
//! | [`item_type`]  | `ItemType`                                    |
//! | [`instance`]   | `ItemInstance`                                |
//! | [`cache`]      | `InteractionCache`                            |

pub mod cache;
pub mod error;
pub mod instance;
pub mod intensity;
pub mod interaction;
pub mod item_type;
pub mod wire;

#[cfg(test)]
mod tests;

pub use cache::InteractionCache;
pub use error::{ItemError, ItemResult};
pub use instance::ItemInstance;
pub use intensity::IntensityFn;
pub use interaction::InteractionFn;
pub use item_type::ItemType;
