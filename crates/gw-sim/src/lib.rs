//! `gw-sim` — the synchronous-tick multi-agent simulator core (§4.6, §5).
//!
//! | Module      | Contents                                             |
//! |-------------|-------------------------------------------------------|
//! | [`config`]  | `SimulatorConfig`, `SimulatorConfigBuilder`, `Permission`, `CollisionPolicy` |
//! | [`error`]   | `SimError`                                             |
//! | [`observer`]| `StepObserver`, the post-tick callback                |
//! | [`sim`]     | `Simulator`, the tick procedure                        |
//! | [`snapshot`]| `Snapshot`, the save/reload file format                |
//! | [`wire`]    | `Encode`/`Decode` for `SimulatorConfig` (handshake payload) |

pub mod config;
pub mod error;
pub mod observer;
pub mod sim;
pub mod snapshot;
pub mod wire;


pub use config::{movement_permission, rotation_permission, CollisionPolicy, Permission, SimulatorConfig, SimulatorConfigBuilder};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, StepObserver};
pub use sim::Simulator;
pub use snapshot::Snapshot;
