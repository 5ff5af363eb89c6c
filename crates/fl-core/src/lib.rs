//! `fl-core` — foundational types for the `rust_flock` simulation engine.
//!
//! This crate is a dependency of every other `fl-*` crate.  It has no `fl-*`
//! dependencies and minimal external ones (`rand`, `rustc-hash`, `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `PopulationId`, `FunctionId`, `MessageListId`  |
//! | [`vec3`]    | `Vec3`, `Bounds`, the `Located` trait                     |
//! | [`time`]    | `Step`, `SimConfig`                                       |
//! | [`rng`]     | `AgentRng` (per-agent), `SimRng` (run-level)              |
//! | [`env`]     | `Environment`, `EnvValue`, `EnvType`, `EnvKey`            |
//! | [`error`]   | `FlError`, `FlResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Needed to load `SimConfig` and environment overrides.      |

pub mod env;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod vec3;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use env::{EnvKey, EnvScalar, EnvType, EnvValue, Environment};
pub use error::{FlError, FlResult};
pub use ids::{AgentId, FunctionId, MessageListId, PopulationId};
pub use rng::{AgentRng, SimRng};
pub use time::{SimConfig, Step};
pub use vec3::{Bounds, Located, Vec3};
