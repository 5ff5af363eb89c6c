//! `fl-agent` — double-buffered agent storage for the `rust_flock` engine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`store`]     | `AgentStore<A>` (current/next buffers), `AgentRngs`, `StoreParts` |
//! | [`builder`]   | `AgentStoreBuilder` (initial population)                    |
//! | [`reduce`]    | host reductions: `sum`, `min`, `max`, `reduce`, `count`, `histogram_even` |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Forwards to `fl-core/serde`.                                 |

pub mod builder;
pub mod reduce;
pub mod store;


pub use builder::AgentStoreBuilder;
pub use store::{AgentRngs, AgentState, AgentStore, StoreParts, SwapStats};
