//! `fl-function` — agent function trait, context, and outcome types.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`function`] | `AgentFunction` trait (also implemented for closures), `agent_fn` |
//! | [`context`]  | `AgentContext<'a, A, M>` — read-only start-of-step view       |
//! | [`outcome`]  | `Outcome` (message, spawn, fate), `Fate`                      |
//! | [`desc`]     | `FunctionDesc` — wiring and permissions of one function       |
//! | [`noop`]     | `NoopFunction` — placeholder that changes nothing             |
//! | [`error`]    | `FunctionError`, `FunctionResult<T>`                          |
//!
//! # Design notes
//!
//! A layer runs each of its functions over every live agent of the bound
//! population:
//!
//! 1. **Execute** (parallel): each invocation reads only `&AgentContext`
//!    and writes only its own next-buffer row and RNG.
//!
//! 2. **Commit** (sequential): the executor checks each `Outcome` against
//!    the declared permissions, then applies fates, births and messages in
//!    agent order.
//!
//! The split is what lets `AgentFunction` be a plain `Send + Sync` trait with
//! no interior mutability.

pub mod context;
pub mod desc;
pub mod error;
pub mod function;
pub mod noop;
pub mod outcome;

#[cfg(test)]
mod tests;

pub use context::AgentContext;
pub use desc::FunctionDesc;
pub use error::{FunctionError, FunctionResult};
pub use function::{AgentFunction, agent_fn};
pub use noop::NoopFunction;
pub use outcome::{Fate, Outcome};
