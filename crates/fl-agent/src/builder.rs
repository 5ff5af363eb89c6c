//! Fluent builder for an initial population.
//!
//! # Usage
//!
//! ```rust
//! use fl_agent::AgentStoreBuilder;
//! use fl_core::{Located, Vec3};
//!
//! #[derive(Clone)]
//! struct Dot(Vec3);
//!
//! impl Located for Dot {
//!     fn position(&self) -> Vec3 { self.0 }
//! }
//!
//! let mut builder = AgentStoreBuilder::with_capacity(2, /*seed=*/ 42);
//! let a = builder.create(Dot(Vec3::ZERO));
//! let b = builder.create(Dot(Vec3::splat(0.1)));
//! let store = builder.build();
//!
//! assert_eq!(store.len(), 2);
//! assert!(a < b);
//! ```

use fl_core::AgentId;

use crate::{AgentState, AgentStore};

/// Collects initial rows, then builds an [`AgentStore`] with seeded RNGs.
///
/// Ids are handed out from 0 in creation order, matching the row order of
/// the built store.
pub struct AgentStoreBuilder<A> {
    rows: Vec<A>,
    seed: u64,
}

impl<A: AgentState> AgentStoreBuilder<A> {
    /// Create a builder using `seed` as the global RNG seed.
    pub fn new(seed: u64) -> Self {
        Self { rows: Vec::new(), seed }
    }

    /// Pre-allocate room for `count` agents.
    pub fn with_capacity(count: usize, seed: u64) -> Self {
        Self { rows: Vec::with_capacity(count), seed }
    }

    /// Add one agent and return the id it will have in the built store.
    pub fn create(&mut self, row: A) -> AgentId {
        let id = AgentId(self.rows.len() as u32);
        self.rows.push(row);
        id
    }

    /// Add every row produced by `rows`.
    pub fn extend(mut self, rows: impl IntoIterator<Item = A>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn build(self) -> AgentStore<A> {
        AgentStore::from_rows(self.rows, self.seed)
    }
}
