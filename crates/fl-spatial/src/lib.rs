//! `fl-spatial` — uniform-grid spatial index for radius-bounded neighbor
//! queries.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                      |
//! |-----------|---------------------------------------------------------------|
//! | [`grid`]  | `GridSpec`, `SpatialGrid` (CSR buckets), `Neighbors` iterator |
//! | [`error`] | `SpatialError`, `SpatialResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Computes cell keys with Rayon during rebuild.             |
//! | `serde`    | Derives `Serialize`/`Deserialize` on `GridSpec`.          |

pub mod error;
pub mod grid;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use grid::{CellKey, GridSpec, Neighbors, SpatialGrid, MAX_CELLS};
