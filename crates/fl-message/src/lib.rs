//! `fl-message` — per-step message exchange between agents.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                 |
//! |-----------|----------------------------------------------------------|
//! | [`store`] | `Message` trait, `MessageStore` (write / read buffers)   |
//! | [`spec`]  | `MessageSpec` (name, radius, cell size, bounds)          |
//! | [`list`]  | `MessageList` (store + `SpatialGrid`, neighbor queries)  |
//!
//! Errors are `fl_spatial::SpatialError`: every failure here is a geometry
//! problem (bad radius, bad bounds, radius larger than the cell).

pub mod list;
pub mod spec;
pub mod store;

#[cfg(test)]
mod tests;

pub use list::MessageList;
pub use spec::MessageSpec;
pub use store::{Message, MessageStore};
