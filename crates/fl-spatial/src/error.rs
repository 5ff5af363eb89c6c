//! Spatial-index error type.

use thiserror::Error;

use fl_core::Bounds;

/// Errors produced by `fl-spatial`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpatialError {
    /// A query radius larger than the cell size could miss neighbors two
    /// cells away, so it is refused rather than answered incompletely.
    #[error("query radius {radius} exceeds grid cell size {cell_size}")]
    RadiusExceedsCellSize { radius: f32, cell_size: f32 },

    #[error("message radius must be finite and positive, got {0}")]
    InvalidRadius(f32),

    #[error("cell size must be finite and positive, got {0}")]
    InvalidCellSize(f32),

    #[error("grid bounds must be finite with min < max on every axis, got {0:?}")]
    InvalidBounds(Bounds),

    #[error("grid would need {cells} cells")]
    GridTooLarge { cells: u64 },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
