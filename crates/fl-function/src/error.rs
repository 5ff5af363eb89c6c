use thiserror::Error;

use fl_core::FlError;
use fl_spatial::SpatialError;

/// Errors an agent function can return for a single agent.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FunctionError {
    #[error(transparent)]
    Env(#[from] FlError),

    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error("function has no message input")]
    NoMessageInput,

    #[error("{0}")]
    Failed(String),
}

pub type FunctionResult<T> = Result<T, FunctionError>;
