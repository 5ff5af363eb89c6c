//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `FlError` as one variant
//! via `#[from]`, so an environment lookup failing deep inside an agent
//! function surfaces with the property name intact.

use thiserror::Error;

use crate::EnvType;

/// The base error type for `fl-core` and a common variant for sub-crates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FlError {
    /// Unknown property name, or a read/write with a type other than the one
    /// the property was defined with.
    #[error("environment property `{name}` requested as {requested}, {}", defined_as(.defined))]
    UndefinedProperty {
        name:      String,
        requested: EnvType,
        defined:   Option<EnvType>,
    },

    #[error("environment property `{0}` is already defined")]
    DuplicateProperty(String),

    #[error("configuration error: {0}")]
    Config(String),
}

fn defined_as(defined: &Option<EnvType>) -> String {
    match defined {
        Some(t) => format!("but it is defined as {t}"),
        None    => "but it is not defined".to_string(),
    }
}

/// Shorthand result type for all `fl-*` crates.
pub type FlResult<T> = Result<T, FlError>;
