//! Error types for element specifications.

use lf_core::error::LfError;
use thiserror::Error;

/// Errors raised when an element specification is malformed.
///
/// The loss computations themselves never fail; they degrade to sentinel
/// values on degenerate physics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<ComponentError> for LfError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::NonPhysical { what } => LfError::InvalidArg {
                what: format!("non-physical {what}"),
            },
            ComponentError::InvalidArg { what } => LfError::InvalidArg {
                what: what.to_string(),
            },
        }
    }
}
