//! Error types for engine configuration and commands.

use lf_core::{ElementId, LfError};
use thiserror::Error;

/// Errors raised by the engine API. The tick itself never fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Unknown element {id}")]
    UnknownElement { id: ElementId },

    #[error("Element {id} is not a valve")]
    NotAValve { id: ElementId },

    #[error("Chain error: {0}")]
    Network(#[from] lf_network::NetworkError),

    #[error("Fluid error: {0}")]
    Fluid(#[from] lf_fluids::FluidError),
}

pub type SimResult<T> = Result<T, SimError>;

impl From<SimError> for LfError {
    fn from(e: SimError) -> Self {
        LfError::InvalidArg {
            what: e.to_string(),
        }
    }
}
