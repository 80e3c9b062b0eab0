//! Error types for chain validation.

use lf_components::ComponentError;
use lf_core::{ElementId, LfError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("Duplicate element id {id}")]
    DuplicateId { id: ElementId },

    #[error("Element {id} ({name}): {source}")]
    Element {
        id: ElementId,
        name: String,
        #[source]
        source: ComponentError,
    },
}

pub type NetworkResult<T> = Result<T, NetworkError>;

impl From<NetworkError> for LfError {
    fn from(e: NetworkError) -> Self {
        LfError::InvalidArg {
            what: e.to_string(),
        }
    }
}
