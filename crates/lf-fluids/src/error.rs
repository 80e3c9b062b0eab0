//! Fluid property errors.

use lf_core::LfError;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors raised while building tables or resolving fluid properties.
///
/// Out-of-range temperatures are not errors; they are reported as warnings on
/// the returned sample.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Non-physical values (negative density, viscosity pole, ...).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Malformed interpolation table.
    #[error("Invalid table: {reason}")]
    InvalidTable { reason: String },

    /// CSV text could not be parsed.
    #[error("Parse error at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// Unknown catalog entry.
    #[error("Unknown fluid: {id}")]
    UnknownFluid { id: String },
}

impl From<FluidError> for LfError {
    fn from(err: FluidError) -> Self {
        match err {
            FluidError::NonPhysical { what } => LfError::Invariant {
                what: format!("Non-physical fluid value: {what}"),
            },
            FluidError::InvalidArg { what } => LfError::InvalidArg {
                what: format!("Invalid fluid argument: {what}"),
            },
            FluidError::InvalidTable { reason } => LfError::InvalidArg {
                what: format!("Invalid property table: {reason}"),
            },
            FluidError::Parse { line, reason } => LfError::InvalidArg {
                what: format!("Property table line {line}: {reason}"),
            },
            FluidError::UnknownFluid { id } => LfError::InvalidArg {
                what: format!("Unknown fluid: {id}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FluidError::NonPhysical { what: "density" };
        assert!(err.to_string().contains("density"));

        let err = FluidError::Parse {
            line: 7,
            reason: "expected 6 columns".into(),
        };
        assert!(err.to_string().contains("line 7"));
    }

    #[test]
    fn error_to_lf_error() {
        let fluid_err = FluidError::UnknownFluid { id: "brine".into() };
        let lf_err: LfError = fluid_err.into();
        assert!(matches!(lf_err, LfError::InvalidArg { .. }));
    }
}
