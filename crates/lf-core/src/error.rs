use thiserror::Error;

pub type LfResult<T> = Result<T, LfError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LfError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = LfError::NonFinite {
            what: "pipe length",
            value: f64::INFINITY,
        };
        let msg = err.to_string();
        assert!(msg.contains("pipe length"));
        assert!(msg.contains("inf"));
    }
}
