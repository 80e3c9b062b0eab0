//! Error type for the command line front end.

use std::path::PathBuf;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Project error: {0}")]
    Project(#[from] lf_project::ProjectError),

    #[error("Project validation failed: {0}")]
    Validation(#[from] lf_project::ValidationError),

    #[error("Fluid error: {0}")]
    Fluid(#[from] lf_fluids::FluidError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] lf_sim::SimError),

    #[error("Failed to read property table: {path}")]
    TableRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
