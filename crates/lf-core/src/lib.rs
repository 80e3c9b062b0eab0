//! lf-core: stable foundation for lineflow.
//!
//! Contains:
//! - units (uom SI types + constructors + physical constants)
//! - numeric (tolerances + float helpers)
//! - ids (compact stable IDs for chain elements)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{LfError, LfResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
