//! lf-fluids: liquid property resolution for lineflow.
//!
//! Provides:
//! - Scalar table interpolation (linear and monotone cubic)
//! - Temperature-indexed property tables loaded from CSV text
//! - Empirical density/viscosity/heat-capacity correlations
//! - `FluidPropertyResolver`: temperature → `FluidSample` in SI units
//! - A small catalog of built-in liquids
//!
//! # Units
//!
//! Tables and correlations keep the engineering units they are published in
//! (viscosity in mPa·s). Every `FluidSample` handed to the rest of lineflow is
//! SI (`rho` kg/m³, `mu` Pa·s, `nu` m²/s); the conversion happens in the
//! resolver and nowhere else.
//!
//! # Example
//!
//! ```
//! use lf_fluids::{FluidModel, catalog_fluid};
//!
//! let water = catalog_fluid("water").unwrap();
//! let s = water.properties(20.0).unwrap();
//! assert!((s.rho_kg_m3() - 998.21).abs() < 1e-9);
//! ```

pub mod catalog;
pub mod correlation;
pub mod error;
pub mod interp;
pub mod model;
pub mod resolver;
pub mod sample;
pub mod table;

// Re-exports for ergonomics
pub use catalog::{FluidCatalogEntry, catalog_fluid, filter_fluid_catalog, fluid_catalog};
pub use correlation::{EmpiricalModel, Polynomial, ViscosityCorrelation};
pub use error::{FluidError, FluidResult};
pub use interp::{InterpOptions, Interpolated, linear, monotone_cubic};
pub use model::{ConstantFluid, FluidModel};
pub use resolver::FluidPropertyResolver;
pub use sample::{FluidSample, PropertySource};
pub use table::{PropertyColumn, PropertyTable};
