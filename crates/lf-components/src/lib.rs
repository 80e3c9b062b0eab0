//! lf-components: element library and loss engine for lineflow.
//!
//! Provides:
//! - Element specifications for a series chain (pump, pipe, elbow,
//!   transition, valve) as the closed `ElementSpec` enum
//! - Reynolds number, flow regime and Darcy friction factor
//!   (closed-form laminar, Colebrook–White turbulent, blended transition)
//! - Head loss primitives: friction, fittings, sudden expansion/contraction
//! - Valve loss coefficient as a function of opening
//!
//! Loss functions are infallible: degenerate inputs produce sentinel values
//! (`Re = +∞`, `f = 64`, `K = 1e9`) rather than errors. Only specification
//! validation returns `ComponentResult`.
//!
//! # Example
//!
//! ```
//! use lf_components::{friction_factor, head_loss_friction, reynolds, velocity};
//!
//! let v = velocity(0.002, 0.05);
//! let re = reynolds(v, 0.05, 1.0e-3 / 998.0);
//! let f = friction_factor(re, 0.05, 0.046);
//! let hf = head_loss_friction(f.value, 10.0, 0.05, v);
//! assert!(f.converged && hf > 0.0);
//! ```

pub mod common;
pub mod elbow;
pub mod element;
pub mod error;
pub mod friction;
pub mod losses;
pub mod pipe;
pub mod pump;
pub mod transition;
pub mod valve;

// Re-exports
pub use common::{flow_area, mm_to_m, velocity};
pub use elbow::ElbowSpec;
pub use element::{ElementKind, ElementSpec};
pub use error::{ComponentError, ComponentResult};
pub use friction::{FlowRegime, FrictionFactor, colebrook_residual, friction_factor, reynolds};
pub use losses::{
    AreaChange, contraction_coefficient, head_loss_contraction, head_loss_expansion,
    head_loss_fitting, head_loss_friction, head_to_pressure, pressure_to_head,
    sudden_area_change, velocity_head,
};
pub use pipe::PipeSpec;
pub use pump::PumpSpec;
pub use transition::{TransitionKind, TransitionSpec};
pub use valve::{BLOCKED_K, KPoint, ValveKind, ValveSpec, valve_k};
