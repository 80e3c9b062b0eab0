//! lf-network: series-chain pressure resolver for lineflow.
//!
//! Provides:
//! - `ChainLink`: an element specification with a stable id and a name
//! - Chain validation (unique ids, physical parameters)
//! - `resolve_chain`: one pure pass over the chain producing per-element
//!   pressures, losses, velocities and node states
//!
//! The resolver keeps no state between calls. The chain may change freely
//! between invocations; it is simply re-walked.

pub mod chain;
pub mod error;
pub mod resolve;
pub mod result;

pub use chain::{ChainLink, has_pump, nominal_flow, validate_chain};
pub use error::{NetworkError, NetworkResult};
pub use resolve::{FlowConditions, resolve_chain};
pub use result::{ElementResult, NetworkSolution, NodeState};
