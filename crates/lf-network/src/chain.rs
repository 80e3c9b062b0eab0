//! Ordered series chain of elements.

use crate::error::{NetworkError, NetworkResult};
use lf_components::ElementSpec;
use lf_core::ElementId;
use std::collections::HashSet;

/// One element of the chain with its stable identity.
#[derive(Clone, Debug, PartialEq)]
pub struct ChainLink {
    pub id: ElementId,
    pub name: String,
    pub spec: ElementSpec,
}

impl ChainLink {
    pub fn new(id: ElementId, name: impl Into<String>, spec: ElementSpec) -> Self {
        Self {
            id,
            name: name.into(),
            spec,
        }
    }
}

/// Check ids are unique and every element specification is physical.
pub fn validate_chain(chain: &[ChainLink]) -> NetworkResult<()> {
    let mut seen = HashSet::new();
    for link in chain {
        if !seen.insert(link.id) {
            return Err(NetworkError::DuplicateId { id: link.id });
        }
        link.spec.validate().map_err(|source| NetworkError::Element {
            id: link.id,
            name: link.name.clone(),
            source,
        })?;
    }
    Ok(())
}

/// Nominal flow [m³/s] of the first pump, zero if the chain has none.
pub fn nominal_flow(chain: &[ChainLink]) -> f64 {
    chain
        .iter()
        .find_map(|link| link.spec.as_pump())
        .map_or(0.0, |p| p.q_nominal_m3s)
}

pub fn has_pump(chain: &[ChainLink]) -> bool {
    chain.iter().any(|link| link.spec.as_pump().is_some())
}
