//! Resolved fluid state at one temperature.

use crate::error::{FluidError, FluidResult};
use lf_core::units::{Density, DynVisc, KinVisc, kg_per_m3, m2ps, pa_s};

/// Where the values of a [`FluidSample`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertySource {
    /// Interpolated from a property table.
    Table,
    /// Evaluated from empirical correlations.
    Fallback,
    /// Supplied directly (constant fluid or engine override).
    Direct,
}

/// Fluid properties in SI units.
///
/// `nu` is always derived as `mu / rho`.
#[derive(Clone, Debug, PartialEq)]
pub struct FluidSample {
    /// Query temperature [°C], if the sample was resolved for one.
    pub temperature_c: Option<f64>,
    pub rho: Density,
    pub mu: DynVisc,
    pub nu: KinVisc,
    /// Specific heat capacity [J/(kg·K)].
    pub cp: Option<f64>,
    /// Thermal conductivity [W/(m·K)].
    pub k: Option<f64>,
    /// Prandtl number [-].
    pub pr: Option<f64>,
    pub source: PropertySource,
    /// Non-fatal notes (out-of-range temperature, fallback in use).
    pub warnings: Vec<String>,
}

impl FluidSample {
    /// Build a sample from SI density [kg/m³] and dynamic viscosity [Pa·s].
    pub fn from_density_viscosity(rho_kg_m3: f64, mu_pa_s: f64) -> FluidResult<Self> {
        if !rho_kg_m3.is_finite() || rho_kg_m3 <= 0.0 {
            return Err(FluidError::NonPhysical { what: "density" });
        }
        if !mu_pa_s.is_finite() || mu_pa_s <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "dynamic viscosity",
            });
        }
        Ok(Self {
            temperature_c: None,
            rho: kg_per_m3(rho_kg_m3),
            mu: pa_s(mu_pa_s),
            nu: m2ps(mu_pa_s / rho_kg_m3),
            cp: None,
            k: None,
            pr: None,
            source: PropertySource::Direct,
            warnings: Vec::new(),
        })
    }

    /// Density [kg/m³].
    pub fn rho_kg_m3(&self) -> f64 {
        self.rho.value
    }

    /// Dynamic viscosity [Pa·s].
    pub fn mu_pa_s(&self) -> f64 {
        self.mu.value
    }

    /// Kinematic viscosity [m²/s].
    pub fn nu_m2_s(&self) -> f64 {
        self.nu.value
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
