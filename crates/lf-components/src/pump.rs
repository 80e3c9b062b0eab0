//! Fixed-head pump.

use crate::common::{check_non_negative, check_positive};
use crate::error::{ComponentError, ComponentResult};
use crate::losses::head_to_pressure;

/// Fixed-head pump delivering a nominal flow.
///
/// ## Model
///
/// ```text
/// Q   = Q_nominal · ramp
/// ΔP  = ρ · g · H · ramp
/// P_shaft = ρ · g · H · ramp · Q / η
/// ```
///
/// The pump is the flow source of the chain; there is no head/flow curve.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PumpSpec {
    /// Nominal volumetric flow [m³/s]
    pub q_nominal_m3s: f64,
    /// Shut-off head [m]
    pub head_m: f64,
    /// Overall efficiency (0 < eta <= 1)
    pub efficiency: f64,
    /// Discharge bore [mm]
    pub diameter_mm: f64,
}

impl PumpSpec {
    /// Create a validated pump.
    ///
    /// # Errors
    /// Returns error if parameters are out of physical bounds.
    pub fn new(
        q_nominal_m3s: f64,
        head_m: f64,
        efficiency: f64,
        diameter_mm: f64,
    ) -> ComponentResult<Self> {
        let pump = Self {
            q_nominal_m3s,
            head_m,
            efficiency,
            diameter_mm,
        };
        pump.validate()?;
        Ok(pump)
    }

    pub fn validate(&self) -> ComponentResult<()> {
        check_non_negative(self.q_nominal_m3s, "pump flow")?;
        check_non_negative(self.head_m, "pump head")?;
        check_positive(self.diameter_mm, "pump diameter")?;
        if !(self.efficiency > 0.0 && self.efficiency <= 1.0) {
            return Err(ComponentError::InvalidArg {
                what: "pump efficiency must be in (0,1]",
            });
        }
        Ok(())
    }

    /// Pressure rise [Pa] at the given ramp factor.
    pub fn pressure_rise(&self, rho_kg_m3: f64, ramp: f64) -> f64 {
        head_to_pressure(rho_kg_m3, self.head_m * ramp)
    }

    /// Shaft power [W] drawn while delivering `q_m3s` at the given ramp factor.
    pub fn shaft_power(&self, rho_kg_m3: f64, q_m3s: f64, ramp: f64) -> f64 {
        self.pressure_rise(rho_kg_m3, ramp) * q_m3s / self.efficiency
    }
}
