//! Straight pipe with Darcy–Weisbach friction and elevation change.

use crate::common::{check_finite, check_non_negative, check_positive};
use crate::error::ComponentResult;

/// Straight pipe run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PipeSpec {
    /// Inner diameter [mm]
    pub diameter_mm: f64,
    /// Length [m]
    pub length_m: f64,
    /// Outlet elevation minus inlet elevation [m]
    #[cfg_attr(feature = "serde", serde(default))]
    pub dz_m: f64,
    /// Absolute wall roughness [mm]
    pub eps_mm: f64,
}

impl PipeSpec {
    pub fn new(diameter_mm: f64, length_m: f64, eps_mm: f64) -> ComponentResult<Self> {
        let pipe = Self {
            diameter_mm,
            length_m,
            dz_m: 0.0,
            eps_mm,
        };
        pipe.validate()?;
        Ok(pipe)
    }

    /// Set the elevation change.
    pub fn with_rise(mut self, dz_m: f64) -> Self {
        self.dz_m = dz_m;
        self
    }

    pub fn validate(&self) -> ComponentResult<()> {
        check_positive(self.diameter_mm, "pipe diameter")?;
        check_non_negative(self.length_m, "pipe length")?;
        check_non_negative(self.eps_mm, "pipe roughness")?;
        check_finite(self.dz_m, "pipe elevation change")?;
        Ok(())
    }
}
