//! Empirical property correlations used when no table is available.
//!
//! All correlations take temperature in °C and return the file units of
//! [`crate::table`]: density in kg/m³, viscosity in mPa·s, heat capacity in
//! kJ/(kg·K). Conversion to SI is done by the resolver.

use crate::error::{FluidError, FluidResult};
use lf_core::units::constants::ZERO_CELSIUS_K;

/// Polynomial `a0 + a1·T + a2·T² + ...` in °C.
#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial {
    pub coefficients: Vec<f64>,
}

impl Polynomial {
    pub fn new(coefficients: impl Into<Vec<f64>>) -> Self {
        Self {
            coefficients: coefficients.into(),
        }
    }

    pub fn eval(&self, t_c: f64) -> f64 {
        // Horner
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, a| acc * t_c + a)
    }
}

/// Dynamic viscosity correlation in mPa·s.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViscosityCorrelation {
    /// `μ = A·exp(B / (T + C))`, T in °C.
    Vogel { a: f64, b: f64, c: f64 },
    /// `μ = A·10^(B / (T + 273.15 − C))`, T in °C.
    Arrhenius { a: f64, b: f64, c: f64 },
}

impl ViscosityCorrelation {
    pub fn eval(&self, t_c: f64) -> FluidResult<f64> {
        let (denom, value) = match *self {
            ViscosityCorrelation::Vogel { a, b, c } => {
                let d = t_c + c;
                (d, a * (b / d).exp())
            }
            ViscosityCorrelation::Arrhenius { a, b, c } => {
                let d = t_c + ZERO_CELSIUS_K - c;
                (d, a * 10f64.powf(b / d))
            }
        };
        if denom <= 0.0 || !value.is_finite() || value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "viscosity correlation outside its domain",
            });
        }
        Ok(value)
    }
}

/// Coefficient-based fluid model.
#[derive(Clone, Debug, PartialEq)]
pub struct EmpiricalModel {
    /// Density polynomial [kg/m³].
    pub density: Polynomial,
    /// Viscosity correlation [mPa·s].
    pub viscosity: ViscosityCorrelation,
    /// Heat capacity polynomial [kJ/(kg·K)].
    pub heat_capacity: Option<Polynomial>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polynomial_horner_matches_expanded_form() {
        let p = Polynomial::new([999.84, 0.067, -0.0089, 0.000035]);
        let t: f64 = 20.0;
        let expanded = 999.84 + 0.067 * t - 0.0089 * t * t + 0.000035 * t.powi(3);
        assert!((p.eval(t) - expanded).abs() < 1e-9);
    }

    #[test]
    fn empty_polynomial_is_zero() {
        assert_eq!(Polynomial::new(Vec::new()).eval(42.0), 0.0);
    }

    #[test]
    fn vogel_water_near_reference() {
        let mu = ViscosityCorrelation::Vogel {
            a: 0.02427,
            b: 578.919,
            c: 135.604,
        }
        .eval(20.0)
        .unwrap();
        assert!((mu - 1.002).abs() < 0.01, "mu = {mu}");
    }

    #[test]
    fn arrhenius_form() {
        let corr = ViscosityCorrelation::Arrhenius {
            a: 0.02414,
            b: 247.8,
            c: 140.0,
        };
        let mu = corr.eval(20.0).unwrap();
        let expected = 0.02414 * 10f64.powf(247.8 / (20.0 + 273.15 - 140.0));
        assert!((mu - expected).abs() < 1e-12);
        assert!((mu - 1.0).abs() < 0.02, "mu = {mu}");
    }

    #[test]
    fn pole_is_non_physical() {
        let corr = ViscosityCorrelation::Vogel {
            a: 0.03,
            b: 700.0,
            c: 130.0,
        };
        assert!(corr.eval(-130.0).is_err());
        assert!(corr.eval(-200.0).is_err());
    }
}
