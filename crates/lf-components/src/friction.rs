//! Reynolds number, flow regime and Darcy friction factor.
//!
//! ## Friction factor
//!
//! ```text
//! Re < 1e-9           f = 64                   (no-flow sentinel)
//! Re < 2300           f = 64 / Re              (laminar, closed form)
//! 2300 <= Re < 4000   f = (1-t)·64/2300 + t·f_cw(4000),  t = (Re-2300)/1700
//! Re >= 4000          f = f_cw(Re)             (Colebrook–White)
//! ```
//!
//! Colebrook–White is solved by fixed-point iteration on
//! `f_{n+1} = (-2·log10(ε/3.7 + 2.51/(Re·√f_n)))^-2`, seeded with the
//! Swamee–Jain explicit estimate. The loop stops when `|Δf| < 1e-8` or after
//! 50 iterations; the last iterate is returned either way and
//! [`FrictionFactor::converged`] records which.

use crate::common::mm_to_m;

pub const RE_LAMINAR_MAX: f64 = 2300.0;
pub const RE_TURBULENT_MIN: f64 = 4000.0;
/// Reynolds numbers below this are treated as no flow.
pub const RE_NO_FLOW: f64 = 1e-9;
/// Friction factor reported for no flow.
pub const NO_FLOW_FRICTION: f64 = 64.0;

pub const COLEBROOK_TOL: f64 = 1e-8;
pub const COLEBROOK_MAX_ITER: u32 = 50;

/// Reynolds number `v·D/ν`.
///
/// Returns `+∞` for a non-positive viscosity or diameter instead of failing.
pub fn reynolds(v_mps: f64, d_m: f64, nu_m2s: f64) -> f64 {
    if nu_m2s <= 0.0 || d_m <= 0.0 {
        return f64::INFINITY;
    }
    v_mps.abs() * d_m / nu_m2s
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlowRegime {
    Laminar,
    Transitional,
    Turbulent,
}

impl FlowRegime {
    pub fn classify(re: f64) -> Self {
        if re < RE_LAMINAR_MAX {
            FlowRegime::Laminar
        } else if re < RE_TURBULENT_MIN {
            FlowRegime::Transitional
        } else {
            FlowRegime::Turbulent
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FlowRegime::Laminar => "laminar",
            FlowRegime::Transitional => "transitional",
            FlowRegime::Turbulent => "turbulent",
        }
    }
}

/// Darcy friction factor with solver diagnostics.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrictionFactor {
    pub value: f64,
    /// Colebrook–White iterations spent (0 for closed-form results).
    pub iterations: u32,
    /// False when the iteration cap was hit before the tolerance.
    pub converged: bool,
}

impl FrictionFactor {
    fn closed_form(value: f64) -> Self {
        Self {
            value,
            iterations: 0,
            converged: true,
        }
    }
}

/// Swamee–Jain explicit approximation of Colebrook–White.
pub fn swamee_jain(re: f64, rel_roughness: f64) -> f64 {
    let arg = rel_roughness / 3.7 + 5.74 / re.powf(0.9);
    0.25 / arg.log10().powi(2)
}

/// Colebrook–White residual `1/√f + 2·log10(ε/3.7 + 2.51/(Re·√f))`.
pub fn colebrook_residual(f: f64, re: f64, rel_roughness: f64) -> f64 {
    let sqf = f.sqrt();
    1.0 / sqf + 2.0 * (rel_roughness / 3.7 + 2.51 / (re * sqf)).log10()
}

/// Turbulent friction factor by fixed-point iteration on Colebrook–White.
pub fn colebrook(re: f64, rel_roughness: f64) -> FrictionFactor {
    if !re.is_finite() {
        // Fully rough limit; a smooth bore has no friction at infinite Re.
        if rel_roughness <= 0.0 {
            return FrictionFactor::closed_form(0.0);
        }
        let rhs = -2.0 * (rel_roughness / 3.7).log10();
        return FrictionFactor::closed_form(1.0 / (rhs * rhs));
    }

    let mut f = swamee_jain(re, rel_roughness);
    for i in 1..=COLEBROOK_MAX_ITER {
        let rhs = -2.0 * (rel_roughness / 3.7 + 2.51 / (re * f.sqrt())).log10();
        let f_new = 1.0 / (rhs * rhs);
        if (f_new - f).abs() < COLEBROOK_TOL {
            return FrictionFactor {
                value: f_new,
                iterations: i,
                converged: true,
            };
        }
        f = f_new;
    }
    FrictionFactor {
        value: f,
        iterations: COLEBROOK_MAX_ITER,
        converged: false,
    }
}

/// Darcy friction factor for a bore of `d_m` with absolute roughness `eps_mm`.
pub fn friction_factor(re: f64, d_m: f64, eps_mm: f64) -> FrictionFactor {
    if re.is_nan() || re < RE_NO_FLOW {
        return FrictionFactor::closed_form(NO_FLOW_FRICTION);
    }
    if re < RE_LAMINAR_MAX {
        return FrictionFactor::closed_form(64.0 / re);
    }

    let rel_roughness = if d_m > 0.0 {
        (mm_to_m(eps_mm) / d_m).max(0.0)
    } else {
        0.0
    };

    if re < RE_TURBULENT_MIN {
        let f_lam = 64.0 / RE_LAMINAR_MAX;
        let turb = colebrook(RE_TURBULENT_MIN, rel_roughness);
        let t = (re - RE_LAMINAR_MAX) / (RE_TURBULENT_MIN - RE_LAMINAR_MAX);
        return FrictionFactor {
            value: f_lam * (1.0 - t) + turb.value * t,
            ..turb
        };
    }
    colebrook(re, rel_roughness)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reynolds_guards_degenerate_inputs() {
        assert_eq!(reynolds(1.0, 0.05, 0.0), f64::INFINITY);
        assert_eq!(reynolds(1.0, 0.0, 1e-6), f64::INFINITY);
        assert!((reynolds(1.0, 0.05, 1e-6) - 50_000.0).abs() < 1e-6);
    }

    #[test]
    fn regime_boundaries() {
        assert_eq!(FlowRegime::classify(2299.9), FlowRegime::Laminar);
        assert_eq!(FlowRegime::classify(2300.0), FlowRegime::Transitional);
        assert_eq!(FlowRegime::classify(3999.9), FlowRegime::Transitional);
        assert_eq!(FlowRegime::classify(4000.0), FlowRegime::Turbulent);
        assert_eq!(FlowRegime::classify(f64::INFINITY), FlowRegime::Turbulent);
    }

    #[test]
    fn no_flow_sentinel() {
        let f = friction_factor(0.0, 0.05, 0.046);
        assert_eq!(f.value, 64.0);
        assert!(f.converged);
        assert_eq!(friction_factor(f64::NAN, 0.05, 0.046).value, 64.0);
    }

    #[test]
    fn laminar_is_closed_form() {
        let f = friction_factor(1000.0, 0.05, 0.046);
        assert_eq!(f.value, 64.0 / 1000.0);
        assert_eq!(f.iterations, 0);
    }

    #[test]
    fn transition_band_is_continuous_at_edges() {
        let lo = friction_factor(2300.0, 0.05, 0.046).value;
        assert!((lo - 64.0 / 2300.0).abs() < 1e-15);

        let hi = friction_factor(3999.999_999, 0.05, 0.046).value;
        let turb = friction_factor(4000.0, 0.05, 0.046).value;
        assert!((hi - turb).abs() < 1e-9);
    }

    #[test]
    fn reference_pipe_turbulent() {
        // D=50 mm, eps=0.046 mm, Re ≈ 50 900
        let f = friction_factor(50_900.0, 0.05, 0.046);
        assert!(f.converged);
        assert!((f.value - 0.0237).abs() < 0.0005, "f = {}", f.value);
        assert!(colebrook_residual(f.value, 50_900.0, 0.046e-3 / 0.05).abs() < 1e-6);

        // hydraulically smooth bore at the same Re
        let smooth = friction_factor(50_900.0, 0.05, 0.0);
        assert!((smooth.value - 0.021).abs() < 0.001, "f = {}", smooth.value);
    }

    #[test]
    fn swamee_jain_seed_is_close() {
        let seed = swamee_jain(1e5, 1e-4);
        let solved = colebrook(1e5, 1e-4).value;
        assert!((seed - solved).abs() / solved < 0.02);
    }

    #[test]
    fn infinite_reynolds_uses_rough_limit() {
        let f = friction_factor(f64::INFINITY, 0.05, 0.046);
        assert!(f.value.is_finite() && f.value > 0.0);
        assert_eq!(friction_factor(f64::INFINITY, 0.05, 0.0).value, 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn laminar_matches_closed_form(re in 1e-6_f64..2300.0, eps in 0.0_f64..1.0) {
            prop_assert_eq!(friction_factor(re, 0.05, eps).value, 64.0 / re);
        }

        #[test]
        fn turbulent_is_deterministic_and_solves_colebrook(
            re in 4000.0_f64..1e7,
            d_mm in 10.0_f64..300.0,
            eps_mm in 0.0_f64..0.5,
        ) {
            let d_m = d_mm / 1000.0;
            let a = friction_factor(re, d_m, eps_mm);
            let b = friction_factor(re, d_m, eps_mm);
            prop_assert_eq!(a, b);
            prop_assert!(a.converged);
            let residual = colebrook_residual(a.value, re, eps_mm / 1000.0 / d_m);
            prop_assert!(residual.abs() < 1e-6, "residual {}", residual);
        }
    }
}
