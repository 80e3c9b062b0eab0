//! Head loss primitives (metres of fluid) and head/pressure conversion.

use crate::common::{EPSILON_DIAMETER_M, velocity};
use lf_core::units::constants::G0_MPS2;

/// Velocity head `v²/(2g)` [m].
#[inline]
pub fn velocity_head(v_mps: f64) -> f64 {
    v_mps * v_mps / (2.0 * G0_MPS2)
}

/// Darcy–Weisbach `hf = f·(L/D)·v²/(2g)`. Zero for a non-positive diameter.
pub fn head_loss_friction(f: f64, length_m: f64, d_m: f64, v_mps: f64) -> f64 {
    if d_m <= 0.0 {
        return 0.0;
    }
    f * (length_m / d_m) * velocity_head(v_mps)
}

/// Fitting or valve loss `hm = K·v²/(2g)`.
pub fn head_loss_fitting(k: f64, v_mps: f64) -> f64 {
    k * velocity_head(v_mps)
}

/// Borda–Carnot sudden expansion `(v1 - v2)²/(2g)`.
pub fn head_loss_expansion(v1_mps: f64, v2_mps: f64) -> f64 {
    velocity_head(v1_mps - v2_mps)
}

/// Contraction coefficient `Kc = 0.5·(1 - (D2/D1)²)`, area ratio clamped to ≤ 1.
pub fn contraction_coefficient(d1_m: f64, d2_m: f64) -> f64 {
    if d1_m <= 0.0 {
        return 0.0;
    }
    let area_ratio = ((d2_m * d2_m) / (d1_m * d1_m)).min(1.0);
    0.5 * (1.0 - area_ratio)
}

/// Sudden contraction `Kc·v2²/(2g)`.
pub fn head_loss_contraction(d1_m: f64, d2_m: f64, v2_mps: f64) -> f64 {
    contraction_coefficient(d1_m, d2_m) * velocity_head(v2_mps)
}

/// `ΔP = ρ·g·h` [Pa].
#[inline]
pub fn head_to_pressure(rho_kg_m3: f64, head_m: f64) -> f64 {
    rho_kg_m3 * G0_MPS2 * head_m
}

/// `h = ΔP / (ρ·g)` [m]. Zero for a non-positive density.
#[inline]
pub fn pressure_to_head(rho_kg_m3: f64, dp_pa: f64) -> f64 {
    if rho_kg_m3 <= 0.0 {
        return 0.0;
    }
    dp_pa / (rho_kg_m3 * G0_MPS2)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AreaChange {
    Contraction,
    Expansion,
}

/// Loss across an abrupt bore change from `d_up_m` to `d_down_m` at flow `q_m3s`.
///
/// Returns `None` when the bores differ by no more than 0.1 mm.
pub fn sudden_area_change(d_up_m: f64, d_down_m: f64, q_m3s: f64) -> Option<(AreaChange, f64)> {
    if (d_up_m - d_down_m).abs() <= EPSILON_DIAMETER_M {
        return None;
    }
    let v_up = velocity(q_m3s, d_up_m);
    let v_down = velocity(q_m3s, d_down_m);
    if d_down_m < d_up_m {
        Some((
            AreaChange::Contraction,
            head_loss_contraction(d_up_m, d_down_m, v_down),
        ))
    } else {
        Some((AreaChange::Expansion, head_loss_expansion(v_up, v_down)))
    }
}
