//! Common utilities for element calculations.

use crate::error::{ComponentError, ComponentResult};
use lf_core::numeric::ensure_finite;

/// Diameters closer than this [m] are treated as the same bore.
pub const EPSILON_DIAMETER_M: f64 = 1e-4;

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<()> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical { what })?;
    Ok(())
}

/// Ensure a value is finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> ComponentResult<()> {
    check_finite(value, what)?;
    if value <= 0.0 {
        return Err(ComponentError::NonPhysical { what });
    }
    Ok(())
}

/// Ensure a value is finite and not negative.
pub fn check_non_negative(value: f64, what: &'static str) -> ComponentResult<()> {
    check_finite(value, what)?;
    if value < 0.0 {
        return Err(ComponentError::NonPhysical { what });
    }
    Ok(())
}

#[inline]
pub fn mm_to_m(mm: f64) -> f64 {
    mm / 1000.0
}

/// Circular flow area [m²]. Zero for non-positive diameters.
pub fn flow_area(d_m: f64) -> f64 {
    if d_m > 0.0 {
        std::f64::consts::PI * d_m * d_m / 4.0
    } else {
        0.0
    }
}

/// Mean velocity [m/s] of `q_m3s` through a bore of `d_m`. Zero if the bore has no area.
pub fn velocity(q_m3s: f64, d_m: f64) -> f64 {
    let area = flow_area(d_m);
    if area > 0.0 { q_m3s / area } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_finite() {
        assert!(check_finite(1.0, "test").is_ok());
        assert!(check_finite(f64::INFINITY, "test").is_err());
        assert!(check_finite(f64::NAN, "test").is_err());
    }

    #[test]
    fn test_positive_and_non_negative() {
        assert!(check_positive(0.0, "d").is_err());
        assert!(check_positive(1e-3, "d").is_ok());
        assert!(check_non_negative(0.0, "l").is_ok());
        assert!(check_non_negative(-1.0, "l").is_err());
    }

    #[test]
    fn velocity_of_reference_pipe() {
        let v = velocity(0.002, 0.05);
        assert!((v - 1.018_591_6).abs() < 1e-6);
    }

    #[test]
    fn zero_bore_has_zero_velocity() {
        assert_eq!(velocity(0.002, 0.0), 0.0);
        assert_eq!(velocity(0.002, -1.0), 0.0);
    }
}
