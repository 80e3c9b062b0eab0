//! Pump start-up ramp.

use lf_core::smoothstep;

/// Smoothstep ramp `x²(3 - 2x)`, `x = t / duration`, held at 1 afterwards.
///
/// Completion is decided on the integer tick count so that the factor is
/// exactly 1.0 on the tick whose time reaches the ramp duration, regardless
/// of how `dt` rounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PumpRamp {
    duration_s: f64,
    ticks_to_full: u64,
}

impl PumpRamp {
    /// `duration_s` must be finite and non-negative, `dt_s` positive.
    pub fn new(duration_s: f64, dt_s: f64) -> Self {
        let ticks_to_full = if duration_s > 0.0 {
            (duration_s / dt_s - 1e-9).ceil().max(1.0) as u64
        } else {
            0
        };
        Self {
            duration_s,
            ticks_to_full,
        }
    }

    pub fn duration_s(&self) -> f64 {
        self.duration_s
    }

    pub fn ticks_to_full(&self) -> u64 {
        self.ticks_to_full
    }

    /// Ramp factor at simulated time `t_s`.
    pub fn factor(&self, t_s: f64) -> f64 {
        if self.duration_s <= 0.0 || t_s >= self.duration_s {
            return 1.0;
        }
        smoothstep(t_s / self.duration_s)
    }

    /// Ramp factor after `ticks` steps of `dt_s`.
    pub fn factor_at_tick(&self, ticks: u64, dt_s: f64) -> f64 {
        if ticks >= self.ticks_to_full {
            1.0
        } else {
            self.factor(ticks as f64 * dt_s)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn endpoints() {
        let r = PumpRamp::new(2.0, 0.1);
        assert_eq!(r.factor(0.0), 0.0);
        assert_eq!(r.factor(2.0), 1.0);
        assert_eq!(r.factor(7.5), 1.0);
        assert_eq!(r.factor(1.0), 0.5);
        assert_eq!(r.ticks_to_full(), 20);
        assert!(r.factor_at_tick(19, 0.1) < 1.0);
        assert_eq!(r.factor_at_tick(20, 0.1), 1.0);
    }

    #[test]
    fn uneven_step_still_reaches_one() {
        let r = PumpRamp::new(1.0, 0.3);
        assert_eq!(r.ticks_to_full(), 4);
        assert!(r.factor_at_tick(3, 0.3) < 1.0);
        assert_eq!(r.factor_at_tick(4, 0.3), 1.0);
    }

    #[test]
    fn zero_duration_is_instant() {
        let r = PumpRamp::new(0.0, 0.1);
        assert_eq!(r.factor(0.0), 1.0);
        assert_eq!(r.factor_at_tick(0, 0.1), 1.0);
    }

    proptest! {
        #[test]
        fn strictly_increasing_inside_window(a in 0.0f64..1.9, b in 0.0f64..1.9) {
            prop_assume!((a - b).abs() > 1e-6);
            let r = PumpRamp::new(2.0, 0.1);
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            prop_assert!(r.factor(lo) < r.factor(hi));
        }
    }
}
