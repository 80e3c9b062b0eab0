//! Engine configuration.

use crate::error::{SimError, SimResult};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct SimOptions {
    /// Physical time advanced per tick [s]
    pub dt_s: f64,
    /// Wall-clock cadence for real-time pacing
    pub tick_interval: Duration,
    /// Pump start-up ramp [s]
    pub ramp_duration_s: f64,
    /// Deadhead time after which the pump overloads [s]
    pub deadhead_threshold_s: f64,
    /// Pipe velocity limit for the high-velocity alarm [m/s]
    pub high_velocity_mps: f64,
    /// Snapshots retained in the rolling history
    pub history_capacity: usize,
    /// Gauge pressure at the chain inlet [Pa]
    pub inlet_pressure_pa: f64,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt_s: 0.1,
            tick_interval: Duration::from_millis(100),
            ramp_duration_s: 2.0,
            deadhead_threshold_s: 5.0,
            high_velocity_mps: 3.0,
            history_capacity: 600,
            inlet_pressure_pa: 0.0,
        }
    }
}

impl SimOptions {
    pub fn validate(&self) -> SimResult<()> {
        if !(self.dt_s.is_finite() && self.dt_s > 0.0) {
            return Err(SimError::InvalidArg {
                what: "dt_s must be positive",
            });
        }
        if !(self.ramp_duration_s.is_finite() && self.ramp_duration_s >= 0.0) {
            return Err(SimError::InvalidArg {
                what: "ramp_duration_s must be non-negative",
            });
        }
        if !(self.deadhead_threshold_s.is_finite() && self.deadhead_threshold_s >= 0.0) {
            return Err(SimError::InvalidArg {
                what: "deadhead_threshold_s must be non-negative",
            });
        }
        if !(self.high_velocity_mps.is_finite() && self.high_velocity_mps > 0.0) {
            return Err(SimError::InvalidArg {
                what: "high_velocity_mps must be positive",
            });
        }
        if self.history_capacity == 0 {
            return Err(SimError::InvalidArg {
                what: "history_capacity must be positive",
            });
        }
        if !self.inlet_pressure_pa.is_finite() {
            return Err(SimError::InvalidArg {
                what: "inlet_pressure_pa must be finite",
            });
        }
        Ok(())
    }

    /// Deadhead ticks tolerated before overload.
    pub(crate) fn deadhead_ticks(&self) -> u64 {
        (self.deadhead_threshold_s / self.dt_s + 1e-9).floor() as u64
    }
}
