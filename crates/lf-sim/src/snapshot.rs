//! Immutable per-tick output.

use crate::alarm::{Alarm, AlarmLevel};
use crate::state::{PumpState, SysState};
use lf_network::ElementResult;

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationSnapshot {
    /// Tick number since start (1-based)
    pub tick: u64,
    /// Simulated time [s]
    pub t_s: f64,
    pub sys_state: SysState,
    pub pump_state: PumpState,
    /// Delivered flow [m³/s]
    pub q_m3s: f64,
    pub ramp_factor: f64,
    pub nodes: Vec<ElementResult>,
    /// Delivered volume since start [m³]
    pub total_volume_m3: f64,
    pub alarms: Vec<Alarm>,
}

impl SimulationSnapshot {
    pub fn outlet_pressure_pa(&self) -> Option<f64> {
        self.nodes.last().map(|n| n.p_out_pa)
    }

    pub fn max_velocity_mps(&self) -> f64 {
        self.nodes
            .iter()
            .map(|n| n.velocity_mps)
            .fold(0.0, f64::max)
    }

    pub fn worst_alarm(&self) -> Option<AlarmLevel> {
        self.alarms.iter().map(|a| a.level).max()
    }
}
