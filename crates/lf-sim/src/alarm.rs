//! Alarm records and the per-tick scans that raise them.
//!
//! Alarms are not deduplicated: a sustained condition raises a fresh record
//! on every tick.

use core::fmt;
use lf_components::ElementKind;
use lf_core::ElementId;
use lf_network::NetworkSolution;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlarmCode {
    /// Pump running against a blocked line.
    Deadhead,
    /// Gauge pressure below zero at an element outlet (cavitation risk).
    NegativePressure,
    /// Pipe velocity above the configured limit.
    HighVelocity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AlarmLevel {
    Info,
    Warning,
    Critical,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alarm {
    pub code: AlarmCode,
    pub level: AlarmLevel,
    pub message: String,
    /// Simulated time of the tick that raised it [s]
    pub t_s: f64,
    pub element: Option<ElementId>,
}

impl AlarmCode {
    pub fn label(self) -> &'static str {
        match self {
            AlarmCode::Deadhead => "DEADHEAD",
            AlarmCode::NegativePressure => "NEGATIVE_PRESSURE",
            AlarmCode::HighVelocity => "HIGH_VELOCITY",
        }
    }
}

impl AlarmLevel {
    pub fn label(self) -> &'static str {
        match self {
            AlarmLevel::Info => "info",
            AlarmLevel::Warning => "warning",
            AlarmLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for Alarm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.1}s] {} {}: {}",
            self.t_s,
            self.level.label(),
            self.code.label(),
            self.message
        )
    }
}

pub(crate) fn deadhead(t_s: f64, deadhead_s: f64, critical: bool) -> Alarm {
    Alarm {
        code: AlarmCode::Deadhead,
        level: if critical {
            AlarmLevel::Critical
        } else {
            AlarmLevel::Warning
        },
        message: format!("pump deadheaded for {deadhead_s:.1} s"),
        t_s,
        element: None,
    }
}

/// One warning per element whose outlet gauge pressure is negative.
pub(crate) fn scan_pressure(solution: &NetworkSolution, t_s: f64, out: &mut Vec<Alarm>) {
    for n in solution.nodes.iter().filter(|n| n.p_out_pa < 0.0) {
        out.push(Alarm {
            code: AlarmCode::NegativePressure,
            level: AlarmLevel::Warning,
            message: format!(
                "negative pressure at {} outlet ({:.0} Pa), cavitation risk",
                n.name, n.p_out_pa
            ),
            t_s,
            element: Some(n.id),
        });
    }
}

/// One info record per pipe faster than `limit_mps`.
pub(crate) fn scan_velocity(
    solution: &NetworkSolution,
    limit_mps: f64,
    t_s: f64,
    out: &mut Vec<Alarm>,
) {
    let fast = solution
        .nodes
        .iter()
        .filter(|n| n.kind == ElementKind::Pipe && n.velocity_mps > limit_mps);
    for n in fast {
        out.push(Alarm {
            code: AlarmCode::HighVelocity,
            level: AlarmLevel::Info,
            message: format!("{} velocity high: {:.2} m/s", n.name, n.velocity_mps),
            t_s,
            element: Some(n.id),
        });
    }
}
