//! System and pump state machines.

use core::fmt;

/// `Idle -> Running -> Alarm`. Alarm is only left through stop or reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SysState {
    #[default]
    Idle,
    Running,
    Alarm,
}

/// `Stopped -> Ramping -> Running -> Overload`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PumpState {
    #[default]
    Stopped,
    Ramping,
    Running,
    Overload,
}

impl SysState {
    pub fn label(self) -> &'static str {
        match self {
            SysState::Idle => "idle",
            SysState::Running => "running",
            SysState::Alarm => "alarm",
        }
    }

    /// Ticks are only produced in these states.
    pub fn is_active(self) -> bool {
        !matches!(self, SysState::Idle)
    }
}

impl PumpState {
    pub fn label(self) -> &'static str {
        match self {
            PumpState::Stopped => "stopped",
            PumpState::Ramping => "ramping",
            PumpState::Running => "running",
            PumpState::Overload => "overload",
        }
    }
}

impl fmt::Display for SysState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for PumpState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
