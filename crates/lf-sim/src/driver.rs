//! Outer tick loop: pacing, scheduled actions, run summary.

use crate::alarm::AlarmLevel;
use crate::engine::{SimulationEngine, TickOutcome};
use crate::error::{SimError, SimResult};
use crate::schedule::Schedule;
use crate::state::{PumpState, SysState};
use std::time::Instant;
use tracing::{debug, info};

/// How ticks are spaced in wall-clock time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Pacing {
    /// One tick per `SimOptions::tick_interval`.
    Realtime,
    /// Back to back.
    #[default]
    Fast,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub t_end_s: f64,
    pub total_volume_m3: f64,
    pub alarms_raised: usize,
    pub worst_alarm: Option<AlarmLevel>,
    pub sys_state: SysState,
    pub pump_state: PumpState,
    pub wall_s: f64,
}

/// Start `engine` and tick it for `duration_s` of simulated time.
///
/// Scheduled actions are staged before the tick that begins at or after their
/// time. `on_tick` sees every outcome; the run ends early if the engine is
/// stopped from inside it.
pub fn run_for(
    engine: &mut SimulationEngine,
    duration_s: f64,
    pacing: Pacing,
    schedule: &mut Schedule,
    mut on_tick: impl FnMut(&mut SimulationEngine, &TickOutcome),
) -> SimResult<RunSummary> {
    if !(duration_s.is_finite() && duration_s >= 0.0) {
        return Err(SimError::InvalidArg {
            what: "duration_s must be non-negative",
        });
    }
    let dt = engine.options().dt_s;
    let interval = engine.options().tick_interval;
    let n_ticks = (duration_s / dt - 1e-9).ceil().max(0.0) as u64;

    engine.start();
    info!(duration_s, n_ticks, ?pacing, "run started");
    let wall_start = Instant::now();
    let mut alarms_raised = 0;
    let mut worst_alarm = None;

    for n in 0..n_ticks {
        for action in schedule.due(engine.elapsed_s()) {
            debug!(time_s = action.time_s, "scheduled action staged");
            engine.stage(action.command.clone())?;
        }

        let Some(outcome) = engine.step() else {
            break;
        };
        alarms_raised += outcome.alarms().len();
        worst_alarm = worst_alarm.max(outcome.snapshot.worst_alarm());
        on_tick(engine, &outcome);

        if pacing == Pacing::Realtime {
            let deadline = wall_start + interval.mul_f64((n + 1) as f64);
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }
        }
    }

    let summary = RunSummary {
        ticks: engine.ticks(),
        t_end_s: engine.elapsed_s(),
        total_volume_m3: engine.total_volume_m3(),
        alarms_raised,
        worst_alarm,
        sys_state: engine.sys_state(),
        pump_state: engine.pump_state(),
        wall_s: wall_start.elapsed().as_secs_f64(),
    };
    info!(
        ticks = summary.ticks,
        volume_m3 = summary.total_volume_m3,
        alarms = summary.alarms_raised,
        "run finished"
    );
    Ok(summary)
}
