//! Staged commands in, engine events out.

use crate::alarm::Alarm;
use crate::snapshot::SimulationSnapshot;
use crate::state::{PumpState, SysState};
use lf_core::ElementId;
use lf_fluids::FluidSample;
use lf_network::ChainLink;
use std::sync::Arc;

/// External mutation, applied at the start of the next tick.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineCommand {
    SetValveOpening { id: ElementId, opening: f64 },
    SetFluid(FluidSample),
    ReplaceChain(Vec<ChainLink>),
}

/// Notifications queued by the engine, drained by the consumer.
///
/// The queue holds at most `SimOptions::history_capacity` events; the oldest
/// are dropped when a consumer falls behind.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineEvent {
    Tick(Arc<SimulationSnapshot>),
    /// Only queued when the tick raised at least one alarm.
    Alarm(Vec<Alarm>),
    /// Only queued when the `(sys, pump)` pair changed. `t_s` is the
    /// simulated time of the change (0 for a start).
    StateChange {
        sys: SysState,
        pump: PumpState,
        t_s: f64,
    },
}
