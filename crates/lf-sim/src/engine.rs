//! Tick-driven simulation engine.
//!
//! The engine owns every piece of mutable simulation state. Each call to
//! [`SimulationEngine::step`] runs one tick synchronously:
//!
//! 1. apply staged commands
//! 2. advance simulated time by `dt`
//! 3. update the ramp factor and the pump state
//! 4. resolve the chain at `q_nominal * ramp`
//! 5. accumulate delivered volume
//! 6. evaluate alarms (deadhead, negative pressure, high velocity)
//! 7. record the snapshot and queue events
//!
//! Time and the deadhead timer are integer tick counts scaled by `dt`, so
//! threshold crossings land on a predictable tick.

use crate::alarm::{self, Alarm, AlarmLevel};
use crate::error::{SimError, SimResult};
use crate::events::{EngineCommand, EngineEvent};
use crate::history::History;
use crate::options::SimOptions;
use crate::ramp::PumpRamp;
use crate::snapshot::SimulationSnapshot;
use crate::state::{PumpState, SysState};
use lf_components::ElementSpec;
use lf_core::ElementId;
use lf_fluids::FluidSample;
use lf_network::{
    ChainLink, FlowConditions, has_pump, nominal_flow, resolve_chain, validate_chain,
};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Result of one tick.
#[derive(Clone, Debug)]
pub struct TickOutcome {
    pub snapshot: Arc<SimulationSnapshot>,
    /// New `(sys, pump)` pair if the tick changed it.
    pub state_change: Option<(SysState, PumpState)>,
}

impl TickOutcome {
    pub fn alarms(&self) -> &[Alarm] {
        &self.snapshot.alarms
    }
}

pub struct SimulationEngine {
    opts: SimOptions,
    ramp: PumpRamp,
    deadhead_limit: u64,

    chain: Vec<ChainLink>,
    fluid: FluidSample,

    sys_state: SysState,
    pump_state: PumpState,
    ticks: u64,
    deadhead_ticks: u64,
    total_volume_m3: f64,

    pending: VecDeque<EngineCommand>,
    events: VecDeque<EngineEvent>,
    dropped_events: u64,
    history: History<Arc<SimulationSnapshot>>,
}

impl SimulationEngine {
    pub fn new(chain: Vec<ChainLink>, fluid: FluidSample, opts: SimOptions) -> SimResult<Self> {
        opts.validate()?;
        validate_chain(&chain)?;
        check_fluid(&fluid)?;
        Ok(Self {
            ramp: PumpRamp::new(opts.ramp_duration_s, opts.dt_s),
            deadhead_limit: opts.deadhead_ticks(),
            history: History::with_capacity(opts.history_capacity),
            opts,
            chain,
            fluid,
            sys_state: SysState::Idle,
            pump_state: PumpState::Stopped,
            ticks: 0,
            deadhead_ticks: 0,
            total_volume_m3: 0.0,
            pending: VecDeque::new(),
            events: VecDeque::new(),
            dropped_events: 0,
        })
    }

    // ---- controls -------------------------------------------------------

    /// Reset accumulated state and begin ticking with the pump ramping.
    /// Does nothing if the engine is already running.
    pub fn start(&mut self) {
        if self.sys_state == SysState::Running {
            return;
        }
        self.clear_state();
        let before = self.pair();
        self.pump_state = PumpState::Ramping;
        self.sys_state = SysState::Running;
        info!(elements = self.chain.len(), dt_s = self.opts.dt_s, "simulation started");
        self.notify_if_changed(before);
    }

    /// Halt ticking. Accumulated state and the last snapshot are kept.
    pub fn stop(&mut self) {
        let before = self.pair();
        self.pump_state = PumpState::Stopped;
        self.sys_state = SysState::Idle;
        if before != self.pair() {
            info!(t_s = self.elapsed_s(), "simulation stopped");
        }
        self.notify_if_changed(before);
    }

    /// Stop and zero all accumulated state, including history.
    pub fn reset(&mut self) {
        self.stop();
        self.clear_state();
        info!("simulation reset");
    }

    /// Stage a valve opening change; the value is clamped to [0, 1].
    pub fn set_valve_opening(&mut self, id: ElementId, opening: f64) -> SimResult<()> {
        self.stage(EngineCommand::SetValveOpening { id, opening })
    }

    /// Stage a fluid change (for example after a temperature change).
    pub fn set_fluid(&mut self, fluid: FluidSample) -> SimResult<()> {
        self.stage(EngineCommand::SetFluid(fluid))
    }

    /// Stage a new chain. Elements may be inserted, removed or reordered.
    pub fn replace_chain(&mut self, chain: Vec<ChainLink>) -> SimResult<()> {
        self.stage(EngineCommand::ReplaceChain(chain))
    }

    /// Validate a command and queue it for the start of the next tick.
    pub fn stage(&mut self, command: EngineCommand) -> SimResult<()> {
        match &command {
            EngineCommand::SetValveOpening { id, opening } => {
                if opening.is_nan() {
                    return Err(SimError::InvalidArg {
                        what: "valve opening must not be NaN",
                    });
                }
                // Checked against the chain as it will be once earlier
                // staged replacements land.
                let chain = self.staged_chain();
                let link = chain
                    .iter()
                    .find(|l| l.id == *id)
                    .ok_or(SimError::UnknownElement { id: *id })?;
                if !matches!(link.spec, ElementSpec::Valve(_)) {
                    return Err(SimError::NotAValve { id: *id });
                }
            }
            EngineCommand::SetFluid(fluid) => check_fluid(fluid)?,
            EngineCommand::ReplaceChain(chain) => validate_chain(chain)?,
        }
        self.pending.push_back(command);
        Ok(())
    }

    // ---- tick -----------------------------------------------------------

    /// Run one tick. Returns `None` while the engine is idle.
    pub fn step(&mut self) -> Option<TickOutcome> {
        if !self.sys_state.is_active() {
            trace!("step ignored, engine idle");
            return None;
        }
        let before = self.pair();
        self.apply_pending();

        self.ticks += 1;
        let t_s = self.elapsed_s();

        let ramp_factor = self.ramp.factor_at_tick(self.ticks, self.opts.dt_s);
        if self.pump_state == PumpState::Ramping && ramp_factor >= 1.0 {
            self.pump_state = PumpState::Running;
            info!(t_s, "pump reached nominal speed");
        }

        let cond = FlowConditions {
            q_m3s: nominal_flow(&self.chain) * ramp_factor,
            ramp_factor,
            inlet_pressure_pa: self.opts.inlet_pressure_pa,
        };
        let solution = resolve_chain(&self.chain, &self.fluid, cond);
        let q_eff = solution.q_effective_m3s;
        self.total_volume_m3 += q_eff * self.opts.dt_s;

        let mut alarms = Vec::new();
        self.check_deadhead(q_eff, t_s, &mut alarms);
        alarm::scan_pressure(&solution, t_s, &mut alarms);
        alarm::scan_velocity(&solution, self.opts.high_velocity_mps, t_s, &mut alarms);
        for a in &alarms {
            match a.level {
                AlarmLevel::Critical => warn!(code = a.code.label(), t_s, "{}", a.message),
                _ => debug!(code = a.code.label(), t_s, "{}", a.message),
            }
        }

        let snapshot = Arc::new(SimulationSnapshot {
            tick: self.ticks,
            t_s,
            sys_state: self.sys_state,
            pump_state: self.pump_state,
            q_m3s: q_eff,
            ramp_factor,
            nodes: solution.nodes,
            total_volume_m3: self.total_volume_m3,
            alarms,
        });
        self.history.push(Arc::clone(&snapshot));

        let state_change = self.notify_if_changed(before);
        if !snapshot.alarms.is_empty() {
            self.queue(EngineEvent::Alarm(snapshot.alarms.clone()));
        }
        self.queue(EngineEvent::Tick(Arc::clone(&snapshot)));

        Some(TickOutcome {
            snapshot,
            state_change,
        })
    }

    fn check_deadhead(&mut self, q_eff: f64, t_s: f64, alarms: &mut Vec<Alarm>) {
        let deadheaded =
            self.pump_state != PumpState::Stopped && q_eff <= 0.0 && has_pump(&self.chain);
        if !deadheaded {
            self.deadhead_ticks = 0;
            return;
        }
        self.deadhead_ticks += 1;
        let critical = self.deadhead_ticks > self.deadhead_limit;
        alarms.push(alarm::deadhead(t_s, self.deadhead_s(), critical));

        if critical && self.pump_state != PumpState::Overload {
            warn!(t_s, deadhead_s = self.deadhead_s(), "pump overload, system in alarm");
        }
        if critical {
            self.pump_state = PumpState::Overload;
            self.sys_state = SysState::Alarm;
        }
    }

    fn apply_pending(&mut self) {
        while let Some(command) = self.pending.pop_front() {
            match command {
                EngineCommand::SetValveOpening { id, opening } => {
                    let valve = self
                        .chain
                        .iter_mut()
                        .find(|l| l.id == id)
                        .and_then(|l| l.spec.as_valve_mut());
                    match valve {
                        Some(v) => {
                            v.set_opening(opening);
                            debug!(id = %id, opening = v.opening, "valve opening applied");
                        }
                        None => warn!(id = %id, "valve command dropped, element not in chain"),
                    }
                }
                EngineCommand::SetFluid(fluid) => {
                    debug!(rho = fluid.rho_kg_m3(), mu = fluid.mu_pa_s(), "fluid applied");
                    self.fluid = fluid;
                }
                EngineCommand::ReplaceChain(chain) => {
                    debug!(elements = chain.len(), "chain replaced");
                    self.chain = chain;
                }
            }
        }
    }

    // ---- events ---------------------------------------------------------

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        self.events.drain(..).collect()
    }

    /// Events dropped because the queue was full.
    pub fn dropped_events(&self) -> u64 {
        self.dropped_events
    }

    fn queue(&mut self, event: EngineEvent) {
        if self.events.len() >= self.opts.history_capacity {
            self.events.pop_front();
            if self.dropped_events == 0 {
                debug!(capacity = self.opts.history_capacity, "event queue full, dropping oldest");
            }
            self.dropped_events += 1;
        }
        self.events.push_back(event);
    }

    fn pair(&self) -> (SysState, PumpState) {
        (self.sys_state, self.pump_state)
    }

    fn notify_if_changed(
        &mut self,
        before: (SysState, PumpState),
    ) -> Option<(SysState, PumpState)> {
        let now = self.pair();
        if now == before {
            return None;
        }
        debug!(sys = %now.0, pump = %now.1, "state changed");
        self.queue(EngineEvent::StateChange {
            sys: now.0,
            pump: now.1,
            t_s: self.elapsed_s(),
        });
        Some(now)
    }

    fn clear_state(&mut self) {
        self.ticks = 0;
        self.deadhead_ticks = 0;
        self.total_volume_m3 = 0.0;
        self.history.clear();
    }

    fn staged_chain(&self) -> &[ChainLink] {
        self.pending
            .iter()
            .rev()
            .find_map(|c| match c {
                EngineCommand::ReplaceChain(chain) => Some(chain.as_slice()),
                _ => None,
            })
            .unwrap_or(self.chain.as_slice())
    }

    // ---- accessors ------------------------------------------------------

    pub fn sys_state(&self) -> SysState {
        self.sys_state
    }

    pub fn pump_state(&self) -> PumpState {
        self.pump_state
    }

    /// Ticks since the last start.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated time since the last start [s].
    pub fn elapsed_s(&self) -> f64 {
        self.ticks as f64 * self.opts.dt_s
    }

    pub fn deadhead_s(&self) -> f64 {
        self.deadhead_ticks as f64 * self.opts.dt_s
    }

    pub fn total_volume_m3(&self) -> f64 {
        self.total_volume_m3
    }

    pub fn latest_snapshot(&self) -> Option<Arc<SimulationSnapshot>> {
        self.history.latest().cloned()
    }

    pub fn history(&self) -> &History<Arc<SimulationSnapshot>> {
        &self.history
    }

    pub fn chain(&self) -> &[ChainLink] {
        &self.chain
    }

    pub fn fluid(&self) -> &FluidSample {
        &self.fluid
    }

    pub fn options(&self) -> &SimOptions {
        &self.opts
    }

    pub fn pending_commands(&self) -> usize {
        self.pending.len()
    }
}

fn check_fluid(fluid: &FluidSample) -> SimResult<()> {
    let rho = fluid.rho_kg_m3();
    let mu = fluid.mu_pa_s();
    if !(rho.is_finite() && rho > 0.0 && mu.is_finite() && mu > 0.0) {
        return Err(SimError::InvalidArg {
            what: "fluid density and viscosity must be positive",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::AlarmCode;
    use lf_components::{PipeSpec, PumpSpec, ValveKind, ValveSpec};

    fn id(i: u32) -> ElementId {
        ElementId::from_index(i)
    }

    fn water() -> FluidSample {
        FluidSample::from_density_viscosity(998.0, 1.0e-3).unwrap()
    }

    fn chain(opening: f64) -> Vec<ChainLink> {
        vec![
            ChainLink::new(
                id(0),
                "pump",
                ElementSpec::Pump(PumpSpec::new(5e-4, 20.0, 0.75, 53.1).unwrap()),
            ),
            ChainLink::new(
                id(1),
                "line",
                ElementSpec::Pipe(PipeSpec::new(53.1, 5.0, 0.046).unwrap()),
            ),
            ChainLink::new(
                id(2),
                "valve",
                ElementSpec::Valve(ValveSpec::new(ValveKind::Gate, opening)),
            ),
        ]
    }

    fn engine(opening: f64) -> SimulationEngine {
        SimulationEngine::new(chain(opening), water(), SimOptions::default()).unwrap()
    }

    #[test]
    fn idle_engine_does_not_tick() {
        let mut e = engine(1.0);
        assert!(e.step().is_none());
        assert_eq!(e.ticks(), 0);
        assert!(e.drain_events().is_empty());
    }

    #[test]
    fn start_emits_state_change_and_ticks() {
        let mut e = engine(1.0);
        e.start();
        let out = e.step().unwrap();
        assert_eq!(out.snapshot.tick, 1);
        assert!((out.snapshot.t_s - 0.1).abs() < 1e-12);
        assert!(out.snapshot.q_m3s > 0.0);

        let events = e.drain_events();
        match &events[0] {
            EngineEvent::StateChange { sys, pump, t_s } => {
                assert_eq!(*sys, SysState::Running);
                assert_eq!(*pump, PumpState::Ramping);
                assert_eq!(*t_s, 0.0);
            }
            other => panic!("expected a state change, got {other:?}"),
        }
        assert!(matches!(events.last(), Some(EngineEvent::Tick(_))));
    }

    #[test]
    fn undrained_events_are_bounded() {
        let opts = SimOptions {
            history_capacity: 50,
            ..SimOptions::default()
        };
        let mut e = SimulationEngine::new(chain(1.0), water(), opts).unwrap();
        e.start();
        let first = e.step().unwrap().snapshot;
        for _ in 0..199 {
            e.step();
        }
        assert_eq!(e.history().len(), 50);
        // only the local handle keeps tick 1 alive
        assert_eq!(Arc::strong_count(&first), 1);

        let events = e.drain_events();
        assert_eq!(events.len(), 50);
        assert!(e.dropped_events() > 0);
        match events.last() {
            Some(EngineEvent::Tick(s)) => assert_eq!(s.tick, 200),
            other => panic!("expected the latest tick, got {other:?}"),
        }
    }

    #[test]
    fn stop_is_stamped_with_elapsed_time() {
        let mut e = engine(1.0);
        e.start();
        for _ in 0..5 {
            e.step();
        }
        e.drain_events();
        e.stop();
        match e.drain_events().as_slice() {
            [EngineEvent::StateChange { sys, t_s, .. }] => {
                assert_eq!(*sys, SysState::Idle);
                assert!((t_s - 0.5).abs() < 1e-12);
            }
            other => panic!("expected one state change, got {other:?}"),
        }
    }

    #[test]
    fn start_while_running_is_a_no_op() {
        let mut e = engine(1.0);
        e.start();
        e.step();
        e.start();
        assert_eq!(e.ticks(), 1);
    }

    #[test]
    fn valve_opening_is_staged_until_next_tick() {
        let mut e = engine(1.0);
        e.start();
        e.step();
        e.set_valve_opening(id(2), -3.0).unwrap();
        assert_eq!(e.pending_commands(), 1);
        assert_eq!(e.latest_snapshot().unwrap().nodes[2].opening, Some(1.0));

        let out = e.step().unwrap();
        assert_eq!(out.snapshot.nodes[2].opening, Some(0.0));
        assert_eq!(out.snapshot.q_m3s, 0.0);
        assert_eq!(e.pending_commands(), 0);
    }

    #[test]
    fn invalid_commands_are_rejected() {
        let mut e = engine(1.0);
        assert!(matches!(
            e.set_valve_opening(id(2), f64::NAN),
            Err(SimError::InvalidArg { .. })
        ));
        assert!(matches!(
            e.set_valve_opening(id(9), 0.5),
            Err(SimError::UnknownElement { .. })
        ));
        assert!(matches!(
            e.set_valve_opening(id(1), 0.5),
            Err(SimError::NotAValve { .. })
        ));
        let mut bad = water();
        bad.rho = lf_core::units::kg_per_m3(-1.0);
        assert!(e.set_fluid(bad).is_err());
        assert_eq!(e.pending_commands(), 0);
    }

    #[test]
    fn valve_command_sees_staged_chain() {
        let mut e = engine(1.0);
        let mut longer = chain(1.0);
        longer.push(ChainLink::new(
            id(7),
            "drain valve",
            ElementSpec::Valve(ValveSpec::new(ValveKind::Ball, 1.0)),
        ));
        e.replace_chain(longer).unwrap();
        e.set_valve_opening(id(7), 0.0).unwrap();
        e.start();
        let out = e.step().unwrap();
        assert_eq!(out.snapshot.nodes.len(), 4);
        assert_eq!(out.snapshot.nodes[3].opening, Some(0.0));
    }

    #[test]
    fn stop_keeps_last_snapshot_reset_clears_it() {
        let mut e = engine(1.0);
        e.start();
        for _ in 0..5 {
            e.step();
        }
        let volume = e.total_volume_m3();
        e.stop();
        assert_eq!(e.sys_state(), SysState::Idle);
        assert_eq!(e.pump_state(), PumpState::Stopped);
        assert_eq!(e.total_volume_m3(), volume);
        assert_eq!(e.latest_snapshot().unwrap().tick, 5);
        assert!(e.step().is_none());

        e.reset();
        assert_eq!(e.total_volume_m3(), 0.0);
        assert_eq!(e.elapsed_s(), 0.0);
        assert!(e.latest_snapshot().is_none());
    }

    #[test]
    fn set_fluid_changes_losses() {
        let mut e = engine(1.0);
        e.start();
        let thin = e.step().unwrap().snapshot.nodes[1].reynolds;
        let mut honey = FluidSample::from_density_viscosity(998.0, 1.0).unwrap();
        honey.warnings.push("test fluid".into());
        e.set_fluid(honey).unwrap();
        let thick = e.step().unwrap().snapshot.nodes[1].reynolds;
        assert!(thick < thin);
    }

    #[test]
    fn pipe_without_pump_never_deadheads() {
        let chain = vec![ChainLink::new(
            id(0),
            "line",
            ElementSpec::Pipe(PipeSpec::new(53.1, 5.0, 0.046).unwrap()),
        )];
        let mut e = SimulationEngine::new(chain, water(), SimOptions::default()).unwrap();
        e.start();
        for _ in 0..100 {
            let out = e.step().unwrap();
            assert!(out.alarms().iter().all(|a| a.code != AlarmCode::Deadhead));
        }
        assert_eq!(e.deadhead_s(), 0.0);
        assert_eq!(e.total_volume_m3(), 0.0);
    }

    #[test]
    fn empty_chain_still_produces_snapshots() {
        let mut e = SimulationEngine::new(Vec::new(), water(), SimOptions::default()).unwrap();
        e.start();
        let out = e.step().unwrap();
        assert!(out.snapshot.nodes.is_empty());
        assert!(out.alarms().is_empty());
    }
}
