//! lf-sim: time-stepped simulation of a pumped series chain.
//!
//! Provides:
//! - `SimulationEngine`: system and pump state machines, ramped flow, one
//!   network resolution per tick, delivered volume, alarm evaluation
//! - Staged commands applied at the tick boundary
//! - An event queue (`Tick`, `Alarm`, `StateChange`) drained by the consumer
//! - A fixed-capacity snapshot history
//! - `run_for`: tick loop with real-time or fast pacing and timed actions
//!
//! # Example
//!
//! ```
//! use lf_components::{ElementSpec, PipeSpec, PumpSpec};
//! use lf_core::ElementId;
//! use lf_fluids::FluidSample;
//! use lf_network::ChainLink;
//! use lf_sim::{PumpState, SimOptions, SimulationEngine};
//!
//! let chain = vec![
//!     ChainLink::new(
//!         ElementId::from_index(0),
//!         "pump",
//!         ElementSpec::Pump(PumpSpec::new(5e-4, 20.0, 0.75, 53.1).unwrap()),
//!     ),
//!     ChainLink::new(
//!         ElementId::from_index(1),
//!         "line",
//!         ElementSpec::Pipe(PipeSpec::new(53.1, 5.0, 0.046).unwrap()),
//!     ),
//! ];
//! let water = FluidSample::from_density_viscosity(998.0, 1.0e-3).unwrap();
//! let mut engine = SimulationEngine::new(chain, water, SimOptions::default()).unwrap();
//! engine.start();
//! for _ in 0..20 {
//!     engine.step();
//! }
//! assert_eq!(engine.pump_state(), PumpState::Running);
//! ```

pub mod alarm;
pub mod driver;
pub mod engine;
pub mod error;
pub mod events;
pub mod history;
pub mod options;
pub mod ramp;
pub mod schedule;
pub mod snapshot;
pub mod state;

pub use alarm::{Alarm, AlarmCode, AlarmLevel};
pub use driver::{Pacing, RunSummary, run_for};
pub use engine::{SimulationEngine, TickOutcome};
pub use error::{SimError, SimResult};
pub use events::{EngineCommand, EngineEvent};
pub use history::History;
pub use options::SimOptions;
pub use ramp::PumpRamp;
pub use schedule::{Schedule, ScheduledAction};
pub use snapshot::SimulationSnapshot;
pub use state::{PumpState, SysState};
