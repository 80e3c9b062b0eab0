//! Turn a loaded project into engine inputs.

use crate::error::{CliError, CliResult};
use lf_fluids::{
    ConstantFluid, FluidModel, FluidPropertyResolver, FluidSample, PropertyTable, catalog_fluid,
};
use lf_network::ChainLink;
use lf_project::{ActionDef, FluidDef, Project, build_chain, lookup_element};
use lf_sim::{EngineCommand, Schedule, ScheduledAction, SimOptions};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// Everything needed to construct and drive a `SimulationEngine`.
#[derive(Debug)]
pub struct CompiledProject {
    pub chain: Vec<ChainLink>,
    pub fluid: FluidSample,
    pub options: SimOptions,
    pub schedule: Schedule,
    pub duration_s: f64,
}

/// `base_dir` anchors relative paths in the project (property tables).
pub fn compile_project(project: &Project, base_dir: &Path) -> CliResult<CompiledProject> {
    let chain = build_chain(project)?;
    let fluid = resolve_fluid(&project.fluid, base_dir)?;
    let schedule = build_schedule(project)?;
    debug!(
        elements = chain.len(),
        actions = schedule.remaining(),
        "project compiled"
    );
    Ok(CompiledProject {
        chain,
        fluid,
        options: sim_options(project),
        schedule,
        duration_s: project.simulation.duration_s,
    })
}

/// Fluid model named by the project. Table paths are relative to `base_dir`.
pub fn fluid_model(def: &FluidDef, base_dir: &Path) -> CliResult<Box<dyn FluidModel>> {
    let model: Box<dyn FluidModel> = match def {
        FluidDef::Catalog { id, .. } => Box::new(catalog_fluid(id)?),
        FluidDef::Table {
            csv_path, fallback, ..
        } => {
            let path = base_dir.join(csv_path);
            let text = std::fs::read_to_string(&path).map_err(|source| CliError::TableRead {
                path: path.clone(),
                source,
            })?;
            let table = PropertyTable::from_csv_str(&text)?;
            let mut resolver = FluidPropertyResolver::from_table(csv_path.as_str(), table);
            if let Some(id) = fallback
                && let Some(model) = catalog_fluid(id)?.fallback()
            {
                resolver = resolver.with_fallback(model.clone());
            }
            Box::new(resolver)
        }
        FluidDef::Constant {
            density_kg_m3,
            viscosity_pa_s,
        } => Box::new(ConstantFluid::new(
            "constant",
            *density_kg_m3,
            *viscosity_pa_s,
        )?),
    };
    Ok(model)
}

pub fn resolve_fluid(def: &FluidDef, base_dir: &Path) -> CliResult<FluidSample> {
    let model = fluid_model(def, base_dir)?;
    let t_c = def.temperature_c();
    let sample = model.properties(t_c)?;
    debug!(fluid = model.name(), t_c, rho = sample.rho_kg_m3(), "fluid resolved");
    for w in &sample.warnings {
        warn!(warning = %w, "fluid property warning");
    }
    Ok(sample)
}

pub fn sim_options(project: &Project) -> SimOptions {
    let sim = &project.simulation;
    SimOptions {
        dt_s: sim.dt_s,
        tick_interval: Duration::from_millis(sim.tick_interval_ms),
        ramp_duration_s: sim.ramp_duration_s,
        deadhead_threshold_s: sim.deadhead_threshold_s,
        high_velocity_mps: sim.high_velocity_mps,
        history_capacity: sim.history_capacity,
        inlet_pressure_pa: project.defaults.inlet_pressure_pa,
    }
}

pub fn build_schedule(project: &Project) -> CliResult<Schedule> {
    let mut actions = Vec::with_capacity(project.simulation.events.len());
    for event in &project.simulation.events {
        let command = match &event.action {
            ActionDef::SetValveOpening {
                element_id,
                opening,
            } => {
                let id = lookup_element(project, element_id).ok_or_else(|| {
                    CliError::InvalidInput(format!("event targets unknown element '{element_id}'"))
                })?;
                EngineCommand::SetValveOpening {
                    id,
                    opening: *opening,
                }
            }
        };
        actions.push(ScheduledAction {
            time_s: event.time_s,
            command,
        });
    }
    Ok(Schedule::new(actions))
}
