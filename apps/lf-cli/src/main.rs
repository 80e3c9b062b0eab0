mod compile;
mod error;

use clap::{Parser, Subcommand};
use compile::{CompiledProject, compile_project};
use error::{CliError, CliResult};
use lf_fluids::{FluidModel, FluidSample, catalog_fluid, fluid_catalog};
use lf_network::{FlowConditions, NetworkSolution, nominal_flow, resolve_chain};
use lf_project::{FluidDef, Project};
use lf_sim::{EngineEvent, Pacing, SimulationEngine, SimulationSnapshot, run_for};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lf-cli")]
#[command(about = "LineFlow CLI - liquid pipeline hydraulic simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// Look up fluid properties
    Fluid {
        /// Catalog fluid id or alias
        id: Option<String>,
        /// Temperature in °C
        #[arg(long, default_value_t = 20.0)]
        temperature: f64,
        /// List catalog fluids matching the id (all when omitted)
        #[arg(long)]
        list: bool,
    },
    /// Resolve the chain once at a fixed operating point
    Resolve {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Flow in m³/s (defaults to the pump's nominal flow)
        #[arg(long)]
        flow: Option<f64>,
        /// Pump ramp factor in [0, 1]
        #[arg(long, default_value_t = 1.0)]
        ramp: f64,
    },
    /// Run a timed simulation
    Run {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Simulated duration in seconds (overrides the project)
        #[arg(long)]
        duration: Option<f64>,
        /// Pace ticks in wall-clock time
        #[arg(long)]
        realtime: bool,
        /// Write one CSV row per tick to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print every alarm as it is raised
        #[arg(long)]
        alarms: bool,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Fluid {
            id,
            temperature,
            list,
        } => cmd_fluid(id.as_deref(), temperature, list),
        Commands::Resolve {
            project_path,
            flow,
            ramp,
        } => cmd_resolve(&project_path, flow, ramp),
        Commands::Run {
            project_path,
            duration,
            realtime,
            output,
            alarms,
        } => cmd_run(&project_path, duration, realtime, output.as_deref(), alarms),
    }
}

fn load_project(project_path: &Path) -> CliResult<(Project, CompiledProject)> {
    let project = lf_project::load(project_path)?;
    let base_dir = project_path.parent().unwrap_or(Path::new("."));
    let compiled = compile_project(&project, base_dir)?;
    Ok((project, compiled))
}

fn cmd_validate(project_path: &Path) -> CliResult<()> {
    println!("Validating project: {}", project_path.display());
    let (project, compiled) = load_project(project_path)?;
    println!("✓ Project is valid");
    println!("  Name: {}", project.name);
    println!("  Elements: {}", compiled.chain.len());
    println!("  Scheduled actions: {}", compiled.schedule.remaining());
    if let FluidDef::Catalog { id, temperature_c } = &project.fluid {
        println!("  Fluid: {id} at {temperature_c} °C");
    }
    Ok(())
}

fn cmd_fluid(id: Option<&str>, temperature: f64, list: bool) -> CliResult<()> {
    if list {
        let entries = lf_fluids::filter_fluid_catalog(id.unwrap_or(""));
        if entries.is_empty() {
            println!("No catalog fluids match");
        }
        for e in entries {
            println!(
                "  {:<8} {} (aliases: {})",
                e.canonical_id,
                e.display_name,
                e.aliases.join(", ")
            );
        }
        return Ok(());
    }

    let id = id.ok_or_else(|| {
        let known: Vec<_> = fluid_catalog().iter().map(|e| e.canonical_id).collect();
        CliError::InvalidInput(format!("fluid id required, one of: {}", known.join(", ")))
    })?;
    let resolver = catalog_fluid(id)?;
    let sample = resolver.properties(temperature)?;
    println!("{} at {temperature} °C", resolver.name());
    print_fluid(&sample);
    Ok(())
}

fn print_fluid(sample: &FluidSample) {
    println!("  source: {:?}", sample.source);
    println!("  rho = {:.3} kg/m³", sample.rho_kg_m3());
    println!("  mu  = {:.4e} Pa·s", sample.mu_pa_s());
    println!("  nu  = {:.4e} m²/s", sample.nu_m2_s());
    if let Some(cp) = sample.cp {
        println!("  cp  = {cp:.1} J/(kg·K)");
    }
    for w in &sample.warnings {
        println!("  ! {w}");
    }
}

fn cmd_resolve(project_path: &Path, flow: Option<f64>, ramp: f64) -> CliResult<()> {
    if !(0.0..=1.0).contains(&ramp) {
        return Err(CliError::InvalidInput(format!(
            "ramp must be within [0, 1], got {ramp}"
        )));
    }
    let (project, compiled) = load_project(project_path)?;
    let q = flow.unwrap_or_else(|| nominal_flow(&compiled.chain) * ramp);
    if !q.is_finite() || q < 0.0 {
        return Err(CliError::InvalidInput(format!(
            "flow must be finite and non-negative, got {q}"
        )));
    }

    println!("Resolving '{}' at q = {:.3e} m³/s, ramp = {ramp}", project.name, q);
    print_fluid(&compiled.fluid);
    let cond = FlowConditions {
        q_m3s: q,
        ramp_factor: ramp,
        inlet_pressure_pa: compiled.options.inlet_pressure_pa,
    };
    let solution = resolve_chain(&compiled.chain, &compiled.fluid, cond);
    print_solution(&solution);
    Ok(())
}

fn print_solution(solution: &NetworkSolution) {
    println!(
        "\n{:<4} {:<20} {:<10} {:>11} {:>11} {:>10} {:>8} {:>10} {:>8}  state",
        "id", "name", "kind", "p_in [Pa]", "p_out [Pa]", "dp [Pa]", "v [m/s]", "Re", "f"
    );
    for n in &solution.nodes {
        let f = n.friction.map_or("-".to_string(), |f| format!("{:.4}", f.value));
        println!(
            "{:<4} {:<20} {:<10} {:>11.1} {:>11.1} {:>10.1} {:>8.3} {:>10.0} {:>8}  {}",
            n.id.to_string(),
            n.name,
            n.kind,
            n.p_in_pa,
            n.p_out_pa,
            n.dp_total_pa,
            n.velocity_mps,
            n.reynolds,
            f,
            n.node_state.label()
        );
    }
    println!("\n  Delivered flow: {:.3e} m³/s", solution.q_effective_m3s);
    println!("  Total loss:     {:.1} Pa", solution.total_loss_pa());
    if let Some(p) = solution.outlet_pressure_pa() {
        println!("  Outlet:         {p:.1} Pa (gauge)");
    }
    if let Some(p) = solution.min_pressure_pa() {
        println!("  Min pressure:   {p:.1} Pa (gauge)");
    }
    if let Some(id) = solution.blocked_at {
        let name = solution.node(id).map_or("?", |n| n.name.as_str());
        println!("  Blocked at:     {id} ('{name}')");
    }
    for n in solution.unconverged() {
        println!("  ! friction factor did not converge in '{}'", n.name);
    }
}

fn cmd_run(
    project_path: &Path,
    duration: Option<f64>,
    realtime: bool,
    output: Option<&Path>,
    show_alarms: bool,
) -> CliResult<()> {
    let (project, compiled) = load_project(project_path)?;
    let CompiledProject {
        chain,
        fluid,
        options,
        mut schedule,
        duration_s,
    } = compiled;
    let duration_s = duration.unwrap_or(duration_s);
    let pacing = if realtime {
        Pacing::Realtime
    } else {
        Pacing::Fast
    };

    println!("Running '{}' for {duration_s:.1} s ({pacing:?})", project.name);
    let mut engine = SimulationEngine::new(chain, fluid, options)?;
    let mut csv = String::from(CSV_HEADER);

    let summary = run_for(&mut engine, duration_s, pacing, &mut schedule, |engine, _| {
        for event in engine.drain_events() {
            match event {
                EngineEvent::Tick(snapshot) => push_csv_row(&mut csv, &snapshot),
                EngineEvent::Alarm(alarms) if show_alarms => {
                    for alarm in alarms {
                        println!("  {alarm}");
                    }
                }
                EngineEvent::StateChange { sys, pump, t_s } => {
                    println!("  [{t_s:.1}s] system {sys}, pump {pump}");
                }
                EngineEvent::Alarm(_) => {}
            }
        }
    })?;

    if let Some(path) = output {
        std::fs::write(path, &csv)?;
        println!("✓ Wrote {} ticks to {}", summary.ticks, path.display());
    }

    println!("\nRun summary:");
    println!("  Ticks:       {}", summary.ticks);
    println!("  Sim time:    {:.1} s", summary.t_end_s);
    println!("  Wall time:   {:.3} s", summary.wall_s);
    println!("  Volume:      {:.4} m³", summary.total_volume_m3);
    println!("  Final state: system {}, pump {}", summary.sys_state, summary.pump_state);
    match summary.worst_alarm {
        Some(level) => println!("  Alarms:      {} (worst {level:?})", summary.alarms_raised),
        None => println!("  Alarms:      none"),
    }
    Ok(())
}

const CSV_HEADER: &str = "tick,t_s,sys_state,pump_state,q_m3s,ramp,p_out_pa,v_max_mps,volume_m3\n";

fn push_csv_row(csv: &mut String, s: &SimulationSnapshot) {
    let _ = writeln!(
        csv,
        "{},{:.3},{},{},{:.6e},{:.4},{:.1},{:.4},{:.6e}",
        s.tick,
        s.t_s,
        s.sys_state,
        s.pump_state,
        s.q_m3s,
        s.ramp_factor,
        s.outlet_pressure_pa().unwrap_or(0.0),
        s.max_velocity_mps(),
        s.total_volume_m3
    );
}
