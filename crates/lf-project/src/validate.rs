//! Project validation logic.

use crate::defaults::build_chain;
use crate::schema::{ActionDef, ElementKindDef, FluidDef, Project, SimulationDef, SystemDefaults};
use std::collections::HashSet;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown {kind}: {id}")]
    UnknownCatalogEntry { kind: &'static str, id: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn require(ok: bool, field: &str, value: f64, reason: &str) -> Result<(), ValidationError> {
    if ok { Ok(()) } else { Err(invalid(field, value, reason)) }
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version == 0 || project.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    validate_fluid(&project.fluid)?;
    validate_defaults(&project.defaults)?;

    let mut ids = HashSet::new();
    for element in &project.elements {
        if !ids.insert(element.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: element.id.clone(),
                context: "elements".to_string(),
            });
        }
        if let ElementKindDef::Valve {
            opening: Some(opening),
            ..
        } = &element.kind
        {
            let field = format!("elements.{}.opening", element.id);
            require((0.0..=1.0).contains(opening), &field, *opening, "must be in [0, 1]")?;
        }
    }

    // Resolving the chain runs the physical checks of every element.
    build_chain(project)?;

    validate_simulation(&project.simulation)?;
    for (i, event) in project.simulation.events.iter().enumerate() {
        let field = format!("simulation.events[{i}].time_s");
        require(
            event.time_s.is_finite() && event.time_s >= 0.0,
            &field,
            event.time_s,
            "must be non-negative",
        )?;
        match &event.action {
            ActionDef::SetValveOpening {
                element_id,
                opening,
            } => {
                let target = project
                    .elements
                    .iter()
                    .find(|e| &e.id == element_id)
                    .ok_or_else(|| ValidationError::MissingReference {
                        id: element_id.clone(),
                        context: format!("simulation.events[{i}]"),
                    })?;
                if !matches!(target.kind, ElementKindDef::Valve { .. }) {
                    return Err(invalid(
                        &format!("simulation.events[{i}].element_id"),
                        element_id,
                        "must name a valve",
                    ));
                }
                let field = format!("simulation.events[{i}].opening");
                require((0.0..=1.0).contains(opening), &field, *opening, "must be in [0, 1]")?;
            }
        }
    }

    Ok(())
}

fn validate_fluid(fluid: &FluidDef) -> Result<(), ValidationError> {
    match fluid {
        FluidDef::Catalog { id, temperature_c } => {
            if !lf_fluids::fluid_catalog().iter().any(|e| e.is_id(id)) {
                return Err(ValidationError::UnknownCatalogEntry {
                    kind: "fluid",
                    id: id.clone(),
                });
            }
            require(
                temperature_c.is_finite(),
                "fluid.temperature_c",
                *temperature_c,
                "must be finite",
            )
        }
        FluidDef::Table {
            csv_path,
            temperature_c,
            fallback,
        } => {
            if csv_path.trim().is_empty() {
                return Err(invalid("fluid.csv_path", csv_path, "must not be empty"));
            }
            if let Some(id) = fallback
                && !lf_fluids::fluid_catalog().iter().any(|e| e.is_id(id))
            {
                return Err(ValidationError::UnknownCatalogEntry {
                    kind: "fluid",
                    id: id.clone(),
                });
            }
            require(
                temperature_c.is_finite(),
                "fluid.temperature_c",
                *temperature_c,
                "must be finite",
            )
        }
        FluidDef::Constant {
            density_kg_m3,
            viscosity_pa_s,
        } => {
            require(
                density_kg_m3.is_finite() && *density_kg_m3 > 0.0,
                "fluid.density_kg_m3",
                *density_kg_m3,
                "must be positive",
            )?;
            require(
                viscosity_pa_s.is_finite() && *viscosity_pa_s > 0.0,
                "fluid.viscosity_pa_s",
                *viscosity_pa_s,
                "must be positive",
            )
        }
    }
}

fn validate_defaults(d: &SystemDefaults) -> Result<(), ValidationError> {
    let positive = |v: f64| v.is_finite() && v > 0.0;
    let non_negative = |v: f64| v.is_finite() && v >= 0.0;

    require(positive(d.diameter_mm), "defaults.diameter_mm", d.diameter_mm, "must be positive")?;
    require(non_negative(d.eps_mm), "defaults.eps_mm", d.eps_mm, "must be non-negative")?;
    require(non_negative(d.length_m), "defaults.length_m", d.length_m, "must be non-negative")?;
    require(
        non_negative(d.pump_flow_m3s),
        "defaults.pump_flow_m3s",
        d.pump_flow_m3s,
        "must be non-negative",
    )?;
    require(
        non_negative(d.pump_head_m),
        "defaults.pump_head_m",
        d.pump_head_m,
        "must be non-negative",
    )?;
    require(
        d.pump_efficiency > 0.0 && d.pump_efficiency <= 1.0,
        "defaults.pump_efficiency",
        d.pump_efficiency,
        "must be in (0, 1]",
    )?;
    require(non_negative(d.elbow_k), "defaults.elbow_k", d.elbow_k, "must be non-negative")?;
    require(
        d.inlet_pressure_pa.is_finite(),
        "defaults.inlet_pressure_pa",
        d.inlet_pressure_pa,
        "must be finite",
    )
}

fn validate_simulation(s: &SimulationDef) -> Result<(), ValidationError> {
    let non_negative = |v: f64| v.is_finite() && v >= 0.0;

    require(s.dt_s.is_finite() && s.dt_s > 0.0, "simulation.dt_s", s.dt_s, "must be positive")?;
    require(
        non_negative(s.ramp_duration_s),
        "simulation.ramp_duration_s",
        s.ramp_duration_s,
        "must be non-negative",
    )?;
    require(
        non_negative(s.deadhead_threshold_s),
        "simulation.deadhead_threshold_s",
        s.deadhead_threshold_s,
        "must be non-negative",
    )?;
    require(
        s.high_velocity_mps.is_finite() && s.high_velocity_mps > 0.0,
        "simulation.high_velocity_mps",
        s.high_velocity_mps,
        "must be positive",
    )?;
    require(
        non_negative(s.duration_s),
        "simulation.duration_s",
        s.duration_s,
        "must be non-negative",
    )?;
    if s.history_capacity == 0 {
        return Err(invalid(
            "simulation.history_capacity",
            s.history_capacity,
            "must be positive",
        ));
    }
    Ok(())
}
