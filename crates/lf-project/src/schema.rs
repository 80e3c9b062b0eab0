//! Project file schema (version 1).
//!
//! Element parameters are optional overrides. Anything left out is taken
//! from [`SystemDefaults`] or, for fittings and valves, from the bore of the
//! preceding element.

use lf_components::{KPoint, TransitionKind, ValveKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    pub fluid: FluidDef,
    #[serde(default)]
    pub defaults: SystemDefaults,
    #[serde(default)]
    pub elements: Vec<ElementDef>,
    #[serde(default)]
    pub simulation: SimulationDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum FluidDef {
    /// Built-in fluid resolved at a temperature.
    Catalog {
        id: String,
        #[serde(default = "default_temperature_c")]
        temperature_c: f64,
    },
    /// Property table on disk, path relative to the project file.
    Table {
        csv_path: String,
        #[serde(default = "default_temperature_c")]
        temperature_c: f64,
        /// Catalog fluid whose correlations back the table.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fallback: Option<String>,
    },
    Constant {
        density_kg_m3: f64,
        viscosity_pa_s: f64,
    },
}

fn default_temperature_c() -> f64 {
    20.0
}

impl FluidDef {
    /// Temperature the fluid is resolved at [°C]. Constant fluids report
    /// the 20 °C reference.
    pub fn temperature_c(&self) -> f64 {
        match self {
            FluidDef::Catalog { temperature_c, .. } | FluidDef::Table { temperature_c, .. } => {
                *temperature_c
            }
            FluidDef::Constant { .. } => default_temperature_c(),
        }
    }
}

/// System-wide parameters used where an element gives no override.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SystemDefaults {
    pub diameter_mm: f64,
    pub eps_mm: f64,
    pub length_m: f64,
    pub pump_flow_m3s: f64,
    pub pump_head_m: f64,
    pub pump_efficiency: f64,
    pub elbow_k: f64,
    /// Gauge pressure at the chain inlet [Pa]
    pub inlet_pressure_pa: f64,
}

impl Default for SystemDefaults {
    fn default() -> Self {
        Self {
            diameter_mm: 53.1,
            eps_mm: 0.046,
            length_m: 5.0,
            pump_flow_m3s: 0.0005,
            pump_head_m: 20.0,
            pump_efficiency: 0.75,
            elbow_k: 0.9,
            inlet_pressure_pa: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementDef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub kind: ElementKindDef,
}

impl ElementDef {
    /// Display name, falling back to the id.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKindDef {
    Pump {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        flow_m3s: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        head_m: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        efficiency: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        diameter_mm: Option<f64>,
    },
    Pipe {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        diameter_mm: Option<f64>,
        /// Nominal size (`DN50`), used when `diameter_mm` is absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dn: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        length_m: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dz_m: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        eps_mm: Option<f64>,
        /// Catalog material, used when `eps_mm` is absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        material: Option<String>,
    },
    Elbow {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        k: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        diameter_mm: Option<f64>,
    },
    Transition {
        subtype: TransitionKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        d_in_mm: Option<f64>,
        d_out_mm: f64,
    },
    Valve {
        subtype: ValveKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        opening: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        k_table: Option<Vec<KPoint>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        diameter_mm: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        set_pressure_pa: Option<f64>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationDef {
    pub dt_s: f64,
    pub tick_interval_ms: u64,
    pub ramp_duration_s: f64,
    pub deadhead_threshold_s: f64,
    pub high_velocity_mps: f64,
    pub history_capacity: usize,
    pub duration_s: f64,
    pub events: Vec<EventDef>,
}

impl Default for SimulationDef {
    fn default() -> Self {
        Self {
            dt_s: 0.1,
            tick_interval_ms: 100,
            ramp_duration_s: 2.0,
            deadhead_threshold_s: 5.0,
            high_velocity_mps: 3.0,
            history_capacity: 600,
            duration_s: 10.0,
            events: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventDef {
    pub time_s: f64,
    pub action: ActionDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ActionDef {
    SetValveOpening { element_id: String, opening: f64 },
}
