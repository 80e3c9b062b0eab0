//! Closed set of chain elements.

use crate::elbow::ElbowSpec;
use crate::error::ComponentResult;
use crate::pipe::PipeSpec;
use crate::pump::PumpSpec;
use crate::transition::TransitionSpec;
use crate::valve::ValveSpec;
use core::fmt;

/// Physical parameters of one element of a series chain.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum ElementSpec {
    Pump(PumpSpec),
    Pipe(PipeSpec),
    Elbow(ElbowSpec),
    Transition(TransitionSpec),
    Valve(ValveSpec),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ElementKind {
    Pump,
    Pipe,
    Elbow,
    Transition,
    Valve,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ElementKind::Pump => "pump",
            ElementKind::Pipe => "pipe",
            ElementKind::Elbow => "elbow",
            ElementKind::Transition => "transition",
            ElementKind::Valve => "valve",
        };
        f.pad(s)
    }
}

impl ElementSpec {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementSpec::Pump(_) => ElementKind::Pump,
            ElementSpec::Pipe(_) => ElementKind::Pipe,
            ElementSpec::Elbow(_) => ElementKind::Elbow,
            ElementSpec::Transition(_) => ElementKind::Transition,
            ElementSpec::Valve(_) => ElementKind::Valve,
        }
    }

    pub fn validate(&self) -> ComponentResult<()> {
        match self {
            ElementSpec::Pump(p) => p.validate(),
            ElementSpec::Pipe(p) => p.validate(),
            ElementSpec::Elbow(e) => e.validate(),
            ElementSpec::Transition(t) => t.validate(),
            ElementSpec::Valve(v) => v.validate(),
        }
    }

    /// Bore at the inlet [mm], if the element fixes one.
    pub fn inlet_diameter_mm(&self) -> Option<f64> {
        match self {
            ElementSpec::Pump(p) => Some(p.diameter_mm),
            ElementSpec::Pipe(p) => Some(p.diameter_mm),
            ElementSpec::Elbow(e) => Some(e.diameter_mm),
            ElementSpec::Transition(t) => Some(t.d_in_mm),
            ElementSpec::Valve(v) => v.diameter_mm,
        }
    }

    /// Bore at the outlet [mm], if the element fixes one.
    pub fn outlet_diameter_mm(&self) -> Option<f64> {
        match self {
            ElementSpec::Transition(t) => Some(t.d_out_mm),
            other => other.inlet_diameter_mm(),
        }
    }

    pub fn as_valve_mut(&mut self) -> Option<&mut ValveSpec> {
        match self {
            ElementSpec::Valve(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_pump(&self) -> Option<&PumpSpec> {
        match self {
            ElementSpec::Pump(p) => Some(p),
            _ => None,
        }
    }
}
