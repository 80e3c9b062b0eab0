//! Two-layer parameter resolution: element override, then system default.
//!
//! Pumps and pipes fall back to the system diameter. Elbows, valves and the
//! inlet of a transition inherit the bore of the preceding element instead,
//! so a fitting placed after a DN25 pipe is DN25 unless told otherwise.

use crate::catalog;
use crate::schema::{ElementDef, ElementKindDef, Project, SystemDefaults};
use crate::validate::ValidationError;
use lf_components::{ElbowSpec, ElementSpec, PipeSpec, PumpSpec, TransitionSpec, ValveSpec};
use lf_core::ElementId;
use lf_network::ChainLink;

/// Resolve one element given the bore it is attached to.
pub fn resolve_element(
    def: &ElementDef,
    defaults: &SystemDefaults,
    running_d_mm: f64,
) -> Result<ElementSpec, ValidationError> {
    let spec = match &def.kind {
        ElementKindDef::Pump {
            flow_m3s,
            head_m,
            efficiency,
            diameter_mm,
        } => ElementSpec::Pump(PumpSpec {
            q_nominal_m3s: flow_m3s.unwrap_or(defaults.pump_flow_m3s),
            head_m: head_m.unwrap_or(defaults.pump_head_m),
            efficiency: efficiency.unwrap_or(defaults.pump_efficiency),
            diameter_mm: diameter_mm.unwrap_or(defaults.diameter_mm),
        }),
        ElementKindDef::Pipe {
            diameter_mm,
            dn,
            length_m,
            dz_m,
            eps_mm,
            material,
        } => {
            let from_dn = match dn {
                Some(dn) => Some(catalog::nominal_diameter(dn).ok_or_else(|| {
                    ValidationError::UnknownCatalogEntry {
                        kind: "nominal diameter",
                        id: dn.clone(),
                    }
                })?),
                None => None,
            };
            let from_material = match material {
                Some(m) => Some(
                    catalog::material(m)
                        .ok_or_else(|| ValidationError::UnknownCatalogEntry {
                            kind: "material",
                            id: m.clone(),
                        })?
                        .eps_mm,
                ),
                None => None,
            };
            ElementSpec::Pipe(PipeSpec {
                diameter_mm: diameter_mm.or(from_dn).unwrap_or(defaults.diameter_mm),
                length_m: length_m.unwrap_or(defaults.length_m),
                dz_m: dz_m.unwrap_or(0.0),
                eps_mm: eps_mm.or(from_material).unwrap_or(defaults.eps_mm),
            })
        }
        ElementKindDef::Elbow { k, diameter_mm } => ElementSpec::Elbow(ElbowSpec {
            k: k.unwrap_or(defaults.elbow_k),
            diameter_mm: diameter_mm.unwrap_or(running_d_mm),
        }),
        ElementKindDef::Transition {
            subtype,
            d_in_mm,
            d_out_mm,
        } => ElementSpec::Transition(TransitionSpec {
            kind: *subtype,
            d_in_mm: d_in_mm.unwrap_or(running_d_mm),
            d_out_mm: *d_out_mm,
        }),
        ElementKindDef::Valve {
            subtype,
            opening,
            k_table,
            diameter_mm,
            set_pressure_pa,
        } => ElementSpec::Valve(ValveSpec {
            kind: *subtype,
            opening: opening.unwrap_or(1.0),
            k_table: k_table.clone(),
            diameter_mm: Some(diameter_mm.unwrap_or(running_d_mm)),
            set_pressure_pa: *set_pressure_pa,
        }),
    };

    spec.validate().map_err(|e| ValidationError::InvalidValue {
        field: format!("elements.{}", def.id),
        value: def.kind.type_name().to_string(),
        reason: e.to_string(),
    })?;
    Ok(spec)
}

/// Resolve every element in order. Ids are assigned by position.
pub fn build_chain(project: &Project) -> Result<Vec<ChainLink>, ValidationError> {
    let mut running_d_mm = project.defaults.diameter_mm;
    let mut chain = Vec::with_capacity(project.elements.len());
    for (i, def) in project.elements.iter().enumerate() {
        let spec = resolve_element(def, &project.defaults, running_d_mm)?;
        running_d_mm = spec.outlet_diameter_mm().unwrap_or(running_d_mm);
        chain.push(ChainLink::new(element_id(i), def.label(), spec));
    }
    Ok(chain)
}

/// Runtime id of the element at `index` in the project file.
pub fn element_id(index: usize) -> ElementId {
    ElementId::from_index(index as u32)
}

/// Runtime id of the element named `id` in the project file.
pub fn lookup_element(project: &Project, id: &str) -> Option<ElementId> {
    project
        .elements
        .iter()
        .position(|e| e.id == id)
        .map(element_id)
}

impl ElementKindDef {
    pub fn type_name(&self) -> &'static str {
        match self {
            ElementKindDef::Pump { .. } => "pump",
            ElementKindDef::Pipe { .. } => "pipe",
            ElementKindDef::Elbow { .. } => "elbow",
            ElementKindDef::Transition { .. } => "transition",
            ElementKindDef::Valve { .. } => "valve",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lf_components::{TransitionKind, ValveKind};

    fn def(id: &str, kind: ElementKindDef) -> ElementDef {
        ElementDef {
            id: id.into(),
            name: None,
            kind,
        }
    }

    fn pipe(diameter_mm: Option<f64>) -> ElementKindDef {
        ElementKindDef::Pipe {
            diameter_mm,
            dn: None,
            length_m: None,
            dz_m: None,
            eps_mm: None,
            material: None,
        }
    }

    #[test]
    fn override_wins_over_default() {
        let d = SystemDefaults::default();
        let spec = resolve_element(&def("p", pipe(Some(26.9))), &d, 53.1).unwrap();
        let ElementSpec::Pipe(p) = spec else {
            panic!("expected pipe")
        };
        assert_eq!(p.diameter_mm, 26.9);
        assert_eq!(p.length_m, 5.0);
        assert_eq!(p.eps_mm, 0.046);
    }

    #[test]
    fn pipe_uses_system_diameter_not_running_bore() {
        let d = SystemDefaults::default();
        let spec = resolve_element(&def("p", pipe(None)), &d, 26.9).unwrap();
        assert_eq!(spec.inlet_diameter_mm(), Some(53.1));
    }

    #[test]
    fn dn_and_material_resolve_through_catalog() {
        let kind = ElementKindDef::Pipe {
            diameter_mm: None,
            dn: Some("DN80".into()),
            length_m: Some(12.0),
            dz_m: Some(-1.0),
            eps_mm: None,
            material: Some("cast_iron".into()),
        };
        let spec = resolve_element(&def("p", kind), &SystemDefaults::default(), 53.1).unwrap();
        assert_eq!(
            spec,
            ElementSpec::Pipe(PipeSpec {
                diameter_mm: 82.5,
                length_m: 12.0,
                dz_m: -1.0,
                eps_mm: 0.26,
            })
        );
    }

    #[test]
    fn unknown_material_is_reported() {
        let kind = ElementKindDef::Pipe {
            diameter_mm: None,
            dn: None,
            length_m: None,
            dz_m: None,
            eps_mm: None,
            material: Some("balsa".into()),
        };
        let err = resolve_element(&def("p", kind), &SystemDefaults::default(), 53.1).unwrap_err();
        assert!(err.to_string().contains("balsa"));
    }

    #[test]
    fn fittings_inherit_running_bore() {
        let project = Project {
            version: 1,
            name: "inherit".into(),
            fluid: crate::schema::FluidDef::Constant {
                density_kg_m3: 998.0,
                viscosity_pa_s: 1e-3,
            },
            defaults: SystemDefaults::default(),
            elements: vec![
                def("p1", pipe(None)),
                def(
                    "red",
                    ElementKindDef::Transition {
                        subtype: TransitionKind::Reducer,
                        d_in_mm: None,
                        d_out_mm: 26.9,
                    },
                ),
                def(
                    "bend",
                    ElementKindDef::Elbow {
                        k: None,
                        diameter_mm: None,
                    },
                ),
                def(
                    "v1",
                    ElementKindDef::Valve {
                        subtype: ValveKind::Ball,
                        opening: None,
                        k_table: None,
                        diameter_mm: None,
                        set_pressure_pa: None,
                    },
                ),
            ],
            simulation: Default::default(),
        };
        let chain = build_chain(&project).unwrap();
        assert_eq!(chain[1].spec.inlet_diameter_mm(), Some(53.1));
        assert_eq!(chain[2].spec.inlet_diameter_mm(), Some(26.9));
        assert_eq!(chain[3].spec.inlet_diameter_mm(), Some(26.9));
        assert_eq!(chain[2].name, "bend");
        assert_eq!(lookup_element(&project, "v1"), Some(chain[3].id));
        assert_eq!(lookup_element(&project, "nope"), None);
    }
}
