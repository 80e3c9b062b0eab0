use lf_components::{KPoint, TransitionKind, ValveKind};
use lf_project::schema::*;
use lf_project::{ProjectError, ValidationError, load_json, load_yaml, save_json, save_yaml};

fn sample() -> Project {
    Project {
        version: 1,
        name: "Roundtrip".to_string(),
        fluid: FluidDef::Catalog {
            id: "eg50".to_string(),
            temperature_c: 5.0,
        },
        defaults: SystemDefaults {
            inlet_pressure_pa: 25_000.0,
            ..SystemDefaults::default()
        },
        elements: vec![
            ElementDef {
                id: "pump".to_string(),
                name: Some("Booster".to_string()),
                kind: ElementKindDef::Pump {
                    flow_m3s: Some(1e-3),
                    head_m: None,
                    efficiency: Some(0.6),
                    diameter_mm: None,
                },
            },
            ElementDef {
                id: "line".to_string(),
                name: None,
                kind: ElementKindDef::Pipe {
                    diameter_mm: None,
                    dn: Some("DN65".to_string()),
                    length_m: Some(25.0),
                    dz_m: Some(2.0),
                    eps_mm: None,
                    material: Some("pvc_pe".to_string()),
                },
            },
            ElementDef {
                id: "red".to_string(),
                name: None,
                kind: ElementKindDef::Transition {
                    subtype: TransitionKind::Reducer,
                    d_in_mm: None,
                    d_out_mm: 41.9,
                },
            },
            ElementDef {
                id: "v".to_string(),
                name: None,
                kind: ElementKindDef::Valve {
                    subtype: ValveKind::Butterfly,
                    opening: Some(0.75),
                    k_table: Some(vec![
                        KPoint {
                            opening: 0.25,
                            k: 40.0,
                        },
                        KPoint {
                            opening: 1.0,
                            k: 0.5,
                        },
                    ]),
                    diameter_mm: None,
                    set_pressure_pa: None,
                },
            },
        ],
        simulation: SimulationDef {
            duration_s: 30.0,
            events: vec![EventDef {
                time_s: 12.5,
                action: ActionDef::SetValveOpening {
                    element_id: "v".to_string(),
                    opening: 0.0,
                },
            }],
            ..SimulationDef::default()
        },
    }
}

#[test]
fn roundtrip_yaml() {
    let project = sample();
    let path = std::env::temp_dir().join("lf_project_roundtrip.yaml");
    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_json() {
    let project = sample();
    let path = std::env::temp_dir().join("lf_project_roundtrip.json");
    save_json(&path, &project).unwrap();
    let loaded = load_json(&path).unwrap();
    assert_eq!(project, loaded);
}

#[test]
fn minimal_yaml_takes_defaults() {
    let yaml = "
version: 1
name: Minimal
fluid:
  type: Constant
  density_kg_m3: 998.0
  viscosity_pa_s: 0.001
elements:
  - id: p
    kind:
      type: pump
  - id: l
    kind:
      type: pipe
";
    let project: Project = serde_yaml::from_str(yaml).unwrap();
    lf_project::validate_project(&project).unwrap();
    assert_eq!(project.defaults, SystemDefaults::default());
    assert_eq!(project.simulation, SimulationDef::default());
}

#[test]
fn duplicate_ids_fail_validation() {
    let mut project = sample();
    project.elements[1].id = "pump".to_string();
    let err = lf_project::validate_project(&project).unwrap_err();
    assert!(matches!(err, ValidationError::DuplicateId { .. }));
}

#[test]
fn event_must_target_a_valve() {
    let mut project = sample();
    project.simulation.events[0].action = ActionDef::SetValveOpening {
        element_id: "line".to_string(),
        opening: 0.0,
    };
    assert!(lf_project::validate_project(&project).is_err());

    project.simulation.events[0].action = ActionDef::SetValveOpening {
        element_id: "ghost".to_string(),
        opening: 0.0,
    };
    let err = lf_project::validate_project(&project).unwrap_err();
    assert!(matches!(err, ValidationError::MissingReference { .. }));
}

#[test]
fn physical_errors_name_the_element() {
    let mut project = sample();
    if let ElementKindDef::Pipe { length_m, .. } = &mut project.elements[1].kind {
        *length_m = Some(-3.0);
    }
    let err = lf_project::validate_project(&project).unwrap_err();
    assert!(err.to_string().contains("elements.line"));
}

#[test]
fn unsupported_version_is_rejected() {
    let mut project = sample();
    project.version = 7;
    let path = std::env::temp_dir().join("lf_project_bad_version.yaml");
    std::fs::write(&path, serde_yaml::to_string(&project).unwrap()).unwrap();
    let err = load_yaml(&path).unwrap_err();
    assert!(matches!(
        err,
        ProjectError::Validation(ValidationError::UnsupportedVersion { version: 7 })
    ));
}

#[test]
fn unknown_catalog_fluid_is_rejected() {
    let mut project = sample();
    project.fluid = FluidDef::Catalog {
        id: "mercury".to_string(),
        temperature_c: 20.0,
    };
    let err = lf_project::validate_project(&project).unwrap_err();
    assert!(matches!(err, ValidationError::UnknownCatalogEntry { kind: "fluid", .. }));

    project.fluid = FluidDef::Catalog {
        id: "H2O".to_string(),
        temperature_c: 20.0,
    };
    lf_project::validate_project(&project).unwrap();
}
