//! A chain survives a JSON round trip and resolves to the same answer.

use lf_components::{
    ElbowSpec, ElementSpec, KPoint, PipeSpec, PumpSpec, TransitionKind, TransitionSpec,
    ValveKind, ValveSpec,
};
use lf_core::{ElementId, Tolerances, nearly_equal};
use lf_fluids::FluidSample;
use lf_network::{ChainLink, FlowConditions, resolve_chain};

fn specs() -> Vec<ElementSpec> {
    vec![
        ElementSpec::Pump(PumpSpec::new(5e-4, 20.0, 0.75, 53.1).unwrap()),
        ElementSpec::Pipe(PipeSpec::new(53.1, 5.0, 0.046).unwrap().with_rise(1.5)),
        ElementSpec::Elbow(ElbowSpec {
            k: 0.9,
            diameter_mm: 53.1,
        }),
        ElementSpec::Transition(TransitionSpec {
            kind: TransitionKind::Reducer,
            d_in_mm: 53.1,
            d_out_mm: 27.3,
        }),
        ElementSpec::Valve(
            ValveSpec::new(ValveKind::Globe, 0.6).with_k_table(vec![
                KPoint { opening: 0.2, k: 80.0 },
                KPoint { opening: 1.0, k: 6.0 },
            ]),
        ),
        ElementSpec::Pipe(PipeSpec::new(27.3, 12.0, 0.0015).unwrap()),
        ElementSpec::Valve(ValveSpec::new(ValveKind::Prv, 1.0).with_set_pressure(50_000.0)),
    ]
}

fn chain_of(specs: Vec<ElementSpec>) -> Vec<ChainLink> {
    specs
        .into_iter()
        .enumerate()
        .map(|(i, s)| ChainLink::new(ElementId::from_index(i as u32), format!("e{i}"), s))
        .collect()
}

#[test]
fn json_roundtrip_resolves_identically() {
    let original = specs();
    let json = serde_json::to_string_pretty(&original).unwrap();
    let restored: Vec<ElementSpec> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.len(), original.len());

    let fluid = FluidSample::from_density_viscosity(998.0, 1.0e-3).unwrap();
    let cond = FlowConditions {
        q_m3s: 5e-4,
        ramp_factor: 0.8,
        inlet_pressure_pa: 10_000.0,
    };
    let a = resolve_chain(&chain_of(original), &fluid, cond);
    let b = resolve_chain(&chain_of(restored), &fluid, cond);

    assert_eq!(a.nodes.len(), b.nodes.len());
    let tol = Tolerances {
        abs: 1e-9,
        rel: 1e-9,
    };
    for (x, y) in a.nodes.iter().zip(&b.nodes) {
        assert_eq!(x.node_state, y.node_state);
        for (u, w) in [
            (x.p_in_pa, y.p_in_pa),
            (x.p_out_pa, y.p_out_pa),
            (x.dp_major_pa, y.dp_major_pa),
            (x.dp_minor_pa, y.dp_minor_pa),
            (x.velocity_mps, y.velocity_mps),
            (x.reynolds, y.reynolds),
        ] {
            assert!(nearly_equal(u, w, tol), "{u} vs {w}");
        }
    }
}

#[test]
fn element_json_is_tagged_by_type() {
    let json = serde_json::to_value(ElementSpec::Elbow(ElbowSpec {
        k: 0.9,
        diameter_mm: 53.1,
    }))
    .unwrap();
    assert_eq!(json["type"], "elbow");
}
