//! Closing any valve in a chain dries out everything downstream of it.

use lf_components::{ElbowSpec, ElementSpec, PipeSpec, PumpSpec, ValveKind, ValveSpec};
use lf_core::ElementId;
use lf_fluids::FluidSample;
use lf_network::{ChainLink, FlowConditions, NodeState, resolve_chain};
use proptest::prelude::*;

fn build_chain(valves: usize, closed: usize) -> Vec<ChainLink> {
    let mut specs = vec![ElementSpec::Pump(
        PumpSpec::new(2e-3, 20.0, 0.75, 53.1).unwrap(),
    )];
    for i in 0..valves {
        specs.push(ElementSpec::Pipe(PipeSpec::new(53.1, 4.0, 0.046).unwrap()));
        specs.push(ElementSpec::Elbow(ElbowSpec {
            k: 0.9,
            diameter_mm: 53.1,
        }));
        let opening = if i == closed { 0.0 } else { 1.0 };
        specs.push(ElementSpec::Valve(ValveSpec::new(ValveKind::Gate, opening)));
    }
    specs.push(ElementSpec::Pipe(PipeSpec::new(53.1, 4.0, 0.046).unwrap()));

    specs
        .into_iter()
        .enumerate()
        .map(|(i, spec)| ChainLink::new(ElementId::from_index(i as u32), format!("e{i}"), spec))
        .collect()
}

proptest! {
    #[test]
    fn closed_valve_dries_downstream(
        valves in 1usize..5,
        pick in 0usize..5,
        q in 1e-4f64..5e-3,
        ramp in 0.0f64..=1.0,
    ) {
        let closed = pick % valves;
        let chain = build_chain(valves, closed);
        let k = 1 + closed * 3 + 2;
        let fluid = FluidSample::from_density_viscosity(998.0, 1.0e-3).unwrap();
        let cond = FlowConditions { q_m3s: q, ramp_factor: ramp, inlet_pressure_pa: 0.0 };

        let s = resolve_chain(&chain, &fluid, cond);
        prop_assert_eq!(s.blocked_at, Some(chain[k].id));
        prop_assert_eq!(s.q_effective_m3s, 0.0);
        prop_assert_eq!(s.nodes[k].node_state, NodeState::Blocked);

        let held = s.nodes[k].p_out_pa;
        for n in &s.nodes[k + 1..] {
            prop_assert_eq!(n.node_state, NodeState::Dry);
            prop_assert_eq!(n.velocity_mps, 0.0);
            prop_assert_eq!(n.reynolds, 0.0);
            prop_assert_eq!(n.p_out_pa, held);
        }
        for n in &s.nodes[..k] {
            prop_assert_eq!(n.node_state, NodeState::Flowing);
        }
    }
}

#[test]
fn reopening_restores_flow() {
    let mut chain = build_chain(2, 1);
    let fluid = FluidSample::from_density_viscosity(998.0, 1.0e-3).unwrap();
    let cond = FlowConditions {
        q_m3s: 2e-3,
        ..FlowConditions::default()
    };
    assert!(resolve_chain(&chain, &fluid, cond).is_blocked());

    for link in &mut chain {
        if let ElementSpec::Valve(v) = &mut link.spec {
            v.set_opening(1.0);
        }
    }
    let s = resolve_chain(&chain, &fluid, cond);
    assert!(!s.is_blocked());
    assert_eq!(s.q_effective_m3s, 2e-3);
    assert!(s.nodes.iter().all(|n| n.node_state == NodeState::Flowing));
}

#[test]
fn blocked_element_is_looked_up_by_id() {
    let chain = build_chain(3, 1);
    let fluid = FluidSample::from_density_viscosity(998.0, 1.0e-3).unwrap();
    let cond = FlowConditions {
        q_m3s: 2e-3,
        ..FlowConditions::default()
    };
    let s = resolve_chain(&chain, &fluid, cond);

    let id = s.blocked_at.unwrap();
    let blocked = s.node(id).unwrap();
    assert_eq!(blocked.name, "e6");
    assert_eq!(blocked.node_state, NodeState::Blocked);
    assert!(s.node(ElementId::from_index(99)).is_none());

    let lowest = s.min_pressure_pa().unwrap();
    assert!(s.nodes.iter().all(|n| n.p_out_pa >= lowest));
    assert!(s.nodes.iter().any(|n| n.p_out_pa == lowest));
}
