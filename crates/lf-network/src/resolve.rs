//! Single-pass pressure propagation along a series chain.
//!
//! The walk threads `(p, d, q, blocked)` from element to element:
//! - each element sees the outlet pressure and bore of its predecessor
//! - an element whose inlet bore differs from the running bore pays an
//!   abrupt contraction/expansion loss on top of its own
//! - a closed valve blocks: its pressure is passed through unchanged, the
//!   delivered flow drops to zero and everything downstream is `Dry`
//!
//! Pressures are not clamped, so sub-atmospheric gauge values are visible to
//! alarm logic.

use crate::chain::ChainLink;
use crate::result::{ElementResult, NetworkSolution, NodeState};
use lf_components::{
    AreaChange, BLOCKED_K, ElbowSpec, ElementSpec, FlowRegime, PipeSpec, PumpSpec,
    TransitionSpec, ValveKind, ValveSpec, contraction_coefficient, friction_factor,
    head_loss_contraction, head_loss_expansion, head_loss_fitting, head_loss_friction,
    head_to_pressure, mm_to_m, reynolds, sudden_area_change, velocity,
};
use lf_fluids::FluidSample;
use tracing::{debug, trace};

/// Operating point for one resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowConditions {
    /// Flow entering the chain [m³/s]
    pub q_m3s: f64,
    /// Pump ramp factor in [0, 1]
    pub ramp_factor: f64,
    /// Gauge pressure at the chain inlet [Pa]
    pub inlet_pressure_pa: f64,
}

impl Default for FlowConditions {
    fn default() -> Self {
        Self {
            q_m3s: 0.0,
            ramp_factor: 1.0,
            inlet_pressure_pa: 0.0,
        }
    }
}

struct Walk<'a> {
    fluid: &'a FluidSample,
    p_pa: f64,
    d_m: f64,
    q_m3s: f64,
}

impl Walk<'_> {
    fn rho(&self) -> f64 {
        self.fluid.rho_kg_m3()
    }

    /// Pressure [Pa] lost entering a bore of `d_m` from the running bore.
    fn step_loss(&self, d_m: f64) -> f64 {
        sudden_area_change(self.d_m, d_m, self.q_m3s)
            .map_or(0.0, |(_, h)| head_to_pressure(self.rho(), h))
    }

    fn base(&self, link: &ChainLink) -> ElementResult {
        ElementResult::idle(
            link.id,
            &link.name,
            link.spec.kind(),
            self.p_pa,
            NodeState::Flowing,
        )
    }

    fn flowing(&self, r: &mut ElementResult, d_m: f64) -> f64 {
        let v = velocity(self.q_m3s, d_m);
        let re = reynolds(v, d_m, self.fluid.nu_m2_s());
        r.velocity_mps = v;
        r.reynolds = re;
        r.regime = Some(FlowRegime::classify(re));
        v
    }

    fn pump(&self, link: &ChainLink, pump: &PumpSpec, ramp: f64) -> (ElementResult, f64) {
        let d = mm_to_m(pump.diameter_mm);
        let mut r = self.base(link);
        self.flowing(&mut r, d);
        r.dp_static_pa = -pump.pressure_rise(self.rho(), ramp);
        r.power_w = Some(pump.shaft_power(self.rho(), self.q_m3s, ramp));
        (r, d)
    }

    fn pipe(&self, link: &ChainLink, pipe: &PipeSpec) -> (ElementResult, f64) {
        let d = mm_to_m(pipe.diameter_mm);
        let mut r = self.base(link);
        let v = self.flowing(&mut r, d);
        let f = friction_factor(r.reynolds, d, pipe.eps_mm);
        r.friction = Some(f);
        let hf = head_loss_friction(f.value, pipe.length_m, d, v);
        r.dp_major_pa = head_to_pressure(self.rho(), hf);
        r.dp_minor_pa = self.step_loss(d);
        r.dp_static_pa = head_to_pressure(self.rho(), pipe.dz_m);
        (r, d)
    }

    fn elbow(&self, link: &ChainLink, elbow: &ElbowSpec) -> (ElementResult, f64) {
        let d = mm_to_m(elbow.diameter_mm);
        let mut r = self.base(link);
        let v = self.flowing(&mut r, d);
        r.k = Some(elbow.k);
        r.dp_minor_pa =
            self.step_loss(d) + head_to_pressure(self.rho(), head_loss_fitting(elbow.k, v));
        (r, d)
    }

    fn transition(&self, link: &ChainLink, t: &TransitionSpec) -> (ElementResult, f64) {
        let d_in = mm_to_m(t.d_in_mm);
        let d_out = mm_to_m(t.d_out_mm);
        let mut r = self.base(link);
        if t.is_mislabelled() {
            debug!(id = %link.id, kind = ?t.kind, "transition subtype disagrees with geometry");
        }

        // Reynolds at the inlet, reported velocity at the outlet.
        let v_in = self.flowing(&mut r, d_in);
        let v_out = velocity(self.q_m3s, d_out);
        r.velocity_mps = v_out;

        let (k, head) = match t.area_change() {
            Some(AreaChange::Contraction) => (
                contraction_coefficient(d_in, d_out),
                head_loss_contraction(d_in, d_out, v_out),
            ),
            Some(AreaChange::Expansion) => {
                let ratio = (d_in * d_in) / (d_out * d_out);
                ((1.0 - ratio).powi(2), head_loss_expansion(v_in, v_out))
            }
            None => (0.0, 0.0),
        };
        r.k = Some(k);
        r.dp_minor_pa = self.step_loss(d_in) + head_to_pressure(self.rho(), head);
        r.dp_static_pa = 0.5 * self.rho() * (v_out * v_out - v_in * v_in);
        (r, d_out)
    }

    fn valve(&self, link: &ChainLink, valve: &ValveSpec) -> (ElementResult, f64) {
        let d = valve.diameter_mm.map_or(self.d_m, mm_to_m);
        let mut r = self.base(link);
        r.opening = Some(valve.opening);

        if valve.is_closed() {
            r.node_state = NodeState::Blocked;
            r.k = Some(BLOCKED_K);
            return (r, d);
        }

        let v = self.flowing(&mut r, d);
        let k = valve.k();
        r.k = Some(k);
        r.dp_minor_pa =
            self.step_loss(d) + head_to_pressure(self.rho(), head_loss_fitting(k, v));

        if valve.kind == ValveKind::Prv
            && let Some(set) = valve.set_pressure_pa
        {
            let p_after = self.p_pa - r.dp_minor_pa;
            if p_after > set {
                r.dp_minor_pa += p_after - set;
            }
        }
        (r, d)
    }
}

/// Walk `chain` once at the operating point `cond`.
///
/// Pure and infallible: degenerate inputs yield sentinel values in the
/// per-element results rather than errors.
pub fn resolve_chain(
    chain: &[ChainLink],
    fluid: &FluidSample,
    cond: FlowConditions,
) -> NetworkSolution {
    let d0 = chain
        .iter()
        .find_map(|link| link.spec.inlet_diameter_mm())
        .map_or(0.0, mm_to_m);

    let mut walk = Walk {
        fluid,
        p_pa: cond.inlet_pressure_pa,
        d_m: d0,
        q_m3s: cond.q_m3s,
    };
    let mut blocked_at = None;
    let mut nodes = Vec::with_capacity(chain.len());

    for link in chain {
        if blocked_at.is_some() {
            let mut r = ElementResult::idle(
                link.id,
                &link.name,
                link.spec.kind(),
                walk.p_pa,
                NodeState::Dry,
            );
            if let ElementSpec::Valve(v) = &link.spec {
                r.opening = Some(v.opening);
            }
            nodes.push(r);
            continue;
        }

        let (mut r, d_out) = match &link.spec {
            ElementSpec::Pump(p) => walk.pump(link, p, cond.ramp_factor),
            ElementSpec::Pipe(p) => walk.pipe(link, p),
            ElementSpec::Elbow(e) => walk.elbow(link, e),
            ElementSpec::Transition(t) => walk.transition(link, t),
            ElementSpec::Valve(v) => walk.valve(link, v),
        };

        if r.node_state == NodeState::Blocked {
            trace!(id = %link.id, name = %link.name, "valve closed, downstream is dry");
            blocked_at = Some(link.id);
            walk.q_m3s = 0.0;
        } else {
            r.dp_total_pa = r.dp_major_pa + r.dp_minor_pa;
            r.p_out_pa = r.p_in_pa - r.dp_total_pa - r.dp_static_pa;
        }

        if !r.friction_converged() {
            debug!(id = %link.id, re = r.reynolds, "friction factor did not converge");
        }

        walk.p_pa = r.p_out_pa;
        walk.d_m = d_out;
        nodes.push(r);
    }

    NetworkSolution {
        nodes,
        q_effective_m3s: walk.q_m3s,
        blocked_at,
    }
}
