//! Per-element output of a chain walk.

use lf_components::{ElementKind, FlowRegime, FrictionFactor};
use lf_core::ElementId;

/// Hydraulic state of an element for one resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeState {
    /// No flow reaches the element (downstream of a closed valve).
    Dry,
    /// Reserved for transient fill modelling; never produced by the resolver.
    Filling,
    Flowing,
    /// Closed valve.
    Blocked,
}

impl NodeState {
    pub fn label(self) -> &'static str {
        match self {
            NodeState::Dry => "dry",
            NodeState::Filling => "filling",
            NodeState::Flowing => "flowing",
            NodeState::Blocked => "blocked",
        }
    }
}

/// Pressures are gauge [Pa].
///
/// `p_out = p_in - dp_total - dp_static`, where
/// - `dp_major`: wall friction
/// - `dp_minor`: fittings, valve throttling, abrupt bore changes
/// - `dp_static`: reversible change (elevation, velocity head in a
///   transition, negative for a pump's pressure rise)
#[derive(Clone, Debug, PartialEq)]
pub struct ElementResult {
    pub id: ElementId,
    pub name: String,
    pub kind: ElementKind,
    pub p_in_pa: f64,
    pub p_out_pa: f64,
    pub dp_major_pa: f64,
    pub dp_minor_pa: f64,
    pub dp_static_pa: f64,
    /// `dp_major + dp_minor`
    pub dp_total_pa: f64,
    /// Outlet velocity [m/s]
    pub velocity_mps: f64,
    pub reynolds: f64,
    pub regime: Option<FlowRegime>,
    pub friction: Option<FrictionFactor>,
    pub k: Option<f64>,
    pub opening: Option<f64>,
    /// Shaft power drawn by a pump [W]
    pub power_w: Option<f64>,
    pub node_state: NodeState,
}

impl ElementResult {
    /// Result for an element that sees no flow, pressure held at `p_pa`.
    pub(crate) fn idle(
        id: ElementId,
        name: &str,
        kind: ElementKind,
        p_pa: f64,
        node_state: NodeState,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind,
            p_in_pa: p_pa,
            p_out_pa: p_pa,
            dp_major_pa: 0.0,
            dp_minor_pa: 0.0,
            dp_static_pa: 0.0,
            dp_total_pa: 0.0,
            velocity_mps: 0.0,
            reynolds: 0.0,
            regime: None,
            friction: None,
            k: None,
            opening: None,
            power_w: None,
            node_state,
        }
    }

    pub fn friction_converged(&self) -> bool {
        self.friction.is_none_or(|f| f.converged)
    }
}

/// Output of one walk over the chain.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkSolution {
    pub nodes: Vec<ElementResult>,
    /// Flow actually delivered [m³/s]; zero once a valve is closed.
    pub q_effective_m3s: f64,
    /// First closed valve, if any.
    pub blocked_at: Option<ElementId>,
}

impl NetworkSolution {
    pub fn is_blocked(&self) -> bool {
        self.blocked_at.is_some()
    }

    /// Outlet pressure of the last element, or `None` for an empty chain.
    pub fn outlet_pressure_pa(&self) -> Option<f64> {
        self.nodes.last().map(|n| n.p_out_pa)
    }

    /// Sum of dissipative losses over the chain [Pa].
    pub fn total_loss_pa(&self) -> f64 {
        self.nodes.iter().map(|n| n.dp_total_pa).sum()
    }

    pub fn min_pressure_pa(&self) -> Option<f64> {
        self.nodes
            .iter()
            .map(|n| n.p_out_pa)
            .min_by(|a, b| a.total_cmp(b))
    }

    pub fn unconverged(&self) -> impl Iterator<Item = &ElementResult> {
        self.nodes.iter().filter(|n| !n.friction_converged())
    }

    pub fn node(&self, id: ElementId) -> Option<&ElementResult> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
