//! Valves with opening-dependent loss coefficient.

use crate::common::{check_finite, check_non_negative, check_positive};
use crate::error::{ComponentError, ComponentResult};

/// Loss coefficient reported for a fully closed valve.
pub const BLOCKED_K: f64 = 1e9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ValveKind {
    Gate,
    Ball,
    Butterfly,
    Globe,
    Check,
    /// Pressure-reducing valve: outlet pressure capped at a set-point.
    Prv,
}

impl ValveKind {
    /// Loss coefficient at full opening.
    pub fn base_k(self) -> f64 {
        match self {
            ValveKind::Gate => 0.1,
            ValveKind::Ball => 0.05,
            ValveKind::Butterfly => 0.3,
            ValveKind::Globe => 10.0,
            ValveKind::Check => 2.5,
            ValveKind::Prv => 0.0,
        }
    }
}

/// One point of an opening → K characteristic.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KPoint {
    pub opening: f64,
    pub k: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValveSpec {
    pub kind: ValveKind,
    /// 0.0 (closed) to 1.0 (fully open)
    pub opening: f64,
    /// Measured characteristic; used instead of the exponential law when it
    /// has at least two points.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub k_table: Option<Vec<KPoint>>,
    /// Bore [mm]; the running chain diameter when absent.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub diameter_mm: Option<f64>,
    /// PRV set-point [Pa gauge].
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub set_pressure_pa: Option<f64>,
}

impl ValveSpec {
    pub fn new(kind: ValveKind, opening: f64) -> Self {
        Self {
            kind,
            opening: opening.clamp(0.0, 1.0),
            k_table: None,
            diameter_mm: None,
            set_pressure_pa: None,
        }
    }

    pub fn with_k_table(mut self, table: Vec<KPoint>) -> Self {
        self.k_table = Some(table);
        self
    }

    pub fn with_diameter(mut self, diameter_mm: f64) -> Self {
        self.diameter_mm = Some(diameter_mm);
        self
    }

    pub fn with_set_pressure(mut self, set_pressure_pa: f64) -> Self {
        self.set_pressure_pa = Some(set_pressure_pa);
        self
    }

    /// Set opening (clamped to 0..1).
    pub fn set_opening(&mut self, opening: f64) {
        self.opening = opening.clamp(0.0, 1.0);
    }

    pub fn is_closed(&self) -> bool {
        self.opening <= 0.0
    }

    pub fn k(&self) -> f64 {
        valve_k(self.kind, self.opening, self.k_table.as_deref())
    }

    pub fn validate(&self) -> ComponentResult<()> {
        check_finite(self.opening, "valve opening")?;
        if !(0.0..=1.0).contains(&self.opening) {
            return Err(ComponentError::InvalidArg {
                what: "valve opening must be in [0,1]",
            });
        }
        if let Some(d) = self.diameter_mm {
            check_positive(d, "valve diameter")?;
        }
        if let Some(table) = &self.k_table {
            for point in table {
                check_finite(point.opening, "valve K table opening")?;
                check_non_negative(point.k, "valve K table coefficient")?;
            }
        }
        match (self.kind, self.set_pressure_pa) {
            (ValveKind::Prv, None) => {
                return Err(ComponentError::InvalidArg {
                    what: "PRV requires a set pressure",
                });
            }
            (ValveKind::Prv, Some(p)) => check_finite(p, "PRV set pressure")?,
            (_, Some(_)) => {
                return Err(ComponentError::InvalidArg {
                    what: "only PRVs take a set pressure",
                });
            }
            (_, None) => {}
        }
        Ok(())
    }
}

/// Loss coefficient at `opening`.
///
/// - `opening <= 0`: [`BLOCKED_K`]
/// - table with ≥ 2 points: linear interpolation on the sorted table, clamped
///   to the end values outside its range
/// - otherwise: `K_base · 10^(2·(1 - opening))`
pub fn valve_k(kind: ValveKind, opening: f64, table: Option<&[KPoint]>) -> f64 {
    if opening <= 0.0 {
        return BLOCKED_K;
    }
    let opening = opening.min(1.0);

    if let Some(table) = table.filter(|t| t.len() >= 2) {
        let mut sorted = table.to_vec();
        sorted.sort_by(|a, b| a.opening.total_cmp(&b.opening));
        let first = sorted[0];
        let last = sorted[sorted.len() - 1];
        if opening <= first.opening {
            return first.k;
        }
        if opening >= last.opening {
            return last.k;
        }
        for pair in sorted.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if opening >= lo.opening && opening <= hi.opening {
                let span = hi.opening - lo.opening;
                if span <= 0.0 {
                    return hi.k;
                }
                let t = (opening - lo.opening) / span;
                return lo.k + t * (hi.k - lo.k);
            }
        }
    }

    kind.base_k() * 10f64.powf(2.0 * (1.0 - opening))
}
