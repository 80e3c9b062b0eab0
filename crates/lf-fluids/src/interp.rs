//! Scalar table interpolation.
//!
//! Two schemes over a strictly increasing abscissa:
//! - [`linear`]: piecewise linear
//! - [`monotone_cubic`]: Fritsch–Carlson monotone cubic Hermite spline
//!
//! Both reproduce the table exactly at its nodes. Queries outside the table
//! range are clamped to the boundary value unless [`InterpOptions::extrapolate`]
//! is set, in which case the nearest end interval is extended linearly. Either
//! way the result records what happened.

use crate::error::{FluidError, FluidResult};

/// Below this secant magnitude an interval is treated as flat.
const FLAT_SECANT: f64 = 1e-10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InterpOptions {
    /// Extend the end intervals linearly instead of clamping.
    pub extrapolate: bool,
}

/// Interpolated value plus a record of any boundary handling.
#[derive(Clone, Debug, PartialEq)]
pub struct Interpolated {
    pub value: f64,
    /// Query was outside the table and the boundary value was returned.
    pub clamped: bool,
    /// Query was outside the table and an end interval was extended.
    pub extrapolated: bool,
    pub warning: Option<String>,
}

impl Interpolated {
    fn inside(value: f64) -> Self {
        Self {
            value,
            clamped: false,
            extrapolated: false,
            warning: None,
        }
    }
}

fn validate(xs: &[f64], ys: &[f64], x: f64) -> FluidResult<()> {
    if xs.is_empty() {
        return Err(FluidError::InvalidTable {
            reason: "empty table".into(),
        });
    }
    if xs.len() != ys.len() {
        return Err(FluidError::InvalidTable {
            reason: format!("{} abscissae but {} ordinates", xs.len(), ys.len()),
        });
    }
    if !x.is_finite() {
        return Err(FluidError::InvalidArg {
            what: "interpolation query must be finite",
        });
    }
    if xs.windows(2).any(|w| w[0] >= w[1]) {
        return Err(FluidError::InvalidTable {
            reason: "abscissae must be strictly increasing".into(),
        });
    }
    Ok(())
}

/// Handles queries outside `[xs[0], xs[n-1]]`. Returns `None` for queries inside.
fn outside(xs: &[f64], ys: &[f64], x: f64, opts: InterpOptions) -> Option<Interpolated> {
    let n = xs.len();
    let (lo, hi) = (xs[0], xs[n - 1]);
    if x >= lo && x <= hi {
        return None;
    }

    let below = x < lo;
    if opts.extrapolate && n >= 2 {
        let (i0, i1) = if below { (0, 1) } else { (n - 2, n - 1) };
        let slope = (ys[i1] - ys[i0]) / (xs[i1] - xs[i0]);
        return Some(Interpolated {
            value: ys[i0] + slope * (x - xs[i0]),
            clamped: false,
            extrapolated: true,
            warning: Some(format!(
                "x={x} outside [{lo}, {hi}], extrapolated linearly"
            )),
        });
    }

    let (edge, value) = if below { (lo, ys[0]) } else { (hi, ys[n - 1]) };
    Some(Interpolated {
        value,
        clamped: true,
        extrapolated: false,
        warning: Some(format!("x={x} outside [{lo}, {hi}], clamped to {edge}")),
    })
}

/// Index `i` of the interval `[xs[i], xs[i+1]]` containing `x`.
///
/// Requires `xs.len() >= 2` and `xs[0] <= x <= xs[n-1]`.
fn bracket(xs: &[f64], x: f64) -> usize {
    let upper = xs.partition_point(|&xi| xi <= x);
    upper.saturating_sub(1).min(xs.len() - 2)
}

/// Piecewise linear interpolation.
pub fn linear(xs: &[f64], ys: &[f64], x: f64, opts: InterpOptions) -> FluidResult<Interpolated> {
    validate(xs, ys, x)?;
    if let Some(edge) = outside(xs, ys, x, opts) {
        return Ok(edge);
    }
    if xs.len() == 1 {
        return Ok(Interpolated::inside(ys[0]));
    }

    let i = bracket(xs, x);
    if x == xs[i] {
        return Ok(Interpolated::inside(ys[i]));
    }
    if x == xs[i + 1] {
        return Ok(Interpolated::inside(ys[i + 1]));
    }
    let t = (x - xs[i]) / (xs[i + 1] - xs[i]);
    Ok(Interpolated::inside(ys[i] + t * (ys[i + 1] - ys[i])))
}

/// Node derivatives for the Fritsch–Carlson scheme.
fn monotone_slopes(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let delta: Vec<f64> = (0..n - 1).map(|i| (ys[i + 1] - ys[i]) / h[i]).collect();

    let mut m = vec![0.0; n];
    m[0] = delta[0];
    m[n - 1] = delta[n - 2];
    for i in 1..n - 1 {
        if delta[i - 1] * delta[i] <= 0.0 {
            // local extremum
            m[i] = 0.0;
        } else {
            let w1 = 2.0 * h[i] + h[i - 1];
            let w2 = h[i] + 2.0 * h[i - 1];
            m[i] = (w1 + w2) / (w1 / delta[i - 1] + w2 / delta[i]);
        }
    }

    for i in 0..n - 1 {
        if delta[i].abs() < FLAT_SECANT {
            m[i] = 0.0;
            m[i + 1] = 0.0;
            continue;
        }
        let alpha = m[i] / delta[i];
        let beta = m[i + 1] / delta[i];
        let tau = alpha * alpha + beta * beta;
        if tau > 9.0 {
            let s = 3.0 / tau.sqrt();
            m[i] = s * alpha * delta[i];
            m[i + 1] = s * beta * delta[i];
        }
    }
    m
}

/// Monotone cubic (Fritsch–Carlson) interpolation.
///
/// Tables with fewer than three points use [`linear`].
pub fn monotone_cubic(
    xs: &[f64],
    ys: &[f64],
    x: f64,
    opts: InterpOptions,
) -> FluidResult<Interpolated> {
    validate(xs, ys, x)?;
    if xs.len() < 3 {
        return linear(xs, ys, x, opts);
    }
    if let Some(edge) = outside(xs, ys, x, opts) {
        return Ok(edge);
    }

    let i = bracket(xs, x);
    if x == xs[i] {
        return Ok(Interpolated::inside(ys[i]));
    }
    if x == xs[i + 1] {
        return Ok(Interpolated::inside(ys[i + 1]));
    }

    let m = monotone_slopes(xs, ys);
    let h = xs[i + 1] - xs[i];
    let t = (x - xs[i]) / h;
    let t2 = t * t;
    let t3 = t2 * t;

    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    let value = h00 * ys[i] + h10 * h * m[i] + h01 * ys[i + 1] + h11 * h * m[i + 1];
    Ok(Interpolated::inside(value))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn table() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
        prop::collection::vec((0.1_f64..5.0, -50.0_f64..50.0), 3..12).prop_map(|pairs| {
            let mut x = 0.0;
            let mut xs = Vec::with_capacity(pairs.len());
            let mut ys = Vec::with_capacity(pairs.len());
            for (dx, y) in pairs {
                x += dx;
                xs.push(x);
                ys.push(y);
            }
            (xs, ys)
        })
    }

    proptest! {
        #[test]
        fn nodes_are_reproduced_exactly((xs, ys) in table()) {
            for i in 0..xs.len() {
                let r = monotone_cubic(&xs, &ys, xs[i], InterpOptions::default()).unwrap();
                prop_assert_eq!(r.value, ys[i]);
            }
        }

        #[test]
        fn no_overshoot_between_nodes((xs, ys) in table(), frac in 0.0_f64..1.0) {
            for i in 0..xs.len() - 1 {
                let x = xs[i] + frac * (xs[i + 1] - xs[i]);
                let r = monotone_cubic(&xs, &ys, x, InterpOptions::default()).unwrap();
                let lo = ys[i].min(ys[i + 1]);
                let hi = ys[i].max(ys[i + 1]);
                let slack = 1e-9 * (1.0 + lo.abs().max(hi.abs()));
                prop_assert!(r.value >= lo - slack && r.value <= hi + slack,
                    "value {} outside [{}, {}] on interval {}", r.value, lo, hi, i);
            }
        }
    }
}
