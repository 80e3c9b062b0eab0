//! Temperature → fluid property resolution.
//!
//! Tables and correlations are stored in their file units. This resolver is
//! the only place where they are converted to SI:
//! - viscosity mPa·s → Pa·s
//! - correlation heat capacity kJ/(kg·K) → J/(kg·K)

use crate::correlation::EmpiricalModel;
use crate::error::{FluidError, FluidResult};
use crate::interp::{InterpOptions, monotone_cubic};
use crate::model::FluidModel;
use crate::sample::{FluidSample, PropertySource};
use crate::table::{PropertyColumn, PropertyTable};
use lf_core::units::{kg_per_m3, m2ps, pa_s};
use tracing::{debug, warn};

const MPA_S_TO_PA_S: f64 = 1.0e-3;
const KJ_TO_J: f64 = 1.0e3;

#[derive(Clone, Debug)]
pub struct FluidPropertyResolver {
    name: String,
    valid_range_c: (f64, f64),
    table: Option<PropertyTable>,
    fallback: Option<EmpiricalModel>,
}

impl FluidPropertyResolver {
    /// Table-backed resolver. The valid range defaults to the table span.
    pub fn from_table(name: impl Into<String>, table: PropertyTable) -> Self {
        Self {
            name: name.into(),
            valid_range_c: table.range(),
            table: Some(table),
            fallback: None,
        }
    }

    /// Correlation-only resolver.
    pub fn from_empirical(
        name: impl Into<String>,
        valid_range_c: (f64, f64),
        model: EmpiricalModel,
    ) -> FluidResult<Self> {
        let resolver = Self {
            name: name.into(),
            valid_range_c: (0.0, 0.0),
            table: None,
            fallback: Some(model),
        };
        resolver.with_valid_range(valid_range_c.0, valid_range_c.1)
    }

    /// Attach correlations to use if the table is dropped.
    pub fn with_fallback(mut self, model: EmpiricalModel) -> Self {
        self.fallback = Some(model);
        self
    }

    pub fn with_valid_range(mut self, min_c: f64, max_c: f64) -> FluidResult<Self> {
        if !min_c.is_finite() || !max_c.is_finite() || min_c >= max_c {
            return Err(FluidError::InvalidArg {
                what: "valid range must be finite with min < max",
            });
        }
        self.valid_range_c = (min_c, max_c);
        Ok(self)
    }

    /// Discard the table so the fallback correlations are used.
    pub fn without_table(mut self) -> FluidResult<Self> {
        if self.fallback.is_none() {
            return Err(FluidError::InvalidArg {
                what: "cannot drop the table of a resolver without fallback",
            });
        }
        self.table = None;
        Ok(self)
    }

    pub fn table(&self) -> Option<&PropertyTable> {
        self.table.as_ref()
    }

    pub fn fallback(&self) -> Option<&EmpiricalModel> {
        self.fallback.as_ref()
    }

    pub fn uses_fallback(&self) -> bool {
        self.table.is_none()
    }

    fn from_table_at(
        table: &PropertyTable,
        t_c: f64,
        warnings: &mut Vec<String>,
    ) -> FluidResult<(f64, f64, Option<f64>, Option<f64>, Option<f64>)> {
        let opts = InterpOptions::default();
        let xs = table.temperatures();

        let mut required = |col: PropertyColumn| -> FluidResult<f64> {
            let ys = table.column(col).ok_or_else(|| FluidError::InvalidTable {
                reason: format!("missing column '{}'", col.header()),
            })?;
            let r = monotone_cubic(xs, ys, t_c, opts)?;
            if let Some(w) = r.warning {
                warnings.push(format!("{}: {w}", col.header()));
            }
            Ok(r.value)
        };
        let rho = required(PropertyColumn::Density)?;
        let mu_mpa_s = required(PropertyColumn::Viscosity)?;

        let optional = |col: PropertyColumn| -> FluidResult<Option<f64>> {
            match table.column(col) {
                Some(ys) => Ok(Some(monotone_cubic(xs, ys, t_c, opts)?.value)),
                None => Ok(None),
            }
        };
        Ok((
            rho,
            mu_mpa_s,
            optional(PropertyColumn::HeatCapacity)?,
            optional(PropertyColumn::Conductivity)?,
            optional(PropertyColumn::Prandtl)?,
        ))
    }
}

impl FluidModel for FluidPropertyResolver {
    fn name(&self) -> &str {
        &self.name
    }

    fn valid_range_c(&self) -> Option<(f64, f64)> {
        Some(self.valid_range_c)
    }

    fn properties(&self, t_c: f64) -> FluidResult<FluidSample> {
        if !t_c.is_finite() {
            return Err(FluidError::InvalidArg {
                what: "temperature must be finite",
            });
        }

        let mut warnings = Vec::new();
        let (min_c, max_c) = self.valid_range_c;
        if t_c < min_c || t_c > max_c {
            warn!(fluid = %self.name, t_c, min_c, max_c, "temperature outside valid range");
            warnings.push(format!(
                "T={t_c}°C outside valid range [{min_c}, {max_c}]°C"
            ));
        }

        let (rho, mu_mpa_s, cp, k, pr, source) = match (&self.table, &self.fallback) {
            (Some(table), _) => {
                let (rho, mu, cp, k, pr) = Self::from_table_at(table, t_c, &mut warnings)?;
                (rho, mu, cp, k, pr, PropertySource::Table)
            }
            (None, Some(model)) => {
                debug!(fluid = %self.name, t_c, "no property table, using empirical fallback");
                warnings.push("no property table, empirical fallback used".into());
                // Correlations are only trusted inside the valid range.
                let t_eval = t_c.clamp(min_c, max_c);
                let rho = model.density.eval(t_eval);
                let mu = model.viscosity.eval(t_eval)?;
                let cp = model.heat_capacity.as_ref().map(|p| p.eval(t_eval) * KJ_TO_J);
                (rho, mu, cp, None, None, PropertySource::Fallback)
            }
            (None, None) => {
                return Err(FluidError::InvalidArg {
                    what: "resolver has neither table nor fallback",
                });
            }
        };

        if !rho.is_finite() || rho <= 0.0 {
            return Err(FluidError::NonPhysical { what: "density" });
        }
        let mu_pa_s = mu_mpa_s * MPA_S_TO_PA_S;
        if !mu_pa_s.is_finite() || mu_pa_s <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "dynamic viscosity",
            });
        }

        Ok(FluidSample {
            temperature_c: Some(t_c),
            rho: kg_per_m3(rho),
            mu: pa_s(mu_pa_s),
            nu: m2ps(mu_pa_s / rho),
            cp,
            k,
            pr,
            source,
            warnings,
        })
    }
}
