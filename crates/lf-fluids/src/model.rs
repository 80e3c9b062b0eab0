//! Fluid model trait and the constant-property model.

use crate::error::FluidResult;
use crate::sample::FluidSample;

/// Anything that can produce a [`FluidSample`] for a temperature.
///
/// Implementations must be thread-safe (Send + Sync) so engines can hold them
/// behind shared pointers.
pub trait FluidModel: Send + Sync {
    /// Human-readable fluid name.
    fn name(&self) -> &str;

    /// Temperature range [°C] over which the model is trusted, if bounded.
    fn valid_range_c(&self) -> Option<(f64, f64)>;

    /// Resolve properties at `t_c` [°C]. Out-of-range temperatures produce
    /// warnings on the sample, not errors.
    fn properties(&self, t_c: f64) -> FluidResult<FluidSample>;
}

/// Temperature-independent fluid.
#[derive(Clone, Debug)]
pub struct ConstantFluid {
    name: String,
    sample: FluidSample,
}

impl ConstantFluid {
    /// Density [kg/m³] and dynamic viscosity [Pa·s].
    pub fn new(name: impl Into<String>, rho_kg_m3: f64, mu_pa_s: f64) -> FluidResult<Self> {
        Ok(Self {
            name: name.into(),
            sample: FluidSample::from_density_viscosity(rho_kg_m3, mu_pa_s)?,
        })
    }
}

impl FluidModel for ConstantFluid {
    fn name(&self) -> &str {
        &self.name
    }

    fn valid_range_c(&self) -> Option<(f64, f64)> {
        None
    }

    fn properties(&self, t_c: f64) -> FluidResult<FluidSample> {
        let mut sample = self.sample.clone();
        sample.temperature_c = Some(t_c);
        Ok(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_fluid_ignores_temperature() {
        let f = ConstantFluid::new("oil", 870.0, 0.03).unwrap();
        let a = f.properties(10.0).unwrap();
        let b = f.properties(90.0).unwrap();
        assert_eq!(a.rho, b.rho);
        assert_eq!(a.mu, b.mu);
        assert_eq!(b.temperature_c, Some(90.0));
        assert!(f.valid_range_c().is_none());
    }

    #[test]
    fn models_are_object_safe() {
        let f: Box<dyn FluidModel> = Box::new(ConstantFluid::new("x", 1000.0, 1e-3).unwrap());
        assert_eq!(f.name(), "x");
    }
}
