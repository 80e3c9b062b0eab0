// lf-core/src/units.rs

use uom::si::f64::{
    Acceleration as UomAcceleration, Area as UomArea, DynamicViscosity as UomDynamicViscosity,
    DiffusionCoefficient as UomDiffusionCoefficient, Length as UomLength,
    MassDensity as UomMassDensity, Pressure as UomPressure, Ratio as UomRatio, Time as UomTime,
    Velocity as UomVelocity, Volume as UomVolume, VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Accel = UomAcceleration;
pub type Area = UomArea;
pub type DynVisc = UomDynamicViscosity;
/// m²/s; uom models kinematic viscosity as a diffusion coefficient.
pub type KinVisc = UomDiffusionCoefficient;
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type Pressure = UomPressure;
pub type Ratio = UomRatio;
pub type Time = UomTime;
pub type Velocity = UomVelocity;
pub type Volume = UomVolume;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn bar(v: f64) -> Pressure {
    use uom::si::pressure::bar;
    Pressure::new::<bar>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn pa_s(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::pascal_second;
    DynVisc::new::<pascal_second>(v)
}

#[inline]
pub fn m2ps(v: f64) -> KinVisc {
    use uom::si::diffusion_coefficient::square_meter_per_second;
    KinVisc::new::<square_meter_per_second>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn m3(v: f64) -> Volume {
    use uom::si::volume::cubic_meter;
    Volume::new::<cubic_meter>(v)
}

#[inline]
pub fn m3ps(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_second;
    VolumeRate::new::<cubic_meter_per_second>(v)
}

#[inline]
pub fn lpm(v: f64) -> VolumeRate {
    use uom::si::volume_rate::liter_per_minute;
    VolumeRate::new::<liter_per_minute>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

pub mod constants {
    use super::*;

    pub const G0_MPS2: f64 = 9.806_65;
    pub const P_ATM_PA: f64 = 101_325.0;
    pub const ZERO_CELSIUS_K: f64 = 273.15;

    #[inline]
    pub fn g0() -> Accel {
        use uom::si::acceleration::meter_per_second_squared;
        Accel::new::<meter_per_second_squared>(G0_MPS2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{Tolerances, nearly_equal};

    #[test]
    fn constructors_smoke() {
        let _p = pa(101_325.0);
        let _l = m(2.0);
        let _dt = s(0.1);
        let _rho = kg_per_m3(998.2);
        let _mu = pa_s(1.0e-3);
        let _nu = m2ps(1.0e-6);
        let _v = mps(1.5);
        let _vol = m3(0.25);
        let _r = unitless(0.5);
        let _g0 = constants::g0();
    }

    #[test]
    fn engineering_units_convert_to_si() {
        use uom::si::length::meter;
        use uom::si::pressure::pascal;
        use uom::si::volume_rate::cubic_meter_per_second;

        let tol = Tolerances::default();
        assert!(nearly_equal(bar(2.0).get::<pascal>(), 200_000.0, tol));
        assert!(nearly_equal(mm(53.1).get::<meter>(), 0.0531, tol));
        assert!(nearly_equal(
            lpm(60.0).get::<cubic_meter_per_second>(),
            1.0e-3,
            tol
        ));
        assert_eq!(m3ps(0.002).get::<cubic_meter_per_second>(), 0.002);
    }

    #[test]
    fn kinematic_viscosity_is_stored_in_m2_per_s() {
        use uom::si::diffusion_coefficient::square_meter_per_second;

        let nu = m2ps(1.0e-6);
        assert_eq!(nu.get::<square_meter_per_second>(), 1.0e-6);
        assert_eq!(nu.value, 1.0e-6);

        let loose = Tolerances {
            abs: 1e-12,
            rel: 1e-3,
        };
        assert!(nearly_equal(m2ps(1.0e-3 / 998.0).value, 1.002e-6, loose));
    }
}
