use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{Pressure, SpecificVolume, ThermodynamicTemperature},
    pressure::pascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    specific_volume::cubic_meter_per_kilogram,
    thermodynamic_temperature::kelvin,
};

use crate::{
    solve,
    units::{SpecificEnthalpy, SpecificEntropy, SpecificInternalEnergy},
    DomainBounds, PhaseRegion, PropertyError, PropertyProvider,
};

/// Specific gas constant of water vapor, J/kg·K.
const R: f64 = 461.526;
/// Constant-volume specific heat of the vapor branch, J/kg·K.
const CV_VAPOR: f64 = 1411.0;
/// Constant-pressure specific heat of the vapor branch, J/kg·K.
const CP_VAPOR: f64 = CV_VAPOR + R;
/// Specific heat of the liquid branch, J/kg·K.
const C_LIQUID: f64 = 4186.0;

/// Triple point, K and Pa.
const T_TRIPLE: f64 = 273.16;
const P_TRIPLE: f64 = 611.657;
/// Critical point, K and Pa.
const T_CRIT: f64 = 647.096;
const P_CRIT: f64 = 22.064e6;

/// Saturated-vapor internal energy and entropy at the triple point.
const U_VAPOR_TRIPLE: f64 = 2.3749e6;
const S_VAPOR_TRIPLE: f64 = 9155.9;

/// Saturated-liquid specific volume at the triple point, m³/kg.
const V_LIQUID_TRIPLE: f64 = 1.0002e-3;
/// Liquid thermal expansion coefficient, 1/K.
const ALPHA: f64 = 4.6e-4;
/// Liquid isothermal compressibility, 1/Pa.
const KAPPA: f64 = 4.8e-10;

/// How a (pressure, internal energy) pair resolves within the model.
#[derive(Clone, Copy)]
enum Split {
    Liquid { t: f64 },
    Vapor { t: f64 },
    Dome { ts: f64, quality: f64 },
    /// Above the critical pressure the caloric branches leave a gap between
    /// the liquid and vapor energies at the critical temperature; states in
    /// the gap interpolate across it.
    Seam { quality: f64 },
}

/// An approximate, fully closed-form water property model.
///
/// Subcooled liquid is a slightly expansible and compressible liquid with
/// constant specific heat, superheated vapor is an ideal gas with constant
/// specific heats, and the saturation curve is a two-point Clausius–Clapeyron
/// fit anchored at the triple and critical points. Two-phase properties
/// follow the lever rule between the saturated branches.
///
/// The correlations are intentionally simple: values track real steam-table
/// data only qualitatively, and properties above the critical pressure switch
/// branches at the critical temperature rather than varying continuously.
/// Every relation is invertible in closed form except the dome-interior
/// backward solve from (volume, internal energy), which bisects on pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnalyticWater;

impl AnalyticWater {
    /// Clausius–Clapeyron slope `B` in `ln p = ln p_crit − B·(1/T − 1/T_crit)`,
    /// anchored so the fit passes through both the triple and critical points.
    fn cc_slope() -> f64 {
        (P_CRIT / P_TRIPLE).ln() / (1.0 / T_TRIPLE - 1.0 / T_CRIT)
    }

    fn tsat_raw(p: f64) -> f64 {
        1.0 / (1.0 / T_CRIT + (P_CRIT / p).ln() / Self::cc_slope())
    }

    fn v_liquid(p: f64, t: f64) -> f64 {
        V_LIQUID_TRIPLE * (1.0 + ALPHA * (t - T_TRIPLE)) * (1.0 - KAPPA * (p - P_TRIPLE))
    }

    fn t_from_v_liquid(p: f64, v: f64) -> f64 {
        T_TRIPLE + (v / (V_LIQUID_TRIPLE * (1.0 - KAPPA * (p - P_TRIPLE))) - 1.0) / ALPHA
    }

    fn v_vapor(p: f64, t: f64) -> f64 {
        R * t / p
    }

    fn u_liquid(t: f64) -> f64 {
        C_LIQUID * (t - T_TRIPLE)
    }

    fn u_vapor(t: f64) -> f64 {
        U_VAPOR_TRIPLE + CV_VAPOR * (t - T_TRIPLE)
    }

    fn t_from_u_liquid(u: f64) -> f64 {
        T_TRIPLE + u / C_LIQUID
    }

    fn t_from_u_vapor(u: f64) -> f64 {
        T_TRIPLE + (u - U_VAPOR_TRIPLE) / CV_VAPOR
    }

    fn s_liquid(t: f64) -> f64 {
        C_LIQUID * (t / T_TRIPLE).ln()
    }

    fn s_vapor(p: f64, t: f64) -> f64 {
        S_VAPOR_TRIPLE + CP_VAPOR * (t / T_TRIPLE).ln() - R * (p / P_TRIPLE).ln()
    }

    fn phase_pt_raw(p: f64, t: f64) -> PhaseRegion {
        if p >= P_CRIT {
            if t < T_CRIT {
                PhaseRegion::SubcooledLiquid
            } else {
                PhaseRegion::SuperheatedVapor
            }
        } else {
            let ts = Self::tsat_raw(p);
            if t < ts {
                PhaseRegion::SubcooledLiquid
            } else if t > ts {
                PhaseRegion::SuperheatedVapor
            } else {
                PhaseRegion::TwoPhase
            }
        }
    }

    fn split_pu(p: f64, u: f64) -> Split {
        if p >= P_CRIT {
            let u_liq = Self::u_liquid(T_CRIT);
            let u_vap = Self::u_vapor(T_CRIT);
            if u <= u_liq {
                Split::Liquid {
                    t: Self::t_from_u_liquid(u),
                }
            } else if u >= u_vap {
                Split::Vapor {
                    t: Self::t_from_u_vapor(u),
                }
            } else {
                Split::Seam {
                    quality: (u - u_liq) / (u_vap - u_liq),
                }
            }
        } else {
            let ts = Self::tsat_raw(p);
            let u_f = Self::u_liquid(ts);
            let u_g = Self::u_vapor(ts);
            if u <= u_f {
                Split::Liquid {
                    t: Self::t_from_u_liquid(u),
                }
            } else if u >= u_g {
                Split::Vapor {
                    t: Self::t_from_u_vapor(u),
                }
            } else {
                Split::Dome {
                    ts,
                    quality: (u - u_f) / (u_g - u_f),
                }
            }
        }
    }

    /// Raw specific volume for a (pressure, internal energy) split.
    fn v_from_split(p: f64, split: &Split) -> f64 {
        match *split {
            Split::Liquid { t } => Self::v_liquid(p, t),
            Split::Vapor { t } => Self::v_vapor(p, t),
            Split::Dome { ts, quality } => {
                let v_f = Self::v_liquid(p, ts);
                let v_g = Self::v_vapor(p, ts);
                v_f + quality * (v_g - v_f)
            }
            Split::Seam { quality } => {
                let v_f = Self::v_liquid(p, T_CRIT);
                let v_g = Self::v_vapor(p, T_CRIT);
                v_f + quality * (v_g - v_f)
            }
        }
    }

    fn check_result_temperature(&self, t: f64) -> Result<(), PropertyError> {
        self.bounds()
            .check_temperature(ThermodynamicTemperature::new::<kelvin>(t))
    }
}

impl PropertyProvider for AnalyticWater {
    fn bounds(&self) -> DomainBounds {
        DomainBounds {
            p_min: Pressure::new::<pascal>(611.213),
            p_max: Pressure::new::<pascal>(100.0e6),
            t_min: ThermodynamicTemperature::new::<kelvin>(273.15),
            t_max: ThermodynamicTemperature::new::<kelvin>(1073.15),
            v_min: SpecificVolume::new::<cubic_meter_per_kilogram>(1.0 / 3000.0),
            v_max: SpecificVolume::new::<cubic_meter_per_kilogram>(1000.0),
            psat_min: Pressure::new::<pascal>(P_TRIPLE),
            psat_max: Pressure::new::<pascal>(P_CRIT),
        }
    }

    fn volume_pt(
        &self,
        pressure: Pressure,
        temperature: ThermodynamicTemperature,
    ) -> Result<SpecificVolume, PropertyError> {
        self.bounds().check_pressure(pressure)?;
        self.bounds().check_temperature(temperature)?;
        let (p, t) = (pressure.value, temperature.value);

        let v = match Self::phase_pt_raw(p, t) {
            PhaseRegion::SubcooledLiquid => Self::v_liquid(p, t),
            PhaseRegion::SuperheatedVapor => Self::v_vapor(p, t),
            // Exactly on the saturation line; report the vapor branch.
            PhaseRegion::TwoPhase => Self::v_vapor(p, t),
        };
        Ok(SpecificVolume::new::<cubic_meter_per_kilogram>(v))
    }

    fn volume_pu(
        &self,
        pressure: Pressure,
        internal_energy: SpecificInternalEnergy,
    ) -> Result<SpecificVolume, PropertyError> {
        self.bounds().check_pressure(pressure)?;
        let (p, u) = (pressure.value, internal_energy.value);

        let split = Self::split_pu(p, u);
        if let Split::Liquid { t } | Split::Vapor { t } = split {
            self.check_result_temperature(t)?;
        }
        Ok(SpecificVolume::new::<cubic_meter_per_kilogram>(
            Self::v_from_split(p, &split),
        ))
    }

    fn internal_energy_pt(
        &self,
        pressure: Pressure,
        temperature: ThermodynamicTemperature,
    ) -> Result<SpecificInternalEnergy, PropertyError> {
        self.bounds().check_pressure(pressure)?;
        self.bounds().check_temperature(temperature)?;
        let (p, t) = (pressure.value, temperature.value);

        let u = match Self::phase_pt_raw(p, t) {
            PhaseRegion::SubcooledLiquid => Self::u_liquid(t),
            PhaseRegion::SuperheatedVapor => Self::u_vapor(t),
            PhaseRegion::TwoPhase => Self::u_vapor(t),
        };
        Ok(SpecificInternalEnergy::new::<joule_per_kilogram>(u))
    }

    fn pressure_vu(
        &self,
        volume: SpecificVolume,
        internal_energy: SpecificInternalEnergy,
    ) -> Result<Pressure, PropertyError> {
        let bounds = self.bounds();
        let (v, u) = (volume.value, internal_energy.value);
        let (p_min, p_max) = (bounds.p_min.value, bounds.p_max.value);
        let (t_min, t_max) = (bounds.t_min.value, bounds.t_max.value);

        // Vapor branch is fully determined by u and v.
        let t_vap = Self::t_from_u_vapor(u);
        if (t_min..=t_max).contains(&t_vap) {
            let p = R * t_vap / v;
            let in_vapor_region = if p >= P_CRIT {
                t_vap >= T_CRIT
            } else {
                t_vap >= Self::tsat_raw(p)
            };
            if (p_min..=p_max).contains(&p) && in_vapor_region {
                return Ok(Pressure::new::<pascal>(p));
            }
        }

        // Liquid branch: temperature from u, then pressure from the volume.
        let t_liq = Self::t_from_u_liquid(u);
        if (t_min..=t_max).contains(&t_liq) {
            let expansion = 1.0 + ALPHA * (t_liq - T_TRIPLE);
            let p = P_TRIPLE + (1.0 - v / (V_LIQUID_TRIPLE * expansion)) / KAPPA;
            let in_liquid_region = if p >= P_CRIT {
                t_liq < T_CRIT
            } else {
                p >= P_TRIPLE && t_liq <= Self::tsat_raw(p)
            };
            if (p_min..=p_max).contains(&p) && in_liquid_region {
                return Ok(Pressure::new::<pascal>(p));
            }
        }

        // Two-phase: find the pressure whose lever-rule qualities from u and
        // from v agree. The residual decreases monotonically in pressure.
        let residual = |p: f64| {
            let ts = Self::tsat_raw(p);
            let u_f = Self::u_liquid(ts);
            let u_g = Self::u_vapor(ts);
            let v_f = Self::v_liquid(p, ts);
            let v_g = Self::v_vapor(p, ts);
            (u - u_f) / (u_g - u_f) - (v - v_f) / (v_g - v_f)
        };
        let p = solve::bisect(residual, [P_TRIPLE, P_CRIT], &solve::Config::default()).map_err(
            |err| {
                PropertyError::Calculation(format!(
                    "no pressure matches v = {v} m³/kg, u = {u} J/kg: {err}"
                ))
            },
        )?;
        Ok(Pressure::new::<pascal>(p))
    }

    fn temperature_pv(
        &self,
        pressure: Pressure,
        volume: SpecificVolume,
    ) -> Result<ThermodynamicTemperature, PropertyError> {
        self.bounds().check_pressure(pressure)?;
        let (p, v) = (pressure.value, volume.value);

        let t = if p >= P_CRIT {
            let v_split = Self::v_liquid(p, T_CRIT);
            if v <= v_split {
                Self::t_from_v_liquid(p, v)
            } else {
                p * v / R
            }
        } else {
            let ts = Self::tsat_raw(p);
            let v_f = Self::v_liquid(p, ts);
            let v_g = Self::v_vapor(p, ts);
            if v < v_f {
                Self::t_from_v_liquid(p, v)
            } else if v > v_g {
                p * v / R
            } else {
                ts
            }
        };
        self.check_result_temperature(t)?;
        Ok(ThermodynamicTemperature::new::<kelvin>(t))
    }

    fn temperature_pu(
        &self,
        pressure: Pressure,
        internal_energy: SpecificInternalEnergy,
    ) -> Result<ThermodynamicTemperature, PropertyError> {
        self.bounds().check_pressure(pressure)?;
        let (p, u) = (pressure.value, internal_energy.value);

        let t = match Self::split_pu(p, u) {
            Split::Liquid { t } | Split::Vapor { t } => t,
            Split::Dome { ts, .. } => ts,
            Split::Seam { .. } => T_CRIT,
        };
        self.check_result_temperature(t)?;
        Ok(ThermodynamicTemperature::new::<kelvin>(t))
    }

    fn enthalpy_pu(
        &self,
        pressure: Pressure,
        internal_energy: SpecificInternalEnergy,
    ) -> Result<SpecificEnthalpy, PropertyError> {
        let volume = self.volume_pu(pressure, internal_energy)?;
        Ok(internal_energy + pressure * volume)
    }

    fn entropy_pu(
        &self,
        pressure: Pressure,
        internal_energy: SpecificInternalEnergy,
    ) -> Result<SpecificEntropy, PropertyError> {
        self.bounds().check_pressure(pressure)?;
        let (p, u) = (pressure.value, internal_energy.value);

        let s = match Self::split_pu(p, u) {
            Split::Liquid { t } => {
                self.check_result_temperature(t)?;
                Self::s_liquid(t)
            }
            Split::Vapor { t } => {
                self.check_result_temperature(t)?;
                Self::s_vapor(p, t)
            }
            Split::Dome { ts, quality } => {
                let s_f = Self::s_liquid(ts);
                let s_g = Self::s_vapor(p, ts);
                s_f + quality * (s_g - s_f)
            }
            Split::Seam { quality } => {
                let s_f = Self::s_liquid(T_CRIT);
                let s_g = Self::s_vapor(p, T_CRIT);
                s_f + quality * (s_g - s_f)
            }
        };
        Ok(SpecificEntropy::new::<joule_per_kilogram_kelvin>(s))
    }

    fn quality_pt(
        &self,
        pressure: Pressure,
        temperature: ThermodynamicTemperature,
    ) -> Result<Option<f64>, PropertyError> {
        match self.phase_pt(pressure, temperature)? {
            // Pressure and temperature are not independent inside the dome,
            // so they cannot pin a quality.
            PhaseRegion::TwoPhase => Err(PropertyError::Undefined {
                property: "quality",
                context: Some("the state lies on the saturation line".into()),
            }),
            _ => Ok(None),
        }
    }

    fn quality_pu(
        &self,
        pressure: Pressure,
        internal_energy: SpecificInternalEnergy,
    ) -> Result<Option<f64>, PropertyError> {
        self.bounds().check_pressure(pressure)?;
        let (p, u) = (pressure.value, internal_energy.value);

        match Self::split_pu(p, u) {
            Split::Dome { quality, .. } => Ok(Some(quality)),
            _ => Ok(None),
        }
    }

    fn phase_pt(
        &self,
        pressure: Pressure,
        temperature: ThermodynamicTemperature,
    ) -> Result<PhaseRegion, PropertyError> {
        self.bounds().check_pressure(pressure)?;
        self.bounds().check_temperature(temperature)?;
        Ok(Self::phase_pt_raw(pressure.value, temperature.value))
    }

    fn saturation_temperature(
        &self,
        pressure: Pressure,
    ) -> Result<ThermodynamicTemperature, PropertyError> {
        self.bounds().check_saturation_pressure(pressure)?;
        Ok(ThermodynamicTemperature::new::<kelvin>(Self::tsat_raw(
            pressure.value,
        )))
    }

    fn saturation_liquid_volume(
        &self,
        pressure: Pressure,
    ) -> Result<SpecificVolume, PropertyError> {
        self.bounds().check_saturation_pressure(pressure)?;
        let p = pressure.value;
        Ok(SpecificVolume::new::<cubic_meter_per_kilogram>(
            Self::v_liquid(p, Self::tsat_raw(p)),
        ))
    }

    fn saturation_vapor_volume(
        &self,
        pressure: Pressure,
    ) -> Result<SpecificVolume, PropertyError> {
        self.bounds().check_saturation_pressure(pressure)?;
        let p = pressure.value;
        Ok(SpecificVolume::new::<cubic_meter_per_kilogram>(
            Self::v_vapor(p, Self::tsat_raw(p)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::available_energy::joule_per_kilogram;

    #[test]
    fn saturation_fit_passes_through_triple_and_critical_points() {
        let water = AnalyticWater;

        let t_triple = water
            .saturation_temperature(Pressure::new::<pascal>(P_TRIPLE))
            .unwrap();
        assert_relative_eq!(t_triple.get::<kelvin>(), T_TRIPLE, epsilon = 1e-6);

        let t_crit = water
            .saturation_temperature(Pressure::new::<pascal>(P_CRIT))
            .unwrap();
        assert_relative_eq!(t_crit.get::<kelvin>(), T_CRIT, epsilon = 1e-6);
    }

    #[test]
    fn temperature_round_trips_through_volume() {
        let water = AnalyticWater;
        let bounds = water.bounds();

        for p_frac in [0.02, 0.25, 0.5, 0.75, 0.95] {
            for t_frac in [0.05, 0.25, 0.5, 0.75, 0.95] {
                let p = bounds.pressure_at(p_frac);
                let t = bounds.temperature_at(t_frac);
                let v = water.volume_pt(p, t).unwrap();
                let t_back = water.temperature_pv(p, v).unwrap();
                assert_relative_eq!(
                    t_back.get::<kelvin>(),
                    t.get::<kelvin>(),
                    max_relative = 1e-9
                );
            }
        }
    }

    #[test]
    fn dome_properties_follow_the_lever_rule() {
        let water = AnalyticWater;
        let p = Pressure::new::<pascal>(1.0e6);
        let ts = AnalyticWater::tsat_raw(1.0e6);

        let u_f = AnalyticWater::u_liquid(ts);
        let u_g = AnalyticWater::u_vapor(ts);
        let u = SpecificInternalEnergy::new::<joule_per_kilogram>(u_f + 0.5 * (u_g - u_f));

        assert_relative_eq!(water.quality_pu(p, u).unwrap().unwrap(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(
            water.temperature_pu(p, u).unwrap().get::<kelvin>(),
            ts,
            epsilon = 1e-9
        );

        let v_f = water.saturation_liquid_volume(p).unwrap();
        let v_g = water.saturation_vapor_volume(p).unwrap();
        let v = water.volume_pu(p, u).unwrap();
        assert_relative_eq!(
            v.get::<cubic_meter_per_kilogram>(),
            0.5 * (v_f.get::<cubic_meter_per_kilogram>() + v_g.get::<cubic_meter_per_kilogram>()),
            max_relative = 1e-12
        );
    }

    #[test]
    fn dome_pressure_recovers_from_volume_and_energy() {
        let water = AnalyticWater;
        let p = Pressure::new::<pascal>(1.0e6);
        let ts = AnalyticWater::tsat_raw(1.0e6);

        let u_f = AnalyticWater::u_liquid(ts);
        let u_g = AnalyticWater::u_vapor(ts);
        let u = SpecificInternalEnergy::new::<joule_per_kilogram>(u_f + 0.3 * (u_g - u_f));
        let v = water.volume_pu(p, u).unwrap();

        let p_back = water.pressure_vu(v, u).unwrap();
        assert_relative_eq!(p_back.get::<pascal>(), 1.0e6, max_relative = 1e-6);
    }

    #[test]
    fn vapor_pressure_recovers_from_volume_and_energy() {
        let water = AnalyticWater;
        let bounds = water.bounds();
        let p = bounds.pressure_at(0.1);
        let t = bounds.temperature_at(0.9);

        let v = water.volume_pt(p, t).unwrap();
        let u = water.internal_energy_pt(p, t).unwrap();
        let p_back = water.pressure_vu(v, u).unwrap();
        assert_relative_eq!(p_back.get::<pascal>(), p.get::<pascal>(), max_relative = 1e-9);
    }

    #[test]
    fn enthalpy_is_energy_plus_flow_work() {
        let water = AnalyticWater;
        let bounds = water.bounds();
        let p = bounds.pressure_at(0.1);
        let t = bounds.temperature_at(0.9);

        let u = water.internal_energy_pt(p, t).unwrap();
        let v = water.volume_pu(p, u).unwrap();
        let h = water.enthalpy_pu(p, u).unwrap();
        assert_relative_eq!(h.value, u.value + p.value * v.value, max_relative = 1e-12);
    }

    #[test]
    fn out_of_domain_inputs_are_rejected() {
        let water = AnalyticWater;
        let t = ThermodynamicTemperature::new::<kelvin>(500.0);

        assert!(matches!(
            water.volume_pt(Pressure::new::<pascal>(1.0), t),
            Err(PropertyError::OutOfDomain { .. })
        ));
        assert!(matches!(
            water.saturation_temperature(Pressure::new::<pascal>(50.0e6)),
            Err(PropertyError::OutOfDomain { .. })
        ));
    }

    #[test]
    fn phase_classification_matches_the_saturation_curve() {
        let water = AnalyticWater;
        let p = Pressure::new::<pascal>(1.0e6);
        let ts = AnalyticWater::tsat_raw(1.0e6);

        let below = ThermodynamicTemperature::new::<kelvin>(ts - 10.0);
        let above = ThermodynamicTemperature::new::<kelvin>(ts + 10.0);
        assert_eq!(
            water.phase_pt(p, below).unwrap(),
            PhaseRegion::SubcooledLiquid
        );
        assert_eq!(
            water.phase_pt(p, above).unwrap(),
            PhaseRegion::SuperheatedVapor
        );
        assert_eq!(water.quality_pt(p, below).unwrap(), None);
    }
}
