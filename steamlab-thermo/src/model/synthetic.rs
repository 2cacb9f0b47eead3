use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{Pressure, SpecificVolume, ThermodynamicTemperature},
    pressure::pascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    specific_volume::cubic_meter_per_kilogram,
    thermodynamic_temperature::kelvin,
};

use crate::{
    units::{SpecificEnthalpy, SpecificEntropy, SpecificInternalEnergy},
    DomainBounds, PhaseRegion, PropertyError, PropertyProvider,
};

/// A closed-form fixture provider in reduced units.
///
/// Every relation is a one-line algebraic expression: specific volume is
/// `1/p + t`, internal energy equals temperature, and the saturation curve is
/// linear in pressure. Nothing about it is physical; it exists so surface and
/// engine tests are fast, fully deterministic, and independent of any real
/// correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyntheticFluid;

const P_MIN: f64 = 1.0;
const P_MAX: f64 = 10.0;
const T_MIN: f64 = 1.0;
const T_MAX: f64 = 10.0;
const V_MIN: f64 = 1.0;
const V_MAX: f64 = 12.0;
const PSAT_MIN: f64 = 1.0;
const PSAT_MAX: f64 = 5.0;

impl SyntheticFluid {
    fn tsat_raw(p: f64) -> f64 {
        1.0 + p / 2.0
    }

    fn v_liquid_sat(p: f64) -> f64 {
        1.3 + 0.02 * p
    }

    fn v_vapor_sat(p: f64) -> f64 {
        8.0 - 0.6 * p
    }
}

impl PropertyProvider for SyntheticFluid {
    fn bounds(&self) -> DomainBounds {
        DomainBounds {
            p_min: Pressure::new::<pascal>(P_MIN),
            p_max: Pressure::new::<pascal>(P_MAX),
            t_min: ThermodynamicTemperature::new::<kelvin>(T_MIN),
            t_max: ThermodynamicTemperature::new::<kelvin>(T_MAX),
            v_min: SpecificVolume::new::<cubic_meter_per_kilogram>(V_MIN),
            v_max: SpecificVolume::new::<cubic_meter_per_kilogram>(V_MAX),
            psat_min: Pressure::new::<pascal>(PSAT_MIN),
            psat_max: Pressure::new::<pascal>(PSAT_MAX),
        }
    }

    fn volume_pt(
        &self,
        pressure: Pressure,
        temperature: ThermodynamicTemperature,
    ) -> Result<SpecificVolume, PropertyError> {
        self.bounds().check_pressure(pressure)?;
        self.bounds().check_temperature(temperature)?;
        Ok(SpecificVolume::new::<cubic_meter_per_kilogram>(
            1.0 / pressure.value + temperature.value,
        ))
    }

    fn volume_pu(
        &self,
        pressure: Pressure,
        internal_energy: SpecificInternalEnergy,
    ) -> Result<SpecificVolume, PropertyError> {
        self.bounds().check_pressure(pressure)?;
        Ok(SpecificVolume::new::<cubic_meter_per_kilogram>(
            1.0 / pressure.value + internal_energy.value,
        ))
    }

    fn internal_energy_pt(
        &self,
        pressure: Pressure,
        temperature: ThermodynamicTemperature,
    ) -> Result<SpecificInternalEnergy, PropertyError> {
        self.bounds().check_pressure(pressure)?;
        self.bounds().check_temperature(temperature)?;
        Ok(SpecificInternalEnergy::new::<joule_per_kilogram>(
            temperature.value,
        ))
    }

    fn pressure_vu(
        &self,
        volume: SpecificVolume,
        internal_energy: SpecificInternalEnergy,
    ) -> Result<Pressure, PropertyError> {
        let spread = volume.value - internal_energy.value;
        if spread <= 0.0 {
            return Err(PropertyError::Calculation(format!(
                "no pressure matches v = {} with u = {}",
                volume.value, internal_energy.value
            )));
        }
        let pressure = Pressure::new::<pascal>(1.0 / spread);
        self.bounds().check_pressure(pressure)?;
        Ok(pressure)
    }

    fn temperature_pv(
        &self,
        pressure: Pressure,
        volume: SpecificVolume,
    ) -> Result<ThermodynamicTemperature, PropertyError> {
        self.bounds().check_pressure(pressure)?;
        let temperature =
            ThermodynamicTemperature::new::<kelvin>(volume.value - 1.0 / pressure.value);
        self.bounds().check_temperature(temperature)?;
        Ok(temperature)
    }

    fn temperature_pu(
        &self,
        pressure: Pressure,
        internal_energy: SpecificInternalEnergy,
    ) -> Result<ThermodynamicTemperature, PropertyError> {
        self.bounds().check_pressure(pressure)?;
        let temperature = ThermodynamicTemperature::new::<kelvin>(internal_energy.value);
        self.bounds().check_temperature(temperature)?;
        Ok(temperature)
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
        Ok(SpecificEntropy::new::<joule_per_kilogram_kelvin>(
            internal_energy.value - pressure.value.ln(),
        ))
    }

    fn quality_pt(
        &self,
        pressure: Pressure,
        temperature: ThermodynamicTemperature,
    ) -> Result<Option<f64>, PropertyError> {
        match self.phase_pt(pressure, temperature)? {
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
        _internal_energy: SpecificInternalEnergy,
    ) -> Result<Option<f64>, PropertyError> {
        self.bounds().check_pressure(pressure)?;
        Ok(None)
    }

    fn phase_pt(
        &self,
        pressure: Pressure,
        temperature: ThermodynamicTemperature,
    ) -> Result<PhaseRegion, PropertyError> {
        self.bounds().check_pressure(pressure)?;
        self.bounds().check_temperature(temperature)?;
        let (p, t) = (pressure.value, temperature.value);
        if p > PSAT_MAX {
            return Ok(PhaseRegion::SuperheatedVapor);
        }
        let ts = Self::tsat_raw(p);
        Ok(if t < ts {
            PhaseRegion::SubcooledLiquid
        } else if t > ts {
            PhaseRegion::SuperheatedVapor
        } else {
            PhaseRegion::TwoPhase
        })
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
        Ok(SpecificVolume::new::<cubic_meter_per_kilogram>(
            Self::v_liquid_sat(pressure.value),
        ))
    }

    fn saturation_vapor_volume(
        &self,
        pressure: Pressure,
    ) -> Result<SpecificVolume, PropertyError> {
        self.bounds().check_saturation_pressure(pressure)?;
        Ok(SpecificVolume::new::<cubic_meter_per_kilogram>(
            Self::v_vapor_sat(pressure.value),
        ))
    }
}
