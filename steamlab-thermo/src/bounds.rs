use uom::si::{
    f64::{Pressure, SpecificVolume, ThermodynamicTemperature},
    pressure::pascal,
    specific_volume::cubic_meter_per_kilogram,
    thermodynamic_temperature::kelvin,
};

use crate::PropertyError;

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (b - a) * t + a
}

/// The valid domain of a property provider.
///
/// Axis limits are fixed constants of the provider; callers interpolate into
/// them by percentile when picking presets or sampling the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainBounds {
    pub p_min: Pressure,
    pub p_max: Pressure,
    pub t_min: ThermodynamicTemperature,
    pub t_max: ThermodynamicTemperature,
    pub v_min: SpecificVolume,
    pub v_max: SpecificVolume,
    pub psat_min: Pressure,
    pub psat_max: Pressure,
}

impl DomainBounds {
    /// Returns the pressure at a linear percentile of the pressure range.
    #[must_use]
    pub fn pressure_at(&self, fraction: f64) -> Pressure {
        Pressure::new::<pascal>(lerp(
            self.p_min.get::<pascal>(),
            self.p_max.get::<pascal>(),
            fraction,
        ))
    }

    /// Returns the temperature at a linear percentile of the temperature range.
    #[must_use]
    pub fn temperature_at(&self, fraction: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(lerp(
            self.t_min.get::<kelvin>(),
            self.t_max.get::<kelvin>(),
            fraction,
        ))
    }

    /// Returns the specific volume at a linear percentile of the volume range.
    #[must_use]
    pub fn volume_at(&self, fraction: f64) -> SpecificVolume {
        SpecificVolume::new::<cubic_meter_per_kilogram>(lerp(
            self.v_min.get::<cubic_meter_per_kilogram>(),
            self.v_max.get::<cubic_meter_per_kilogram>(),
            fraction,
        ))
    }

    /// Returns the saturation pressure at a linear percentile of the
    /// saturation-pressure range.
    #[must_use]
    pub fn saturation_pressure_at(&self, fraction: f64) -> Pressure {
        Pressure::new::<pascal>(lerp(
            self.psat_min.get::<pascal>(),
            self.psat_max.get::<pascal>(),
            fraction,
        ))
    }

    /// Returns where a specific volume falls within the volume range, as a
    /// linear fraction. Used for piston travel, not for plotting.
    #[must_use]
    pub fn volume_fraction(&self, volume: SpecificVolume) -> f64 {
        let v = volume.get::<cubic_meter_per_kilogram>();
        let min = self.v_min.get::<cubic_meter_per_kilogram>();
        let max = self.v_max.get::<cubic_meter_per_kilogram>();
        (v - min) / (max - min)
    }

    /// Checks that a pressure lies within the pressure range.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::OutOfDomain`] if it does not.
    pub fn check_pressure(&self, pressure: Pressure) -> Result<(), PropertyError> {
        let p = pressure.get::<pascal>();
        let (min, max) = (self.p_min.get::<pascal>(), self.p_max.get::<pascal>());
        if !(min..=max).contains(&p) {
            return Err(PropertyError::OutOfDomain {
                property: "pressure",
                value: p,
                min,
                max,
            });
        }
        Ok(())
    }

    /// Checks that a temperature lies within the temperature range.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::OutOfDomain`] if it does not.
    pub fn check_temperature(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<(), PropertyError> {
        let t = temperature.get::<kelvin>();
        let (min, max) = (self.t_min.get::<kelvin>(), self.t_max.get::<kelvin>());
        if !(min..=max).contains(&t) {
            return Err(PropertyError::OutOfDomain {
                property: "temperature",
                value: t,
                min,
                max,
            });
        }
        Ok(())
    }

    /// Checks that a pressure lies within the saturation-pressure range.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::OutOfDomain`] if it does not.
    pub fn check_saturation_pressure(&self, pressure: Pressure) -> Result<(), PropertyError> {
        let p = pressure.get::<pascal>();
        let (min, max) = (self.psat_min.get::<pascal>(), self.psat_max.get::<pascal>());
        if !(min..=max).contains(&p) {
            return Err(PropertyError::OutOfDomain {
                property: "saturation pressure",
                value: p,
                min,
                max,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn bounds() -> DomainBounds {
        DomainBounds {
            p_min: Pressure::new::<pascal>(1_000.0),
            p_max: Pressure::new::<pascal>(101_000.0),
            t_min: ThermodynamicTemperature::new::<kelvin>(300.0),
            t_max: ThermodynamicTemperature::new::<kelvin>(500.0),
            v_min: SpecificVolume::new::<cubic_meter_per_kilogram>(0.001),
            v_max: SpecificVolume::new::<cubic_meter_per_kilogram>(1.001),
            psat_min: Pressure::new::<pascal>(2_000.0),
            psat_max: Pressure::new::<pascal>(50_000.0),
        }
    }

    #[test]
    fn percentile_interpolation_hits_endpoints_and_midpoint() {
        let b = bounds();

        assert_relative_eq!(b.pressure_at(0.0).get::<pascal>(), 1_000.0);
        assert_relative_eq!(b.pressure_at(1.0).get::<pascal>(), 101_000.0);
        assert_relative_eq!(b.pressure_at(0.5).get::<pascal>(), 51_000.0);
        assert_relative_eq!(b.temperature_at(0.25).get::<kelvin>(), 350.0);
    }

    #[test]
    fn volume_fraction_inverts_volume_at() {
        let b = bounds();
        let v = b.volume_at(0.7);
        assert_relative_eq!(b.volume_fraction(v), 0.7, epsilon = 1e-12);
    }

    #[test]
    fn out_of_domain_pressure_is_rejected() {
        let b = bounds();
        assert!(b.check_pressure(Pressure::new::<pascal>(50_000.0)).is_ok());
        assert!(matches!(
            b.check_pressure(Pressure::new::<pascal>(500.0)),
            Err(PropertyError::OutOfDomain {
                property: "pressure",
                ..
            })
        ));
    }
}
