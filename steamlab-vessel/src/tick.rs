use serde::{Deserialize, Serialize};
use uom::si::{
    acceleration::meter_per_second_squared,
    f64::{Acceleration, Mass, Power, Pressure, Time},
    pressure::pascal,
};

use steamlab_thermo::PropertyProvider;

use crate::{StateError, VesselEngine};

const STANDARD_GRAVITY: f64 = 9.80665;

/// External inputs gathered by the scene adapter for one update tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    /// Net heat rate applied to the vessel (burner positive, coil negative).
    pub heat_rate: Power,
    /// Net mass resting on the piston (a lifting balloon is negative).
    pub piston_weight: Mass,
    /// Wall-clock duration of the tick.
    pub dt: Time,
    /// Whether the insulator is engaged.
    pub insulated: bool,
    /// Whether the clamp pins the piston, fixing the volume.
    pub clamped: bool,
}

/// Tuning for how per-tick inputs translate into state deltas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickConfig {
    /// Fraction of the gap to the target pressure applied per tick.
    ///
    /// Applying the full weight change in one tick produces jumpy movement,
    /// so the pressure eases toward its target instead.
    pub pressure_smoothing: f64,
    /// Pressure on the piston with no applied weight.
    pub ambient_pressure: Pressure,
    /// Dead-band below which a pressure step is skipped.
    pub min_pressure_step: Pressure,
    /// Fraction of applied heat retained without the insulator.
    ///
    /// Not based on a physical material, just a rough stand-in for an
    /// imperfectly insulated container.
    pub uninsulated_heat_fraction: f64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            pressure_smoothing: 0.01,
            ambient_pressure: Pressure::new::<pascal>(101_325.0),
            min_pressure_step: Pressure::new::<pascal>(1.0),
            uninsulated_heat_fraction: 0.1,
        }
    }
}

impl<P: PropertyProvider> VesselEngine<P> {
    /// Applies one tick of scene-adapter input.
    ///
    /// The piston weight sets a target pressure (`ambient + m·g/A`) that the
    /// state eases toward by the smoothing fraction, then the applied heat
    /// lands as constant-volume heating when the clamp is engaged and
    /// constant-pressure heating otherwise. A pressure step attempted inside
    /// the two-phase region is skipped, matching the free piston's undefined
    /// behavior there; the heat still applies.
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] if the provider rejects a step; the state
    /// keeps whatever progress earlier steps committed.
    pub fn tick(&mut self, input: &TickInput, config: &TickConfig) -> Result<(), StateError> {
        if !input.clamped {
            let gravity = Acceleration::new::<meter_per_second_squared>(STANDARD_GRAVITY);
            let target = config.ambient_pressure
                + input.piston_weight * gravity / self.vessel().piston_area();
            let delta = (target - self.state().pressure) * config.pressure_smoothing;
            if delta.abs() > config.min_pressure_step {
                match self.add_pressure(delta, input.insulated) {
                    Ok(()) | Err(StateError::UnsupportedRegion { .. }) => {}
                    Err(err) => return Err(err),
                }
            }
        }

        if input.heat_rate.value != 0.0 {
            let retained = if input.insulated {
                1.0
            } else {
                config.uninsulated_heat_fraction
            };
            let heat = input.heat_rate * input.dt * retained;
            if input.clamped {
                self.add_heat_constant_volume(heat)?;
            } else {
                self.add_heat_constant_pressure(heat)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{mass::kilogram, power::watt, time::second};

    use steamlab_thermo::{model::AnalyticWater, plot::PlotMapper};

    use crate::{IterationConfig, Vessel};

    fn engine() -> VesselEngine<AnalyticWater> {
        let water = AnalyticWater;
        let plot = PlotMapper::new(water.bounds(), 10.0).unwrap();
        VesselEngine::new(water, plot, Vessel::default(), IterationConfig::default()).unwrap()
    }

    fn idle_input() -> TickInput {
        TickInput {
            heat_rate: Power::new::<watt>(0.0),
            piston_weight: Mass::new::<kilogram>(0.0),
            dt: Time::new::<second>(1.0 / 60.0),
            insulated: true,
            clamped: false,
        }
    }

    #[test]
    fn an_unweighted_piston_eases_toward_ambient_pressure() {
        let mut engine = engine();
        let config = TickConfig::default();
        let before = engine.state().pressure;

        engine.tick(&idle_input(), &config).unwrap();
        let after = engine.state().pressure;

        // One percent of the gap toward 1 atm, applied exactly.
        let expected = before + (config.ambient_pressure - before) * config.pressure_smoothing;
        assert_relative_eq!(after.value, expected.value, max_relative = 1e-12);
        assert!(after < before);
    }

    #[test]
    fn clamped_ticks_keep_the_volume_fixed() {
        let mut engine = engine();
        let config = TickConfig::default();
        let before = *engine.state();

        let input = TickInput {
            heat_rate: Power::new::<watt>(60_000.0),
            dt: Time::new::<second>(1.0),
            clamped: true,
            ..idle_input()
        };
        engine.tick(&input, &config).unwrap();
        let after = engine.state();

        assert_eq!(after.specific_volume, before.specific_volume);
        assert_relative_eq!(
            after.internal_energy.value,
            before.internal_energy.value + 60_000.0,
            max_relative = 1e-9
        );
    }

    #[test]
    fn uninsulated_heat_is_mostly_lost_to_the_container() {
        let mut engine = engine();
        let config = TickConfig::default();

        let input = TickInput {
            heat_rate: Power::new::<watt>(1000.0),
            dt: Time::new::<second>(1.0),
            insulated: false,
            clamped: true,
            ..idle_input()
        };
        let before = engine.state().internal_energy;
        engine.tick(&input, &config).unwrap();

        assert_relative_eq!(
            engine.state().internal_energy.value,
            before.value + 1000.0 * config.uninsulated_heat_fraction,
            max_relative = 1e-9
        );
    }
}
