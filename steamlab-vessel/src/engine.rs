use uom::si::f64::{Energy, Pressure};

use steamlab_thermo::{
    plot::{PlotMapper, PlotPoint},
    PhaseRegion, PropertyProvider,
};

use crate::{IterationConfig, StateError, ThermodynamicState, Vessel};

/// Pressure preset used when establishing the initial state.
const INITIAL_PRESSURE_FRACTION: f64 = 0.1;
/// Temperature preset used when establishing the initial state.
const INITIAL_TEMPERATURE_FRACTION: f64 = 0.9;

/// The property state engine for the piston-cylinder vessel.
///
/// Owns one [`ThermodynamicState`] and evolves it through delta operations.
/// The property provider and plot mapper are injected at construction; the
/// engine performs no global lookups. All operations are synchronous and
/// assume a single writer — the caller serializes delta calls.
///
/// Every operation resolves the complete candidate state before touching the
/// stored one, so any provider failure (for example a delta that would leave
/// the valid domain) preserves the previous state in full.
pub struct VesselEngine<P> {
    provider: P,
    plot: PlotMapper,
    vessel: Vessel,
    config: IterationConfig,
    state: ThermodynamicState,
}

impl<P: PropertyProvider> VesselEngine<P> {
    /// Creates an engine initialized at the standard presets: 10 % of the
    /// pressure range and 90 % of the temperature range.
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] if the config is invalid or the provider
    /// cannot resolve the initial state.
    pub fn new(
        provider: P,
        plot: PlotMapper,
        vessel: Vessel,
        config: IterationConfig,
    ) -> Result<Self, StateError> {
        Self::with_initial_fractions(
            provider,
            plot,
            vessel,
            config,
            INITIAL_PRESSURE_FRACTION,
            INITIAL_TEMPERATURE_FRACTION,
        )
    }

    /// Creates an engine initialized at the given pressure and temperature
    /// percentiles of the provider's domain.
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] if the config is invalid or the provider
    /// cannot resolve the initial state.
    pub fn with_initial_fractions(
        provider: P,
        plot: PlotMapper,
        vessel: Vessel,
        config: IterationConfig,
        pressure_fraction: f64,
        temperature_fraction: f64,
    ) -> Result<Self, StateError> {
        config
            .validate()
            .map_err(|reason| StateError::Config { reason })?;
        let state = Self::state_at(&provider, pressure_fraction, temperature_fraction)?;
        Ok(Self {
            provider,
            plot,
            vessel,
            config,
            state,
        })
    }

    /// Re-establishes the state at the given percentiles, discarding the
    /// current one.
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] if the provider cannot resolve the requested
    /// state; the current state is kept in that case.
    pub fn reinitialize(
        &mut self,
        pressure_fraction: f64,
        temperature_fraction: f64,
    ) -> Result<(), StateError> {
        self.state = Self::state_at(&self.provider, pressure_fraction, temperature_fraction)?;
        Ok(())
    }

    fn state_at(
        provider: &P,
        pressure_fraction: f64,
        temperature_fraction: f64,
    ) -> Result<ThermodynamicState, StateError> {
        let bounds = provider.bounds();
        let pressure = bounds.pressure_at(pressure_fraction);
        let temperature = bounds.temperature_at(temperature_fraction);

        let specific_volume = provider.volume_pt(pressure, temperature)?;
        let internal_energy = provider.internal_energy_pt(pressure, temperature)?;
        let enthalpy = provider.enthalpy_pu(pressure, internal_energy)?;
        let entropy = provider.entropy_pu(pressure, internal_energy)?;
        let quality = provider.quality_pt(pressure, temperature)?;
        let region = provider.phase_pt(pressure, temperature)?;

        Ok(ThermodynamicState {
            pressure,
            temperature,
            specific_volume,
            internal_energy,
            enthalpy,
            entropy,
            quality,
            region,
        })
    }

    /// Read-only snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> &ThermodynamicState {
        &self.state
    }

    /// The current state's position in normalized plot space.
    #[must_use]
    pub fn plot_point(&self) -> PlotPoint {
        self.plot.plot(
            self.state.pressure,
            self.state.specific_volume,
            self.state.temperature,
        )
    }

    /// Piston travel as a linear fraction of the volume range.
    #[must_use]
    pub fn piston_height_fraction(&self) -> f64 {
        self.provider
            .bounds()
            .volume_fraction(self.state.specific_volume)
    }

    /// The vessel geometry this engine was built with.
    #[must_use]
    pub fn vessel(&self) -> Vessel {
        self.vessel
    }

    /// Adds heat while the piston holds pressure constant.
    ///
    /// The new volume and internal energy satisfy both the equation of state
    /// and the first-law balance `u' = u + Q/m − p·(v' − v)`, found by
    /// fixed-point iteration on the volume within the configured budget.
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] and leaves the state unchanged if the
    /// provider rejects any intermediate state.
    pub fn add_heat_constant_pressure(&mut self, heat: Energy) -> Result<(), StateError> {
        let s = self.state;
        let pressure = s.pressure;
        let du = heat / self.vessel.mass;

        let mut new_v = s.specific_volume;
        let mut new_u = s.internal_energy;
        for _ in 0..self.config.max_iters {
            let prev_v = new_v;
            new_v = self.provider.volume_pu(pressure, new_u)?;
            new_u = s.internal_energy + du - pressure * (new_v - s.specific_volume);
            if self.config.converged(prev_v.value, new_v.value) {
                break;
            }
        }

        let temperature = self.provider.temperature_pv(pressure, new_v)?;
        let enthalpy = self.provider.enthalpy_pu(pressure, new_u)?;
        let entropy = self.provider.entropy_pu(pressure, new_u)?;
        let quality = self.provider.quality_pu(pressure, new_u)?;
        let region = if quality.is_some() {
            PhaseRegion::TwoPhase
        } else {
            self.provider.phase_pt(pressure, temperature)?
        };

        self.state = ThermodynamicState {
            pressure,
            temperature,
            specific_volume: new_v,
            internal_energy: new_u,
            enthalpy,
            entropy,
            quality,
            region,
        };
        Ok(())
    }

    /// Adds heat while a clamp holds the volume constant.
    ///
    /// With no boundary work the internal energy updates additively; the
    /// remaining properties re-derive from (volume, internal energy).
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] and leaves the state unchanged if the
    /// provider rejects any intermediate state.
    pub fn add_heat_constant_volume(&mut self, heat: Energy) -> Result<(), StateError> {
        let s = self.state;
        let new_u = s.internal_energy + heat / self.vessel.mass;

        let pressure = self.provider.pressure_vu(s.specific_volume, new_u)?;
        let temperature = self.provider.temperature_pv(pressure, s.specific_volume)?;
        let enthalpy = self.provider.enthalpy_pu(pressure, new_u)?;
        let entropy = self.provider.entropy_pu(pressure, new_u)?;
        let quality = self.provider.quality_pu(pressure, new_u)?;
        let region = if quality.is_some() {
            PhaseRegion::TwoPhase
        } else {
            self.provider.phase_pt(pressure, temperature)?
        };

        self.state = ThermodynamicState {
            pressure,
            temperature,
            specific_volume: s.specific_volume,
            internal_energy: new_u,
            enthalpy,
            entropy,
            quality,
            region,
        };
        Ok(())
    }

    /// Changes the external pressure on the piston.
    ///
    /// Behavior depends on the current phase region. Subcooled liquid is
    /// nearly incompressible, so temperature and internal energy are solved
    /// jointly at the new pressure. Superheated vapor keeps its internal
    /// energy when insulated; otherwise the energy drops by the compression
    /// work `p·(v − v')` while the volume re-solves from the new pressure.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::UnsupportedRegion`] in the two-phase region and
    /// a [`StateError`] for any provider rejection; the state is unchanged
    /// in both cases.
    pub fn add_pressure(
        &mut self,
        delta_pressure: Pressure,
        insulated: bool,
    ) -> Result<(), StateError> {
        let s = self.state;
        match s.region {
            PhaseRegion::SubcooledLiquid => {
                let pressure = s.pressure + delta_pressure;
                let mut new_t = s.temperature;
                let mut new_u = s.internal_energy;
                for _ in 0..self.config.max_iters {
                    let prev_u = new_u;
                    new_t = self.provider.temperature_pu(pressure, new_u)?;
                    new_u = self.provider.internal_energy_pt(pressure, new_t)?;
                    if self.config.converged(prev_u.value, new_u.value) {
                        break;
                    }
                }

                let specific_volume = self.provider.volume_pt(pressure, new_t)?;
                let enthalpy = self.provider.enthalpy_pu(pressure, new_u)?;
                let entropy = self.provider.entropy_pu(pressure, new_u)?;
                let quality = self.provider.quality_pu(pressure, new_u)?;
                let region = if quality.is_some() {
                    PhaseRegion::TwoPhase
                } else {
                    self.provider.phase_pt(pressure, new_t)?
                };

                self.state = ThermodynamicState {
                    pressure,
                    temperature: new_t,
                    specific_volume,
                    internal_energy: new_u,
                    enthalpy,
                    entropy,
                    quality,
                    region,
                };
                Ok(())
            }
            PhaseRegion::TwoPhase => Err(StateError::UnsupportedRegion { region: s.region }),
            PhaseRegion::SuperheatedVapor => {
                let pressure = s.pressure + delta_pressure;
                let (new_u, new_v) = if insulated {
                    // Adiabatic branch: no boundary work is accounted here.
                    let new_u = s.internal_energy;
                    (new_u, self.provider.volume_pu(pressure, new_u)?)
                } else {
                    let mut new_v = s.specific_volume;
                    let mut new_u = s.internal_energy;
                    for _ in 0..self.config.max_iters {
                        let prev_v = new_v;
                        new_u = s.internal_energy - s.pressure * (s.specific_volume - new_v);
                        new_v = self.provider.volume_pu(pressure, new_u)?;
                        if self.config.converged(prev_v.value, new_v.value) {
                            break;
                        }
                    }
                    (new_u, new_v)
                };

                let temperature = self.provider.temperature_pu(pressure, new_u)?;
                let enthalpy = self.provider.enthalpy_pu(pressure, new_u)?;
                let entropy = self.provider.entropy_pu(pressure, new_u)?;
                let quality = self.provider.quality_pu(pressure, new_u)?;
                let region = if quality.is_some() {
                    PhaseRegion::TwoPhase
                } else {
                    self.provider.phase_pt(pressure, temperature)?
                };

                self.state = ThermodynamicState {
                    pressure,
                    temperature,
                    specific_volume: new_v,
                    internal_energy: new_u,
                    enthalpy,
                    entropy,
                    quality,
                    region,
                };
                Ok(())
            }
        }
    }
}
