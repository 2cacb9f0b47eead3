//! Projection of physical states into normalized plot space.

use glam::Vec3;
use thiserror::Error;
use uom::si::{
    f64::{Pressure, SpecificVolume, ThermodynamicTemperature},
    pressure::pascal,
    specific_volume::cubic_meter_per_kilogram,
    thermodynamic_temperature::kelvin,
};

use crate::DomainBounds;

/// A position in normalized plot space.
///
/// Axes are `x` = volume, `y` = pressure, `z` = temperature, each a
/// logarithmic interpolation fraction in `[0, 1]` over the provider's domain.
pub type PlotPoint = Vec3;

/// Errors that can occur when constructing a [`PlotMapper`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PlotConfigError {
    /// The log base must be positive, finite, and not 1.
    #[error("zoom bias must be positive, finite, and not 1 (got {0})")]
    InvalidZoomBias(f64),
}

/// Maps physical (pressure, volume, temperature) triples onto `[0, 1]³`.
///
/// Each axis is interpolated logarithmically between its domain limits using
/// a configurable log base (the "zoom bias"). The mapper is pure and
/// stateless once constructed.
///
/// Inputs are expected to be positive and within the domain limits; values
/// outside them are projected outside `[0, 1]` without clamping. This is a
/// documented precondition rather than a runtime check, since the per-axis
/// limits are fixed constants of the provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotMapper {
    bounds: DomainBounds,
    zoom_bias: f64,
}

impl PlotMapper {
    /// Creates a mapper over the given domain with the given log base.
    ///
    /// # Errors
    ///
    /// Returns [`PlotConfigError::InvalidZoomBias`] for a non-positive,
    /// non-finite, or unit log base.
    pub fn new(bounds: DomainBounds, zoom_bias: f64) -> Result<Self, PlotConfigError> {
        if !zoom_bias.is_finite() || zoom_bias <= 0.0 || zoom_bias == 1.0 {
            return Err(PlotConfigError::InvalidZoomBias(zoom_bias));
        }
        Ok(Self { bounds, zoom_bias })
    }

    /// Returns the domain this mapper projects from.
    #[must_use]
    pub fn bounds(&self) -> DomainBounds {
        self.bounds
    }

    /// Computes the logarithmic interpolation fraction of `value` in
    /// `[min, max]`.
    #[must_use]
    pub fn plot_dimension(&self, min: f64, max: f64, value: f64) -> f32 {
        let lval = value.log(self.zoom_bias);
        let lmin = min.log(self.zoom_bias);
        let lmax = max.log(self.zoom_bias);
        ((lval - lmin) / (lmax - lmin)) as f32
    }

    /// Projects a physical state onto normalized plot space.
    #[must_use]
    pub fn plot(
        &self,
        pressure: Pressure,
        volume: SpecificVolume,
        temperature: ThermodynamicTemperature,
    ) -> PlotPoint {
        let b = &self.bounds;
        let p = self.plot_dimension(
            b.p_min.get::<pascal>(),
            b.p_max.get::<pascal>(),
            pressure.get::<pascal>(),
        );
        let v = self.plot_dimension(
            b.v_min.get::<cubic_meter_per_kilogram>(),
            b.v_max.get::<cubic_meter_per_kilogram>(),
            volume.get::<cubic_meter_per_kilogram>(),
        );
        let t = self.plot_dimension(
            b.t_min.get::<kelvin>(),
            b.t_max.get::<kelvin>(),
            temperature.get::<kelvin>(),
        );
        Vec3::new(v, p, t)
    }
}
