use uom::si::f64::{Pressure, SpecificVolume, ThermodynamicTemperature};

use crate::{
    units::{SpecificEnthalpy, SpecificEntropy, SpecificInternalEnergy},
    DomainBounds, PhaseRegion, PropertyError,
};

/// The equation-of-state seam between the simulation and a property library.
///
/// Given two independent properties, a provider resolves the remaining ones
/// and exposes the saturation boundary functions used to draw the vapor dome.
/// Method names follow the input-pair suffix convention common to flash
/// routines: `_pt` takes (pressure, temperature), `_pu` takes (pressure,
/// internal energy), and so on.
///
/// Implementations must honor their [`DomainBounds`]: any input outside the
/// documented ranges yields [`PropertyError::OutOfDomain`] rather than an
/// extrapolated value. Callers rely on this to keep a previously consistent
/// state untouched when an operation would leave the valid domain.
pub trait PropertyProvider {
    /// Returns the valid domain for this provider.
    fn bounds(&self) -> DomainBounds;

    /// Specific volume from pressure and temperature.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if the inputs are outside the valid domain.
    fn volume_pt(
        &self,
        pressure: Pressure,
        temperature: ThermodynamicTemperature,
    ) -> Result<SpecificVolume, PropertyError>;

    /// Specific volume from pressure and internal energy.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if the inputs are outside the valid domain.
    fn volume_pu(
        &self,
        pressure: Pressure,
        internal_energy: SpecificInternalEnergy,
    ) -> Result<SpecificVolume, PropertyError>;

    /// Specific internal energy from pressure and temperature.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if the inputs are outside the valid domain.
    fn internal_energy_pt(
        &self,
        pressure: Pressure,
        temperature: ThermodynamicTemperature,
    ) -> Result<SpecificInternalEnergy, PropertyError>;

    /// Pressure from specific volume and internal energy.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if no in-domain pressure matches.
    fn pressure_vu(
        &self,
        volume: SpecificVolume,
        internal_energy: SpecificInternalEnergy,
    ) -> Result<Pressure, PropertyError>;

    /// Temperature from pressure and specific volume.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if the inputs are outside the valid domain.
    fn temperature_pv(
        &self,
        pressure: Pressure,
        volume: SpecificVolume,
    ) -> Result<ThermodynamicTemperature, PropertyError>;

    /// Temperature from pressure and internal energy.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if the inputs are outside the valid domain.
    fn temperature_pu(
        &self,
        pressure: Pressure,
        internal_energy: SpecificInternalEnergy,
    ) -> Result<ThermodynamicTemperature, PropertyError>;

    /// Specific enthalpy from pressure and internal energy.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if the inputs are outside the valid domain.
    fn enthalpy_pu(
        &self,
        pressure: Pressure,
        internal_energy: SpecificInternalEnergy,
    ) -> Result<SpecificEnthalpy, PropertyError>;

    /// Specific entropy from pressure and internal energy.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if the inputs are outside the valid domain.
    fn entropy_pu(
        &self,
        pressure: Pressure,
        internal_energy: SpecificInternalEnergy,
    ) -> Result<SpecificEntropy, PropertyError>;

    /// Vapor quality from pressure and temperature.
    ///
    /// Resolves to `None` in the single-phase regions. On the saturation
    /// line itself the pair is not independent and cannot pin a quality.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if the inputs are outside the valid
    /// domain, or [`PropertyError::Undefined`] exactly on the saturation
    /// line.
    fn quality_pt(
        &self,
        pressure: Pressure,
        temperature: ThermodynamicTemperature,
    ) -> Result<Option<f64>, PropertyError>;

    /// Vapor quality from pressure and internal energy.
    ///
    /// Returns `Some` inside the two-phase region, `None` outside it.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if the inputs are outside the valid domain.
    fn quality_pu(
        &self,
        pressure: Pressure,
        internal_energy: SpecificInternalEnergy,
    ) -> Result<Option<f64>, PropertyError>;

    /// Phase region of a (pressure, temperature) state.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if the inputs are outside the valid domain.
    fn phase_pt(
        &self,
        pressure: Pressure,
        temperature: ThermodynamicTemperature,
    ) -> Result<PhaseRegion, PropertyError>;

    /// Saturation temperature at a pressure.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if the pressure is outside the
    /// saturation-pressure range.
    fn saturation_temperature(
        &self,
        pressure: Pressure,
    ) -> Result<ThermodynamicTemperature, PropertyError>;

    /// Specific volume of saturated liquid at a pressure.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if the pressure is outside the
    /// saturation-pressure range.
    fn saturation_liquid_volume(&self, pressure: Pressure)
        -> Result<SpecificVolume, PropertyError>;

    /// Specific volume of saturated vapor at a pressure.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if the pressure is outside the
    /// saturation-pressure range.
    fn saturation_vapor_volume(&self, pressure: Pressure)
        -> Result<SpecificVolume, PropertyError>;
}
