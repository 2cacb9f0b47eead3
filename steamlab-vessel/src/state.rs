use uom::si::f64::{Pressure, SpecificVolume, ThermodynamicTemperature};

use steamlab_thermo::{
    units::{SpecificEnthalpy, SpecificEntropy, SpecificInternalEnergy},
    PhaseRegion,
};

/// The thermodynamic state of the water mass in the vessel.
///
/// After any engine operation completes, all fields are mutually consistent
/// under the property provider: re-deriving any one of them from two others
/// reproduces the stored value within solver tolerance. The state is owned
/// exclusively by the engine and mutated only through its delta operations;
/// reads receive snapshots of a fully committed state, never a partial
/// update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermodynamicState {
    pub pressure: Pressure,
    pub temperature: ThermodynamicTemperature,
    pub specific_volume: SpecificVolume,
    pub internal_energy: SpecificInternalEnergy,
    pub enthalpy: SpecificEnthalpy,
    pub entropy: SpecificEntropy,
    /// Vapor mass fraction, defined only inside the two-phase region.
    pub quality: Option<f64>,
    pub region: PhaseRegion,
}
