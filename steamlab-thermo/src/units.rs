//! Quantity aliases and small unit helpers shared across the workspace.

use uom::{
    si::{
        f64::{TemperatureInterval, ThermodynamicTemperature},
        temperature_interval::kelvin as delta_kelvin,
        thermodynamic_temperature::kelvin as abs_kelvin,
        Quantity, ISQ, SI,
    },
    typenum::{N1, N2, P2, Z0},
};

/// Specific internal energy, J/kg in SI.
pub type SpecificInternalEnergy = Quantity<ISQ<P2, Z0, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Specific enthalpy, J/kg in SI.
pub type SpecificEnthalpy = Quantity<ISQ<P2, Z0, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Specific entropy, J/kg·K in SI.
pub type SpecificEntropy = Quantity<ISQ<P2, Z0, N2, Z0, N1, Z0, Z0>, SI<f64>, f64>;

/// Extension method for computing a temperature difference.
///
/// A `TemperatureInterval` (a temperature change) is a distinct quantity from
/// a `ThermodynamicTemperature` (an absolute temperature), and `uom` does not
/// provide subtraction between two absolute temperatures. This method fills
/// the gap in a unit-safe way.
pub trait TemperatureOps {
    /// Returns the signed difference `self - other` as an interval.
    fn minus(self, other: Self) -> TemperatureInterval;
}

impl TemperatureOps for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }
}
