use std::f64::consts::PI;

use uom::si::{
    f64::{Area, Length, Mass},
    length::meter,
    mass::kilogram,
};

/// Fixed geometry of the piston-cylinder vessel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vessel {
    /// Mass of the enclosed water.
    pub mass: Mass,
    /// Radius of the piston face.
    pub radius: Length,
}

impl Vessel {
    /// Area of the piston face.
    #[must_use]
    pub fn piston_area(&self) -> Area {
        self.radius * self.radius * PI
    }
}

impl Default for Vessel {
    /// One kilogram of water under a 5 cm piston.
    fn default() -> Self {
        Self {
            mass: Mass::new::<kilogram>(1.0),
            radius: Length::new::<meter>(0.05),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::area::square_meter;

    #[test]
    fn piston_area_matches_the_default_radius() {
        let vessel = Vessel::default();
        assert_relative_eq!(
            vessel.piston_area().get::<square_meter>(),
            PI * 0.05 * 0.05,
            epsilon = 1e-12
        );
    }
}
