use serde::{Deserialize, Serialize};

/// Sampling configuration for surface construction.
///
/// `samples` is the grid resolution per axis; the dome boundary is sampled
/// at twice that count. `density_bias` is the exponent applied to sampling
/// percentiles, concentrating vertices toward the low end of each range.
/// `zoom_bias` is the log base used by the plot projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    pub samples: usize,
    pub density_bias: f64,
    pub zoom_bias: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            samples: 350,
            density_bias: 1.6,
            zoom_bias: 10.0,
        }
    }
}

impl SurfaceConfig {
    /// Validates the configuration before any sampling happens.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field: fewer than two
    /// samples per axis, a density bias outside `(0, 20]`, or a zoom bias
    /// outside `(0, 10]` or equal to 1 (which degenerates the logarithms).
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.samples < 2 {
            return Err("samples must be at least 2");
        }
        if !self.density_bias.is_finite() || self.density_bias <= 0.0 || self.density_bias > 20.0 {
            return Err("density_bias must be in (0, 20]");
        }
        if !self.zoom_bias.is_finite() || self.zoom_bias <= 0.0 || self.zoom_bias > 10.0 {
            return Err("zoom_bias must be in (0, 10]");
        }
        if self.zoom_bias == 1.0 {
            return Err("zoom_bias must not be 1");
        }
        Ok(())
    }

    /// Applies the density bias to a sampling percentile.
    pub(crate) fn biased(&self, percentile: f64) -> f64 {
        percentile.powf(self.density_bias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SurfaceConfig::default().validate().is_ok());
    }

    #[test]
    fn invalid_fields_are_rejected() {
        let base = SurfaceConfig::default();

        assert!(SurfaceConfig { samples: 1, ..base }.validate().is_err());
        assert!(SurfaceConfig {
            density_bias: 0.0,
            ..base
        }
        .validate()
        .is_err());
        assert!(SurfaceConfig {
            density_bias: 25.0,
            ..base
        }
        .validate()
        .is_err());
        assert!(SurfaceConfig {
            zoom_bias: 1.0,
            ..base
        }
        .validate()
        .is_err());
        assert!(SurfaceConfig {
            zoom_bias: f64::NAN,
            ..base
        }
        .validate()
        .is_err());
    }

    #[test]
    fn unit_density_bias_leaves_percentiles_unchanged() {
        let config = SurfaceConfig {
            density_bias: 1.0,
            ..SurfaceConfig::default()
        };
        assert_eq!(config.biased(0.25), 0.25);

        let biased = SurfaceConfig {
            density_bias: 2.0,
            ..SurfaceConfig::default()
        };
        assert_eq!(biased.biased(0.5), 0.25);
    }
}
