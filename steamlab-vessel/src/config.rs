use serde::{Deserialize, Serialize};

/// Convergence parameters for the engine's coupled property solves.
///
/// Heat addition at constant pressure and pressure changes couple two
/// unknowns through the equation of state, so the engine iterates a
/// fixed-point update until the iterate moves by less than `rel_tol` or the
/// iteration budget runs out, whichever comes first. A budget of 1 reproduces
/// a single substitution pass, which is only a good approximation for small
/// per-tick deltas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationConfig {
    pub max_iters: usize,
    pub rel_tol: f64,
}

impl Default for IterationConfig {
    fn default() -> Self {
        Self {
            max_iters: 32,
            rel_tol: 1e-9,
        }
    }
}

impl IterationConfig {
    /// Validates the iteration budget and tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid field.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.max_iters == 0 {
            return Err("max_iters must be at least 1");
        }
        if !self.rel_tol.is_finite() || self.rel_tol < 0.0 {
            return Err("rel_tol must be finite and non-negative");
        }
        Ok(())
    }

    /// Returns whether a fixed-point iterate has stopped moving.
    pub(crate) fn converged(&self, previous: f64, next: f64) -> bool {
        (next - previous).abs() <= self.rel_tol * next.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(IterationConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_iterations_are_rejected() {
        let config = IterationConfig {
            max_iters: 0,
            ..IterationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let config = IterationConfig {
            rel_tol: -1e-9,
            ..IterationConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
