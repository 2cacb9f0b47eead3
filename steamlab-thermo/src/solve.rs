//! Scalar root finding used by property models for backward solves.

use thiserror::Error;

/// Configuration for the bisection solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub max_iters: usize,
    pub x_abs_tol: f64,
    pub x_rel_tol: f64,
    pub residual_tol: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 100,
            x_abs_tol: 1e-12,
            x_rel_tol: 1e-12,
            residual_tol: 1e-12,
        }
    }
}

impl Config {
    /// Validates that all tolerances are finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns an error if any tolerance is negative or non-finite.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.x_abs_tol.is_finite() || self.x_abs_tol < 0.0 {
            return Err("x_abs_tol must be finite and non-negative");
        }
        if !self.x_rel_tol.is_finite() || self.x_rel_tol < 0.0 {
            return Err("x_rel_tol must be finite and non-negative");
        }
        if !self.residual_tol.is_finite() || self.residual_tol < 0.0 {
            return Err("residual_tol must be finite and non-negative");
        }
        Ok(())
    }
}

/// Errors that can occur during bisection solving.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("bracket contains non-finite value: {value}")]
    NonFiniteBracket { value: f64 },

    #[error("no root in bracket: f({left})={left_residual}, f({right})={right_residual}")]
    NoBracket {
        left: f64,
        right: f64,
        left_residual: f64,
        right_residual: f64,
    },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },

    #[error("non-finite residual {residual} at x = {x}")]
    NonFiniteResidual { x: f64, residual: f64 },
}

/// Finds a root of `f` within `bracket` using the bisection method.
///
/// The residual must change sign across the bracket. Convergence is declared
/// when either the bracket width or the midpoint residual falls under the
/// configured tolerances; if the iteration budget runs out first, the best
/// midpoint seen so far is returned.
///
/// # Errors
///
/// Returns an [`Error`] if the bracket is invalid, the config is invalid, or
/// a residual evaluates to a non-finite value.
pub fn bisect(
    f: impl Fn(f64) -> f64,
    bracket: [f64; 2],
    config: &Config,
) -> Result<f64, Error> {
    config
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;

    let (mut left, mut right) = (bracket[0], bracket[1]);
    for value in [left, right] {
        if !value.is_finite() {
            return Err(Error::NonFiniteBracket { value });
        }
    }

    let mut left_residual = f(left);
    if !left_residual.is_finite() {
        return Err(Error::NonFiniteResidual {
            x: left,
            residual: left_residual,
        });
    }
    if left_residual.abs() <= config.residual_tol {
        return Ok(left);
    }

    let right_residual = f(right);
    if !right_residual.is_finite() {
        return Err(Error::NonFiniteResidual {
            x: right,
            residual: right_residual,
        });
    }
    if right_residual.abs() <= config.residual_tol {
        return Ok(right);
    }

    if left_residual.signum() == right_residual.signum() {
        return Err(Error::NoBracket {
            left,
            right,
            left_residual,
            right_residual,
        });
    }

    let (mut best, mut best_residual) = if left_residual.abs() <= right_residual.abs() {
        (left, left_residual)
    } else {
        (right, right_residual)
    };

    for _ in 1..=config.max_iters {
        let mid = 0.5 * (left + right);
        let mid_residual = f(mid);

        if !mid_residual.is_finite() {
            return Err(Error::NonFiniteResidual {
                x: mid,
                residual: mid_residual,
            });
        }

        let x_converged = (right - left).abs() <= config.x_abs_tol + config.x_rel_tol * mid.abs();
        if x_converged || mid_residual.abs() <= config.residual_tol {
            return Ok(mid);
        }

        if mid_residual.abs() < best_residual.abs() {
            best = mid;
            best_residual = mid_residual;
        }

        if left_residual.signum() == mid_residual.signum() {
            left = mid;
            left_residual = mid_residual;
        } else {
            right = mid;
        }
    }

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn finds_a_simple_root() {
        let root = bisect(|x| x * x - 2.0, [0.0, 2.0], &Config::default()).unwrap();
        assert_relative_eq!(root, 2.0_f64.sqrt(), epsilon = 1e-10);
    }

    #[test]
    fn rejects_a_bracket_without_sign_change() {
        let result = bisect(|x| x * x + 1.0, [-1.0, 1.0], &Config::default());
        assert!(matches!(result, Err(Error::NoBracket { .. })));
    }

    #[test]
    fn rejects_invalid_tolerances() {
        let config = Config {
            x_abs_tol: -1.0,
            ..Config::default()
        };
        let result = bisect(|x| x, [-1.0, 1.0], &config);
        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn accepts_a_root_on_the_bracket_edge() {
        let root = bisect(|x| x, [0.0, 1.0], &Config::default()).unwrap();
        assert_relative_eq!(root, 0.0);
    }
}
