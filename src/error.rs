// src/error.rs
use thiserror::Error;

/// Custom error types for the srk-sde library
#[derive(Debug, Clone, Error)]
pub enum SdeError {
    /// Invalid parameter values
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },

    /// Block structure of an evaluated quantity differs from the state's
    #[error("Shape mismatch in {context}: expected blocks {expected:?}, found {found:?}")]
    ShapeMismatch {
        context: String,
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    /// Failure reported by a user-supplied drift or diffusion function
    #[error("Evaluation of {function} failed: {reason}")]
    EvaluationFailed { function: String, reason: String },

    /// RNG or Brownian path sampling error
    #[error("Random number generation error: {reason}")]
    RandomGenerationError { reason: String },
}

/// Result type alias for srk-sde operations
pub type SdeResult<T> = Result<T, SdeError>;

/// Validation utilities
pub mod validation {
    use super::{SdeError, SdeResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> SdeResult<()> {
        if value <= 0.0 || value.is_nan() {
            Err(SdeError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> SdeResult<()> {
        if !value.is_finite() {
            Err(SdeError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate a step size: strictly positive and finite.
    ///
    /// A zero or negative `dt` means the driver underflowed or went backwards,
    /// so the step is refused before anything is sampled.
    pub fn validate_step_size(dt: f64) -> SdeResult<()> {
        validate_positive("dt", dt)?;
        validate_finite("dt", dt)
    }
}
