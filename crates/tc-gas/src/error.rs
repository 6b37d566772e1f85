//! Gas model errors.

use crate::state::GasState;
use tc_core::{ConfigError, CoreError};
use thiserror::Error;

/// Result type for gas model operations.
pub type GasResult<T> = Result<T, GasError>;

/// Errors that can occur while building or updating gas states.
#[derive(Error, Debug)]
pub enum GasError {
    /// Non-physical values (negative density, temperature, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// The gas state does not match the model (wrong sizes, missing modes).
    #[error("Invalid gas state: {what}")]
    InvalidState { what: String },

    /// Newton iteration for the vibro-electronic temperature hit its cap.
    #[error(
        "Vibro-electronic temperature failed to converge after {iterations} iterations \
         (Tve={tve} K, residual={residual} J/kg)"
    )]
    ConvergenceFailure {
        tve: f64,
        residual: f64,
        iterations: usize,
        state: Box<GasState>,
    },

    /// Update path that this model deliberately does not provide.
    #[error("Not implemented: {what}")]
    NotImplemented { what: &'static str },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Numeric error: {0}")]
    Core(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GasError::NonPhysical { what: "density" };
        assert!(err.to_string().contains("density"));

        let err = GasError::ConvergenceFailure {
            tve: 1234.0,
            residual: 5.0,
            iterations: 20,
            state: Box::new(GasState::new(1, 1)),
        };
        let msg = err.to_string();
        assert!(msg.contains("20 iterations"));
        assert!(msg.contains("1234"));
    }

    #[test]
    fn config_error_converts() {
        let err: GasError = ConfigError::missing("species", "gas model").into();
        assert!(matches!(err, GasError::Config(_)));
    }
}
