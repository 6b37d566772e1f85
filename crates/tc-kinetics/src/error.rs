use tc_core::ConfigError;
use tc_gas::GasError;
use thiserror::Error;

pub type KineticsResult<T> = Result<T, KineticsError>;

#[derive(Error, Debug)]
pub enum KineticsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Gas model error: {0}")]
    Gas(#[from] GasError),

    #[error("Not implemented: {what}")]
    NotImplemented { what: &'static str },

    #[error("Temperature mode {mode} requested but the state carries {n_modes} mode(s)")]
    InvalidMode { mode: usize, n_modes: usize },

    #[error("Output buffer holds {found} entries, scheme has {expected} reactions")]
    SizeMismatch { expected: usize, found: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts() {
        let err: KineticsError = ConfigError::missing("A", "Arrhenius").into();
        assert!(matches!(err, KineticsError::Config(_)));
        assert!(err.to_string().contains("`A`"));
    }

    #[test]
    fn invalid_mode_display() {
        let err = KineticsError::InvalidMode { mode: 2, n_modes: 1 };
        assert!(err.to_string().contains("mode 2"));
    }
}
