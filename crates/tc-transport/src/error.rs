use tc_core::ConfigError;
use tc_gas::GasError;
use thiserror::Error;

pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Gas model error: {0}")]
    Gas(#[from] GasError),

    #[error("Species {species} has no transport data")]
    MissingTransport { species: String },

    #[error("Gas state has {found} species, mixing rule expects {expected}")]
    SizeMismatch { expected: usize, found: usize },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
