use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Index out of bounds: {what} (index={index}, len={len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while reading configuration. Always fatal at load time.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field `{field}` in {context}")]
    MissingField { field: String, context: String },

    #[error("Field `{field}` in {context} has the wrong type (expected {expected})")]
    WrongType {
        field: String,
        context: String,
        expected: &'static str,
    },

    #[error("Unknown {field} `{value}` in {context}")]
    UnknownDiscriminator {
        field: String,
        value: String,
        context: String,
    },

    #[error("Invalid value for `{field}` in {context}: {reason}")]
    InvalidValue {
        field: String,
        context: String,
        reason: String,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    pub fn missing(field: &str, context: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
            context: context.to_string(),
        }
    }

    pub fn invalid(field: &str, context: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            context: context.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::missing("A", "Arrhenius");
        let msg = err.to_string();
        assert!(msg.contains("`A`"));
        assert!(msg.contains("Arrhenius"));

        let err = ConfigError::invalid("T1", "Troe", "must be positive");
        assert!(err.to_string().contains("must be positive"));
    }
}
