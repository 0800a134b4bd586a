//! Configuration errors.
//!
//! Every fatal condition found while resolving a grid configuration is
//! reported as a [`ConfigError`] naming the violated constraint and the
//! offending key(s). Resolution stops at the first error.

use crate::params::ParamError;

/// Fatal validation failures raised by the resolvers
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required parameter '{key}'")]
    MissingRequiredParameter { key: String },

    #[error("Conflicting parameters: '{first}' and '{second}' cannot both be set")]
    ConflictingParameters { first: String, second: String },

    #[error("No cell count given: set one of '{key}' or '{key_full}', or a global 'N' or 'N_full'")]
    MissingCellCount { key: String, key_full: String },

    #[error("Cell count '{key}' must be positive, got {value}")]
    NonPositiveCellCount { key: String, value: i64 },

    #[error("Cell count '{key}' = {value} must be even on an axis with a reflective boundary")]
    OddFullDomainCount { key: String, value: i64 },

    #[error("Invalid value for '{key}': {reason}")]
    InvalidParameter { key: String, reason: String },

    #[error(transparent)]
    Param(ParamError),
}

impl From<ParamError> for ConfigError {
    fn from(err: ParamError) -> Self {
        match err {
            ParamError::Missing { key } => ConfigError::MissingRequiredParameter { key },
            other => ConfigError::Param(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_param_maps_to_required() {
        let err: ConfigError = ParamError::Missing { key: "chk_prefix".to_string() }.into();
        assert_eq!(
            err,
            ConfigError::MissingRequiredParameter { key: "chk_prefix".to_string() }
        );
    }

    #[test]
    fn test_messages_name_keys() {
        let err = ConfigError::ConflictingParameters {
            first: "N".to_string(),
            second: "N_full".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Conflicting parameters: 'N' and 'N_full' cannot both be set"
        );

        let err = ConfigError::MissingCellCount {
            key: "N2".to_string(),
            key_full: "N2_full".to_string(),
        };
        assert!(err.to_string().contains("'N2' or 'N2_full'"));
    }
}
