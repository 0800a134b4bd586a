//! Parameter validation utilities.
//!
//! Small checks shared by the resolvers: mutually exclusive keys and cell
//! count constraints.

use crate::error::ConfigError;
use crate::params::ParamSource;

/// Fail if both `first` and `second` are present
///
/// # Examples
/// ```
/// use gridparams::params::ParamTable;
/// use gridparams::utils::validation::ensure_exclusive;
///
/// let pp = ParamTable::new().with("N", 16);
/// assert!(ensure_exclusive(&pp, "N", "N_full").is_ok());
///
/// let pp = pp.with("N_full", 32);
/// assert!(ensure_exclusive(&pp, "N", "N_full").is_err());
/// ```
pub fn ensure_exclusive<S>(source: &S, first: &str, second: &str) -> Result<(), ConfigError>
where
    S: ParamSource + ?Sized,
{
    if source.contains(first) && source.contains(second) {
        return Err(ConfigError::ConflictingParameters {
            first: first.to_string(),
            second: second.to_string(),
        });
    }
    Ok(())
}

/// Check that a cell count read from `key` is positive
///
/// # Examples
/// ```
/// use gridparams::utils::validation::ensure_positive_count;
///
/// assert_eq!(ensure_positive_count("N1", 32).unwrap(), 32);
/// assert!(ensure_positive_count("N1", 0).is_err());
/// assert!(ensure_positive_count("N1", -4).is_err());
/// ```
pub fn ensure_positive_count(key: &str, value: i64) -> Result<usize, ConfigError> {
    if value <= 0 {
        return Err(ConfigError::NonPositiveCellCount {
            key: key.to_string(),
            value,
        });
    }
    usize::try_from(value).map_err(|_| ConfigError::InvalidParameter {
        key: key.to_string(),
        reason: format!("cell count {} does not fit in memory indices", value),
    })
}

/// Halve a full-domain count across a symmetry plane
///
/// # Examples
/// ```
/// use gridparams::utils::validation::halve_even_count;
///
/// assert_eq!(halve_even_count("N1_full", 32).unwrap(), 16);
/// assert!(halve_even_count("N1_full", 31).is_err());
/// ```
pub fn halve_even_count(key: &str, full: usize) -> Result<usize, ConfigError> {
    if full % 2 != 0 {
        return Err(ConfigError::OddFullDomainCount {
            key: key.to_string(),
            value: full as i64,
        });
    }
    Ok(full / 2)
}
