//! Physical domain length and coarsest resolution.
//!
//! `L` is the physical length of the longest meshed side. `L_full` is the
//! length of the longest side of the whole domain, which differs from `L`
//! only when a symmetry plane halves the meshed region.

use serde::Serialize;

use super::GridExtent;
use crate::error::ConfigError;
use crate::params::ParamSource;
use crate::utils::validation::ensure_exclusive;
use crate::SPACEDIM;

pub const DEFAULT_LENGTH: f64 = 1.0;

/// Resolved domain length and coarse grid spacing
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DomainLength {
    /// Length of the longest meshed side (`L`)
    pub length: f64,
    /// `L_full` as supplied, if it was
    pub length_full: Option<f64>,
    /// Cell width on the coarsest level
    pub coarsest_dx: f64,
    pub dx: [f64; SPACEDIM],
    /// Location of the first cell center on the coarsest level
    pub origin: [f64; SPACEDIM],
}

/// Convert a full-domain length to the meshed length
pub fn length_from_full(length_full: f64, max_n: usize, max_n_full: usize) -> f64 {
    length_full * max_n as f64 / max_n_full as f64
}

/// Inverse of [`length_from_full`]
pub fn full_from_length(length: f64, max_n: usize, max_n_full: usize) -> f64 {
    length * max_n_full as f64 / max_n as f64
}

pub fn resolve_domain<S>(source: &S, extent: &GridExtent) -> Result<DomainLength, ConfigError>
where
    S: ParamSource + ?Sized,
{
    ensure_exclusive(source, "L", "L_full")?;

    let (length, length_full) = if source.contains("L_full") {
        let length_full: f64 = source.load("L_full")?;
        ensure_positive_length("L_full", length_full)?;
        (
            length_from_full(length_full, extent.max_n(), extent.max_n_full()),
            Some(length_full),
        )
    } else {
        let length = source.load_or("L", DEFAULT_LENGTH)?;
        ensure_positive_length("L", length)?;
        (length, None)
    };

    let coarsest_dx = length / extent.max_n() as f64;

    Ok(DomainLength {
        length,
        length_full,
        coarsest_dx,
        dx: [coarsest_dx; SPACEDIM],
        origin: [coarsest_dx / 2.0; SPACEDIM],
    })
}

fn ensure_positive_length(key: &str, value: f64) -> Result<(), ConfigError> {
    if !(value > 0.0 && value.is_finite()) {
        return Err(ConfigError::InvalidParameter {
            key: key.to_string(),
            reason: format!("domain length must be positive and finite, got {}", value),
        });
    }
    Ok(())
}
