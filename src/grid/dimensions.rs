//! Grid dimension resolution.
//!
//! Cell counts can be given four ways: a global half-domain count `N`, a
//! global full-domain count `N_full`, or per axis as `N1`/`N1_full` etc. At
//! most one global form may be used, and a global form excludes every
//! per-axis key. Without a global form each axis needs exactly one of its two
//! keys.
//!
//! The half-domain count is what the AMR engine meshes. On an axis with a
//! reflective boundary selected it covers half of the physical domain, so a
//! full count is halved there and must be even. The selection counts even on
//! an axis flagged periodic.

use serde::Serialize;

use crate::boundary::BoundaryConditions;
use crate::error::ConfigError;
use crate::params::ParamSource;
use crate::utils::validation::{ensure_exclusive, ensure_positive_count, halve_even_count};
use crate::SPACEDIM;

/// Resolved cell counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridExtent {
    /// Cells meshed along each axis
    pub half_counts: [usize; SPACEDIM],
    /// Cells across the whole physical domain along each axis
    pub full_counts: [usize; SPACEDIM],
    pub nonperiodic_boundaries_exist: bool,
    pub symmetric_boundaries_exist: bool,
}

impl GridExtent {
    /// Largest half-domain count (`max_N`)
    pub fn max_n(&self) -> usize {
        self.half_counts.iter().copied().max().unwrap_or(0)
    }

    /// Largest full-domain count (`max_N_full`)
    pub fn max_n_full(&self) -> usize {
        self.full_counts.iter().copied().max().unwrap_or(0)
    }

    /// Index of the last coarse cell along each axis
    pub fn top_corner(&self) -> [usize; SPACEDIM] {
        self.half_counts.map(|n| n - 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CountForm {
    Half,
    Full,
}

/// A count as read from the parameter source, before the symmetry rule
#[derive(Debug, Clone, PartialEq, Eq)]
struct SuppliedCount {
    key: String,
    value: i64,
    form: CountForm,
}

/// Resolve the per-axis cell counts
pub fn resolve_extent<S>(source: &S, boundaries: &BoundaryConditions) -> Result<GridExtent, ConfigError>
where
    S: ParamSource + ?Sized,
{
    let global = global_count(source)?;

    let mut half_counts = [0; SPACEDIM];
    let mut full_counts = [0; SPACEDIM];
    for axis in 0..SPACEDIM {
        let supplied = axis_count(source, axis, global.as_ref())?;
        let (half, full) = apply_symmetry(&supplied, boundaries.axis(axis).selects_reflective())?;
        log::debug!(
            "Axis {}: {} = {} -> {} cells meshed, {} across the domain",
            axis,
            supplied.key,
            supplied.value,
            half,
            full
        );
        half_counts[axis] = half;
        full_counts[axis] = full;
    }

    Ok(GridExtent {
        half_counts,
        full_counts,
        nonperiodic_boundaries_exist: boundaries.nonperiodic_boundaries_exist,
        symmetric_boundaries_exist: boundaries.symmetric_boundaries_exist,
    })
}

fn global_count<S>(source: &S) -> Result<Option<SuppliedCount>, ConfigError>
where
    S: ParamSource + ?Sized,
{
    ensure_exclusive(source, "N", "N_full")?;

    let supplied = if source.contains("N_full") {
        Some(read_count(source, "N_full", CountForm::Full)?)
    } else if source.contains("N") {
        Some(read_count(source, "N", CountForm::Half)?)
    } else {
        None
    };
    Ok(supplied)
}

fn axis_count<S>(
    source: &S,
    axis: usize,
    global: Option<&SuppliedCount>,
) -> Result<SuppliedCount, ConfigError>
where
    S: ParamSource + ?Sized,
{
    let name = format!("N{}", axis + 1);
    let name_full = format!("N{}_full", axis + 1);

    if let Some(global) = global {
        for key in [&name, &name_full] {
            if source.contains(key) {
                return Err(ConfigError::ConflictingParameters {
                    first: global.key.clone(),
                    second: key.clone(),
                });
            }
        }
        return Ok(global.clone());
    }

    match (source.contains(&name), source.contains(&name_full)) {
        (true, true) => Err(ConfigError::ConflictingParameters {
            first: name,
            second: name_full,
        }),
        (false, true) => read_count(source, &name_full, CountForm::Full),
        (true, false) => read_count(source, &name, CountForm::Half),
        (false, false) => Err(ConfigError::MissingCellCount {
            key: name,
            key_full: name_full,
        }),
    }
}

fn read_count<S>(source: &S, key: &str, form: CountForm) -> Result<SuppliedCount, ConfigError>
where
    S: ParamSource + ?Sized,
{
    Ok(SuppliedCount {
        key: key.to_string(),
        value: source.load(key)?,
        form,
    })
}

/// Returns `(half, full)` for one axis
fn apply_symmetry(supplied: &SuppliedCount, reflective: bool) -> Result<(usize, usize), ConfigError> {
    let count = ensure_positive_count(&supplied.key, supplied.value)?;
    let half = match supplied.form {
        CountForm::Half => count,
        CountForm::Full if reflective => halve_even_count(&supplied.key, count)?,
        CountForm::Full => count,
    };
    let full = if reflective { 2 * half } else { half };
    Ok((half, full))
}
