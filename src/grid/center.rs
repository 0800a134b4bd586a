//! Grid center resolution.

use log::info;

use super::{DomainLength, GridExtent};
use crate::boundary::BoundaryConditions;
use crate::error::ConfigError;
use crate::params::ParamSource;
use crate::SPACEDIM;

/// Middle of the meshed region on each axis
pub fn default_center(extent: &GridExtent, dx: f64) -> [f64; SPACEDIM] {
    extent.half_counts.map(|n| 0.5 * n as f64 * dx)
}

/// Snap the center onto a symmetry plane.
///
/// A reflective low side puts the center at 0, otherwise a reflective high
/// side puts it at the top of the meshed region. The low side is checked
/// first. Selected kinds count on periodic axes too.
pub fn apply_reflective_center(
    center: [f64; SPACEDIM],
    boundaries: &BoundaryConditions,
    extent: &GridExtent,
    dx: f64,
) -> [f64; SPACEDIM] {
    let mut snapped = center;
    for axis in 0..SPACEDIM {
        if boundaries.selected_lo(axis).is_reflective() {
            snapped[axis] = 0.0;
        } else if boundaries.selected_hi(axis).is_reflective() {
            snapped[axis] = dx * extent.half_counts[axis] as f64;
        }
    }
    snapped
}

/// Read `center` (computed default) and apply the symmetry overrides
pub fn resolve_center<S>(
    source: &S,
    boundaries: &BoundaryConditions,
    extent: &GridExtent,
    domain: &DomainLength,
) -> Result<[f64; SPACEDIM], ConfigError>
where
    S: ParamSource + ?Sized,
{
    let dx = domain.coarsest_dx;
    let requested = source.load_array_or("center", default_center(extent, dx).to_vec())?;

    let mut center = [0.0; SPACEDIM];
    center.copy_from_slice(&requested);
    let center = apply_reflective_center(center, boundaries, extent, dx);

    info!(
        "Center has been set to: {} {} {}",
        center[0], center[1], center[2]
    );
    Ok(center)
}
