//! # Boundary Condition Resolver
//!
//! Turns the periodicity flags and the per-axis boundary kind selections into
//! a fully populated [`BoundaryConditions`].
//!
//! Resolution runs in two phases:
//!
//! 1. **Defaults**: every axis periodic, every variable even with a zero
//!    asymptotic value.
//! 2. **Overrides**: each axis is applied in order. A periodic axis only
//!    records the kinds selected for it. On a non-periodic axis a reflective
//!    side requires `vars_parity`, a Sommerfeld side requires
//!    `vars_asymptotic_values`. Neither array has a default, so the user has
//!    to state them whenever those kinds are selected.

pub mod types;

pub use types::{AxisBoundary, BoundaryConditions, BoundaryKind, Parity};

use log::info;

use crate::error::ConfigError;
use crate::params::ParamSource;
use crate::variables::VariableTable;
use crate::SPACEDIM;

/// Resolve boundary conditions for the evolution variables in `evolution`
pub fn resolve_boundaries<S, V>(source: &S, evolution: &V) -> Result<BoundaryConditions, ConfigError>
where
    S: ParamSource + ?Sized,
    V: VariableTable + ?Sized,
{
    let num_vars = evolution.len();
    let is_periodic: Vec<bool> = source.load_array_or("isPeriodic", vec![true; SPACEDIM])?;

    // Kinds must be stated explicitly once any axis is non-periodic
    let any_nonperiodic = is_periodic.iter().any(|periodic| !periodic);
    let (lo_codes, hi_codes): (Vec<i32>, Vec<i32>) = if any_nonperiodic {
        (
            source.load_array("lo_boundary", 0, SPACEDIM)?,
            source.load_array("hi_boundary", 0, SPACEDIM)?,
        )
    } else {
        let static_bc = vec![BoundaryKind::STATIC_CODE; SPACEDIM];
        (
            source.load_array_or("lo_boundary", static_bc.clone())?,
            source.load_array_or("hi_boundary", static_bc)?,
        )
    };

    let conditions = (0..SPACEDIM).try_fold(
        BoundaryConditions::all_periodic(num_vars),
        |conditions, axis| {
            let lo = BoundaryKind::from_code(lo_codes[axis]);
            let hi = BoundaryKind::from_code(hi_codes[axis]);
            if is_periodic[axis] {
                Ok(record_periodic_selection(conditions, axis, lo, hi))
            } else {
                apply_nonperiodic_axis(conditions, axis, AxisBoundary::non_periodic(lo, hi), source)
            }
        },
    )?;

    if conditions.nonperiodic_boundaries_exist {
        write_boundary_conditions(&conditions, evolution);
    }

    Ok(conditions)
}

/// Keep the kinds selected for a periodic axis; nothing else changes
fn record_periodic_selection(
    conditions: BoundaryConditions,
    axis: usize,
    lo: BoundaryKind,
    hi: BoundaryKind,
) -> BoundaryConditions {
    let mut axes = conditions.axes;
    axes[axis] = AxisBoundary::periodic_selecting(lo, hi);
    BoundaryConditions { axes, ..conditions }
}

/// Apply the override rules for one non-periodic axis
fn apply_nonperiodic_axis<S>(
    conditions: BoundaryConditions,
    axis: usize,
    selection: AxisBoundary,
    source: &S,
) -> Result<BoundaryConditions, ConfigError>
where
    S: ParamSource + ?Sized,
{
    let num_vars = conditions.vars_parity.len();
    let mut axes = conditions.axes;
    axes[axis] = selection;

    let (vars_parity, symmetric_boundaries_exist) = if selection.has_reflective() {
        (load_parities(source, num_vars)?, true)
    } else {
        (conditions.vars_parity, conditions.symmetric_boundaries_exist)
    };

    let vars_asymptotic_values = if selection.has_asymptotic() {
        source.load_array("vars_asymptotic_values", 0, num_vars)?
    } else {
        conditions.vars_asymptotic_values
    };

    Ok(BoundaryConditions {
        axes,
        vars_parity,
        vars_asymptotic_values,
        nonperiodic_boundaries_exist: true,
        symmetric_boundaries_exist,
    })
}

fn load_parities<S>(source: &S, num_vars: usize) -> Result<Vec<Parity>, ConfigError>
where
    S: ParamSource + ?Sized,
{
    let codes: Vec<i32> = source.load_array("vars_parity", 0, num_vars)?;
    codes
        .into_iter()
        .enumerate()
        .map(|(index, code)| {
            Parity::from_code(code).ok_or_else(|| ConfigError::InvalidParameter {
                key: "vars_parity".to_string(),
                reason: format!(
                    "entry {} is {}, expected {} (even) or {} (odd)",
                    index,
                    code,
                    Parity::EVEN_CODE,
                    Parity::ODD_CODE
                ),
            })
        })
        .collect()
}

/// Log the non-periodic boundary setup
pub fn write_boundary_conditions<V>(conditions: &BoundaryConditions, evolution: &V)
where
    V: VariableTable + ?Sized,
{
    info!("Boundary conditions:");
    for (axis, boundary) in conditions.axes.iter().enumerate() {
        if boundary.periodic {
            info!("  direction {}: periodic", axis);
        } else {
            info!(
                "  direction {}: lo = {}, hi = {}",
                axis,
                describe_kind(boundary.lo),
                describe_kind(boundary.hi)
            );
        }
    }

    if conditions.symmetric_boundaries_exist {
        info!("  Variable parities under reflection:");
        for (index, parity) in conditions.vars_parity.iter().enumerate() {
            info!("    {} : {:?}", evolution.name(index).unwrap_or("?"), parity);
        }
    }

    if conditions.axes.iter().any(AxisBoundary::has_asymptotic) {
        info!("  Asymptotic values:");
        for (index, value) in conditions.vars_asymptotic_values.iter().enumerate() {
            info!("    {} : {}", evolution.name(index).unwrap_or("?"), value);
        }
    }
}

fn describe_kind(kind: BoundaryKind) -> String {
    match kind {
        BoundaryKind::Other(code) => format!("other ({})", code),
        known => known.as_str().to_string(),
    }
}
