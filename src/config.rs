//! # Configuration Builder
//!
//! Runs every resolver in dependency order and assembles one immutable
//! [`GridConfiguration`]:
//!
//! 1. boundary conditions
//! 2. cell counts (need the reflective axes)
//! 3. domain length and coarsest `dx` (need `max_N`, `max_N_full`)
//! 4. center (needs all of the above)
//! 5. scheduling and output parameters, plot variables, box partitioning
//!
//! The first error ends resolution; no partial configuration is returned.
//!
//! ## Example
//!
//! ```rust
//! use gridparams::config::GridConfiguration;
//! use gridparams::params::ParamTable;
//! use gridparams::variables::VariableCatalog;
//!
//! let params = ParamTable::new()
//!     .with("N", 16)
//!     .with("chk_prefix", "chk_")
//!     .with("plot_prefix", "plt_")
//!     .with("regrid_interval", 1);
//!
//! let config = GridConfiguration::build(&params, &VariableCatalog::default())?;
//! assert_eq!(config.coarsest_dx(), 0.0625);
//! assert_eq!(config.ref_ratios(), &[2]);
//! # Ok::<(), gridparams::error::ConfigError>(())
//! ```

use log::info;
use serde::Serialize;

use crate::boundary::{resolve_boundaries, BoundaryConditions};
use crate::error::ConfigError;
use crate::grid::{resolve_center, resolve_domain, resolve_extent, DomainLength, GridExtent};
use crate::params::ParamSource;
use crate::partition::{resolve_partitioning, BoxPartitioning};
use crate::plot::{resolve_plot_vars, PlotVariableSelection};
use crate::utils::validation::ensure_exclusive;
use crate::variables::{VariableCatalog, VariableTable};
use crate::SPACEDIM;

/// Refinement ratio between every pair of consecutive levels.
///
/// This is a fixed constant, not a parameter: `ref_ratios` always holds this
/// value at every level and no key is read for it.
pub const REFINEMENT_RATIO: usize = 2;

/// Fully resolved grid configuration.
///
/// Built once at startup and only read afterwards; there are no setters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridConfiguration {
    verbosity: i32,

    // Grid
    boundaries: BoundaryConditions,
    extent: GridExtent,
    domain: DomainLength,
    center: [f64; SPACEDIM],
    partitioning: BoxPartitioning,

    // Regridding
    regrid_threshold: f64,
    num_ghosts: usize,
    tag_buffer_size: usize,
    fill_ratio: f64,
    max_level: usize,
    ref_ratios: Vec<usize>,
    regrid_interval: Vec<i32>,

    // Time stepping and output
    dt_multiplier: f64,
    stop_time: f64,
    max_steps: usize,
    checkpoint_interval: i32,
    checkpoint_prefix: String,
    plot_interval: i32,
    plot_prefix: String,
    write_plot_ghosts: bool,
    plot_vars: PlotVariableSelection,
    ignore_checkpoint_name_mismatch: bool,
}

impl GridConfiguration {
    /// Resolve a configuration from `source`
    pub fn build<S>(source: &S, catalog: &VariableCatalog) -> Result<Self, ConfigError>
    where
        S: ParamSource + ?Sized,
    {
        // Contradictory keys are rejected before anything is resolved
        ensure_exclusive(source, "N", "N_full")?;
        ensure_exclusive(source, "L", "L_full")?;

        let verbosity = source.load_or("verbosity", 0)?;
        let regrid_threshold = source.load_or("regrid_threshold", 0.5)?;
        let num_ghosts = source.load_or("num_ghosts", 3)?;
        let tag_buffer_size = source.load_or("tag_buffer_size", 3)?;
        let dt_multiplier = source.load_or("dt_multiplier", 0.25)?;
        let fill_ratio = source.load_or("fill_ratio", 0.7)?;

        let boundaries = resolve_boundaries(source, catalog.evolution())?;
        let extent = resolve_extent(source, &boundaries)?;
        let domain = resolve_domain(source, &extent)?;
        let center = resolve_center(source, &boundaries, &extent, &domain)?;

        let ignore_checkpoint_name_mismatch =
            source.load_or("ignore_checkpoint_name_mismatch", false)?;

        let max_level: usize = source.load_or("max_level", 0)?;
        let num_levels = max_level.checked_add(1).ok_or_else(|| ConfigError::InvalidParameter {
            key: "max_level".to_string(),
            reason: format!("{} levels cannot be represented", max_level),
        })?;
        let regrid_interval: Vec<i32> = source.load_array("regrid_interval", 0, num_levels)?;
        let ref_ratios = vec![REFINEMENT_RATIO; regrid_interval.len()];

        let checkpoint_interval = source.load_or("checkpoint_interval", 1)?;
        let checkpoint_prefix = source.load("chk_prefix")?;
        let plot_interval = source.load_or("plot_interval", 0)?;
        let plot_prefix = source.load("plot_prefix")?;
        let stop_time = source.load_or("stop_time", 1.0)?;
        let max_steps = source.load_or("max_steps", 1_000_000)?;
        let write_plot_ghosts = source.load_or("write_plot_ghosts", false)?;

        let plot_vars = resolve_plot_vars(source, catalog)?;
        let partitioning = resolve_partitioning(source)?;

        let config = Self {
            verbosity,
            boundaries,
            extent,
            domain,
            center,
            partitioning,
            regrid_threshold,
            num_ghosts,
            tag_buffer_size,
            fill_ratio,
            max_level,
            ref_ratios,
            regrid_interval,
            dt_multiplier,
            stop_time,
            max_steps,
            checkpoint_interval,
            checkpoint_prefix,
            plot_interval,
            plot_prefix,
            write_plot_ghosts,
            plot_vars,
            ignore_checkpoint_name_mismatch,
        };
        config.log_summary(catalog);
        Ok(config)
    }

    fn log_summary(&self, catalog: &VariableCatalog) {
        info!(
            "Coarsest grid: {} x {} x {} cells, L = {}, dx = {}",
            self.extent.half_counts[0],
            self.extent.half_counts[1],
            self.extent.half_counts[2],
            self.domain.length,
            self.domain.coarsest_dx
        );
        info!(
            "Levels: max_level = {}, regrid_interval = {:?}, boxes {}..{}",
            self.max_level,
            self.regrid_interval,
            self.partitioning.block_factor,
            self.partitioning.max_box_size
        );
        if !self.plot_vars.is_empty() {
            let names: Vec<&str> = self
                .plot_vars
                .iter()
                .filter_map(|variable| catalog.name_of(variable))
                .collect();
            info!("Plot variables: {}", names.join(" "));
        }
        log::debug!(
            "{} evolution variables, {} diagnostic variables known",
            catalog.evolution().len(),
            catalog.diagnostic().len()
        );
    }

    pub fn verbosity(&self) -> i32 {
        self.verbosity
    }

    pub fn boundaries(&self) -> &BoundaryConditions {
        &self.boundaries
    }

    pub fn extent(&self) -> &GridExtent {
        &self.extent
    }

    pub fn domain(&self) -> &DomainLength {
        &self.domain
    }

    /// Length of the longest meshed side
    pub fn length(&self) -> f64 {
        self.domain.length
    }

    pub fn coarsest_dx(&self) -> f64 {
        self.domain.coarsest_dx
    }

    pub fn center(&self) -> [f64; SPACEDIM] {
        self.center
    }

    pub fn partitioning(&self) -> &BoxPartitioning {
        &self.partitioning
    }

    pub fn max_box_size(&self) -> usize {
        self.partitioning.max_box_size
    }

    pub fn block_factor(&self) -> usize {
        self.partitioning.block_factor
    }

    pub fn is_periodic(&self) -> [bool; SPACEDIM] {
        self.boundaries.is_periodic()
    }

    pub fn nonperiodic_boundaries_exist(&self) -> bool {
        self.boundaries.nonperiodic_boundaries_exist
    }

    pub fn symmetric_boundaries_exist(&self) -> bool {
        self.boundaries.symmetric_boundaries_exist
    }

    pub fn regrid_threshold(&self) -> f64 {
        self.regrid_threshold
    }

    pub fn num_ghosts(&self) -> usize {
        self.num_ghosts
    }

    pub fn tag_buffer_size(&self) -> usize {
        self.tag_buffer_size
    }

    pub fn fill_ratio(&self) -> f64 {
        self.fill_ratio
    }

    pub fn max_level(&self) -> usize {
        self.max_level
    }

    /// Always [`REFINEMENT_RATIO`] at every level
    pub fn ref_ratios(&self) -> &[usize] {
        &self.ref_ratios
    }

    pub fn regrid_interval(&self) -> &[i32] {
        &self.regrid_interval
    }

    pub fn dt_multiplier(&self) -> f64 {
        self.dt_multiplier
    }

    pub fn stop_time(&self) -> f64 {
        self.stop_time
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn checkpoint_interval(&self) -> i32 {
        self.checkpoint_interval
    }

    pub fn checkpoint_prefix(&self) -> &str {
        &self.checkpoint_prefix
    }

    pub fn plot_interval(&self) -> i32 {
        self.plot_interval
    }

    pub fn plot_prefix(&self) -> &str {
        &self.plot_prefix
    }

    pub fn write_plot_ghosts(&self) -> bool {
        self.write_plot_ghosts
    }

    pub fn plot_vars(&self) -> &PlotVariableSelection {
        &self.plot_vars
    }

    /// Number of resolved plot variables
    pub fn num_plot_vars(&self) -> usize {
        self.plot_vars.len()
    }

    pub fn ignore_checkpoint_name_mismatch(&self) -> bool {
        self.ignore_checkpoint_name_mismatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryKind;
    use crate::params::{ParamError, ParamTable};

    fn minimal() -> ParamTable {
        ParamTable::new()
            .with("N", 16)
            .with("chk_prefix", "chk_")
            .with("plot_prefix", "plt_")
            .with("regrid_interval", 1)
    }

    #[test]
    fn test_defaults() {
        let config = GridConfiguration::build(&minimal(), &VariableCatalog::default()).unwrap();
        assert_eq!(config.verbosity(), 0);
        assert_eq!(config.regrid_threshold(), 0.5);
        assert_eq!(config.num_ghosts(), 3);
        assert_eq!(config.tag_buffer_size(), 3);
        assert_eq!(config.dt_multiplier(), 0.25);
        assert_eq!(config.fill_ratio(), 0.7);
        assert!(!config.ignore_checkpoint_name_mismatch());
        assert_eq!(config.max_level(), 0);
        assert_eq!(config.checkpoint_interval(), 1);
        assert_eq!(config.plot_interval(), 0);
        assert_eq!(config.stop_time(), 1.0);
        assert_eq!(config.max_steps(), 1_000_000);
        assert!(!config.write_plot_ghosts());
        assert_eq!(config.num_plot_vars(), 0);
        assert_eq!(config.length(), 1.0);
        assert_eq!(config.is_periodic(), [true; SPACEDIM]);
        assert_eq!(config.boundaries().lo_boundary(0), BoundaryKind::Periodic);
        assert_eq!(config.checkpoint_prefix(), "chk_");
        assert_eq!(config.plot_prefix(), "plt_");
    }

    #[test]
    fn test_ref_ratio_is_fixed() {
        let pp = minimal()
            .with("max_level", 3)
            .with_array("regrid_interval", [1, 2, 4, 8])
            .with_array("ref_ratios", [4, 4, 4, 4]);
        let config = GridConfiguration::build(&pp, &VariableCatalog::default()).unwrap();
        assert_eq!(config.ref_ratios(), &[2, 2, 2, 2]);
        assert_eq!(config.regrid_interval(), &[1, 2, 4, 8]);
    }

    #[test]
    fn test_short_regrid_interval_fails() {
        let pp = minimal().with("max_level", 2).with_array("regrid_interval", [1, 1]);
        let err = GridConfiguration::build(&pp, &VariableCatalog::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Param(_)));
    }

    #[test]
    fn test_required_keys() {
        for key in ["chk_prefix", "plot_prefix", "regrid_interval"] {
            let mut pp = ParamTable::new().with("N", 16);
            for other in ["chk_prefix", "plot_prefix", "regrid_interval"] {
                if other != key {
                    pp = pp.with(other, 1);
                }
            }
            assert_eq!(
                GridConfiguration::build(&pp, &VariableCatalog::default()),
                Err(ConfigError::MissingRequiredParameter { key: key.to_string() })
            );
        }
    }

    #[test]
    fn test_length_conflict_checked_first() {
        // boundaries would fail too, but the conflict is reported
        let pp = minimal()
            .with("L", 1.0)
            .with("L_full", 2.0)
            .with_array("isPeriodic", ["false", "true", "true"]);
        assert_eq!(
            GridConfiguration::build(&pp, &VariableCatalog::default()),
            Err(ConfigError::ConflictingParameters {
                first: "L".to_string(),
                second: "L_full".to_string(),
            })
        );
    }

    #[test]
    fn test_max_level_overflow_is_an_error() {
        let pp = minimal().with("max_level", usize::MAX);
        let err = GridConfiguration::build(&pp, &VariableCatalog::default()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { ref key, .. } if key == "max_level"));
    }

    #[test]
    fn test_large_max_level_needs_regrid_intervals() {
        let pp = minimal().with("max_level", 1usize << 40);
        assert_eq!(
            GridConfiguration::build(&pp, &VariableCatalog::default()),
            Err(ConfigError::Param(ParamError::TooFewValues {
                key: "regrid_interval".to_string(),
                expected: (1usize << 40) + 1,
                found: 1,
            }))
        );
    }

    #[test]
    fn test_huge_plot_var_count_is_an_error() {
        let pp = minimal().with("num_plot_vars", usize::MAX);
        let err = GridConfiguration::build(&pp, &VariableCatalog::default()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Param(ParamError::TooManyValues { ref key, .. }) if key == "plot_vars"
        ));
    }
}
