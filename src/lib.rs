//! # GridParams - Grid configuration derivation for block-structured AMR simulations
//!
//! This library turns a flat set of user-supplied key/value parameters into
//! one consistent, fully populated grid configuration for an adaptive mesh
//! refinement run: cell counts, physical extent, boundary conditions, center
//! point, plot variable selection and box partitioning limits.
//!
//! ## Overview
//!
//! The inputs are deliberately redundant. A cell count may be given for the
//! whole domain or per axis, and for the full domain or for the half left
//! over by a symmetry plane. Several quantities only become required once a
//! particular boundary kind is selected. Every contradictory or missing
//! combination is rejected here, at startup, with an error naming the
//! offending keys.
//!
//! ## Architecture
//!
//! Resolvers run as a strict sequential pipeline, leaves first:
//!
//! - `params`: parameter source trait, in-memory table, `params.txt` and YAML readers
//! - `boundary`: periodicity, boundary kinds, parities and asymptotic values
//! - `grid`: cell counts, domain length, coarsest `dx` and center
//! - `variables`: evolution and diagnostic name tables
//! - `plot`: plot variable selection
//! - `partition`: maximum and minimum box sizes
//! - `config`: the builder and the immutable [`GridConfiguration`]
//! - `config_loader`: file loading and output of resolved configurations
//! - `utils`: shared validation helpers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gridparams::config_loader;
//! use gridparams::variables::VariableCatalog;
//! use std::path::Path;
//!
//! let catalog = VariableCatalog::default();
//! let config = config_loader::load_configuration(Path::new("params.txt"), &catalog)?;
//!
//! println!("dx = {}, center = {:?}", config.coarsest_dx(), config.center());
//! # Ok::<(), color_eyre::eyre::Error>(())
//! ```
//!
//! ## Parameter Format
//!
//! ```text
//! # Half of a 128^3 box, mirrored in x
//! N_full = 128
//! L_full = 64.0
//! isPeriodic = 0 1 1
//! lo_boundary = 2 0 0
//! hi_boundary = 1 0 0
//! vars_parity = 0 0 ...
//! vars_asymptotic_values = 1.0 0.0 ...
//! max_level = 4
//! regrid_interval = 1 1 1 1 1
//! chk_prefix = chk_
//! plot_prefix = plt_
//! ```
//!
//! ## Error Handling
//!
//! Resolvers return [`error::ConfigError`], built with `thiserror`. The file
//! loaders and the binary use `color_eyre` to attach file context.

pub mod boundary;
pub mod config;
pub mod config_loader;
pub mod error;
pub mod grid;
pub mod params;
pub mod partition;
pub mod plot;
pub mod utils;
pub mod variables;

pub use config::GridConfiguration;
pub use error::ConfigError;

/// Number of spatial dimensions
pub const SPACEDIM: usize = 3;
