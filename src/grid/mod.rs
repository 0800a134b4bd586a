//! # Grid Geometry
//!
//! Cell counts, physical extent and center of the coarsest level.
//!
//! - `dimensions`: per-axis cell counts and the reflective halving rule
//! - `domain`: domain length `L` and coarsest spacing `dx`
//! - `center`: coordinate center, snapped onto symmetry planes
//!
//! Each stage consumes the output of the previous one.

pub mod center;
pub mod dimensions;
pub mod domain;

pub use center::{apply_reflective_center, default_center, resolve_center};
pub use dimensions::{resolve_extent, GridExtent};
pub use domain::{full_from_length, length_from_full, resolve_domain, DomainLength};
