//! Shared utilities: parameter validation helpers.

pub mod validation;

pub use validation::{ensure_exclusive, ensure_positive_count, halve_even_count};
