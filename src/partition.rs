//! Box partitioning limits.
//!
//! The AMR engine calls these `max_grid_size` and `block_factor`. The
//! descriptive aliases `max_box_size` and `min_box_size` are read when the
//! engine names are absent.

use serde::Serialize;

use crate::error::ConfigError;
use crate::params::ParamSource;

pub const DEFAULT_MAX_BOX_SIZE: usize = 64;
pub const DEFAULT_BLOCK_FACTOR: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoxPartitioning {
    /// Largest box the mesh may be split into
    pub max_box_size: usize,
    /// Smallest box size; every box is a multiple of it
    pub block_factor: usize,
}

impl Default for BoxPartitioning {
    fn default() -> Self {
        Self {
            max_box_size: DEFAULT_MAX_BOX_SIZE,
            block_factor: DEFAULT_BLOCK_FACTOR,
        }
    }
}

pub fn resolve_partitioning<S>(source: &S) -> Result<BoxPartitioning, ConfigError>
where
    S: ParamSource + ?Sized,
{
    Ok(BoxPartitioning {
        max_box_size: load_aliased(source, "max_grid_size", "max_box_size", DEFAULT_MAX_BOX_SIZE)?,
        block_factor: load_aliased(source, "block_factor", "min_box_size", DEFAULT_BLOCK_FACTOR)?,
    })
}

fn load_aliased<S>(source: &S, key: &str, alias: &str, default: usize) -> Result<usize, ConfigError>
where
    S: ParamSource + ?Sized,
{
    let value = if source.contains(key) {
        source.load(key)?
    } else {
        source.load_or(alias, default)?
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamTable;

    #[test]
    fn test_defaults() {
        assert_eq!(
            resolve_partitioning(&ParamTable::new()).unwrap(),
            BoxPartitioning { max_box_size: 64, block_factor: 8 }
        );
    }

    #[test]
    fn test_aliases() {
        let pp = ParamTable::new().with("max_box_size", 32).with("min_box_size", 4);
        assert_eq!(
            resolve_partitioning(&pp).unwrap(),
            BoxPartitioning { max_box_size: 32, block_factor: 4 }
        );
    }

    #[test]
    fn test_engine_names_take_precedence() {
        let pp = ParamTable::new()
            .with("max_grid_size", 16)
            .with("max_box_size", 32)
            .with("block_factor", 2)
            .with("min_box_size", 4);
        assert_eq!(
            resolve_partitioning(&pp).unwrap(),
            BoxPartitioning { max_box_size: 16, block_factor: 2 }
        );
    }
}
