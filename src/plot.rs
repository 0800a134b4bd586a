//! Plot variable selection.
//!
//! `plot_vars` names are resolved against the evolution table first, then the
//! diagnostic table. A name found in neither is reported and skipped; it never
//! stops configuration.

use log::warn;
use serde::Serialize;

use crate::error::ConfigError;
use crate::params::ParamSource;
use crate::variables::{PlotVariable, VariableCatalog};

/// Ordered selection of variables written to plot files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlotVariableSelection {
    variables: Vec<PlotVariable>,
}

impl PlotVariableSelection {
    pub fn variables(&self) -> &[PlotVariable] {
        &self.variables
    }

    /// Number of successfully resolved variables
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlotVariable> {
        self.variables.iter()
    }
}

impl FromIterator<PlotVariable> for PlotVariableSelection {
    fn from_iter<I: IntoIterator<Item = PlotVariable>>(iter: I) -> Self {
        Self {
            variables: iter.into_iter().collect(),
        }
    }
}

/// Resolve names in input order, dropping the ones no table defines
pub fn select_plot_vars<I, N>(names: I, catalog: &VariableCatalog) -> PlotVariableSelection
where
    I: IntoIterator<Item = N>,
    N: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|name| {
            let name = name.as_ref();
            let resolved = catalog.resolve(name);
            if resolved.is_none() {
                warn!("Variable with name {} not found.", name);
            }
            resolved
        })
        .collect()
}

/// Read `num_plot_vars` and `plot_vars` and resolve them
pub fn resolve_plot_vars<S>(
    source: &S,
    catalog: &VariableCatalog,
) -> Result<PlotVariableSelection, ConfigError>
where
    S: ParamSource + ?Sized,
{
    let num_plot_vars: usize = source.load_or("num_plot_vars", 0)?;
    let names: Vec<String> = source.load_array_padded("plot_vars", num_plot_vars, String::new())?;

    let selection = select_plot_vars(&names, catalog);
    if selection.len() < num_plot_vars {
        log::info!(
            "{} of {} plot variables resolved",
            selection.len(),
            num_plot_vars
        );
    }
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamTable;
    use crate::variables::VariableKind;

    fn catalog() -> VariableCatalog {
        VariableCatalog::new(["phi", "Pi"], ["rho", "Ham"])
    }

    #[test]
    fn test_unknown_names_dropped() {
        let pp = ParamTable::new()
            .with("num_plot_vars", 2)
            .with_array("plot_vars", ["rho", "unknown_var"]);
        let selection = resolve_plot_vars(&pp, &catalog()).unwrap();
        assert_eq!(selection.len(), 1);
        assert_eq!(
            selection.variables(),
            &[PlotVariable { index: 0, kind: VariableKind::Diagnostic }]
        );
    }

    #[test]
    fn test_input_order_preserved() {
        let selection = select_plot_vars(["Ham", "phi", "Pi"], &catalog());
        let resolved: Vec<_> = selection.iter().map(|v| (v.index, v.kind)).collect();
        assert_eq!(
            resolved,
            vec![
                (1, VariableKind::Diagnostic),
                (0, VariableKind::Evolution),
                (1, VariableKind::Evolution),
            ]
        );
    }

    #[test]
    fn test_declared_count_limits_names() {
        let pp = ParamTable::new()
            .with("num_plot_vars", 1)
            .with_array("plot_vars", ["phi", "Pi"]);
        let selection = resolve_plot_vars(&pp, &catalog()).unwrap();
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_short_name_list_is_padded_and_dropped() {
        let pp = ParamTable::new()
            .with("num_plot_vars", 3)
            .with_array("plot_vars", ["phi"]);
        let selection = resolve_plot_vars(&pp, &catalog()).unwrap();
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_no_plot_vars() {
        let selection = resolve_plot_vars(&ParamTable::new(), &catalog()).unwrap();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_declared_count_is_bounded() {
        let pp = ParamTable::new()
            .with("num_plot_vars", crate::params::MAX_DECLARED_VALUES + 1)
            .with_array("plot_vars", ["phi"]);
        let err = resolve_plot_vars(&pp, &catalog()).unwrap_err();
        assert!(matches!(err, ConfigError::Param(_)));
    }
}
