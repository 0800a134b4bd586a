//! Variable name enumerations.
//!
//! The simulation knows two disjoint sets of variables: the evolved state
//! (one parity and one asymptotic value each) and the diagnostics computed
//! from it. Plot selection and boundary summaries resolve user-facing names
//! against these tables.

use std::collections::BTreeSet;

use log::warn;
use serde::{Deserialize, Serialize};

/// Errors raised while loading a variable catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to parse catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Variable name '{name}' is defined more than once")]
    DuplicateName { name: String },
}

/// Which table a variable identifier indexes into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    Evolution,
    Diagnostic,
}

impl VariableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariableKind::Evolution => "evolution",
            VariableKind::Diagnostic => "diagnostic",
        }
    }
}

/// A name → identifier enumeration of one variable kind
pub trait VariableTable {
    fn kind(&self) -> VariableKind;

    /// Identifier of `name`, if this table defines it
    fn lookup(&self, name: &str) -> Option<usize>;

    fn name(&self, index: usize) -> Option<&str>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ordered list of names; a name's identifier is its position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTable {
    kind: VariableKind,
    names: Vec<String>,
}

impl NameTable {
    pub fn new<I, S>(kind: VariableKind, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl VariableTable for NameTable {
    fn kind(&self) -> VariableKind {
        self.kind
    }

    fn lookup(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|candidate| candidate == name)
    }

    fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    fn len(&self) -> usize {
        self.names.len()
    }
}

/// A resolved (identifier, kind) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PlotVariable {
    pub index: usize,
    pub kind: VariableKind,
}

/// On-disk form of a catalog
#[derive(Debug, Deserialize)]
struct CatalogFile {
    evolution: Vec<String>,
    #[serde(default)]
    diagnostic: Vec<String>,
}

/// The evolution and diagnostic tables, searched in that order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableCatalog {
    evolution: NameTable,
    diagnostic: NameTable,
}

impl VariableCatalog {
    pub fn new<E, D, S>(evolution: E, diagnostic: D) -> Self
    where
        E: IntoIterator<Item = S>,
        D: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let catalog = Self {
            evolution: NameTable::new(VariableKind::Evolution, evolution),
            diagnostic: NameTable::new(VariableKind::Diagnostic, diagnostic),
        };
        for name in catalog.duplicate_names() {
            warn!("Variable name '{}' is defined more than once; the first definition wins", name);
        }
        catalog
    }

    /// Names appearing more than once across both tables, in table order
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.evolution
            .names()
            .iter()
            .chain(self.diagnostic.names())
            .map(String::as_str)
            .filter(|name| !seen.insert(*name))
            .collect()
    }

    /// CCZ4 metric variables with a minimally coupled scalar field
    pub fn ccz4_scalar_field() -> Self {
        Self::new(
            [
                "chi", "h11", "h12", "h13", "h22", "h23", "h33", "K", "A11", "A12", "A13", "A22",
                "A23", "A33", "Theta", "Gamma1", "Gamma2", "Gamma3", "lapse", "shift1", "shift2",
                "shift3", "B1", "B2", "B3", "phi", "Pi",
            ],
            ["Ham", "Mom1", "Mom2", "Mom3", "rho"],
        )
    }

    /// Parse a catalog from YAML (`evolution: [...]`, `diagnostic: [...]`)
    ///
    /// The two tables must be disjoint and free of repeats.
    pub fn from_yaml(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        let catalog = Self {
            evolution: NameTable::new(VariableKind::Evolution, file.evolution),
            diagnostic: NameTable::new(VariableKind::Diagnostic, file.diagnostic),
        };
        if let Some(name) = catalog.duplicate_names().first() {
            return Err(CatalogError::DuplicateName {
                name: name.to_string(),
            });
        }
        Ok(catalog)
    }

    pub fn evolution(&self) -> &NameTable {
        &self.evolution
    }

    pub fn diagnostic(&self) -> &NameTable {
        &self.diagnostic
    }

    /// Resolve `name` against the evolution table, then the diagnostic table
    pub fn resolve(&self, name: &str) -> Option<PlotVariable> {
        let tables: [&dyn VariableTable; 2] = [&self.evolution, &self.diagnostic];
        tables.iter().find_map(|table| {
            table.lookup(name).map(|index| PlotVariable {
                index,
                kind: table.kind(),
            })
        })
    }

    /// Name of a resolved variable
    pub fn name_of(&self, variable: &PlotVariable) -> Option<&str> {
        match variable.kind {
            VariableKind::Evolution => self.evolution.name(variable.index),
            VariableKind::Diagnostic => self.diagnostic.name(variable.index),
        }
    }
}

impl Default for VariableCatalog {
    fn default() -> Self {
        Self::ccz4_scalar_field()
    }
}
