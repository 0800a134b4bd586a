//! YAML parameter files.
//!
//! The document must be a flat mapping whose values are scalars or sequences
//! of scalars:
//!
//! ```yaml
//! N_full: 64
//! isPeriodic: [false, true, true]
//! chk_prefix: "chk_"
//! ```

use serde_yaml::Value;

use super::{ParamError, ParamTable};

/// Convert a parsed YAML document into a parameter table
pub fn table_from_yaml(document: &Value) -> Result<ParamTable, ParamError> {
    let mapping = match document {
        Value::Mapping(mapping) => mapping,
        Value::Null => return Ok(ParamTable::new()),
        _ => {
            return Err(ParamError::Syntax {
                line: 0,
                message: "parameter document must be a mapping".to_string(),
            })
        }
    };

    let mut table = ParamTable::new();
    for (key, value) in mapping {
        let key = scalar_token(key).ok_or_else(|| ParamError::Syntax {
            line: 0,
            message: format!("parameter names must be scalars, found {:?}", key),
        })?;

        let tokens = match value {
            Value::Sequence(items) => items
                .iter()
                .map(|item| {
                    scalar_token(item).ok_or_else(|| ParamError::Syntax {
                        line: 0,
                        message: format!("parameter '{}' contains a non-scalar element", key),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            other => vec![scalar_token(other).ok_or_else(|| ParamError::Syntax {
                line: 0,
                message: format!("parameter '{}' must be a scalar or a list of scalars", key),
            })?],
        };

        table.insert(key, tokens);
    }

    Ok(table)
}

/// Parse YAML text into a parameter table
pub fn parse_yaml_params(content: &str) -> Result<ParamTable, ParamError> {
    let document: Value = serde_yaml::from_str(content).map_err(|e| ParamError::Syntax {
        line: e.location().map(|loc| loc.line()).unwrap_or(0),
        message: e.to_string(),
    })?;
    table_from_yaml(&document)
}

fn scalar_token(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}
