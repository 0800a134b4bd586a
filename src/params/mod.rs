//! # Parameter Source
//!
//! A flat, read-only key/value store with type-aware retrieval. Values are
//! kept as the raw whitespace-separated tokens found in the parameter file and
//! are coerced to the requested type only when a resolver asks for them, which
//! is how Chombo-style `params.txt` files behave.
//!
//! ## Key Components
//!
//! - [`ParamSource`]: lookup trait used by every resolver
//! - [`FromParam`]: token coercion for the supported value types
//! - [`ParamTable`]: in-memory implementation, also used by the file loaders
//! - `text`: `params.txt` parser
//! - `yaml`: YAML mapping loader
//!
//! All lookups are exact, case-sensitive key matches.

pub mod text;
pub mod yaml;

use std::collections::BTreeMap;

/// Errors raised by the parameter source itself
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    #[error("Missing required parameter '{key}'")]
    Missing { key: String },

    #[error("Parameter '{key}' has {found} value(s), expected at least {expected}")]
    TooFewValues {
        key: String,
        expected: usize,
        found: usize,
    },

    #[error("Parameter '{key}': cannot read '{token}' as {expected}")]
    InvalidValue {
        key: String,
        token: String,
        expected: &'static str,
    },

    #[error("Parameter '{key}' asks for {requested} values, more than the {limit} supported")]
    TooManyValues {
        key: String,
        requested: usize,
        limit: usize,
    },

    #[error("Syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },
}

/// Largest array a parameter may declare through a count
/// (`num_plot_vars` and the like) when the values themselves may be missing
pub const MAX_DECLARED_VALUES: usize = 1 << 16;

/// Conversion from a single stored token to a typed value
pub trait FromParam: Sized {
    /// Human-readable type name used in error messages
    const TYPE_NAME: &'static str;

    fn from_token(token: &str) -> Option<Self>;
}

macro_rules! from_param_via_parse {
    ($($ty:ty => $name:expr),* $(,)?) => {
        $(
            impl FromParam for $ty {
                const TYPE_NAME: &'static str = $name;

                fn from_token(token: &str) -> Option<Self> {
                    token.trim().parse::<$ty>().ok()
                }
            }
        )*
    };
}

from_param_via_parse! {
    i32 => "an integer",
    i64 => "an integer",
    usize => "a non-negative integer",
    f64 => "a real number",
}

impl FromParam for bool {
    const TYPE_NAME: &'static str = "a boolean";

    fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }
}

impl FromParam for String {
    const TYPE_NAME: &'static str = "a string";

    fn from_token(token: &str) -> Option<Self> {
        Some(token.to_string())
    }
}

fn coerce<T: FromParam>(key: &str, token: &str) -> Result<T, ParamError> {
    T::from_token(token).ok_or_else(|| ParamError::InvalidValue {
        key: key.to_string(),
        token: token.to_string(),
        expected: T::TYPE_NAME,
    })
}

/// Read-only access to user-supplied parameters.
///
/// Implementors only provide [`ParamSource::tokens`]; typed retrieval,
/// default substitution and array access are derived from it.
pub trait ParamSource {
    /// Raw tokens stored under `key`, if the key is present
    fn tokens(&self, key: &str) -> Option<&[String]>;

    /// Whether `key` was supplied at all
    fn contains(&self, key: &str) -> bool {
        self.tokens(key).is_some()
    }

    /// Load the first value stored under `key`, failing if it is absent
    fn load<T: FromParam>(&self, key: &str) -> Result<T, ParamError> {
        let tokens = self.tokens(key).ok_or_else(|| ParamError::Missing {
            key: key.to_string(),
        })?;
        let token = tokens.first().ok_or_else(|| ParamError::TooFewValues {
            key: key.to_string(),
            expected: 1,
            found: 0,
        })?;
        coerce(key, token)
    }

    /// Load the first value stored under `key`, or `default` if absent
    fn load_or<T: FromParam>(&self, key: &str, default: T) -> Result<T, ParamError> {
        if self.contains(key) {
            self.load(key)
        } else {
            Ok(default)
        }
    }

    /// Load `count` values starting at `start`
    fn load_array<T: FromParam>(
        &self,
        key: &str,
        start: usize,
        count: usize,
    ) -> Result<Vec<T>, ParamError> {
        let tokens = self.tokens(key).ok_or_else(|| ParamError::Missing {
            key: key.to_string(),
        })?;
        let end = start.checked_add(count).ok_or_else(|| ParamError::TooManyValues {
            key: key.to_string(),
            requested: count,
            limit: usize::MAX - start,
        })?;
        if tokens.len() < end {
            return Err(ParamError::TooFewValues {
                key: key.to_string(),
                expected: end,
                found: tokens.len(),
            });
        }
        tokens[start..end]
            .iter()
            .map(|token| coerce(key, token))
            .collect()
    }

    /// Load as many values as `default` holds, or `default` itself if absent
    fn load_array_or<T: FromParam>(&self, key: &str, default: Vec<T>) -> Result<Vec<T>, ParamError> {
        if self.contains(key) {
            self.load_array(key, 0, default.len())
        } else {
            Ok(default)
        }
    }

    /// Load the first `count` values, padding with `fill` where the stored
    /// array is shorter than `count` or the key is absent.
    ///
    /// `count` may not exceed [`MAX_DECLARED_VALUES`].
    fn load_array_padded<T: FromParam + Clone>(
        &self,
        key: &str,
        count: usize,
        fill: T,
    ) -> Result<Vec<T>, ParamError> {
        if count > MAX_DECLARED_VALUES {
            return Err(ParamError::TooManyValues {
                key: key.to_string(),
                requested: count,
                limit: MAX_DECLARED_VALUES,
            });
        }
        let tokens = self.tokens(key).unwrap_or(&[]);
        let mut values = tokens
            .iter()
            .take(count)
            .map(|token| coerce(key, token))
            .collect::<Result<Vec<T>, _>>()?;
        values.resize(count, fill);
        Ok(values)
    }
}

/// In-memory parameter table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl ParamTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw tokens under `key`, replacing any earlier assignment
    pub fn insert<K: Into<String>>(&mut self, key: K, tokens: Vec<String>) {
        self.entries.insert(key.into(), tokens);
    }

    /// Builder-style single value assignment
    pub fn with<K: Into<String>, V: ToString>(mut self, key: K, value: V) -> Self {
        self.insert(key, vec![value.to_string()]);
        self
    }

    /// Builder-style array assignment
    pub fn with_array<K, V, I>(mut self, key: K, values: I) -> Self
    where
        K: Into<String>,
        V: ToString,
        I: IntoIterator<Item = V>,
    {
        self.insert(key, values.into_iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ParamSource for ParamTable {
    fn tokens(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }
}
