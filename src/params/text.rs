//! Parser for Chombo-style `params.txt` files.
//!
//! One assignment per line:
//!
//! ```text
//! # comment
//! N_full = 64
//! isPeriodic = 0 1 1
//! chk_prefix = "run 1/chk_"
//! ```
//!
//! Double-quoted tokens may contain whitespace. A later assignment of the same
//! key replaces the earlier one.

use std::sync::LazyLock;

use regex::Regex;

use super::{ParamError, ParamSource, ParamTable};

static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_.]*)\s*=\s*(.*)$").expect("Invalid assignment regex")
});

/// Parse the contents of a `params.txt` file into a table
pub fn parse_params(content: &str) -> Result<ParamTable, ParamError> {
    let mut table = ParamTable::new();

    for (index, raw_line) in content.lines().enumerate() {
        let line_number = index + 1;
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let caps = ASSIGNMENT.captures(line).ok_or_else(|| ParamError::Syntax {
            line: line_number,
            message: format!("expected 'key = value', found '{}'", line),
        })?;

        let key = &caps[1];
        let tokens = tokenize(&caps[2]).map_err(|message| ParamError::Syntax {
            line: line_number,
            message,
        })?;

        if table.contains(key) {
            log::debug!("Parameter '{}' reassigned on line {}", key, line_number);
        }
        table.insert(key, tokens);
    }

    Ok(table)
}

/// Drop everything after an unquoted `#`
fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Split a value list on whitespace, keeping quoted tokens together
fn tokenize(values: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;

    for c in values.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() || quoted {
                    tokens.push(std::mem::take(&mut current));
                }
                quoted = false;
            }
            c => current.push(c),
        }
    }

    if in_quotes {
        return Err("unterminated quoted string".to_string());
    }
    if !current.is_empty() || quoted {
        tokens.push(current);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_file() {
        let content = r#"
# Grid
N_full = 64
L = 16.0   # longest side
isPeriodic = 0 1 1
chk_prefix = "run 1/chk_"
plot_vars = chi Ham
"#;
        let table = parse_params(content).unwrap();
        assert_eq!(table.load::<i32>("N_full"), Ok(64));
        assert_eq!(table.load::<f64>("L"), Ok(16.0));
        assert_eq!(
            table.load_array::<bool>("isPeriodic", 0, 3),
            Ok(vec![false, true, true])
        );
        assert_eq!(table.load::<String>("chk_prefix"), Ok("run 1/chk_".to_string()));
        assert_eq!(table.tokens("plot_vars").map(|t| t.len()), Some(2));
    }

    #[test]
    fn test_later_assignment_wins() {
        let table = parse_params("N = 16\nN = 32\n").unwrap();
        assert_eq!(table.load::<i32>("N"), Ok(32));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_hash_inside_quotes_is_kept() {
        let table = parse_params("plot_prefix = \"out#1_\"").unwrap();
        assert_eq!(table.load::<String>("plot_prefix"), Ok("out#1_".to_string()));
    }

    #[test]
    fn test_empty_quoted_token() {
        let table = parse_params("plot_prefix = \"\"").unwrap();
        assert_eq!(table.load::<String>("plot_prefix"), Ok(String::new()));
    }

    #[test]
    fn test_syntax_errors_report_line() {
        let err = parse_params("N = 16\nthis is not an assignment\n").unwrap_err();
        assert!(matches!(err, ParamError::Syntax { line: 2, .. }));

        let err = parse_params("chk_prefix = \"open").unwrap_err();
        assert!(err.to_string().contains("unterminated"));
    }
}
