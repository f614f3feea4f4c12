//! Key=value definition files (`.env` style).
//!
//! One `NAME=value` pair per line. Lines whose first non-blank character is
//! `#` are comments and blank lines are ignored. Each line is split on the
//! first `=` only, so values may contain `=`. Name and value are trimmed and
//! the value goes through [`coerce`]. There is no quoting and no escape
//! processing: a literal `\n` stays two characters.

use std::path::Path;

use crate::coerce::coerce;
use crate::error::ConfigError;
use crate::value::Value;

/// Pure function: parse key=value `content`. `path` is only used in errors.
///
/// Entries are returned in file order; a repeated name appears twice and the
/// later one wins once merged into a store.
pub fn parse_dotenv(content: &str, path: &Path) -> Result<Vec<(String, Value)>, ConfigError> {
    let mut entries = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((name, value)) = trimmed.split_once('=') else {
            return Err(parse_error(path, i + 1, "expected NAME=value"));
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(parse_error(path, i + 1, "empty variable name"));
        }

        entries.push((name.to_string(), coerce(value.trim())));
    }

    Ok(entries)
}

/// I/O wrapper: read `path` and parse it.
pub fn load_dotenv(path: &Path) -> Result<Vec<(String, Value)>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_dotenv(&content, path)
}

fn parse_error(path: &Path, line: usize, reason: &str) -> ConfigError {
    ConfigError::ParseError {
        path: path.to_path_buf(),
        line,
        reason: reason.into(),
    }
}
