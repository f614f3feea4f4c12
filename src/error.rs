use std::path::PathBuf;
use thiserror::Error;

use crate::value::ValueKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("'{key}' has no environment value, stored value, or default")]
    MissingValue { key: String },

    #[error("Not a valid {expected}: '{value}'")]
    InvalidFormat { value: String, expected: ValueKind },

    #[error("Value of '{key}' is {found}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path} (line {line}): {reason}")]
    ParseError {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Failed to parse {path}: {source}")]
    TomlError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Unsupported value for '{key}': {reason}")]
    UnsupportedValue { key: String, reason: String },

    #[error("Object source must serialize to a flat map: {reason}")]
    NotAnObject { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_value_names_key() {
        let err = ConfigError::MissingValue {
            key: "DATABASE_URL".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("DATABASE_URL"));
        assert!(msg.contains("default"));
    }

    #[test]
    fn invalid_format_names_kind() {
        let err = ConfigError::InvalidFormat {
            value: "1.0".into(),
            expected: ValueKind::Integer,
        };
        assert_eq!(err.to_string(), "Not a valid integer: '1.0'");
    }

    #[test]
    fn parse_error_formats_line() {
        let err = ConfigError::ParseError {
            path: "/srv/app/.env".into(),
            line: 7,
            reason: "missing '='".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains(".env"));
        assert!(msg.contains("line 7"));
    }

    #[test]
    fn type_mismatch_formats_both_kinds() {
        let err = ConfigError::TypeMismatch {
            key: "PORT".into(),
            expected: ValueKind::Integer,
            found: ValueKind::String,
        };
        assert_eq!(err.to_string(), "Value of 'PORT' is string, expected integer");
    }
}
