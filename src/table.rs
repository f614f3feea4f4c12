//! Flat TOML documents as a structured file source.
//!
//! Top-level scalars map directly onto [`Value`] without coercion, so
//! `PORT = "8080"` stays a string. Datetimes are kept as their TOML text.
//! Tables, arrays and `nan`/`inf` floats are rejected.

use std::path::Path;

use toml::Table;

use crate::error::ConfigError;
use crate::value::Value;

/// Pure function: parse a TOML document. `path` is only used in errors.
pub fn parse_table(content: &str, path: &Path) -> Result<Vec<(String, Value)>, ConfigError> {
    let table: Table = toml::from_str(content).map_err(|e| ConfigError::TomlError {
        path: path.to_path_buf(),
        source: e,
    })?;

    table
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                toml::Value::String(s) => Value::String(s),
                toml::Value::Integer(i) => Value::Integer(i),
                toml::Value::Float(f) if f.is_finite() => Value::Float(f),
                toml::Value::Float(f) => {
                    return Err(ConfigError::UnsupportedValue {
                        key,
                        reason: format!("non-finite float {f} is not supported"),
                    });
                }
                toml::Value::Boolean(b) => Value::Boolean(b),
                toml::Value::Datetime(dt) => Value::String(dt.to_string()),
                toml::Value::Array(_) | toml::Value::Table(_) => {
                    return Err(ConfigError::UnsupportedValue {
                        key,
                        reason: format!("nested {} values are not supported", value.type_str()),
                    });
                }
            };
            Ok((key, value))
        })
        .collect()
}

/// I/O wrapper: read `path` and parse it.
pub fn load_table(path: &Path) -> Result<Vec<(String, Value)>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_table(&content, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::TOML;
    use std::fs;
    use tempfile::TempDir;

    fn lookup<'a>(entries: &'a [(String, Value)], name: &str) -> Option<&'a Value> {
        entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    #[test]
    fn scalars_keep_toml_types() {
        let entries = parse_table(TOML, Path::new("app.toml")).unwrap();
        assert_eq!(lookup(&entries, "DEBUG"), Some(&Value::Boolean(true)));
        assert_eq!(lookup(&entries, "MAX_LINES"), Some(&Value::Integer(10)));
        assert_eq!(lookup(&entries, "TEMPERATURE"), Some(&Value::Float(98.2)));
        assert_eq!(lookup(&entries, "NAME"), Some(&Value::String("10".into())));
    }

    #[test]
    fn datetime_becomes_text() {
        let entries = parse_table(TOML, Path::new("app.toml")).unwrap();
        assert_eq!(
            lookup(&entries, "STARTED"),
            Some(&Value::String("1979-05-27T07:32:00Z".into()))
        );
    }

    #[test]
    fn section_rejected() {
        let err = parse_table("[database]\nurl = \"pg://\"\n", Path::new("app.toml")).unwrap_err();
        match err {
            ConfigError::UnsupportedValue { key, reason } => {
                assert_eq!(key, "database");
                assert!(reason.contains("table"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn array_rejected() {
        let err = parse_table("HOSTS = [\"a\", \"b\"]\n", Path::new("app.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedValue { .. }));
    }

    #[test]
    fn non_finite_floats_rejected() {
        for doc in ["RATIO = nan\n", "RATIO = inf\n", "RATIO = -inf\n"] {
            match parse_table(doc, Path::new("app.toml")) {
                Err(ConfigError::UnsupportedValue { key, .. }) => assert_eq!(key, "RATIO"),
                other => panic!("expected UnsupportedValue for {doc:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn syntax_error_reports_path() {
        let err = parse_table("DEBUG = = true\n", Path::new("broken.toml")).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn load_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.toml");
        fs::write(&path, "PORT = 3000\n").unwrap();
        let entries = load_table(&path).unwrap();
        assert_eq!(entries, vec![("PORT".into(), Value::Integer(3000))]);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_table(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
    }
}
