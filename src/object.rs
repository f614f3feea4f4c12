//! Entries from in-code objects.
//!
//! Any `Serialize` value that serializes to a flat map (a struct with scalar
//! fields, a `HashMap<String, _>`, a `serde_json::Map`) can seed a store.
//! Values are taken as already typed: a `String` field holding `"10"` stays a
//! string. `None` fields are skipped. Nested structs, maps and sequences are
//! rejected.

use serde::Serialize;

use crate::error::ConfigError;
use crate::value::Value;

/// Which field names an object source contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyFilter {
    /// Only names with at least one cased letter and no lower-case letters,
    /// e.g. `DEBUG`, `MAX_LINES`, `HTTP2_PORT`.
    #[default]
    UpperCase,
    /// Every field.
    All,
}

impl KeyFilter {
    fn accepts(self, name: &str) -> bool {
        match self {
            KeyFilter::All => true,
            KeyFilter::UpperCase => is_upper_name(name),
        }
    }
}

fn is_upper_name(name: &str) -> bool {
    name.chars().any(char::is_uppercase) && !name.chars().any(char::is_lowercase)
}

/// Serialize `source` and collect its accepted fields as typed values.
pub fn object_entries<S: Serialize + ?Sized>(
    source: &S,
    filter: KeyFilter,
) -> Result<Vec<(String, Value)>, ConfigError> {
    let json = serde_json::to_value(source).map_err(|e| ConfigError::NotAnObject {
        reason: e.to_string(),
    })?;

    let serde_json::Value::Object(map) = json else {
        return Err(ConfigError::NotAnObject {
            reason: format!("got {}", json_kind(&json)),
        });
    };

    let mut entries = Vec::new();
    for (name, value) in map {
        if !filter.accepts(&name) {
            continue;
        }
        if let Some(value) = scalar(&name, value)? {
            entries.push((name, value));
        }
    }
    Ok(entries)
}

fn scalar(name: &str, value: serde_json::Value) -> Result<Option<Value>, ConfigError> {
    let value = match value {
        serde_json::Value::Null => return Ok(None),
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if n.is_u64() {
                return Err(ConfigError::UnsupportedValue {
                    key: name.into(),
                    reason: format!("integer {n} does not fit in i64"),
                });
            } else {
                // Finite by construction: serde_json maps NaN and infinities to null.
                Value::Float(n.as_f64().unwrap_or_default())
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        other => {
            return Err(ConfigError::UnsupportedValue {
                key: name.into(),
                reason: format!("nested {} values are not supported", json_kind(&other)),
            });
        }
    };
    Ok(Some(value))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::DevConfig;
    use std::collections::HashMap;

    fn lookup<'a>(entries: &'a [(String, Value)], name: &str) -> Option<&'a Value> {
        entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    #[test]
    fn struct_upper_case_fields_only() {
        let entries = object_entries(&DevConfig::default(), KeyFilter::UpperCase).unwrap();
        assert_eq!(lookup(&entries, "DEBUG"), Some(&Value::Boolean(true)));
        assert_eq!(lookup(&entries, "TESTING"), Some(&Value::Boolean(false)));
        assert_eq!(lookup(&entries, "FOO"), Some(&Value::String("BAZ".into())));
        assert_eq!(lookup(&entries, "secret_key"), None);
    }

    #[test]
    fn all_filter_keeps_lower_case() {
        let entries = object_entries(&DevConfig::default(), KeyFilter::All).unwrap();
        assert_eq!(
            lookup(&entries, "secret_key"),
            Some(&Value::String("hunter2".into()))
        );
    }

    #[test]
    fn none_fields_skipped() {
        let entries = object_entries(&DevConfig::default(), KeyFilter::UpperCase).unwrap();
        assert_eq!(lookup(&entries, "BAR"), None);
    }

    #[test]
    fn string_values_not_coerced() {
        let mut map = HashMap::new();
        map.insert("PORT", "8080");
        let entries = object_entries(&map, KeyFilter::UpperCase).unwrap();
        assert_eq!(entries, vec![("PORT".into(), Value::String("8080".into()))]);
    }

    #[test]
    fn numbers_keep_their_kind() {
        #[derive(Serialize)]
        #[allow(non_snake_case)]
        struct Limits {
            MAX_LINES: u32,
            RATE: f64,
        }
        let entries = object_entries(
            &Limits {
                MAX_LINES: 10,
                RATE: 0.5,
            },
            KeyFilter::UpperCase,
        )
        .unwrap();
        assert_eq!(lookup(&entries, "MAX_LINES"), Some(&Value::Integer(10)));
        assert_eq!(lookup(&entries, "RATE"), Some(&Value::Float(0.5)));
    }

    #[test]
    fn upper_name_rules() {
        assert!(is_upper_name("DEBUG"));
        assert!(is_upper_name("HTTP2_PORT"));
        assert!(!is_upper_name("Debug"));
        assert!(!is_upper_name("_2"));
        assert!(!is_upper_name("__dict__"));
    }

    #[test]
    fn nested_struct_rejected() {
        #[derive(Serialize)]
        struct Inner {
            url: String,
        }
        #[derive(Serialize)]
        #[allow(non_snake_case)]
        struct Outer {
            DATABASE: Inner,
        }
        let err = object_entries(
            &Outer {
                DATABASE: Inner { url: "pg://".into() },
            },
            KeyFilter::UpperCase,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedValue { ref key, .. } if key == "DATABASE"));
    }

    #[test]
    fn rejected_field_filtered_out_first() {
        #[derive(Serialize)]
        struct Tagged {
            tags: Vec<String>,
        }
        let entries = object_entries(&Tagged { tags: vec![] }, KeyFilter::UpperCase).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn u64_overflow_rejected() {
        let mut map = HashMap::new();
        map.insert("BIG", u64::MAX);
        let err = object_entries(&map, KeyFilter::All).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedValue { .. }));
    }

    #[test]
    fn non_map_source_rejected() {
        let err = object_entries(&vec![1, 2, 3], KeyFilter::All).unwrap_err();
        match err {
            ConfigError::NotAnObject { reason } => assert!(reason.contains("array")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
