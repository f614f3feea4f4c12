//! Lexical type coercion for raw string values.
//!
//! Text coming from the environment or from key=value files is classified in a
//! fixed order, first match wins:
//!
//! 1. Boolean: exactly `true`, `True`, `false` or `False`.
//! 2. Integer: a base-10 `i64` with an optional sign.
//! 3. Float: anything else that parses as a finite `f64`.
//! 4. String: the input, unchanged.
//!
//! No trimming happens here; callers that want it trim first.

use crate::error::ConfigError;
use crate::value::{Value, ValueKind};

fn boolean_state(s: &str) -> Option<bool> {
    match s {
        "true" | "True" => Some(true),
        "false" | "False" => Some(false),
        _ => None,
    }
}

pub fn is_boolean(s: &str) -> bool {
    boolean_state(s).is_some()
}

pub fn is_integer(s: &str) -> bool {
    s.parse::<i64>().is_ok()
}

/// True for finite floats that are not also integers.
///
/// `nan` and `inf` spellings, and literals that overflow to infinity, are not
/// floats here so they survive as strings.
pub fn is_float(s: &str) -> bool {
    !is_integer(s) && s.parse::<f64>().is_ok_and(f64::is_finite)
}

pub fn parse_boolean(s: &str) -> Result<bool, ConfigError> {
    boolean_state(s).ok_or_else(|| invalid(s, ValueKind::Boolean))
}

pub fn parse_integer(s: &str) -> Result<i64, ConfigError> {
    s.parse::<i64>().map_err(|_| invalid(s, ValueKind::Integer))
}

pub fn parse_float(s: &str) -> Result<f64, ConfigError> {
    if !is_float(s) {
        return Err(invalid(s, ValueKind::Float));
    }
    s.parse::<f64>().map_err(|_| invalid(s, ValueKind::Float))
}

/// Convert a raw string into the most specific [`Value`]. Never fails.
pub fn coerce(s: &str) -> Value {
    if let Some(b) = boolean_state(s) {
        return Value::Boolean(b);
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>()
        && f.is_finite()
    {
        return Value::Float(f);
    }
    Value::String(s.to_string())
}

fn invalid(s: &str, expected: ValueKind) -> ConfigError {
    ConfigError::InvalidFormat {
        value: s.to_string(),
        expected,
    }
}
