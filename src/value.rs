//! Typed configuration values.
//!
//! Every entry resolves to one of four scalar kinds. Values read from text
//! sources arrive here through [`coerce`](crate::coerce::coerce); values from
//! object and TOML sources are already typed and are stored as-is.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A resolved configuration value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

/// The kind of a [`Value`], used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Boolean,
    Integer,
    Float,
    String,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
        };
        f.write_str(name)
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Floats, with integers widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// `false`, `0`, `0.0` and `""` are falsy; everything else is truthy.
    ///
    /// An environment-deferred entry skips a falsy stored value when its
    /// variable is absent and falls through to its default.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::Integer(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            // Keep a fractional part so the text coerces back to a float.
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Value::Integer(i64::from(i))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::coerce;

    #[test]
    fn display_float_keeps_fraction() {
        assert_eq!(Value::Float(1.0).to_string(), "1.0");
        assert_eq!(Value::Float(98.2).to_string(), "98.2");
        assert_eq!(Value::Float(-0.5).to_string(), "-0.5");
    }

    #[test]
    fn display_text_coerces_back() {
        let values = [
            Value::Boolean(false),
            Value::Integer(-12),
            Value::Float(3.0),
            Value::Float(1.2345),
            Value::String("hello world".into()),
        ];
        for v in values {
            assert_eq!(coerce(&v.to_string()), v);
        }
    }

    #[test]
    fn truthiness() {
        assert!(!Value::Boolean(false).is_truthy());
        assert!(!Value::Integer(0).is_truthy());
        assert!(!Value::Float(0.0).is_truthy());
        assert!(!Value::String(String::new()).is_truthy());
        assert!(Value::Boolean(true).is_truthy());
        assert!(Value::Integer(-1).is_truthy());
        assert!(Value::String("0".into()).is_truthy());
    }

    #[test]
    fn as_float_widens_integers() {
        assert_eq!(Value::Integer(10).as_float(), Some(10.0));
        assert_eq!(Value::Boolean(true).as_float(), None);
    }

    #[test]
    fn from_conversions() {
        assert_eq!(Value::from(8080u16), Value::Integer(8080));
        assert_eq!(Value::from(true), Value::Boolean(true));
        assert_eq!(Value::from("BAZ"), Value::String("BAZ".into()));
        assert_eq!(Value::from(0.5f32), Value::Float(0.5));
    }

    #[test]
    fn serializes_untagged() {
        let json = serde_json::to_string(&vec![
            Value::Boolean(true),
            Value::Integer(10),
            Value::Float(98.2),
            Value::String("x".into()),
        ])
        .unwrap();
        assert_eq!(json, r#"[true,10,98.2,"x"]"#);
    }
}
