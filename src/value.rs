//==================================================
// File: value.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Dynamic runtime values for clashlang scripts
// Objective: Closed value enum shared by variables, handler parameters and the
//            last-result register, with typed accessors that never coerce
//==================================================

use std::collections::HashMap;
use std::fmt;

use crate::interpreter::RuntimeError;

//==================================================
// Section 1.0 - Value
//==================================================

/// clashlang runtime value types
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
    /// Growable, order preserving.
    List(Vec<Value>),
    /// Fixed length; slots start out `Absent`.
    Array(Vec<Value>),
    Dict(HashMap<String, Value>),
    #[default]
    Absent,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Text(s) => write!(f, "{}", s),
            Value::List(items) | Value::Array(items) => {
                write!(f, "[")?;
                for (i, val) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", val)?;
                }
                write!(f, "]")
            }
            Value::Dict(map) => {
                // Sorted so dumps are stable between runs.
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                write!(f, "{{")?;
                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, map[key])?;
                }
                write!(f, "}}")
            }
            Value::Absent => write!(f, "null"),
        }
    }
}

impl Value {
    /// Get the type name of the value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Array(_) => "array",
            Value::Dict(_) => "dict",
            Value::Absent => "absent",
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Numeric view with Integer to Float widening. Text is never parsed.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn expect_integer(&self, what: &str) -> Result<i64, RuntimeError> {
        match self {
            Value::Integer(n) => Ok(*n),
            other => Err(RuntimeError::TypeMismatch(format!(
                "{what} is {}, expected integer",
                other.type_name()
            ))),
        }
    }

    pub fn expect_number(&self, what: &str) -> Result<f64, RuntimeError> {
        self.as_number().ok_or_else(|| {
            RuntimeError::TypeMismatch(format!("{what} is {}, expected number", self.type_name()))
        })
    }

    pub fn expect_text(&self, what: &str) -> Result<&str, RuntimeError> {
        self.as_text().ok_or_else(|| {
            RuntimeError::TypeMismatch(format!("{what} is {}, expected text", self.type_name()))
        })
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

//==================================================
// Section 2.0 - Tests
//==================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_display_drops_trailing_zero() {
        assert_eq!(Value::Float(5.0).to_string(), "5");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
    }

    #[test]
    fn collections_display_with_absent_slots() {
        let array = Value::Array(vec![Value::Absent, Value::Integer(3), Value::from("x")]);
        assert_eq!(array.to_string(), "[null, 3, x]");

        let mut map = HashMap::new();
        map.insert("b".to_string(), Value::Integer(2));
        map.insert("a".to_string(), Value::Integer(1));
        assert_eq!(Value::Dict(map).to_string(), "{a: 1, b: 2}");
    }

    #[test]
    fn integer_widens_but_text_does_not() {
        assert_eq!(Value::Integer(4).as_number(), Some(4.0));
        assert_eq!(Value::from("4").as_number(), None);
        assert!(matches!(
            Value::Float(1.0).expect_integer("x"),
            Err(RuntimeError::TypeMismatch(_))
        ));
    }
}

//==================================================
// End of file
//==================================================
