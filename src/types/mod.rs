//! Scalar values, rows and table addressing for storeql

mod namespace;
mod table;

pub use namespace::{Namespace, TablePath};
pub use table::{FieldSpec, Table};

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Scalar value stored in a row field
///
/// Persisted untagged, so a row serializes as a plain JSON object
/// (`{"id": 1, "name": "ann", "note": null}`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Number(f64),
    Text(String),
}

/// A row maps field names to values. Field order carries no meaning.
pub type Row = BTreeMap<String, Value>;

impl Value {
    /// Interpret an unquoted query token as a value
    ///
    /// `null` (any case) is Null, anything that parses as a finite number is a
    /// Number, everything else is kept verbatim as Text.
    pub fn from_token(token: &str) -> Self {
        if token.eq_ignore_ascii_case("null") {
            return Value::Null;
        }
        match token.parse::<f64>() {
            Ok(n) if n.is_finite() => Value::Number(n),
            _ => Value::Text(token.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric coercion used by loose comparisons
    ///
    /// Null is 0, blank text is 0, non-numeric text is NaN.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Number(n) => *n,
            Value::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(f64::NAN)
                }
            }
        }
    }

    /// Coercing equality (`=` / `!=`)
    ///
    /// Null only equals Null; a Number and a Text compare by numeric value.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Null, _) | (_, Value::Null) => false,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => self.to_number() == other.to_number(),
        }
    }

    /// Relational ordering for WHERE (`<`, `<=`, `>`, `>=`)
    ///
    /// Two texts compare lexicographically, every other pairing compares
    /// numerically. `None` when a side coerces to NaN.
    ///
    /// ORDER BY does not use this: it needs a total order and sorts with
    /// [`Value::sort_cmp`] instead, so `'10' > 9` holds in a WHERE clause
    /// while ORDER BY still places the number 9 before the text `'10'`.
    pub fn loose_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            _ => self.to_number().partial_cmp(&other.to_number()),
        }
    }

    /// Total order used by ORDER BY: Null < Number < Text
    ///
    /// Numbers compare with `total_cmp`, texts lexicographically. Values of
    /// different kinds are never coerced.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        fn rank(v: &Value) -> u8 {
            match v {
                Value::Null => 0,
                Value::Number(_) => 1,
                Value::Text(_) => 2,
            }
        }

        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n as f64)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}
