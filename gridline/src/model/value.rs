//! Value enum for dynamic cell values

use std::cmp::Ordering;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde::Serialize;

/// A dynamic cell value.
///
/// Rows store their fields as `Value`s so that columns of any type can be
/// sorted and filtered through a single comparator.
///
/// # Example
///
/// ```
/// use gridline::Value;
///
/// let name = Value::from("Contoso");
/// let revenue = Value::from(1_000_000i64);
/// let active = Value::from(true);
/// let empty = Value::Null;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Arbitrary precision decimal.
    Decimal(Decimal),
    /// Date and time in UTC.
    DateTime(DateTime<Utc>),
    /// String value.
    String(String),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for `Int`, `Float` and `Decimal`.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_) | Value::Decimal(_))
    }

    /// Returns the value as a string slice, if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Text used for filtering and plain-text rendering.
    ///
    /// Null renders as an empty string.
    pub fn display(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::Decimal(d) => d.normalize().to_string(),
            Value::DateTime(dt) => dt.to_rfc3339(),
            Value::String(s) => s.clone(),
        }
    }

    /// Compares two values the way a grid column sorts by default.
    ///
    /// Numbers compare numerically across `Int`/`Float`/`Decimal`, date-times
    /// chronologically, strings case-insensitively with a case-sensitive
    /// tie-break. Values of different kinds order by kind: bool, number,
    /// date-time, string. Null placement is handled by the sort engine, here
    /// it orders after everything else.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Greater,
            (_, Value::Null) => Ordering::Less,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Decimal(a), Value::Decimal(b)) => a.cmp(b),
            (a, b) if a.is_numeric() && b.is_numeric() => compare_numeric(a, b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => compare_text(a, b),
            (a, b) => a.kind_rank().cmp(&b.kind_rank()),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Value::Bool(_) => 0,
            Value::Int(_) | Value::Float(_) | Value::Decimal(_) => 1,
            Value::DateTime(_) => 2,
            Value::String(_) => 3,
            Value::Null => 4,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(positive_zero(*n)),
            Value::Decimal(d) => d.to_f64(),
            _ => None,
        }
    }

    fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Int(n) => Some(Decimal::from(*n)),
            Value::Float(n) => Decimal::from_f64(positive_zero(*n)),
            Value::Decimal(d) => Some(*d),
            _ => None,
        }
    }
}

fn positive_zero(n: f64) -> f64 {
    if n == 0.0 { 0.0 } else { n }
}

/// Mixed numeric comparison. Goes through `Decimal` whenever both sides
/// convert, so ints, floats and decimals share one ordering; NaN,
/// infinities and floats outside the decimal range fall back to
/// `f64::total_cmp`.
fn compare_numeric(a: &Value, b: &Value) -> Ordering {
    match (a.as_decimal(), b.as_decimal()) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => {
            let x = a.as_f64().unwrap_or(f64::NAN);
            let y = b.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}
