//! Runtime values read from filter instances and target records.
//!
//! [`Value`] is the common currency between a filter criterion and a record
//! field: the compiler reads criterion values out of the filter instance,
//! predicates read record fields through [`crate::record::Record::get`], and
//! [`crate::ops::CompareOp::eval`] compares the two.
//!
//! ```rust
//! use sift_query::value::{Value, ValueKind};
//!
//! // Conversions mirror the common Rust scalar types.
//! let v: Value = 42.into();
//! assert!(matches!(v, Value::Int(42)));
//!
//! let v: Value = "hello".into();
//! assert_eq!(v.kind(), Some(ValueKind::String));
//!
//! // Absent optionals become Null.
//! let v: Value = Option::<i64>::None.into();
//! assert!(v.is_null());
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A dynamically typed value used in comparisons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null / absent value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// String value.
    String(String),
    /// JSON value.
    Json(serde_json::Value),
}

/// The static kind of a field, as declared by a shape or record schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Boolean field.
    Bool,
    /// Integer field.
    Int,
    /// Float field.
    Float,
    /// Text field. The only kind eligible for fuzzy matching.
    String,
    /// JSON field. Supports equality only.
    Json,
}

impl Value {
    /// Check if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The kind of this value, or `None` for `Null`.
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Self::Null => None,
            Self::Bool(_) => Some(ValueKind::Bool),
            Self::Int(_) => Some(ValueKind::Int),
            Self::Float(_) => Some(ValueKind::Float),
            Self::String(_) => Some(ValueKind::String),
            Self::Json(_) => Some(ValueKind::Json),
        }
    }

    /// Loose equality with Int/Float coercion.
    ///
    /// `Null` equals nothing, including itself; absent criteria are skipped
    /// before comparison ever happens, so a `Null` here always means a missing
    /// record value.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => *a as f64 == *b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Json(a), Self::Json(b)) => a == b,
            _ => false,
        }
    }

    /// Loose ordering with Int/Float coercion.
    ///
    /// Returns `None` for `Null`, JSON, and cross-kind pairs, which makes all
    /// ordering comparisons against them false.
    pub fn loose_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::Int(a), Self::Float(b)) => (*a as f64).partial_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Self::String(a), Self::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// The string content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Self::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}
