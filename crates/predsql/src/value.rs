//! Bind values, condition operands and data rows.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single positional bind value.
///
/// Serializes as a bare JSON scalar so a parameter list can be handed to any
/// driver that accepts `?` placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Convert a JSON scalar. Booleans, arrays and objects are rejected.
    pub(crate) fn from_json(json: &serde_json::Value) -> Result<Self, String> {
        match json {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::String(s) => Ok(Value::Text(s.clone())),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Value::Float(f))
                } else {
                    Err(format!("number {n} is out of range"))
                }
            }
            serde_json::Value::Bool(b) => Err(format!("got boolean {b}, expected text, number or null")),
            serde_json::Value::Array(_) => Err("arrays can only hold text, number or null".to_string()),
            serde_json::Value::Object(_) => Err("objects are not valid condition values".to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s:?}"),
        }
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

/// `None` binds SQL `NULL`. To skip a condition or column instead, use
/// [`Operand::Absent`] or the `*_opt` builder methods.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// The right-hand side of a condition in a predicate group.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// One value (possibly `NULL`).
    Scalar(Value),
    /// An ordered list of values; may contain `NULL` and may be empty.
    List(Vec<Value>),
    /// No value supplied: the condition is skipped entirely.
    Absent,
}

impl Operand {
    /// Build a list operand from any iterator of values.
    pub fn list<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Operand::List(values.into_iter().map(Into::into).collect())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Operand::Absent)
    }

    pub(crate) fn from_json(json: &serde_json::Value) -> Result<Self, String> {
        match json {
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                        Err("arrays can only hold text, number or null".to_string())
                    }
                    other => Value::from_json(other),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Operand::List),
            other => Value::from_json(other).map(Operand::Scalar),
        }
    }
}

impl From<Value> for Operand {
    fn from(v: Value) -> Self {
        Operand::Scalar(v)
    }
}

macro_rules! operand_from_scalar {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Operand {
                fn from(v: $t) -> Self {
                    Operand::Scalar(Value::from(v))
                }
            }
        )*
    };
}

operand_from_scalar!(i8, i16, i32, i64, u8, u16, u32, f32, f64, &str, String, &String);

impl<T: Into<Value>> From<Option<T>> for Operand {
    fn from(v: Option<T>) -> Self {
        Operand::Scalar(Value::from(v))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Operand {
    fn from(values: Vec<T>) -> Self {
        Operand::list(values)
    }
}

/// An ordered column → value mapping used for INSERT rows and UPDATE SET data.
///
/// Column names are unique; setting an existing column replaces its value
/// without moving it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    entries: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value (`None` binds NULL).
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column.into(), value.into());
        self
    }

    /// Set an optional column value (None => skip).
    pub fn set_opt<T: Into<Value>>(self, column: impl Into<String>, value: Option<T>) -> Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    fn insert(&mut self, column: String, value: Value) {
        if let Some(slot) = self.entries.iter_mut().find(|(c, _)| *c == column) {
            slot.1 = value;
        } else {
            self.entries.push((column, value));
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k.into(), v.into());
        }
        row
    }
}
