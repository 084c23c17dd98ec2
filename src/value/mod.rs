//! Defines the [`Value`] enum, representing any valid renderable data.

mod cow;
mod from;

pub use std::collections::btree_map;
pub use std::collections::BTreeMap as Map;
use std::mem;
pub use std::vec::Vec as List;
pub(crate) use std::vec as list;

pub(crate) use crate::value::cow::ValueCow;
use crate::Result;

/// Data to be rendered represented as a recursive enum.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(List<Value>),
    Map(Map<String, Value>),
}

/// Convert any serializable type into a [`Value`].
///
/// Integers that do not fit into an `i64` are converted to floats.
pub fn to_value<S>(s: S) -> Result<Value>
where
    S: serde::Serialize,
{
    Ok(Value::from(serde_json::to_value(s)?))
}

impl Value {
    /// Whether the value selects the "then" branch of an `if` block.
    ///
    /// `None`, `false`, zero, `NaN`, the empty string and the empty list are
    /// falsy. Everything else, including an empty map, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Integer(i) => *i != 0,
            Value::Float(f) => *f != 0.0 && !f.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::List(l) => !l.is_empty(),
            Value::Map(_) => true,
        }
    }

    /// Whether a `with` block should take its "else" branch for this value.
    ///
    /// Same as falsy except that numbers are never considered empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Integer(_) => false,
            Value::Float(f) => f.is_nan(),
            v => !v.is_truthy(),
        }
    }

    /// Returns the string slice if this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the list if this value is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Looks up a key if this value is a map.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(m) => m.get(key),
            _ => None,
        }
    }
}

impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::None => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(list) => list.serialize(serializer),
            Value::Map(map) => map.serialize(serializer),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(s), Self::Bool(o)) => s == o,
            (Self::Integer(s), Self::Integer(o)) => s == o,
            (Self::Float(s), Self::Float(o)) => s == o,
            (Self::Integer(s), Self::Float(o)) | (Self::Float(o), Self::Integer(s)) => {
                *s as f64 == *o
            }
            (Self::String(s), Self::String(o)) => s == o,
            (Self::List(s), Self::List(o)) => s == o,
            (Self::Map(s), Self::Map(o)) => s == o,
            _ => mem::discriminant(self) == mem::discriminant(other),
        }
    }
}
