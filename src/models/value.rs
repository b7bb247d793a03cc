//! Dynamically-typed argument values.
//!
//! Callers supply arguments as [`Value`]s without pre-declaring a schema;
//! the argument builder infers the wire field shape from the value itself.
//!
//! # Example
//!
//! ```
//! use channel_link::Value;
//!
//! let device: Value = 57.into();
//! let names: Value = vec!["BPMS:LI11:501", "BPMS:LI11:601"].into();
//! let whole: Value = 5.0f64.into(); // sent as an integer field (coercion rule)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ChannelLinkError, Result};

/// A caller-supplied argument value.
///
/// One variant per supported shape: the eight scalar kinds, a character
/// pseudo-scalar, arrays/lists of any of these, and nested named maps for
/// structured arguments. Immutable once handed to the argument builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Boolean scalar.
    Boolean(bool),
    /// 8-bit signed integer scalar.
    Byte(i8),
    /// 16-bit signed integer scalar.
    Short(i16),
    /// 32-bit signed integer scalar.
    Int(i32),
    /// 64-bit signed integer scalar.
    Long(i64),
    /// 32-bit floating point scalar.
    Float(f32),
    /// 64-bit floating point scalar.
    Double(f64),
    /// Single character; carried on the wire as a string or byte.
    Char(char),
    /// UTF-8 string scalar.
    Str(String),
    /// Array or list of values. Must be homogeneous; the element kind is
    /// inferred from the first element.
    Array(Vec<Value>),
    /// Nested named map, in insertion order. Becomes a sub-structure field.
    Struct(Vec<(String, Value)>),
}

impl Value {
    /// Short name of the value's runtime shape, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Byte(_) => "byte",
            Value::Short(_) => "short",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Char(_) => "char",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Struct(_) => "struct",
        }
    }

    /// Convert a JSON value into a [`Value`].
    ///
    /// Numbers map to `Int` when they fit a 32-bit signed integer, `Long`
    /// when they fit 64 bits, and `Double` otherwise. Arrays and objects
    /// recurse. JSON `null` has no wire mapping and is rejected.
    pub fn from_json(json: &serde_json::Value) -> Result<Value> {
        match json {
            serde_json::Value::Null => Err(ChannelLinkError::UnsupportedArgumentType(
                "null".to_string(),
            )),
            serde_json::Value::Bool(b) => Ok(Value::Boolean(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    if i >= i32::MIN as i64 && i <= i32::MAX as i64 {
                        Ok(Value::Int(i as i32))
                    } else {
                        Ok(Value::Long(i))
                    }
                } else if let Some(f) = n.as_f64() {
                    Ok(Value::Double(f))
                } else {
                    Err(ChannelLinkError::UnsupportedArgumentType(n.to_string()))
                }
            }
            serde_json::Value::String(s) => Ok(Value::Str(s.clone())),
            serde_json::Value::Array(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(Value::from_json(item)?);
                }
                Ok(Value::Array(values))
            }
            serde_json::Value::Object(map) => {
                let mut fields = Vec::with_capacity(map.len());
                for (name, item) in map {
                    fields.push((name.clone(), Value::from_json(item)?));
                }
                Ok(Value::Struct(fields))
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Byte(v) => write!(f, "{}", v),
            Value::Short(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Long(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Char(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "{}", v),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Struct(fields) => {
                write!(f, "{{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", name, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Byte(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Short(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Char(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}
