//! Decoded native results.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::table::TableResult;

/// A single decoded scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScalarValue {
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
}

impl ScalarValue {
    /// The string payload, if this is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The value widened to `i64`, for any of the integral kinds.
    pub fn as_long(&self) -> Option<i64> {
        match self {
            ScalarValue::Byte(v) => Some(*v as i64),
            ScalarValue::Short(v) => Some(*v as i64),
            ScalarValue::Int(v) => Some(*v as i64),
            ScalarValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// The value widened to `f64`, for either floating kind.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            ScalarValue::Float(v) => Some(*v as f64),
            ScalarValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// The boolean payload, if this is a boolean scalar.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            ScalarValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Boolean(v) => write!(f, "{}", v),
            ScalarValue::Byte(v) => write!(f, "{}", v),
            ScalarValue::Short(v) => write!(f, "{}", v),
            ScalarValue::Int(v) => write!(f, "{}", v),
            ScalarValue::Long(v) => write!(f, "{}", v),
            ScalarValue::Float(v) => write!(f, "{}", v),
            ScalarValue::Double(v) => write!(f, "{}", v),
            ScalarValue::Str(v) => write!(f, "{}", v),
        }
    }
}

/// A fully materialized homogeneous array of decoded scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArrayValue {
    Boolean(Vec<bool>),
    Byte(Vec<i8>),
    Short(Vec<i16>),
    Int(Vec<i32>),
    Long(Vec<i64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    Str(Vec<String>),
}

impl ArrayValue {
    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            ArrayValue::Boolean(v) => v.len(),
            ArrayValue::Byte(v) => v.len(),
            ArrayValue::Short(v) => v.len(),
            ArrayValue::Int(v) => v.len(),
            ArrayValue::Long(v) => v.len(),
            ArrayValue::Float(v) => v.len(),
            ArrayValue::Double(v) => v.len(),
            ArrayValue::Str(v) => v.len(),
        }
    }

    /// True if the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element at `index` as a [`ScalarValue`], if in bounds.
    pub fn get(&self, index: usize) -> Option<ScalarValue> {
        match self {
            ArrayValue::Boolean(v) => v.get(index).map(|e| ScalarValue::Boolean(*e)),
            ArrayValue::Byte(v) => v.get(index).map(|e| ScalarValue::Byte(*e)),
            ArrayValue::Short(v) => v.get(index).map(|e| ScalarValue::Short(*e)),
            ArrayValue::Int(v) => v.get(index).map(|e| ScalarValue::Int(*e)),
            ArrayValue::Long(v) => v.get(index).map(|e| ScalarValue::Long(*e)),
            ArrayValue::Float(v) => v.get(index).map(|e| ScalarValue::Float(*e)),
            ArrayValue::Double(v) => v.get(index).map(|e| ScalarValue::Double(*e)),
            ArrayValue::Str(v) => v.get(index).map(|e| ScalarValue::Str(e.clone())),
        }
    }
}

/// The decoded result of a channel request.
///
/// Results are immutable snapshots; once decoded they are safe to share
/// across threads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChannelResult {
    /// The request produced no value.
    Void,
    /// A single scalar value.
    Scalar(ScalarValue),
    /// A homogeneous scalar array.
    Array(ArrayValue),
    /// A labeled, equal-column-length table.
    Table(TableResult),
}

impl ChannelResult {
    /// The scalar payload, if any.
    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            ChannelResult::Scalar(v) => Some(v),
            _ => None,
        }
    }

    /// The array payload, if any.
    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            ChannelResult::Array(v) => Some(v),
            _ => None,
        }
    }

    /// The table payload, if any.
    pub fn as_table(&self) -> Option<&TableResult> {
        match self {
            ChannelResult::Table(v) => Some(v),
            _ => None,
        }
    }

    /// True for [`ChannelResult::Void`].
    pub fn is_void(&self) -> bool {
        matches!(self, ChannelResult::Void)
    }
}
