//! Argument building for channel requests.
//!
//! [`ArgumentBuilder`] accumulates named dynamic [`Value`]s and turns them
//! into a typed wire structure in two phases: schema derivation (infer a
//! [`FieldSchema`] per argument from the value's shape) and population
//! (write the actual data into a schema-conformant container). Both phases
//! apply the same numeric coercion rule, so they always agree on field types.
//!
//! # Numeric coercion
//!
//! A floating-point value that is numerically a whole number is downgraded
//! to an integer field (32-bit if it fits, else 64-bit). This lets callers
//! pass any numeric literal (`5.0` for a channel that wants an `INTEGER`)
//! without matching the channel's declared wire type. The trade-off: a
//! caller who wants a whole number sent as floating point cannot express
//! that; the rule always wins. For arrays the whole set must satisfy the
//! rule or no coercion happens.

use std::fmt;

use crate::error::{ChannelLinkError, Result};
use crate::models::{FieldSchema, PvArray, PvField, PvStructure, ScalarType, StructSchema, Value};

/// True if the value is numerically a 32-bit integer.
fn is_really_int(v: f64) -> bool {
    v < i32::MAX as f64 && v > i32::MIN as f64 && v % 1.0 == 0.0
}

/// True if the value is numerically a 64-bit integer. Checked only after
/// [`is_really_int`] fails.
fn is_really_long(v: f64) -> bool {
    v < i64::MAX as f64 && v > i64::MIN as f64 && v % 1.0 == 0.0
}

/// Whole-set check: every element is a float or double that independently
/// passes [`is_really_int`]. A single fractional or non-float element keeps
/// the array in floating point.
fn all_really_ints(items: &[Value]) -> bool {
    items.iter().all(|item| match item {
        Value::Float(f) => is_really_int(*f as f64),
        Value::Double(d) => is_really_int(*d),
        _ => false,
    })
}

/// Whole-set check for 64-bit range, mirroring [`all_really_ints`].
fn all_really_longs(items: &[Value]) -> bool {
    items.iter().all(|item| match item {
        Value::Float(f) => is_really_long(*f as f64),
        Value::Double(d) => is_really_long(*d),
        _ => false,
    })
}

/// Accumulates named arguments and builds the request query structure.
///
/// Arguments keep insertion order; adding a name twice replaces the earlier
/// value in place.
#[derive(Debug, Clone, Default)]
pub struct ArgumentBuilder {
    arguments: Vec<(String, Value)>,
}

impl ArgumentBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an argument, replacing any earlier value under the same name.
    pub fn add_argument(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        if let Some(slot) = self.arguments.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.arguments.push((name, value));
        }
    }

    /// True if an argument with this name has been added.
    pub fn contains(&self, name: &str) -> bool {
        self.arguments.iter().any(|(n, _)| n == name)
    }

    /// True if no arguments have been added.
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    /// Phase 1: derive the composite request schema, one field per argument
    /// in insertion order.
    pub fn build_schema(&self) -> Result<StructSchema> {
        Self::schema_for(&self.arguments)
    }

    /// Phase 2: write the argument data into a container materialized from
    /// the schema of [`build_schema`].
    pub fn populate(&self, structure: &mut PvStructure) -> Result<()> {
        Self::populate_fields(structure, &self.arguments)
    }

    fn schema_for(arguments: &[(String, Value)]) -> Result<StructSchema> {
        let mut schema = StructSchema::new();
        for (name, value) in arguments {
            schema.push(name.clone(), Self::field_for(value)?);
        }
        Ok(schema)
    }

    /// Infer the wire field shape for a single value.
    fn field_for(value: &Value) -> Result<FieldSchema> {
        let shape = match value {
            Value::Boolean(_) => FieldSchema::Scalar(ScalarType::Boolean),
            Value::Byte(_) => FieldSchema::Scalar(ScalarType::Byte),
            Value::Short(_) => FieldSchema::Scalar(ScalarType::Short),
            Value::Int(_) => FieldSchema::Scalar(ScalarType::Int),
            Value::Long(_) => FieldSchema::Scalar(ScalarType::Long),
            Value::Float(f) => Self::coerced_scalar(*f as f64, ScalarType::Float),
            Value::Double(d) => Self::coerced_scalar(*d, ScalarType::Double),
            Value::Char(_) | Value::Str(_) => FieldSchema::Scalar(ScalarType::String),
            Value::Array(items) => Self::array_field_for(items),
            Value::Struct(fields) => FieldSchema::Structure(Self::schema_for(fields)?),
        };
        Ok(shape)
    }

    fn coerced_scalar(v: f64, fallback: ScalarType) -> FieldSchema {
        if is_really_int(v) {
            FieldSchema::Scalar(ScalarType::Int)
        } else if is_really_long(v) {
            FieldSchema::Scalar(ScalarType::Long)
        } else {
            FieldSchema::Scalar(fallback)
        }
    }

    /// Element kind from the first element. An empty array defaults to a
    /// string array (documented permissive default); an array of characters
    /// is carried as a single concatenated string scalar.
    fn array_field_for(items: &[Value]) -> FieldSchema {
        match items.first() {
            None => FieldSchema::ScalarArray(ScalarType::String),
            Some(Value::Boolean(_)) => FieldSchema::ScalarArray(ScalarType::Boolean),
            Some(Value::Byte(_)) => FieldSchema::ScalarArray(ScalarType::Byte),
            Some(Value::Short(_)) => FieldSchema::ScalarArray(ScalarType::Short),
            Some(Value::Int(_)) => FieldSchema::ScalarArray(ScalarType::Int),
            Some(Value::Long(_)) => FieldSchema::ScalarArray(ScalarType::Long),
            Some(Value::Float(_)) => Self::coerced_array(items, ScalarType::Float),
            Some(Value::Double(_)) => Self::coerced_array(items, ScalarType::Double),
            Some(Value::Char(_)) => FieldSchema::Scalar(ScalarType::String),
            // Unrecognized element shapes fall back to a string array; the
            // mismatch surfaces as NonHomogeneousArray during population.
            Some(Value::Str(_)) | Some(Value::Array(_)) | Some(Value::Struct(_)) => {
                FieldSchema::ScalarArray(ScalarType::String)
            }
        }
    }

    fn coerced_array(items: &[Value], fallback: ScalarType) -> FieldSchema {
        if all_really_ints(items) {
            FieldSchema::ScalarArray(ScalarType::Int)
        } else if all_really_longs(items) {
            FieldSchema::ScalarArray(ScalarType::Long)
        } else {
            FieldSchema::ScalarArray(fallback)
        }
    }

    fn populate_fields(structure: &mut PvStructure, arguments: &[(String, Value)]) -> Result<()> {
        for (name, value) in arguments {
            let Some(field) = structure.field_mut(name) else {
                return Err(ChannelLinkError::UnknownField(name.clone()));
            };
            Self::populate_field(name, field, value)?;
        }
        Ok(())
    }

    /// Write one value into its destination field. The int/long arms accept
    /// float and double inputs because the coercion rule may have downgraded
    /// the field; truncation is exact since the rule guarantees no
    /// fractional part.
    fn populate_field(name: &str, field: &mut PvField, value: &Value) -> Result<()> {
        match (field, value) {
            (PvField::Boolean(slot), Value::Boolean(v)) => *slot = *v,
            (PvField::Byte(slot), Value::Byte(v)) => *slot = *v,
            (PvField::Short(slot), Value::Short(v)) => *slot = *v,
            (PvField::Int(slot), Value::Int(v)) => *slot = *v,
            (PvField::Int(slot), Value::Float(v)) => *slot = *v as i32,
            (PvField::Int(slot), Value::Double(v)) => *slot = *v as i32,
            (PvField::Long(slot), Value::Long(v)) => *slot = *v,
            (PvField::Long(slot), Value::Float(v)) => *slot = *v as i64,
            (PvField::Long(slot), Value::Double(v)) => *slot = *v as i64,
            (PvField::Float(slot), Value::Float(v)) => *slot = *v,
            (PvField::Double(slot), Value::Double(v)) => *slot = *v,
            (PvField::String(slot), Value::Str(v)) => *slot = v.clone(),
            (PvField::String(slot), Value::Char(v)) => *slot = v.to_string(),
            (PvField::String(slot), Value::Array(items)) => {
                *slot = Self::concat_chars(name, items)?;
            }
            (PvField::BooleanArray(slot), Value::Array(items)) => {
                *slot = PvArray::from_vec(Self::narrow(name, items, |item| match item {
                    Value::Boolean(v) => Some(*v),
                    _ => None,
                })?);
            }
            (PvField::ByteArray(slot), Value::Array(items)) => {
                *slot = PvArray::from_vec(Self::narrow(name, items, |item| match item {
                    Value::Byte(v) => Some(*v),
                    Value::Char(c) => Some((*c as u8) as i8),
                    _ => None,
                })?);
            }
            (PvField::ShortArray(slot), Value::Array(items)) => {
                *slot = PvArray::from_vec(Self::narrow(name, items, |item| match item {
                    Value::Short(v) => Some(*v),
                    _ => None,
                })?);
            }
            (PvField::IntArray(slot), Value::Array(items)) => {
                *slot = PvArray::from_vec(Self::narrow(name, items, |item| match item {
                    Value::Int(v) => Some(*v),
                    Value::Float(v) => Some(*v as i32),
                    Value::Double(v) => Some(*v as i32),
                    _ => None,
                })?);
            }
            (PvField::LongArray(slot), Value::Array(items)) => {
                *slot = PvArray::from_vec(Self::narrow(name, items, |item| match item {
                    Value::Long(v) => Some(*v),
                    Value::Float(v) => Some(*v as i64),
                    Value::Double(v) => Some(*v as i64),
                    _ => None,
                })?);
            }
            (PvField::FloatArray(slot), Value::Array(items)) => {
                *slot = PvArray::from_vec(Self::narrow(name, items, |item| match item {
                    Value::Float(v) => Some(*v),
                    // Cross-type elements go through their rendered form so
                    // the stored value is the nearest float to the literal,
                    // not to an intermediate cast.
                    other => other.to_string().parse::<f32>().ok(),
                })?);
            }
            (PvField::DoubleArray(slot), Value::Array(items)) => {
                *slot = PvArray::from_vec(Self::narrow(name, items, |item| match item {
                    Value::Double(v) => Some(*v),
                    other => other.to_string().parse::<f64>().ok(),
                })?);
            }
            (PvField::StringArray(slot), Value::Array(items)) => {
                *slot = PvArray::from_vec(Self::narrow(name, items, |item| match item {
                    Value::Str(v) => Some(v.clone()),
                    _ => None,
                })?);
            }
            (PvField::Structure(sub), Value::Struct(fields)) => {
                Self::populate_fields(sub, fields)?;
            }
            // Unreachable when the schema and population passes agree.
            _ => return Err(ChannelLinkError::UnknownField(name.to_string())),
        }
        Ok(())
    }

    /// Element-wise narrowing copy into a homogeneous buffer. Any element
    /// the converter rejects fails the whole argument.
    fn narrow<T>(
        name: &str,
        items: &[Value],
        convert: impl Fn(&Value) -> Option<T>,
    ) -> Result<Vec<T>> {
        items
            .iter()
            .map(|item| {
                convert(item).ok_or_else(|| ChannelLinkError::NonHomogeneousArray(name.to_string()))
            })
            .collect()
    }

    fn concat_chars(name: &str, items: &[Value]) -> Result<String> {
        items
            .iter()
            .map(|item| match item {
                Value::Char(c) => Ok(*c),
                _ => Err(ChannelLinkError::NonHomogeneousArray(name.to_string())),
            })
            .collect()
    }
}

impl fmt::Display for ArgumentBuilder {
    /// Renders `name=value, ...` for diagnostics.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        Ok(())
    }
}
