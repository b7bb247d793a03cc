//! Data type tags for channel requests and responses.
//!
//! [`ChannelDataType`] is the closed set of value kinds the protocol can
//! carry: void, eight scalar kinds, the matching array kinds, and tables.
//! `Char` and `CharArray` are pseudo-types with no wire representation of
//! their own; on the wire they travel as `Byte`/`ByteArray`, and the tag only
//! drives client-side reinterpretation of decoded bytes as glyphs.

use serde::{Deserialize, Serialize};

use super::pv::{FieldSchema, PvField, PvStructure, ScalarType, NTTABLE_ID, NT_FIELD_NAME};

/// Data type of a channel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelDataType {
    /// No value (setters that return nothing).
    Void,
    /// Boolean scalar.
    Boolean,
    /// 8-bit integer scalar.
    Byte,
    /// Single character; byte-backed pseudo-type.
    Char,
    /// 16-bit integer scalar.
    Short,
    /// 32-bit integer scalar.
    Integer,
    /// 64-bit integer scalar.
    Long,
    /// 32-bit float scalar.
    Float,
    /// 64-bit float scalar.
    Double,
    /// String scalar.
    String,
    /// Boolean array.
    BooleanArray,
    /// 8-bit integer array.
    ByteArray,
    /// Character array; byte-array-backed pseudo-type.
    CharArray,
    /// 16-bit integer array.
    ShortArray,
    /// 32-bit integer array.
    IntegerArray,
    /// 64-bit integer array.
    LongArray,
    /// 32-bit float array.
    FloatArray,
    /// 64-bit float array.
    DoubleArray,
    /// String array.
    StringArray,
    /// Tabular result with labeled columns.
    Table,
}

impl ChannelDataType {
    /// Determine the data type of a decoded response container.
    ///
    /// A table identity wins outright; otherwise the tag comes from the
    /// concrete type of the standard `value` field. An absent container, or
    /// a container without a `value` field, is `Void`.
    pub fn from_structure(structure: Option<&PvStructure>) -> Self {
        let Some(structure) = structure else {
            return ChannelDataType::Void;
        };
        Self::from_field(structure, NT_FIELD_NAME)
    }

    /// Determine the data type of the named field in a response container.
    pub fn from_field(structure: &PvStructure, field_name: &str) -> Self {
        if structure.id() == NTTABLE_ID {
            return ChannelDataType::Table;
        }
        match structure.field(field_name) {
            Some(PvField::Boolean(_)) => ChannelDataType::Boolean,
            Some(PvField::Byte(_)) => ChannelDataType::Byte,
            Some(PvField::Short(_)) => ChannelDataType::Short,
            Some(PvField::Int(_)) => ChannelDataType::Integer,
            Some(PvField::Long(_)) => ChannelDataType::Long,
            Some(PvField::Float(_)) => ChannelDataType::Float,
            Some(PvField::Double(_)) => ChannelDataType::Double,
            Some(PvField::String(_)) => ChannelDataType::String,
            Some(PvField::BooleanArray(_)) => ChannelDataType::BooleanArray,
            Some(PvField::ByteArray(_)) => ChannelDataType::ByteArray,
            Some(PvField::ShortArray(_)) => ChannelDataType::ShortArray,
            Some(PvField::IntArray(_)) => ChannelDataType::IntegerArray,
            Some(PvField::LongArray(_)) => ChannelDataType::LongArray,
            Some(PvField::FloatArray(_)) => ChannelDataType::FloatArray,
            Some(PvField::DoubleArray(_)) => ChannelDataType::DoubleArray,
            Some(PvField::StringArray(_)) => ChannelDataType::StringArray,
            Some(PvField::Structure(_)) | None => ChannelDataType::Void,
        }
    }

    /// Wire field shape used when a request schema carries this type.
    ///
    /// The `Char` pseudo-types map to their byte representations. `Void` and
    /// `Table` have no request field shape.
    pub fn field_schema(&self) -> Option<FieldSchema> {
        let scalar = |s| Some(FieldSchema::Scalar(s));
        let array = |s| Some(FieldSchema::ScalarArray(s));
        match self {
            ChannelDataType::Void | ChannelDataType::Table => None,
            ChannelDataType::Boolean => scalar(ScalarType::Boolean),
            ChannelDataType::Byte | ChannelDataType::Char => scalar(ScalarType::Byte),
            ChannelDataType::Short => scalar(ScalarType::Short),
            ChannelDataType::Integer => scalar(ScalarType::Int),
            ChannelDataType::Long => scalar(ScalarType::Long),
            ChannelDataType::Float => scalar(ScalarType::Float),
            ChannelDataType::Double => scalar(ScalarType::Double),
            ChannelDataType::String => scalar(ScalarType::String),
            ChannelDataType::BooleanArray => array(ScalarType::Boolean),
            ChannelDataType::ByteArray | ChannelDataType::CharArray => array(ScalarType::Byte),
            ChannelDataType::ShortArray => array(ScalarType::Short),
            ChannelDataType::IntegerArray => array(ScalarType::Int),
            ChannelDataType::LongArray => array(ScalarType::Long),
            ChannelDataType::FloatArray => array(ScalarType::Float),
            ChannelDataType::DoubleArray => array(ScalarType::Double),
            ChannelDataType::StringArray => array(ScalarType::String),
        }
    }

    /// Protocol-level name of this type, as sent in the reserved `TYPE`
    /// argument. The `Char` pseudo-types substitute their byte-backed names
    /// because the wire has no character representation.
    pub fn wire_name(&self) -> &'static str {
        match self {
            ChannelDataType::Void => "VOID",
            ChannelDataType::Boolean => "BOOLEAN",
            ChannelDataType::Byte | ChannelDataType::Char => "BYTE",
            ChannelDataType::Short => "SHORT",
            ChannelDataType::Integer => "INTEGER",
            ChannelDataType::Long => "LONG",
            ChannelDataType::Float => "FLOAT",
            ChannelDataType::Double => "DOUBLE",
            ChannelDataType::String => "STRING",
            ChannelDataType::BooleanArray => "BOOLEAN_ARRAY",
            ChannelDataType::ByteArray | ChannelDataType::CharArray => "BYTE_ARRAY",
            ChannelDataType::ShortArray => "SHORT_ARRAY",
            ChannelDataType::IntegerArray => "INTEGER_ARRAY",
            ChannelDataType::LongArray => "LONG_ARRAY",
            ChannelDataType::FloatArray => "FLOAT_ARRAY",
            ChannelDataType::DoubleArray => "DOUBLE_ARRAY",
            ChannelDataType::StringArray => "STRING_ARRAY",
            ChannelDataType::Table => "TABLE",
        }
    }

    /// True for the array tags, including the `CharArray` pseudo-type.
    pub fn is_array(&self) -> bool {
        matches!(
            self,
            ChannelDataType::BooleanArray
                | ChannelDataType::ByteArray
                | ChannelDataType::CharArray
                | ChannelDataType::ShortArray
                | ChannelDataType::IntegerArray
                | ChannelDataType::LongArray
                | ChannelDataType::FloatArray
                | ChannelDataType::DoubleArray
                | ChannelDataType::StringArray
        )
    }
}
