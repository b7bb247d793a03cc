//! Data models for the channel-link client library.
//!
//! Defines the native argument values, typed wire containers, data type
//! tags, and decoded response shapes that requests and responses travel
//! through.

pub mod data_type;
pub mod pv;
pub mod result;
pub mod table;
pub mod value;

#[cfg(test)]
mod tests;

pub use data_type::ChannelDataType;
pub use pv::{
    FieldSchema, PvArray, PvField, PvStructure, ScalarType, StructSchema, DEFAULT_SEGMENT_LEN,
    NTSCALARARRAY_ID, NTSCALAR_ID, NTTABLE_ID, NTURI_ID, NT_DESCRIPTIONS_NAME, NT_FIELD_NAME,
    NT_LABELS_NAME, NT_UNITS_NAME,
};
pub use result::{ArrayValue, ChannelResult, ScalarValue};
pub use table::TableResult;
pub use value::Value;
