//! Decoded tabular results.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::result::ArrayValue;

/// A decoded table: ordered column labels, optional parallel descriptions
/// and units, and a map from column name to its value array.
///
/// All columns have the same length (the row count). Tables are created only
/// by decoding a table response and are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableResult {
    /// Column labels in protocol order.
    pub labels: Vec<String>,
    /// Optional per-column descriptions, parallel to `labels` when present.
    pub descriptions: Vec<String>,
    /// Optional per-column units, parallel to `labels` when present.
    pub units: Vec<String>,
    /// Column name to column data.
    pub values: HashMap<String, ArrayValue>,
}

impl TableResult {
    /// The data for the named column.
    pub fn get(&self, column: &str) -> Option<&ArrayValue> {
        self.values.get(column)
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.values.len()
    }

    /// Number of rows, derived from any one column (0 if there are none).
    pub fn row_count(&self) -> usize {
        self.values.values().next().map_or(0, ArrayValue::len)
    }
}
