//! Response decoding.
//!
//! [`unpack`] turns a typed response container back into a native
//! [`ChannelResult`], dispatching on the container's type identity: scalar,
//! scalar array, or table. Array fields are materialized through the chunk
//! walker so every element kind shares the same iteration path.

use std::collections::HashMap;

use crate::chunks::collect_all;
use crate::error::{ChannelLinkError, Result};
use crate::models::{
    ArrayValue, ChannelResult, PvField, PvStructure, ScalarValue, TableResult, NTSCALARARRAY_ID,
    NTSCALAR_ID, NTTABLE_ID, NT_DESCRIPTIONS_NAME, NT_FIELD_NAME, NT_LABELS_NAME, NT_UNITS_NAME,
};

/// Decode a response container into a native result.
///
/// An absent container decodes to [`ChannelResult::Void`], as does a
/// container with an unknown type identity (permissive default: unmapped
/// identities are not an error).
pub fn unpack(structure: Option<&PvStructure>) -> Result<ChannelResult> {
    let Some(structure) = structure else {
        return Ok(ChannelResult::Void);
    };
    match structure.id() {
        NTSCALAR_ID => scalar_result(structure),
        NTSCALARARRAY_ID => array_result(structure),
        NTTABLE_ID => table_result(structure).map(ChannelResult::Table),
        _ => Ok(ChannelResult::Void),
    }
}

fn scalar_result(structure: &PvStructure) -> Result<ChannelResult> {
    let scalar = match structure.field(NT_FIELD_NAME) {
        None => return Ok(ChannelResult::Void),
        Some(PvField::Boolean(v)) => ScalarValue::Boolean(*v),
        Some(PvField::Byte(v)) => ScalarValue::Byte(*v),
        Some(PvField::Short(v)) => ScalarValue::Short(*v),
        Some(PvField::Int(v)) => ScalarValue::Int(*v),
        Some(PvField::Long(v)) => ScalarValue::Long(*v),
        Some(PvField::Float(v)) => ScalarValue::Float(*v),
        Some(PvField::Double(v)) => ScalarValue::Double(*v),
        Some(PvField::String(v)) => ScalarValue::Str(v.clone()),
        Some(_) => return Ok(ChannelResult::Void),
    };
    Ok(ChannelResult::Scalar(scalar))
}

fn array_result(structure: &PvStructure) -> Result<ChannelResult> {
    match structure.field(NT_FIELD_NAME) {
        None => Ok(ChannelResult::Void),
        Some(field) => match field_to_array(field) {
            Some(array) => Ok(ChannelResult::Array(array)),
            None => Ok(ChannelResult::Void),
        },
    }
}

/// Materialize an array field into native values via the chunk walker.
fn field_to_array(field: &PvField) -> Option<ArrayValue> {
    match field {
        PvField::BooleanArray(a) => Some(ArrayValue::Boolean(collect_all(a))),
        PvField::ByteArray(a) => Some(ArrayValue::Byte(collect_all(a))),
        PvField::ShortArray(a) => Some(ArrayValue::Short(collect_all(a))),
        PvField::IntArray(a) => Some(ArrayValue::Int(collect_all(a))),
        PvField::LongArray(a) => Some(ArrayValue::Long(collect_all(a))),
        PvField::FloatArray(a) => Some(ArrayValue::Float(collect_all(a))),
        PvField::DoubleArray(a) => Some(ArrayValue::Double(collect_all(a))),
        PvField::StringArray(a) => Some(ArrayValue::Str(collect_all(a))),
        _ => None,
    }
}

/// Build a [`TableResult`] from a table container: labels (mandatory string
/// array), optional descriptions/units, and one array field per column
/// inside the `value` sub-structure.
fn table_result(structure: &PvStructure) -> Result<TableResult> {
    let labels = match structure.field(NT_LABELS_NAME) {
        Some(PvField::StringArray(a)) => collect_all(a),
        _ => {
            return Err(ChannelLinkError::MalformedTable(
                "labels field is missing or not a string array".to_string(),
            ))
        }
    };
    let descriptions = optional_string_array(structure, NT_DESCRIPTIONS_NAME);
    let units = optional_string_array(structure, NT_UNITS_NAME);

    let mut values = HashMap::new();
    if let Some(field) = structure.field(NT_FIELD_NAME) {
        let PvField::Structure(columns) = field else {
            return Err(ChannelLinkError::MalformedTable(
                "value field is not a structure".to_string(),
            ));
        };
        for (name, column) in columns.fields() {
            let Some(array) = field_to_array(column) else {
                return Err(ChannelLinkError::MalformedTableColumn(name.clone()));
            };
            values.insert(name.clone(), array);
        }
    }

    Ok(TableResult { labels, descriptions, units, values })
}

fn optional_string_array(structure: &PvStructure, name: &str) -> Vec<String> {
    match structure.field(name) {
        Some(PvField::StringArray(a)) => collect_all(a),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PvArray, PvStructure};

    fn scalar_container(field: PvField) -> PvStructure {
        let mut structure = PvStructure::new(NTSCALAR_ID);
        structure.push(NT_FIELD_NAME, field);
        structure
    }

    #[test]
    fn absent_container_decodes_to_void() {
        assert_eq!(unpack(None).unwrap(), ChannelResult::Void);
    }

    #[test]
    fn unknown_identity_decodes_to_void() {
        let structure = PvStructure::new("epics:nt/NTEnum:1.0");
        assert_eq!(unpack(Some(&structure)).unwrap(), ChannelResult::Void);
    }

    #[test]
    fn scalar_without_value_field_decodes_to_void() {
        let structure = PvStructure::new(NTSCALAR_ID);
        assert_eq!(unpack(Some(&structure)).unwrap(), ChannelResult::Void);
    }

    #[test]
    fn scalar_value_is_extracted() {
        let structure = scalar_container(PvField::Double(1.25));
        assert_eq!(
            unpack(Some(&structure)).unwrap(),
            ChannelResult::Scalar(ScalarValue::Double(1.25))
        );
    }

    #[test]
    fn scalar_array_is_collected_in_order() {
        let mut structure = PvStructure::new(NTSCALARARRAY_ID);
        structure.push(NT_FIELD_NAME, PvField::IntArray(PvArray::segmented(vec![1, 2, 3, 4, 5], 2)));

        assert_eq!(
            unpack(Some(&structure)).unwrap(),
            ChannelResult::Array(ArrayValue::Int(vec![1, 2, 3, 4, 5]))
        );
    }

    fn table_container() -> PvStructure {
        let mut columns = PvStructure::new("");
        columns.push("a", PvField::IntArray(PvArray::from_vec(vec![1, 2, 3])));
        columns.push(
            "b",
            PvField::StringArray(PvArray::from_vec(vec![
                "x".to_string(),
                "y".to_string(),
                "z".to_string(),
            ])),
        );

        let mut structure = PvStructure::new(NTTABLE_ID);
        structure.push(
            NT_LABELS_NAME,
            PvField::StringArray(PvArray::from_vec(vec!["a".to_string(), "b".to_string()])),
        );
        structure.push(NT_FIELD_NAME, PvField::Structure(columns));
        structure
    }

    #[test]
    fn table_columns_match_labels_and_row_count() {
        let ChannelResult::Table(table) = unpack(Some(&table_container())).unwrap() else {
            panic!("expected a table result");
        };

        assert_eq!(table.labels, vec!["a", "b"]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.get("a"), Some(&ArrayValue::Int(vec![1, 2, 3])));
        assert_eq!(
            table.get("b"),
            Some(&ArrayValue::Str(vec!["x".to_string(), "y".to_string(), "z".to_string()]))
        );
    }

    #[test]
    fn table_decodes_descriptions_and_units_when_present() {
        let mut structure = table_container();
        structure.push(
            NT_DESCRIPTIONS_NAME,
            PvField::StringArray(PvArray::from_vec(vec!["first".to_string(), "second".to_string()])),
        );
        structure.push(
            NT_UNITS_NAME,
            PvField::StringArray(PvArray::from_vec(vec!["mm".to_string(), "".to_string()])),
        );

        let ChannelResult::Table(table) = unpack(Some(&structure)).unwrap() else {
            panic!("expected a table result");
        };
        assert_eq!(table.descriptions, vec!["first", "second"]);
        assert_eq!(table.units, vec!["mm", ""]);
    }

    #[test]
    fn scalar_table_column_is_rejected() {
        let mut columns = PvStructure::new("");
        columns.push("good", PvField::IntArray(PvArray::from_vec(vec![1])));
        columns.push("bad", PvField::Int(42));

        let mut structure = PvStructure::new(NTTABLE_ID);
        structure.push(
            NT_LABELS_NAME,
            PvField::StringArray(PvArray::from_vec(vec!["good".to_string(), "bad".to_string()])),
        );
        structure.push(NT_FIELD_NAME, PvField::Structure(columns));

        let err = unpack(Some(&structure)).unwrap_err();
        assert_eq!(err, ChannelLinkError::MalformedTableColumn("bad".to_string()));
    }

    #[test]
    fn table_with_non_string_labels_is_rejected() {
        let mut structure = PvStructure::new(NTTABLE_ID);
        structure.push(NT_LABELS_NAME, PvField::IntArray(PvArray::from_vec(vec![1, 2])));

        let err = unpack(Some(&structure)).unwrap_err();
        assert!(matches!(err, ChannelLinkError::MalformedTable(_)));
    }
}
