//! Model unit tests.

use serde_json::json;

use super::*;

#[test]
fn value_from_primitives() {
    assert_eq!(Value::from(true), Value::Boolean(true));
    assert_eq!(Value::from(7i8), Value::Byte(7));
    assert_eq!(Value::from(7i16), Value::Short(7));
    assert_eq!(Value::from(7i32), Value::Int(7));
    assert_eq!(Value::from(7i64), Value::Long(7));
    assert_eq!(Value::from(1.5f32), Value::Float(1.5));
    assert_eq!(Value::from(1.5f64), Value::Double(1.5));
    assert_eq!(Value::from('x'), Value::Char('x'));
    assert_eq!(Value::from("abc"), Value::Str("abc".to_string()));
}

#[test]
fn value_from_vec_builds_array() {
    assert_eq!(
        Value::from(vec![1, 2, 3]),
        Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );
}

#[test]
fn value_from_json_maps_number_widths() {
    assert_eq!(Value::from_json(&json!(42)).unwrap(), Value::Int(42));
    assert_eq!(Value::from_json(&json!(30_000_000_000i64)).unwrap(), Value::Long(30_000_000_000));
    assert_eq!(Value::from_json(&json!(2.5)).unwrap(), Value::Double(2.5));
}

#[test]
fn value_from_json_recurses_into_objects() {
    let value = Value::from_json(&json!({"name": "XCOR:LI31:41", "pos": [1, 2]})).unwrap();
    let Value::Struct(fields) = value else {
        panic!("expected a struct value");
    };
    assert_eq!(fields[0], ("name".to_string(), Value::Str("XCOR:LI31:41".to_string())));
    assert_eq!(fields[1], ("pos".to_string(), Value::Array(vec![Value::Int(1), Value::Int(2)])));
}

#[test]
fn value_from_json_rejects_null() {
    assert!(Value::from_json(&json!(null)).is_err());
}

#[test]
fn value_display_renders_arrays_and_structs() {
    let value = Value::Struct(vec![
        ("n".to_string(), Value::Int(1)),
        ("v".to_string(), Value::Array(vec![Value::Double(0.5), Value::Double(1.5)])),
    ]);
    assert_eq!(value.to_string(), "{n=1, v=[0.5, 1.5]}");
}

#[test]
fn value_serde_round_trip() {
    let value = Value::Array(vec![Value::Int(1), Value::Str("two".to_string())]);
    let encoded = serde_json::to_string(&value).unwrap();
    let decoded: Value = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, value);
}

#[test]
fn data_type_wire_names_substitute_char() {
    assert_eq!(ChannelDataType::Char.wire_name(), "BYTE");
    assert_eq!(ChannelDataType::CharArray.wire_name(), "BYTE_ARRAY");
    assert_eq!(ChannelDataType::Integer.wire_name(), "INTEGER");
    assert_eq!(ChannelDataType::IntegerArray.wire_name(), "INTEGER_ARRAY");
    assert_eq!(ChannelDataType::Table.wire_name(), "TABLE");
}

#[test]
fn data_type_field_schema_maps_char_to_byte() {
    assert_eq!(ChannelDataType::Char.field_schema(), Some(FieldSchema::Scalar(ScalarType::Byte)));
    assert_eq!(
        ChannelDataType::CharArray.field_schema(),
        Some(FieldSchema::ScalarArray(ScalarType::Byte))
    );
    assert_eq!(ChannelDataType::Void.field_schema(), None);
    assert_eq!(ChannelDataType::Table.field_schema(), None);
}

#[test]
fn data_type_is_array_covers_pseudo_type() {
    assert!(ChannelDataType::CharArray.is_array());
    assert!(ChannelDataType::DoubleArray.is_array());
    assert!(!ChannelDataType::Char.is_array());
    assert!(!ChannelDataType::Table.is_array());
}

#[test]
fn data_type_from_structure_dispatches_on_value_field() {
    let mut structure = PvStructure::new(NTSCALAR_ID);
    structure.push(NT_FIELD_NAME, PvField::Float(1.0));
    assert_eq!(ChannelDataType::from_structure(Some(&structure)), ChannelDataType::Float);
    assert_eq!(ChannelDataType::from_structure(None), ChannelDataType::Void);

    let table = PvStructure::new(NTTABLE_ID);
    assert_eq!(ChannelDataType::from_structure(Some(&table)), ChannelDataType::Table);
}

#[test]
fn pv_array_reports_length_across_segments() {
    let array = PvArray::segmented((0..10).collect::<Vec<i32>>(), 3);
    assert_eq!(array.len(), 10);
    assert!(!array.is_empty());
}

#[test]
fn pv_array_copy_stops_at_segment_boundary() {
    let array = PvArray::segmented(vec![1, 2, 3, 4, 5], 2);
    let mut buffer = [0i32; 5];

    // First copy is capped by the first segment.
    assert_eq!(array.copy_chunk(0, &mut buffer), 2);
    assert_eq!(&buffer[..2], &[1, 2]);

    // A copy starting mid-segment only drains that segment's tail.
    assert_eq!(array.copy_chunk(3, &mut buffer), 1);
    assert_eq!(buffer[0], 4);

    // Past the end.
    assert_eq!(array.copy_chunk(5, &mut buffer), 0);
}

#[test]
fn pv_array_equality_ignores_segmentation() {
    let a = PvArray::segmented(vec![1, 2, 3, 4], 2);
    let b = PvArray::from_vec(vec![1, 2, 3, 4]);
    assert_eq!(a, b);
}

#[test]
fn structure_from_schema_is_default_initialized_in_order() {
    let mut schema = StructSchema::new();
    schema.push("count", FieldSchema::Scalar(ScalarType::Int));
    schema.push("names", FieldSchema::ScalarArray(ScalarType::String));

    let structure = PvStructure::from_schema("", &schema);
    let names: Vec<&String> = structure.fields().iter().map(|(n, _)| n).collect();
    assert_eq!(names, ["count", "names"]);
    assert_eq!(structure.field("count"), Some(&PvField::Int(0)));
    assert!(matches!(structure.field("names"), Some(PvField::StringArray(a)) if a.is_empty()));
}

#[test]
fn scalar_value_accessors_widen() {
    assert_eq!(ScalarValue::Byte(3).as_long(), Some(3));
    assert_eq!(ScalarValue::Int(3).as_long(), Some(3));
    assert_eq!(ScalarValue::Float(0.5).as_double(), Some(0.5));
    assert_eq!(ScalarValue::Str("s".to_string()).as_long(), None);
    assert_eq!(ScalarValue::Boolean(true).as_boolean(), Some(true));
}

#[test]
fn array_value_indexing() {
    let array = ArrayValue::Double(vec![1.0, 2.0]);
    assert_eq!(array.len(), 2);
    assert_eq!(array.get(1), Some(ScalarValue::Double(2.0)));
    assert_eq!(array.get(2), None);
}

#[test]
fn table_row_count_comes_from_columns() {
    let mut table = TableResult::default();
    assert_eq!(table.row_count(), 0);
    table.labels = vec!["x".to_string()];
    table.values.insert("x".to_string(), ArrayValue::Int(vec![1, 2, 3]));
    assert_eq!(table.column_count(), 1);
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.get("x"), Some(&ArrayValue::Int(vec![1, 2, 3])));
    assert_eq!(table.get("y"), None);
}

#[test]
fn channel_result_accessors() {
    let scalar = ChannelResult::Scalar(ScalarValue::Int(9));
    assert_eq!(scalar.as_scalar(), Some(&ScalarValue::Int(9)));
    assert_eq!(scalar.as_array(), None);
    assert!(!scalar.is_void());
    assert!(ChannelResult::Void.is_void());
}

#[test]
fn channel_result_serde_round_trip() {
    let result = ChannelResult::Array(ArrayValue::Str(vec!["a".to_string(), "b".to_string()]));
    let encoded = serde_json::to_string(&result).unwrap();
    let decoded: ChannelResult = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, result);
}
