//! In-memory typed wire containers.
//!
//! Requests and responses travel as hierarchical, tagged containers: a
//! [`PvStructure`] carries a type identity string and an insertion-ordered
//! list of named [`PvField`]s. Array fields use [`PvArray`], a segmented
//! store that only exposes a length and a bulk-copy primitive; per-element
//! access goes through the chunk walker in [`crate::chunks`].
//!
//! Construction is two-phase: derive a [`StructSchema`] first, materialize a
//! default-initialized container from it, then populate the fields.

/// Normative type identity for request envelopes.
pub const NTURI_ID: &str = "epics:nt/NTURI:1.0";
/// Normative type identity for scalar responses.
pub const NTSCALAR_ID: &str = "epics:nt/NTScalar:1.0";
/// Normative type identity for scalar-array responses.
pub const NTSCALARARRAY_ID: &str = "epics:nt/NTScalarArray:1.0";
/// Normative type identity for table responses.
pub const NTTABLE_ID: &str = "epics:nt/NTTable:1.0";

/// Standard field name for the primary value of a response container.
pub const NT_FIELD_NAME: &str = "value";
/// Standard field name for table column labels.
pub const NT_LABELS_NAME: &str = "labels";
/// Standard field name for optional table column descriptions.
pub const NT_DESCRIPTIONS_NAME: &str = "descriptions";
/// Standard field name for optional table column units.
pub const NT_UNITS_NAME: &str = "units";

/// The eight scalar kinds a wire field can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
}

/// Shape of a single field in a request schema.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSchema {
    /// A single scalar value.
    Scalar(ScalarType),
    /// A homogeneous array of scalars.
    ScalarArray(ScalarType),
    /// A nested structure with its own sub-schema.
    Structure(StructSchema),
}

/// Ordered schema for a structure: field names paired with their shapes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructSchema {
    fields: Vec<(String, FieldSchema)>,
}

impl StructSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field to the schema.
    pub fn push(&mut self, name: impl Into<String>, field: FieldSchema) {
        self.fields.push((name.into(), field));
    }

    /// Look up a field shape by name.
    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    /// The fields in insertion order.
    pub fn fields(&self) -> &[(String, FieldSchema)] {
        &self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Segment capacity used when building arrays from contiguous data.
pub const DEFAULT_SEGMENT_LEN: usize = 4096;

/// A homogeneous wire array with segmented storage.
///
/// Consumers cannot index elements directly; they see only [`len`] and the
/// bulk [`copy_chunk`] primitive, which copies as many elements as the
/// current segment allows and reports the count. A copy that lands near a
/// segment boundary returns fewer elements than requested, so callers must
/// resume at the next offset (the chunk walker does this).
///
/// [`len`]: PvArray::len
/// [`copy_chunk`]: PvArray::copy_chunk
#[derive(Debug, Clone, Default)]
pub struct PvArray<T> {
    segments: Vec<Vec<T>>,
    len: usize,
}

impl<T: Clone> PvArray<T> {
    /// Build an array from contiguous data, splitting into segments of
    /// [`DEFAULT_SEGMENT_LEN`].
    pub fn from_vec(data: Vec<T>) -> Self {
        Self::segmented(data, DEFAULT_SEGMENT_LEN)
    }

    /// Build an array with an explicit segment capacity.
    pub fn segmented(data: Vec<T>, segment_len: usize) -> Self {
        assert!(segment_len > 0, "segment capacity must be non-zero");
        let len = data.len();
        let mut segments = Vec::new();
        let mut data = data;
        while data.len() > segment_len {
            let rest = data.split_off(segment_len);
            segments.push(data);
            data = rest;
        }
        if !data.is_empty() {
            segments.push(data);
        }
        Self { segments, len }
    }

    /// Total number of elements across all segments.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Copy elements starting at `offset` into `dest`.
    ///
    /// Copies at most `dest.len()` elements and never crosses a segment
    /// boundary, so the return count can be smaller than requested even when
    /// more data remains. Returns 0 once `offset` reaches the end.
    pub fn copy_chunk(&self, offset: usize, dest: &mut [T]) -> usize {
        if offset >= self.len || dest.is_empty() {
            return 0;
        }
        let mut seg_start = 0;
        for segment in &self.segments {
            if offset < seg_start + segment.len() {
                let local = offset - seg_start;
                let count = dest.len().min(segment.len() - local);
                dest[..count].clone_from_slice(&segment[local..local + count]);
                return count;
            }
            seg_start += segment.len();
        }
        0
    }
}

impl<T: Clone + PartialEq> PartialEq for PvArray<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }
        let a = self.segments.iter().flatten();
        let b = other.segments.iter().flatten();
        a.eq(b)
    }
}

/// A typed field inside a [`PvStructure`].
#[derive(Debug, Clone, PartialEq)]
pub enum PvField {
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    BooleanArray(PvArray<bool>),
    ByteArray(PvArray<i8>),
    ShortArray(PvArray<i16>),
    IntArray(PvArray<i32>),
    LongArray(PvArray<i64>),
    FloatArray(PvArray<f32>),
    DoubleArray(PvArray<f64>),
    StringArray(PvArray<String>),
    Structure(PvStructure),
}

impl PvField {
    /// Default value for a field of the given shape.
    pub fn default_for(schema: &FieldSchema) -> Self {
        match schema {
            FieldSchema::Scalar(ScalarType::Boolean) => PvField::Boolean(false),
            FieldSchema::Scalar(ScalarType::Byte) => PvField::Byte(0),
            FieldSchema::Scalar(ScalarType::Short) => PvField::Short(0),
            FieldSchema::Scalar(ScalarType::Int) => PvField::Int(0),
            FieldSchema::Scalar(ScalarType::Long) => PvField::Long(0),
            FieldSchema::Scalar(ScalarType::Float) => PvField::Float(0.0),
            FieldSchema::Scalar(ScalarType::Double) => PvField::Double(0.0),
            FieldSchema::Scalar(ScalarType::String) => PvField::String(String::new()),
            FieldSchema::ScalarArray(ScalarType::Boolean) => {
                PvField::BooleanArray(PvArray::default())
            }
            FieldSchema::ScalarArray(ScalarType::Byte) => PvField::ByteArray(PvArray::default()),
            FieldSchema::ScalarArray(ScalarType::Short) => PvField::ShortArray(PvArray::default()),
            FieldSchema::ScalarArray(ScalarType::Int) => PvField::IntArray(PvArray::default()),
            FieldSchema::ScalarArray(ScalarType::Long) => PvField::LongArray(PvArray::default()),
            FieldSchema::ScalarArray(ScalarType::Float) => PvField::FloatArray(PvArray::default()),
            FieldSchema::ScalarArray(ScalarType::Double) => {
                PvField::DoubleArray(PvArray::default())
            }
            FieldSchema::ScalarArray(ScalarType::String) => {
                PvField::StringArray(PvArray::default())
            }
            FieldSchema::Structure(sub) => PvField::Structure(PvStructure::from_schema("", sub)),
        }
    }
}

/// A tagged, hierarchical wire container: a type identity plus named fields
/// in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct PvStructure {
    id: String,
    fields: Vec<(String, PvField)>,
}

impl PvStructure {
    /// Create an empty container with the given type identity.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), fields: Vec::new() }
    }

    /// Materialize a default-initialized container conforming to `schema`.
    pub fn from_schema(id: impl Into<String>, schema: &StructSchema) -> Self {
        let mut structure = Self::new(id);
        for (name, field_schema) in schema.fields() {
            structure.push(name.clone(), PvField::default_for(field_schema));
        }
        structure
    }

    /// The container's type identity.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Append a named field.
    pub fn push(&mut self, name: impl Into<String>, field: PvField) {
        self.fields.push((name.into(), field));
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&PvField> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    /// Look up a field by name for mutation.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut PvField> {
        self.fields.iter_mut().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    /// The fields in insertion order.
    pub fn fields(&self) -> &[(String, PvField)] {
        &self.fields
    }
}
