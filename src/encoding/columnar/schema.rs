// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Columnar schema model.
//!
//! A [`Schema`] is an ordered list of named fields. It is traced from a
//! type, inferred from a sample value, or built explicitly, and then bound to
//! a codec instance; every value written or read through that instance is
//! checked against it.
//!
//! All columns are written as Parquet `OPTIONAL`, so absent values
//! round-trip as absent rather than as a sentinel.

use std::fmt;
use std::sync::Arc;

use parquet::basic::{ConvertedType, LogicalType, Repetition, Type as PhysicalType};
use parquet::schema::types::{Type, TypePtr};
use serde::Serialize;

use crate::core::{CodecError, CodecValue, Result};

/// Root field name used when the sample value is not a struct.
pub const WRAPPED_FIELD: &str = "value";

/// Column kind of a schema field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// `bool`
    Boolean,
    /// `i8`, `i16`, `i32`, `u8`, `u16`
    Int32,
    /// `i64`, `u32`, and `u64` values up to `i64::MAX`
    Int64,
    /// `f32`
    Float,
    /// `f64`
    Double,
    /// UTF-8 string
    Utf8,
    /// Raw bytes
    Binary,
    /// Nested struct
    Group(Vec<SchemaField>),
    /// Unit, or a field whose inferred sample value was absent; holds only
    /// absent values
    Null,
}

impl FieldKind {
    /// Parquet physical type used to store this kind, `None` for groups.
    pub fn physical_type(&self) -> Option<PhysicalType> {
        match self {
            FieldKind::Boolean => Some(PhysicalType::BOOLEAN),
            FieldKind::Int32 | FieldKind::Null => Some(PhysicalType::INT32),
            FieldKind::Int64 => Some(PhysicalType::INT64),
            FieldKind::Float => Some(PhysicalType::FLOAT),
            FieldKind::Double => Some(PhysicalType::DOUBLE),
            FieldKind::Utf8 | FieldKind::Binary => Some(PhysicalType::BYTE_ARRAY),
            FieldKind::Group(_) => None,
        }
    }

    /// Short lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Boolean => "boolean",
            FieldKind::Int32 => "int32",
            FieldKind::Int64 => "int64",
            FieldKind::Float => "float",
            FieldKind::Double => "double",
            FieldKind::Utf8 => "utf8",
            FieldKind::Binary => "binary",
            FieldKind::Group(_) => "group",
            FieldKind::Null => "null",
        }
    }

    /// True if `value` can be stored in a column of this kind.
    ///
    /// Integers are accepted by any integer column they fit and by float
    /// columns.
    fn accepts(&self, value: &CodecValue) -> bool {
        match (self, value) {
            (_, CodecValue::Null) => true,
            (FieldKind::Boolean, CodecValue::Bool(_)) => true,
            (FieldKind::Int32, v) => v.as_i64().is_some_and(|n| i32::try_from(n).is_ok()),
            (FieldKind::Int64, v) => v.as_i64().is_some(),
            (FieldKind::Float | FieldKind::Double, v) => v.as_f64().is_some(),
            (FieldKind::Utf8, CodecValue::String(_)) => true,
            (FieldKind::Binary, v) => byte_content(v).is_some(),
            _ => false,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named field of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaField {
    /// Field name
    pub name: String,
    /// Column kind
    pub kind: FieldKind,
}

impl SchemaField {
    /// Create a field.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Structural description of the values a columnar codec handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    fields: Vec<SchemaField>,
    wrapped: bool,
}

impl Schema {
    /// Infer a schema from a sample value.
    ///
    /// Struct samples map field-for-field. Any other sample is stored as a
    /// single field named [`WRAPPED_FIELD`].
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Unsupported` for arrays and `CodecError::InvalidSchema`
    /// for structs without fields.
    pub fn infer(sample: &CodecValue) -> Result<Self> {
        match sample {
            CodecValue::Struct(fields) => Ok(Self {
                fields: infer_fields(fields, "")?,
                wrapped: false,
            }),
            scalar => Ok(Self {
                fields: vec![SchemaField::new(
                    WRAPPED_FIELD,
                    infer_kind(scalar, WRAPPED_FIELD)?,
                )],
                wrapped: true,
            }),
        }
    }

    /// Build a schema from the traced kind of a whole value.
    ///
    /// A group maps field-for-field; any other kind is stored as a single
    /// field named [`WRAPPED_FIELD`].
    pub fn from_kind(kind: FieldKind) -> Result<Self> {
        match kind {
            FieldKind::Group(fields) => {
                validate_fields(&fields, "")?;
                Ok(Self {
                    fields,
                    wrapped: false,
                })
            }
            scalar => Ok(Self {
                fields: vec![SchemaField::new(WRAPPED_FIELD, scalar)],
                wrapped: true,
            }),
        }
    }

    /// Read a schema back from a Parquet root message type.
    ///
    /// `wrapped` marks a file written from scalar values; its root must then
    /// hold exactly one [`WRAPPED_FIELD`] column.
    pub fn from_parquet(root: &Type, wrapped: bool) -> Result<Self> {
        if !root.is_group() {
            return Err(CodecError::invalid_schema(
                root.name(),
                "root of a parquet schema must be a group",
            ));
        }
        let fields = fields_from_parquet(root.get_fields(), "")?;
        if wrapped
            && !matches!(fields.as_slice(), [field] if field.name == WRAPPED_FIELD && !matches!(field.kind, FieldKind::Group(_)))
        {
            return Err(CodecError::invalid_schema(
                root.name(),
                format!("scalar file must hold a single '{WRAPPED_FIELD}' column"),
            ));
        }
        Ok(Self { fields, wrapped })
    }

    /// Top-level fields.
    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    /// True if values are scalars stored under [`WRAPPED_FIELD`].
    pub fn is_wrapped(&self) -> bool {
        self.wrapped
    }

    /// Number of leaf columns.
    pub fn column_count(&self) -> usize {
        fn count(fields: &[SchemaField]) -> usize {
            fields
                .iter()
                .map(|field| match &field.kind {
                    FieldKind::Group(children) => count(children),
                    _ => 1,
                })
                .sum()
        }
        count(&self.fields)
    }

    /// Check that `value` has this schema's shape.
    ///
    /// The value must already be in row form (see [`Schema::to_row`]).
    pub fn check(&self, value: &CodecValue) -> Result<()> {
        match value {
            CodecValue::Struct(fields) => check_fields(&self.fields, fields, ""),
            other => Err(CodecError::schema_mismatch(
                "",
                format!("expected struct, found {}", other.type_name()),
            )),
        }
    }

    /// Put a value into row form.
    pub fn to_row(&self, value: CodecValue) -> CodecValue {
        if self.wrapped {
            CodecValue::Struct(vec![(WRAPPED_FIELD.to_string(), value)])
        } else {
            value
        }
    }

    /// Take a value out of row form.
    pub fn from_row(&self, row: CodecValue) -> CodecValue {
        match row {
            CodecValue::Struct(mut fields) if self.wrapped => fields
                .iter()
                .position(|(name, _)| name == WRAPPED_FIELD)
                .map(|index| fields.swap_remove(index).1)
                .unwrap_or(CodecValue::Null),
            row => row,
        }
    }

    /// Build the Parquet message type for this schema.
    pub fn to_parquet(&self) -> Result<TypePtr> {
        let fields = self
            .fields
            .iter()
            .map(field_to_parquet)
            .collect::<Result<Vec<_>>>()?;
        Type::group_type_builder("schema")
            .with_fields(fields)
            .build()
            .map(Arc::new)
            .map_err(|e| CodecError::invalid_schema("schema", e.to_string()))
    }

    /// Check that a file's Parquet message type stores this schema.
    pub fn check_parquet(&self, root: &Type) -> Result<()> {
        if !root.is_group() {
            return Err(CodecError::schema_mismatch("", "file root is not a group"));
        }
        check_parquet_fields(&self.fields, root.get_fields(), "")
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_fields(
            f: &mut fmt::Formatter<'_>,
            fields: &[SchemaField],
            indent: usize,
        ) -> fmt::Result {
            for field in fields {
                match &field.kind {
                    FieldKind::Group(children) => {
                        writeln!(f, "{:indent$}optional group {} {{", "", field.name)?;
                        write_fields(f, children, indent + 2)?;
                        writeln!(f, "{:indent$}}}", "")?;
                    }
                    kind => writeln!(f, "{:indent$}optional {} {};", "", kind, field.name)?,
                }
            }
            Ok(())
        }

        writeln!(f, "schema {{")?;
        write_fields(f, &self.fields, 2)?;
        write!(f, "}}")
    }
}

/// Builder for explicit schemas.
///
/// # Example
///
/// ```
/// use pipecodec::encoding::columnar::{FieldKind, SchemaBuilder};
///
/// let schema = SchemaBuilder::new()
///     .field("i", FieldKind::Int64)
///     .group("s", |s| s.field("g", FieldKind::Utf8))
///     .build()
///     .unwrap();
/// assert_eq!(schema.column_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<SchemaField>,
}

impl SchemaBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field.
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(SchemaField::new(name, kind));
        self
    }

    /// Add a nested group built by `build`.
    pub fn group(
        mut self,
        name: impl Into<String>,
        build: impl FnOnce(SchemaBuilder) -> SchemaBuilder,
    ) -> Self {
        let children = build(SchemaBuilder::new()).fields;
        self.fields
            .push(SchemaField::new(name, FieldKind::Group(children)));
        self
    }

    /// Validate and build the schema.
    pub fn build(self) -> Result<Schema> {
        validate_fields(&self.fields, "")?;
        Ok(Schema {
            fields: self.fields,
            wrapped: false,
        })
    }
}

fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

/// Bytes held by a binary value: raw bytes, or an array of octets as
/// produced by the value bridge.
pub(super) fn byte_content(value: &CodecValue) -> Option<Vec<u8>> {
    match value {
        CodecValue::Bytes(bytes) => Some(bytes.clone()),
        CodecValue::Array(items) => items
            .iter()
            .map(|item| item.as_i64().and_then(|n| u8::try_from(n).ok()))
            .collect(),
        _ => None,
    }
}

fn infer_kind(value: &CodecValue, path: &str) -> Result<FieldKind> {
    Ok(match value {
        CodecValue::Bool(_) => FieldKind::Boolean,
        CodecValue::Int8(_)
        | CodecValue::Int16(_)
        | CodecValue::Int32(_)
        | CodecValue::UInt8(_)
        | CodecValue::UInt16(_) => FieldKind::Int32,
        CodecValue::Int64(_) | CodecValue::UInt32(_) | CodecValue::UInt64(_) => FieldKind::Int64,
        CodecValue::Float32(_) => FieldKind::Float,
        CodecValue::Float64(_) => FieldKind::Double,
        CodecValue::String(_) => FieldKind::Utf8,
        CodecValue::Bytes(_) => FieldKind::Binary,
        CodecValue::Struct(fields) => FieldKind::Group(infer_fields(fields, path)?),
        CodecValue::Null => FieldKind::Null,
        CodecValue::Array(_) => {
            return Err(CodecError::unsupported(format!(
                "array field '{path}' in columnar schema"
            )))
        }
    })
}

fn infer_fields(fields: &[(String, CodecValue)], parent: &str) -> Result<Vec<SchemaField>> {
    if fields.is_empty() {
        return Err(CodecError::invalid_schema(
            parent,
            "struct has no fields to store as columns",
        ));
    }
    fields
        .iter()
        .map(|(name, value)| {
            let path = join(parent, name);
            Ok(SchemaField::new(name.clone(), infer_kind(value, &path)?))
        })
        .collect()
}

fn validate_fields(fields: &[SchemaField], parent: &str) -> Result<()> {
    if fields.is_empty() {
        return Err(CodecError::invalid_schema(parent, "group has no fields"));
    }
    for (index, field) in fields.iter().enumerate() {
        let path = join(parent, &field.name);
        if field.name.is_empty() {
            return Err(CodecError::invalid_schema(path, "field name is empty"));
        }
        if fields[..index].iter().any(|other| other.name == field.name) {
            return Err(CodecError::invalid_schema(path, "duplicate field name"));
        }
        if let FieldKind::Group(children) = &field.kind {
            validate_fields(children, &path)?;
        }
    }
    Ok(())
}

fn check_fields(
    schema: &[SchemaField],
    fields: &[(String, CodecValue)],
    parent: &str,
) -> Result<()> {
    if let Some((extra, _)) = fields
        .iter()
        .find(|(name, _)| !schema.iter().any(|field| &field.name == name))
    {
        return Err(CodecError::schema_mismatch(
            join(parent, extra),
            "field is not in the schema",
        ));
    }
    for field in schema {
        let path = join(parent, &field.name);
        let value = fields
            .iter()
            .find(|(name, _)| name == &field.name)
            .map(|(_, value)| value)
            .ok_or_else(|| CodecError::schema_mismatch(&path, "field is missing"))?;
        match (&field.kind, value) {
            (_, CodecValue::Null) => {}
            (FieldKind::Group(children), CodecValue::Struct(inner)) => {
                check_fields(children, inner, &path)?
            }
            (kind, value) if kind.accepts(value) => {}
            (kind, value) => {
                return Err(CodecError::schema_mismatch(
                    path,
                    format!("expected {kind}, found {}", value.type_name()),
                ))
            }
        }
    }
    Ok(())
}

fn field_to_parquet(field: &SchemaField) -> Result<TypePtr> {
    let built = match (&field.kind, field.kind.physical_type()) {
        (FieldKind::Group(children), _) => {
            let children = children
                .iter()
                .map(field_to_parquet)
                .collect::<Result<Vec<_>>>()?;
            Type::group_type_builder(&field.name)
                .with_repetition(Repetition::OPTIONAL)
                .with_fields(children)
                .build()
        }
        (kind, Some(physical)) => {
            let builder = Type::primitive_type_builder(&field.name, physical)
                .with_repetition(Repetition::OPTIONAL);
            let builder = if *kind == FieldKind::Utf8 {
                builder.with_converted_type(ConvertedType::UTF8)
            } else {
                builder
            };
            builder.build()
        }
        (kind, None) => {
            return Err(CodecError::invalid_schema(
                &field.name,
                format!("{kind} has no physical type"),
            ))
        }
    };
    built
        .map(Arc::new)
        .map_err(|e| CodecError::invalid_schema(&field.name, e.to_string()))
}

fn fields_from_parquet(types: &[TypePtr], parent: &str) -> Result<Vec<SchemaField>> {
    types
        .iter()
        .map(|ty| {
            let name = ty.name();
            let path = join(parent, name);
            let info = ty.get_basic_info();
            if info.has_repetition() && info.repetition() == Repetition::REPEATED {
                return Err(CodecError::unsupported(format!(
                    "repeated field '{path}' in columnar schema"
                )));
            }
            let kind = if ty.is_group() {
                FieldKind::Group(fields_from_parquet(ty.get_fields(), &path)?)
            } else {
                match ty.get_physical_type() {
                    PhysicalType::BOOLEAN => FieldKind::Boolean,
                    PhysicalType::INT32 => FieldKind::Int32,
                    PhysicalType::INT64 => FieldKind::Int64,
                    PhysicalType::FLOAT => FieldKind::Float,
                    PhysicalType::DOUBLE => FieldKind::Double,
                    PhysicalType::BYTE_ARRAY
                        if info.converted_type() == ConvertedType::UTF8
                            || info.logical_type() == Some(LogicalType::String) =>
                    {
                        FieldKind::Utf8
                    }
                    PhysicalType::BYTE_ARRAY => FieldKind::Binary,
                    other => {
                        return Err(CodecError::unsupported(format!(
                            "physical type {other} of field '{path}'"
                        )))
                    }
                }
            };
            Ok(SchemaField::new(name, kind))
        })
        .collect()
}

fn check_parquet_fields(schema: &[SchemaField], types: &[TypePtr], parent: &str) -> Result<()> {
    if schema.len() != types.len() {
        return Err(CodecError::schema_mismatch(
            if parent.is_empty() { "<root>" } else { parent },
            format!(
                "expected {} fields, file has {}",
                schema.len(),
                types.len()
            ),
        ));
    }
    for (field, ty) in schema.iter().zip(types) {
        let path = join(parent, &field.name);
        if field.name != ty.name() {
            return Err(CodecError::schema_mismatch(
                path,
                format!("file has field '{}' here", ty.name()),
            ));
        }
        match (&field.kind, ty.is_group()) {
            (FieldKind::Group(children), true) => {
                check_parquet_fields(children, ty.get_fields(), &path)?
            }
            (FieldKind::Group(_), false) => {
                return Err(CodecError::schema_mismatch(
                    path,
                    "expected group, file has a primitive column",
                ))
            }
            (kind, true) => {
                return Err(CodecError::schema_mismatch(
                    path,
                    format!("expected {kind}, file has a group"),
                ))
            }
            (kind, false) => {
                let physical = ty.get_physical_type();
                if kind.physical_type() != Some(physical) {
                    return Err(CodecError::schema_mismatch(
                        path,
                        format!("expected {kind}, file stores {physical}"),
                    ));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CodecValue {
        CodecValue::Struct(vec![
            ("i".into(), CodecValue::Int64(100)),
            (
                "s".into(),
                CodecValue::Struct(vec![("g".into(), CodecValue::String("100".into()))]),
            ),
        ])
    }

    #[test]
    fn test_infer_nested() {
        let schema = Schema::infer(&sample()).unwrap();
        let expected = SchemaBuilder::new()
            .field("i", FieldKind::Int64)
            .group("s", |s| s.field("g", FieldKind::Utf8))
            .build()
            .unwrap();
        assert_eq!(schema, expected);
        assert_eq!(schema.column_count(), 2);
        assert!(!schema.is_wrapped());
    }

    #[test]
    fn test_infer_scalar_is_wrapped() {
        let schema = Schema::infer(&CodecValue::Int64(5)).unwrap();
        assert!(schema.is_wrapped());
        assert_eq!(schema.fields()[0].name, WRAPPED_FIELD);

        let row = schema.to_row(CodecValue::Int64(9));
        schema.check(&row).unwrap();
        assert_eq!(schema.from_row(row), CodecValue::Int64(9));
    }

    #[test]
    fn test_infer_rejects_arrays_and_empty_structs() {
        let array = CodecValue::Struct(vec![("a".into(), CodecValue::Array(vec![]))]);
        assert!(matches!(
            Schema::infer(&array),
            Err(CodecError::Unsupported { .. })
        ));
        assert!(matches!(
            Schema::infer(&CodecValue::Struct(vec![])),
            Err(CodecError::InvalidSchema { .. })
        ));
    }

    #[test]
    fn test_check_accepts_absent_values() {
        let schema = Schema::infer(&sample()).unwrap();
        let value = CodecValue::Struct(vec![
            ("i".into(), CodecValue::Int64(1)),
            ("s".into(), CodecValue::Null),
        ]);
        schema.check(&value).unwrap();
    }

    #[test]
    fn test_check_rejects_incompatible_shapes() {
        let schema = Schema::infer(&sample()).unwrap();

        let wrong_type = CodecValue::Struct(vec![
            ("i".into(), CodecValue::String("x".into())),
            ("s".into(), CodecValue::Null),
        ]);
        let err = schema.check(&wrong_type).unwrap_err();
        assert!(matches!(err, CodecError::SchemaMismatch { ref path, .. } if path == "i"));

        let extra = CodecValue::Struct(vec![
            ("i".into(), CodecValue::Int64(1)),
            ("s".into(), CodecValue::Null),
            ("z".into(), CodecValue::Bool(true)),
        ]);
        let err = schema.check(&extra).unwrap_err();
        assert!(matches!(err, CodecError::SchemaMismatch { ref path, .. } if path == "z"));

        let nested = CodecValue::Struct(vec![
            ("i".into(), CodecValue::Int64(1)),
            (
                "s".into(),
                CodecValue::Struct(vec![("g".into(), CodecValue::Int32(1))]),
            ),
        ]);
        let err = schema.check(&nested).unwrap_err();
        assert!(matches!(err, CodecError::SchemaMismatch { ref path, .. } if path == "s.g"));
    }

    #[test]
    fn test_null_kind_only_accepts_null() {
        let schema = Schema::infer(&CodecValue::Struct(vec![(
            "s".into(),
            CodecValue::Null,
        )]))
        .unwrap();
        assert_eq!(schema.fields()[0].kind, FieldKind::Null);
        let value = CodecValue::Struct(vec![("s".into(), CodecValue::Int32(1))]);
        assert!(schema.check(&value).is_err());
    }

    #[test]
    fn test_integer_ranges() {
        assert!(FieldKind::Int64.accepts(&CodecValue::UInt64(10)));
        assert!(!FieldKind::Int64.accepts(&CodecValue::UInt64(u64::MAX)));
        assert!(FieldKind::Int32.accepts(&CodecValue::Int64(65_000)));
        assert!(!FieldKind::Int32.accepts(&CodecValue::Int64(i64::from(i32::MAX) + 1)));
        assert!(FieldKind::Float.accepts(&CodecValue::Int64(2)));
        assert!(!FieldKind::Double.accepts(&CodecValue::String("2".into())));
    }

    #[test]
    fn test_binary_accepts_octet_arrays() {
        let octets = CodecValue::Array(vec![CodecValue::Int64(1), CodecValue::Int64(255)]);
        assert_eq!(byte_content(&octets), Some(vec![1, 255]));
        assert!(FieldKind::Binary.accepts(&octets));
        let wide = CodecValue::Array(vec![CodecValue::Int64(256)]);
        assert!(!FieldKind::Binary.accepts(&wide));
    }

    #[test]
    fn test_from_kind() {
        let schema = Schema::from_kind(FieldKind::Utf8).unwrap();
        assert!(schema.is_wrapped());
        assert_eq!(schema.fields()[0], SchemaField::new(WRAPPED_FIELD, FieldKind::Utf8));
        assert!(matches!(
            Schema::from_kind(FieldKind::Group(vec![])),
            Err(CodecError::InvalidSchema { .. })
        ));
    }

    #[test]
    fn test_builder_validation() {
        assert!(SchemaBuilder::new().build().is_err());
        assert!(SchemaBuilder::new()
            .field("a", FieldKind::Boolean)
            .field("a", FieldKind::Int32)
            .build()
            .is_err());
        assert!(SchemaBuilder::new().group("g", |g| g).build().is_err());
    }

    #[test]
    fn test_parquet_type_round_trip() {
        let schema = Schema::infer(&sample()).unwrap();
        let message = schema.to_parquet().unwrap();
        schema.check_parquet(&message).unwrap();
        assert_eq!(Schema::from_parquet(&message, false).unwrap(), schema);
        assert!(Schema::from_parquet(&message, true).is_err());

        let scalar = Schema::infer(&CodecValue::Int64(1)).unwrap();
        let message = scalar.to_parquet().unwrap();
        assert_eq!(Schema::from_parquet(&message, true).unwrap(), scalar);
    }

    #[test]
    fn test_check_parquet_detects_drift() {
        let schema = Schema::infer(&sample()).unwrap();
        let other = SchemaBuilder::new()
            .field("i", FieldKind::Int64)
            .field("s", FieldKind::Null)
            .build()
            .unwrap();
        let err = schema.check_parquet(&other.to_parquet().unwrap()).unwrap_err();
        assert!(matches!(err, CodecError::SchemaMismatch { ref path, .. } if path == "s"));
    }

    #[test]
    fn test_display() {
        let schema = Schema::infer(&sample()).unwrap();
        assert_eq!(
            schema.to_string(),
            "schema {\n  optional int64 i;\n  optional group s {\n    optional utf8 g;\n  }\n}"
        );
    }
}
