// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Single-use Parquet encoder.
//!
//! A Parquet file is only valid once its footer is written, so the encoder
//! builds the whole file in memory, closes the writer, and only then copies
//! the bytes to the sink. A value that does not match the schema is
//! rejected before anything reaches the sink.

use std::io::Write;
use std::sync::Arc;

use parquet::data_type::{
    BoolType, ByteArray, ByteArrayType, DataType, DoubleType, FloatType, Int32Type, Int64Type,
};
use parquet::file::properties::WriterProperties;
use parquet::file::writer::{SerializedColumnWriter, SerializedFileWriter};
use parquet::schema::types::TypePtr;

use super::schema::{byte_content, FieldKind, Schema, SchemaField};
use super::CODEC_NAME;
use crate::core::{CodecError, CodecValue, DynValue, Result};
use crate::encoding::Encoder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EncoderState {
    Created,
    Closed,
}

/// One leaf column value with its definition level.
struct Leaf<'v> {
    kind: &'v FieldKind,
    value: Option<&'v CodecValue>,
    def_level: i16,
}

pub(super) struct ColumnarEncoder<'a> {
    sink: &'a mut dyn Write,
    schema: Arc<Schema>,
    message: TypePtr,
    properties: Arc<WriterProperties>,
    state: EncoderState,
}

impl<'a> ColumnarEncoder<'a> {
    pub(super) fn new(
        sink: &'a mut dyn Write,
        schema: Arc<Schema>,
        message: TypePtr,
        properties: Arc<WriterProperties>,
    ) -> Self {
        Self {
            sink,
            schema,
            message,
            properties,
            state: EncoderState::Created,
        }
    }

    fn write_file(&self, row: &CodecValue) -> Result<Vec<u8>> {
        let fields = row.as_struct();
        let mut leaves = Vec::with_capacity(self.schema.column_count());
        collect_leaves(self.schema.fields(), fields, 0, &mut leaves);

        let mut buf = Vec::new();
        let mut writer = SerializedFileWriter::new(
            &mut buf,
            Arc::clone(&self.message),
            Arc::clone(&self.properties),
        )
        .map_err(encode_error)?;

        let mut row_group = writer.next_row_group().map_err(encode_error)?;
        let mut leaves = leaves.iter();
        while let Some(mut column) = row_group.next_column().map_err(encode_error)? {
            let leaf = leaves.next().ok_or_else(|| {
                CodecError::encode(CODEC_NAME, "file has more columns than the schema")
            })?;
            write_leaf(&mut column, leaf)?;
            column.close().map_err(encode_error)?;
        }
        row_group.close().map_err(encode_error)?;
        writer.close().map_err(encode_error)?;

        Ok(buf)
    }
}

impl Encoder for ColumnarEncoder<'_> {
    fn encode(&mut self, value: &dyn DynValue) -> Result<()> {
        if self.state == EncoderState::Closed {
            return Err(CodecError::EncoderClosed {
                codec: CODEC_NAME.to_string(),
            });
        }
        self.state = EncoderState::Closed;

        let row = self.schema.to_row(value.to_codec_value()?);
        self.schema.check(&row)?;

        let bytes = self.write_file(&row)?;
        self.sink.write_all(&bytes)?;
        self.sink.flush()?;
        tracing::debug!(
            "wrote parquet file: {} bytes, {} columns",
            bytes.len(),
            self.schema.column_count()
        );
        Ok(())
    }
}

fn encode_error(err: parquet::errors::ParquetError) -> CodecError {
    CodecError::encode(CODEC_NAME, err.to_string())
}

/// Flatten a row into leaf columns in schema order.
///
/// `defined` counts the optional ancestors that are present. A missing group
/// leaves every column under it at the group's level.
fn collect_leaves<'v>(
    schema: &'v [SchemaField],
    fields: Option<&'v [(String, CodecValue)]>,
    defined: i16,
    out: &mut Vec<Leaf<'v>>,
) {
    for field in schema {
        let value = fields
            .and_then(|fields| fields.iter().find(|(name, _)| name == &field.name))
            .map(|(_, value)| value)
            .filter(|value| !value.is_null());
        match &field.kind {
            FieldKind::Group(children) => match value {
                Some(CodecValue::Struct(inner)) => {
                    collect_leaves(children, Some(inner), defined + 1, out)
                }
                _ => collect_leaves(children, None, defined, out),
            },
            kind => out.push(Leaf {
                kind,
                value,
                def_level: if value.is_some() { defined + 1 } else { defined },
            }),
        }
    }
}

fn write_leaf(column: &mut SerializedColumnWriter<'_>, leaf: &Leaf<'_>) -> Result<()> {
    let value = leaf.value;
    match leaf.kind {
        FieldKind::Boolean => write_typed::<BoolType>(
            column,
            value.and_then(|v| match v {
                CodecValue::Bool(b) => Some(*b),
                _ => None,
            }),
            leaf.def_level,
        ),
        FieldKind::Int32 => write_typed::<Int32Type>(
            column,
            value
                .and_then(CodecValue::as_i64)
                .and_then(|n| i32::try_from(n).ok()),
            leaf.def_level,
        ),
        FieldKind::Int64 => {
            write_typed::<Int64Type>(column, value.and_then(CodecValue::as_i64), leaf.def_level)
        }
        // Narrowing to the column width is intended.
        FieldKind::Float => write_typed::<FloatType>(
            column,
            value.and_then(CodecValue::as_f64).map(|n| n as f32),
            leaf.def_level,
        ),
        FieldKind::Double => {
            write_typed::<DoubleType>(column, value.and_then(CodecValue::as_f64), leaf.def_level)
        }
        FieldKind::Utf8 => write_typed::<ByteArrayType>(
            column,
            value.and_then(|v| v.as_str()).map(ByteArray::from),
            leaf.def_level,
        ),
        FieldKind::Binary => write_typed::<ByteArrayType>(
            column,
            value.and_then(byte_content).map(ByteArray::from),
            leaf.def_level,
        ),
        FieldKind::Null => write_typed::<Int32Type>(column, None, leaf.def_level),
        FieldKind::Group(_) => Err(CodecError::encode(
            CODEC_NAME,
            "group cannot be written as a leaf column",
        )),
    }
}

fn write_typed<T: DataType>(
    column: &mut SerializedColumnWriter<'_>,
    value: Option<T::T>,
    def_level: i16,
) -> Result<()> {
    let values: Vec<T::T> = value.into_iter().collect();
    column
        .typed::<T>()
        .write_batch(&values, Some(&[def_level]), None)
        .map_err(encode_error)?;
    Ok(())
}
