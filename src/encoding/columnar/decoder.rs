// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Single-use Parquet decoder.
//!
//! Parquet needs random access to reach its footer, so the source is drained
//! into memory when the decoder is created. A source that fails mid-read
//! leaves an empty buffer, which then fails to decode as a file.
//!
//! Page headers are validated before any row is read. The row reader still
//! runs under `catch_unwind`, so a file that slips past validation and makes
//! it panic is reported as a decode error.

use std::any::Any;
use std::io::Read;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use bytes::Bytes;
use parquet::file::reader::{FileReader, SerializedFileReader};
use parquet::record::{Field, Row};

use super::pages;
use super::schema::{FieldKind, Schema, SchemaField};
use super::CODEC_NAME;
use crate::core::{from_value, CodecError, CodecValue, DynValue, Result};
use crate::encoding::Decoder;

pub(super) struct ColumnarDecoder {
    schema: Arc<Schema>,
    /// `None` once a value was produced.
    data: Option<Bytes>,
}

impl ColumnarDecoder {
    pub(super) fn new(source: &mut dyn Read, schema: Arc<Schema>) -> Self {
        Self {
            schema,
            data: Some(drain(source)),
        }
    }
}

/// Read the whole source, or nothing if reading fails.
fn drain(source: &mut dyn Read) -> Bytes {
    let mut buf = Vec::new();
    if let Err(e) = source.read_to_end(&mut buf) {
        tracing::warn!(
            "parquet source read failed after {} bytes, decoding from an empty buffer: {}",
            buf.len(),
            e
        );
        buf.clear();
    }
    Bytes::from(buf)
}

impl Decoder for ColumnarDecoder {
    fn decode(&mut self, target: &mut dyn DynValue) -> Result<()> {
        let data = self.data.take().ok_or_else(|| CodecError::DecoderConsumed {
            codec: CODEC_NAME.to_string(),
        })?;
        let size = data.len();

        let schema = &self.schema;
        let value = catch_unwind(AssertUnwindSafe(|| read_first_row(data, schema)))
            .map_err(|payload| {
                CodecError::decode(
                    CODEC_NAME,
                    format!("malformed file: reader panicked: {}", panic_message(&*payload)),
                )
            })??;
        from_value(self.schema.from_row(value), target)?;
        tracing::debug!(
            "read parquet file: {} bytes into {}",
            size,
            target.value_type_name()
        );
        Ok(())
    }
}

/// Open `data`, check it against `schema` and read its first row.
fn read_first_row(data: Bytes, schema: &Schema) -> Result<CodecValue> {
    let reader = SerializedFileReader::new(data.clone()).map_err(decode_error)?;
    schema.check_parquet(reader.metadata().file_metadata().schema())?;
    pages::validate(&data, reader.metadata())?;

    let mut rows = reader.get_row_iter(None).map_err(decode_error)?;
    let row = match rows.next() {
        Some(row) => row.map_err(decode_error)?,
        None => return Err(CodecError::decode(CODEC_NAME, "file contains no rows")),
    };
    row_to_value(&row, schema.fields(), "")
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn decode_error(err: parquet::errors::ParquetError) -> CodecError {
    CodecError::decode(CODEC_NAME, err.to_string())
}

fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

fn row_to_value(row: &Row, schema: &[SchemaField], parent: &str) -> Result<CodecValue> {
    let mut fields = Vec::with_capacity(schema.len());
    for field in schema {
        let path = join(parent, &field.name);
        let cell = row
            .get_column_iter()
            .find(|(name, _)| *name == &field.name)
            .map(|(_, cell)| cell)
            .ok_or_else(|| CodecError::schema_mismatch(&path, "column missing from row"))?;
        fields.push((field.name.clone(), field_to_value(cell, &field.kind, &path)?));
    }
    Ok(CodecValue::Struct(fields))
}

fn field_to_value(cell: &Field, kind: &FieldKind, path: &str) -> Result<CodecValue> {
    Ok(match (cell, kind) {
        (Field::Null, _) => CodecValue::Null,
        (Field::Bool(b), FieldKind::Boolean) => CodecValue::Bool(*b),
        (Field::Int(n), FieldKind::Int32) => CodecValue::Int32(*n),
        (Field::Long(n), FieldKind::Int64) => CodecValue::Int64(*n),
        (Field::Float(n), FieldKind::Float) => CodecValue::Float32(*n),
        (Field::Double(n), FieldKind::Double) => CodecValue::Float64(*n),
        (Field::Str(s), FieldKind::Utf8) => CodecValue::String(s.clone()),
        (Field::Bytes(b), FieldKind::Binary) => CodecValue::Bytes(b.data().to_vec()),
        (Field::Group(row), FieldKind::Group(children)) => row_to_value(row, children, path)?,
        (other, kind) => {
            return Err(CodecError::schema_mismatch(
                path,
                format!("expected {kind}, file holds {other}"),
            ))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSource {
        served: bool,
    }

    impl Read for FailingSource {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.served {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "reset"));
            }
            self.served = true;
            buf[0] = b'P';
            Ok(1)
        }
    }

    #[test]
    fn test_failed_read_leaves_empty_buffer() {
        let mut source = FailingSource { served: false };
        assert!(drain(&mut source).is_empty());
    }

    #[test]
    fn test_drain_reads_everything() {
        let mut source: &[u8] = b"PAR1";
        assert_eq!(drain(&mut source).as_ref(), b"PAR1");
    }

    #[test]
    fn test_panic_message() {
        let payload = catch_unwind(|| panic!("page {}", 3)).unwrap_err();
        assert_eq!(panic_message(&*payload), "page 3");
        let payload = catch_unwind(|| std::panic::panic_any(5_u8)).unwrap_err();
        assert_eq!(panic_message(&*payload), "unknown panic");
    }

    #[test]
    fn test_field_kind_mismatch() {
        let err = field_to_value(&Field::Int(1), &FieldKind::Utf8, "s.g").unwrap_err();
        assert!(matches!(err, CodecError::SchemaMismatch { ref path, .. } if path == "s.g"));
        assert_eq!(
            field_to_value(&Field::Null, &FieldKind::Utf8, "s.g").unwrap(),
            CodecValue::Null
        );
    }
}
