// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Columnar Codec
//!
//! Parquet codec bound to a fixed [`Schema`].
//!
//! Unlike the text codecs, a columnar codec must know the shape of its
//! values before it can write anything. The schema is traced from the value
//! type at construction time and every encode or decode through the codec is
//! checked against it. Optional fields get their columns whether or not the
//! sample holds them.
//!
//! Each encoder writes exactly one value as a complete file (one row group,
//! one row) and is closed afterwards. Each decoder produces exactly one
//! value.
//!
//! ## Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use pipecodec::encoding::{decode_from_slice, encode_to_vec, ColumnarCodec};
//!
//! let codec = ColumnarCodec::from_sample(&String::from("sample"))?;
//! let bytes = encode_to_vec(&codec, &String::from("hello"))?;
//! assert_eq!(&bytes[..4], b"PAR1");
//!
//! let mut decoded = String::new();
//! decode_from_slice(&codec, &bytes, &mut decoded)?;
//! assert_eq!(decoded, "hello");
//! # Ok(())
//! # }
//! ```

mod decoder;
mod encoder;
mod pages;
pub mod schema;
mod trace;

use std::io::{Read, Write};
use std::sync::Arc;

use bytes::Bytes;
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::file::reader::{FileReader, SerializedFileReader};
use parquet::format::KeyValue;
use parquet::schema::types::TypePtr;
use serde::de::DeserializeOwned;

pub use schema::{FieldKind, Schema, SchemaBuilder, SchemaField, WRAPPED_FIELD};

use crate::core::{CodecError, DynValue, Result};
use crate::encoding::{Codec, Decoder, Encoder};
use decoder::ColumnarDecoder;
use encoder::ColumnarEncoder;

pub(crate) const CODEC_NAME: &str = "parquet";

/// Footer key marking a file whose rows are wrapped scalar values.
pub const SCALAR_ROOT_KEY: &str = "pipecodec.scalar_root";

/// Parquet codec with a fixed schema.
#[derive(Debug, Clone)]
pub struct ColumnarCodec {
    schema: Arc<Schema>,
    message: TypePtr,
    properties: Arc<WriterProperties>,
}

impl ColumnarCodec {
    /// Create a codec whose schema is traced from `T`.
    ///
    /// # Errors
    ///
    /// Fails for types with no columnar form (sequences, maps, enums, empty
    /// structs).
    pub fn for_type<T: DeserializeOwned>() -> Result<Self> {
        let schema = Schema::from_kind(trace::trace_type::<T>()?)?;
        tracing::debug!(
            "traced parquet schema from {}: {} columns",
            std::any::type_name::<T>(),
            schema.column_count()
        );
        Self::with_schema(schema)
    }

    /// Create a codec whose schema follows the type of `sample`.
    ///
    /// The sample's type is traced, so absent optional fields still get
    /// their columns. Types that cannot be traced (such as [`CodecValue`]
    /// trees) fall back to inferring the schema from the sample's content.
    ///
    /// # Errors
    ///
    /// Fails if the sample holds shapes that have no columnar form (arrays,
    /// empty structs).
    ///
    /// [`CodecValue`]: crate::core::CodecValue
    pub fn from_sample(sample: &dyn DynValue) -> Result<Self> {
        let schema = match trace::trace_sample(sample).and_then(Schema::from_kind) {
            Ok(schema) => schema,
            Err(e) => {
                tracing::debug!(
                    "tracing {} failed, inferring schema from its value: {}",
                    sample.value_type_name(),
                    e
                );
                Schema::infer(&sample.to_codec_value()?)?
            }
        };
        tracing::debug!(
            "parquet schema for {}: {} columns",
            sample.value_type_name(),
            schema.column_count()
        );
        Self::with_schema(schema)
    }

    /// Create a codec from an explicit schema.
    pub fn with_schema(schema: Schema) -> Result<Self> {
        let message = schema.to_parquet()?;
        let mut properties = WriterProperties::builder()
            .set_dictionary_enabled(false)
            .set_statistics_enabled(EnabledStatistics::None);
        if schema.is_wrapped() {
            properties = properties.set_key_value_metadata(Some(vec![KeyValue::new(
                SCALAR_ROOT_KEY.to_string(),
                Some("true".to_string()),
            )]));
        }
        Ok(Self {
            schema: Arc::new(schema),
            message,
            properties: Arc::new(properties.build()),
        })
    }

    /// Create a codec from the schema stored in an existing file's footer.
    ///
    /// Files written from scalar values carry [`SCALAR_ROOT_KEY`] and decode
    /// back to the bare scalar.
    pub fn from_file_bytes(bytes: &[u8]) -> Result<Self> {
        let reader = SerializedFileReader::new(Bytes::copy_from_slice(bytes))
            .map_err(|e| CodecError::decode(CODEC_NAME, e.to_string()))?;
        let metadata = reader.metadata().file_metadata();
        let wrapped = metadata.key_value_metadata().is_some_and(|pairs| {
            pairs
                .iter()
                .any(|kv| kv.key == SCALAR_ROOT_KEY && kv.value.as_deref() == Some("true"))
        });
        let schema = Schema::from_parquet(metadata.schema(), wrapped)?;
        Self::with_schema(schema)
    }

    /// Schema bound to this codec.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl Codec for ColumnarCodec {
    fn name(&self) -> &str {
        CODEC_NAME
    }

    fn encoder<'a>(&self, sink: &'a mut dyn Write) -> Box<dyn Encoder + 'a> {
        Box::new(ColumnarEncoder::new(
            sink,
            Arc::clone(&self.schema),
            Arc::clone(&self.message),
            Arc::clone(&self.properties),
        ))
    }

    fn decoder<'a>(&self, source: &'a mut dyn Read) -> Box<dyn Decoder + 'a> {
        Box::new(ColumnarDecoder::new(source, Arc::clone(&self.schema)))
    }
}
