// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Pipecodec
//!
//! Pluggable serialization layer for message pipelines.
//!
//! This library encodes values to bytes and decodes bytes back into values
//! whose type is chosen by name at configuration time:
//! - **Codecs** for JSON, YAML and Parquet behind one interface in
//!   [`encoding`]
//! - **Registries** mapping format names to codecs and type names to decode
//!   targets ([`CodecRegistry`], [`TypeRegistry`])
//! - **Processors** that apply codecs to in-flight messages in [`processor`]
//!
//! ## Architecture
//!
//! - `core/` - Errors, the dynamic value model and the type registry
//! - `encoding/` - Codec trait, format implementations and the codec registry
//! - `processor/` - `marshal` / `unmarshal` pipeline stages
//!
//! ## Example: Decoding into a registered type
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use serde::{Deserialize, Serialize};
//! use pipecodec::processor::{Message, Processor, UnmarshalConfig, UnmarshalProcessor};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct Reading {
//!     g_y: String,
//! }
//!
//! pipecodec::global_type_registry().register_type::<Reading>("reading")?;
//!
//! let config = UnmarshalConfig::new("r", "reading").with_encoding("yaml");
//! let processor = UnmarshalProcessor::from_config(&config)?;
//!
//! let mut message = Message::new(b"g_y: \"100\"\n".to_vec());
//! processor.process(&mut message)?;
//! assert_eq!(message.meta_get_as::<Reading>("r").map(|r| r.g_y.as_str()), Some("100"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Columnar round trip
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use pipecodec::encoding::{decode_from_slice, encode_to_vec, ColumnarCodec};
//!
//! let codec = ColumnarCodec::from_sample(&String::new())?;
//! let bytes = encode_to_vec(&codec, &String::from("row"))?;
//! let mut decoded = String::new();
//! decode_from_slice(&codec, &bytes, &mut decoded)?;
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{
    global_type_registry, CodecError, CodecValue, DynValue, Encoding, Result, TypeDescriptor,
    TypeRegistry,
};

// Encoding/decoding
pub mod encoding;

pub use encoding::{
    global_registry, Codec, CodecRegistry, ColumnarCodec, Decoder, Encoder, JsonCodec, Schema,
    YamlCodec,
};

// Pipeline processors
pub mod processor;

pub use processor::{MarshalProcessor, Message, Processor, UnmarshalProcessor};
