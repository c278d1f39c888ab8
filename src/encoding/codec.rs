// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Unified codec interface for format-agnostic message processing.
//!
//! This module provides one abstraction over serialization formats with very
//! different streaming models (document-oriented text, footer-terminated
//! columnar files).
//!
//! ## Architecture
//!
//! - [`Codec`] - shared, read-only strategy bound to one format name
//! - [`Encoder`] / [`Decoder`] - per-call instances bound to one byte sink or
//!   source, each handling exactly one value
//!
//! ## Example
//!
//! ```no_run
//! use pipecodec::encoding::{decode_from_slice, encode_to_vec, JsonCodec};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let codec = JsonCodec::new();
//! let bytes = encode_to_vec(&codec, &42_i64)?;
//! let mut target = 0_i64;
//! decode_from_slice(&codec, &bytes, &mut target)?;
//! assert_eq!(target, 42);
//! # Ok(())
//! # }
//! ```

use std::io::{Read, Write};

use crate::core::{DynValue, Result};

// =============================================================================
// Codec Traits
// =============================================================================

/// Strategy object binding one serialization format to encode/decode.
///
/// Codecs are created once at configuration time and shared read-only
/// across every concurrent call afterwards.
pub trait Codec: Send + Sync {
    /// Registry name of the format (e.g., "json", "yaml", "parquet").
    fn name(&self) -> &str;

    /// Create an encoder writing to `sink`.
    fn encoder<'a>(&self, sink: &'a mut dyn Write) -> Box<dyn Encoder + 'a>;

    /// Create a decoder reading from `source`.
    fn decoder<'a>(&self, source: &'a mut dyn Read) -> Box<dyn Decoder + 'a>;
}

/// Writes a single value to the sink it was created with.
pub trait Encoder {
    /// Encode `value`.
    fn encode(&mut self, value: &dyn DynValue) -> Result<()>;
}

/// Reads a single value from the source it was created with.
pub trait Decoder {
    /// Decode into `target`, replacing its content.
    ///
    /// Decoding is all-or-nothing: on error the target is left as it was.
    fn decode(&mut self, target: &mut dyn DynValue) -> Result<()>;
}

// =============================================================================
// Helpers
// =============================================================================

/// Encode `value` into a new buffer.
pub fn encode_to_vec(codec: &dyn Codec, value: &dyn DynValue) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    codec.encoder(&mut buf).encode(value)?;
    Ok(buf)
}

/// Decode `bytes` into `target`.
pub fn decode_from_slice(codec: &dyn Codec, bytes: &[u8], target: &mut dyn DynValue) -> Result<()> {
    let mut source = bytes;
    let result = codec.decoder(&mut source).decode(target);
    result
}

// =============================================================================
// Tests
// =============================================================================
