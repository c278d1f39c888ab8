// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message encoding/decoding implementations.
//!
//! This module provides codec implementations for the supported wire formats:
//! - [`json`] - JSON encoding/decoding
//! - [`yaml`] - YAML encoding/decoding
//! - [`columnar`] - Parquet encoding/decoding against a fixed schema
//! - [`codec`] - Unified codec interface
//! - [`registry`] - Codec registry for name-based codec selection

pub mod codec;
pub mod columnar;
pub mod json;
pub mod registry;
pub mod yaml;

pub use codec::{decode_from_slice, encode_to_vec, Codec, Decoder, Encoder};
pub use columnar::{ColumnarCodec, FieldKind, Schema, SchemaBuilder, SchemaField, SCALAR_ROOT_KEY};
pub use json::JsonCodec;
pub use registry::{global_registry, CodecRegistry};
pub use yaml::YamlCodec;
