// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout pipecodec.
//!
//! This module provides the foundational types for the library:
//! - [`CodecError`] - Error handling
//! - [`CodecValue`] and [`DynValue`] - Value representations
//! - [`TypeRegistry`] - Runtime registry of decode target types
//! - [`Encoding`] - Built-in wire format identifier

pub mod error;
pub mod registry;
pub mod value;

pub use error::{CodecError, Result};
pub use registry::{global_type_registry, TypeDescriptor, TypeRegistry};
pub use value::{from_value, to_value, CodecValue, DynValue, Fields};

/// Built-in wire format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// JSON text format
    Json,
    /// YAML text format
    Yaml,
    /// Parquet columnar format
    Parquet,
}

/// Error returned when parsing an `Encoding` from string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseEncodingError {
    _private: (),
}

impl std::fmt::Display for ParseEncodingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid encoding name, expected 'json', 'yaml', or 'parquet'"
        )
    }
}

impl std::error::Error for ParseEncodingError {}

impl std::str::FromStr for Encoding {
    type Err = ParseEncodingError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Encoding::Json),
            "yaml" | "yml" => Ok(Encoding::Yaml),
            "parquet" => Ok(Encoding::Parquet),
            _ => Err(ParseEncodingError { _private: () }),
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Encoding {
    /// Check if this encoding is a text format.
    pub fn is_text(&self) -> bool {
        matches!(self, Encoding::Json | Encoding::Yaml)
    }

    /// Check if this encoding needs a schema before it can write.
    pub fn is_columnar(&self) -> bool {
        matches!(self, Encoding::Parquet)
    }

    /// Convert to the registry name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Json => "json",
            Encoding::Yaml => "yaml",
            Encoding::Parquet => "parquet",
        }
    }
}
