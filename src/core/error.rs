// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for pipecodec.
//!
//! Provides error types for:
//! - Setup-time lookups (unknown encodings and types, duplicate registrations)
//! - Per-message processing (missing slots)
//! - Format-specific encoding and decoding, including columnar schema checks

use std::fmt;

/// Errors that can occur while configuring or running a codec.
#[derive(Debug, Clone)]
pub enum CodecError {
    /// Configured format name is not present in the codec registry
    UnsupportedEncoding {
        /// Format name that was requested
        encoding: String,
    },

    /// Configured type name is not present in the type registry
    TypeNotRegistered {
        /// Type name that was requested
        type_name: String,
    },

    /// Message has no value in the configured slot
    ObjectNotFoundAtKey {
        /// Slot name
        key: String,
    },

    /// A name is already taken in a registry
    DuplicateRegistration {
        /// Registry kind ("codec" or "type")
        registry: &'static str,
        /// Name that was registered twice
        name: String,
    },

    /// Format-specific decode failure
    DecodeError {
        /// Codec name (e.g., "json", "yaml", "parquet")
        codec: String,
        /// Underlying failure
        message: String,
    },

    /// Format-specific encode failure
    EncodeError {
        /// Codec name (e.g., "json", "yaml", "parquet")
        codec: String,
        /// Underlying failure
        message: String,
    },

    /// Value or file does not match the schema bound to a columnar codec
    SchemaMismatch {
        /// Dotted field path where the mismatch was found
        path: String,
        /// What did not match
        reason: String,
    },

    /// Schema could not be built
    InvalidSchema {
        /// Field path or schema identifier
        schema_name: String,
        /// Validation error message
        reason: String,
    },

    /// A single-use encoder was asked to write a second value
    EncoderClosed {
        /// Codec name
        codec: String,
    },

    /// A single-use decoder was asked to read a second value
    DecoderConsumed {
        /// Codec name
        codec: String,
    },

    /// Unsupported type or feature
    Unsupported {
        /// What is not supported
        feature: String,
    },

    /// Conversion between a typed value and a [`CodecValue`](super::CodecValue) failed
    ValueConversion {
        /// Error message
        message: String,
    },

    /// Other error
    Other(String),
}

impl CodecError {
    /// Create an "unsupported encoding" error.
    pub fn unsupported_encoding(encoding: impl Into<String>) -> Self {
        CodecError::UnsupportedEncoding {
            encoding: encoding.into(),
        }
    }

    /// Create a "type not registered" error.
    pub fn type_not_registered(type_name: impl Into<String>) -> Self {
        CodecError::TypeNotRegistered {
            type_name: type_name.into(),
        }
    }

    /// Create an "object not found at key" error.
    pub fn object_not_found(key: impl Into<String>) -> Self {
        CodecError::ObjectNotFoundAtKey { key: key.into() }
    }

    /// Create a duplicate registration error.
    pub fn duplicate(registry: &'static str, name: impl Into<String>) -> Self {
        CodecError::DuplicateRegistration {
            registry,
            name: name.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(codec: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::DecodeError {
            codec: codec.into(),
            message: message.into(),
        }
    }

    /// Create an encode error.
    pub fn encode(codec: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::EncodeError {
            codec: codec.into(),
            message: message.into(),
        }
    }

    /// Create a schema mismatch error.
    pub fn schema_mismatch(path: impl Into<String>, reason: impl Into<String>) -> Self {
        CodecError::SchemaMismatch {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid schema error.
    pub fn invalid_schema(schema_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CodecError::InvalidSchema {
            schema_name: schema_name.into(),
            reason: reason.into(),
        }
    }

    /// Create an unsupported feature error.
    pub fn unsupported(feature: impl Into<String>) -> Self {
        CodecError::Unsupported {
            feature: feature.into(),
        }
    }

    /// True for errors raised while configuring a processor rather than per message.
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            CodecError::UnsupportedEncoding { .. }
                | CodecError::TypeNotRegistered { .. }
                | CodecError::DuplicateRegistration { .. }
                | CodecError::InvalidSchema { .. }
        )
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::UnsupportedEncoding { encoding } => vec![("encoding", encoding.clone())],
            CodecError::TypeNotRegistered { type_name } => vec![("type", type_name.clone())],
            CodecError::ObjectNotFoundAtKey { key } => vec![("key", key.clone())],
            CodecError::DuplicateRegistration { registry, name } => {
                vec![("registry", registry.to_string()), ("name", name.clone())]
            }
            CodecError::DecodeError { codec, message } | CodecError::EncodeError { codec, message } => {
                vec![("codec", codec.clone()), ("message", message.clone())]
            }
            CodecError::SchemaMismatch { path, reason } => {
                vec![("path", path.clone()), ("reason", reason.clone())]
            }
            CodecError::InvalidSchema {
                schema_name,
                reason,
            } => vec![("schema", schema_name.clone()), ("reason", reason.clone())],
            CodecError::EncoderClosed { codec } | CodecError::DecoderConsumed { codec } => {
                vec![("codec", codec.clone())]
            }
            CodecError::Unsupported { feature } => vec![("feature", feature.clone())],
            CodecError::ValueConversion { message } => vec![("message", message.clone())],
            CodecError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::UnsupportedEncoding { encoding } => {
                write!(f, "Unsupported encoding: '{encoding}'")
            }
            CodecError::TypeNotRegistered { type_name } => {
                write!(f, "Unrecognized type cannot be unmarshalled: '{type_name}'")
            }
            CodecError::ObjectNotFoundAtKey { key } => {
                write!(f, "No object found at metakey '{key}'")
            }
            CodecError::DuplicateRegistration { registry, name } => {
                write!(f, "Duplicate {registry} registration: '{name}'")
            }
            CodecError::DecodeError { codec, message } => {
                write!(f, "{codec} decode error: {message}")
            }
            CodecError::EncodeError { codec, message } => {
                write!(f, "{codec} encode error: {message}")
            }
            CodecError::SchemaMismatch { path, reason } => {
                write!(f, "Schema mismatch at '{path}': {reason}")
            }
            CodecError::InvalidSchema {
                schema_name,
                reason,
            } => {
                write!(f, "Invalid schema '{schema_name}': {reason}")
            }
            CodecError::EncoderClosed { codec } => {
                write!(f, "{codec} encoder already wrote its value and was closed")
            }
            CodecError::DecoderConsumed { codec } => {
                write!(f, "{codec} decoder already produced its value")
            }
            CodecError::Unsupported { feature } => {
                write!(f, "Unsupported feature: '{feature}'")
            }
            CodecError::ValueConversion { message } => {
                write!(f, "Value conversion error: {message}")
            }
            CodecError::Other(msg) => write!(f, "Other error: {msg}"),
        }
    }
}

impl std::error::Error for CodecError {}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::EncodeError {
            codec: "IO".to_string(),
            message: err.to_string(),
        }
    }
}

impl serde::de::Error for CodecError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        CodecError::ValueConversion {
            message: msg.to_string(),
        }
    }
}

/// Result type for pipecodec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_encoding_error() {
        let err = CodecError::unsupported_encoding("xml");
        assert!(matches!(err, CodecError::UnsupportedEncoding { .. }));
        assert_eq!(err.to_string(), "Unsupported encoding: 'xml'");
        assert!(err.is_setup_error());
    }

    #[test]
    fn test_type_not_registered_error() {
        let err = CodecError::type_not_registered("Widget");
        assert_eq!(
            err.to_string(),
            "Unrecognized type cannot be unmarshalled: 'Widget'"
        );
        assert!(err.is_setup_error());
    }

    #[test]
    fn test_object_not_found_error() {
        let err = CodecError::object_not_found("payload_obj");
        assert_eq!(err.to_string(), "No object found at metakey 'payload_obj'");
        assert!(!err.is_setup_error());
    }

    #[test]
    fn test_duplicate_registration_error() {
        let err = CodecError::duplicate("type", "int");
        assert_eq!(err.to_string(), "Duplicate type registration: 'int'");
    }

    #[test]
    fn test_decode_and_encode_errors() {
        let err = CodecError::decode("json", "EOF while parsing a value");
        assert_eq!(err.to_string(), "json decode error: EOF while parsing a value");
        let err = CodecError::encode("parquet", "writer failed");
        assert_eq!(err.to_string(), "parquet encode error: writer failed");
    }

    #[test]
    fn test_schema_mismatch_error() {
        let err = CodecError::schema_mismatch("s.g", "expected utf8, found int64");
        assert_eq!(
            err.to_string(),
            "Schema mismatch at 's.g': expected utf8, found int64"
        );
        assert!(!err.is_setup_error());
    }

    #[test]
    fn test_single_use_errors() {
        let err = CodecError::EncoderClosed {
            codec: "parquet".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "parquet encoder already wrote its value and was closed"
        );
        let err = CodecError::DecoderConsumed {
            codec: "parquet".to_string(),
        };
        assert_eq!(err.to_string(), "parquet decoder already produced its value");
    }

    #[test]
    fn test_log_fields() {
        let err = CodecError::decode("yaml", "bad indent");
        let fields = err.log_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], ("codec", "yaml".to_string()));
        assert_eq!(fields[1], ("message", "bad indent".to_string()));

        let err = CodecError::duplicate("codec", "json");
        let fields = err.log_fields();
        assert_eq!(fields[0], ("registry", "codec".to_string()));
        assert_eq!(fields[1], ("name", "json".to_string()));
    }

    #[test]
    fn test_serde_custom_errors() {
        let err = <CodecError as serde::de::Error>::custom("missing field `g`");
        assert!(matches!(err, CodecError::ValueConversion { .. }));
        assert_eq!(err.to_string(), "Value conversion error: missing field `g`");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "sink closed");
        let codec_err: CodecError = io_err.into();
        assert!(matches!(codec_err, CodecError::EncodeError { .. }));
        assert_eq!(codec_err.to_string(), "IO encode error: sink closed");
    }
}
