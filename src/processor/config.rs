// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Processor configuration.
//!
//! The host parses its configuration files; these structs describe the
//! fields each processor accepts once parsed.
//!
//! ```yaml
//! encoding: yaml      # optional, defaults to "json"
//! metakey: reading
//! type: sensor_reading
//! ```

use serde::{Deserialize, Serialize};

/// Encoding used when a config does not name one.
pub const DEFAULT_ENCODING: &str = "json";

fn default_encoding() -> String {
    DEFAULT_ENCODING.to_string()
}

/// Configuration of the `marshal` processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarshalConfig {
    /// Codec registry name of the output format
    #[serde(default = "default_encoding")]
    pub encoding: String,
    /// Metadata slot holding the value to encode
    pub metakey: String,
}

impl MarshalConfig {
    /// Create a config reading from `metakey` with the default encoding.
    pub fn new(metakey: impl Into<String>) -> Self {
        Self {
            encoding: default_encoding(),
            metakey: metakey.into(),
        }
    }

    /// Set the encoding.
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }
}

/// Configuration of the `unmarshal` processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnmarshalConfig {
    /// Codec registry name of the input format
    #[serde(default = "default_encoding")]
    pub encoding: String,
    /// Metadata slot receiving the decoded value
    pub metakey: String,
    /// Type registry name of the decode target
    #[serde(rename = "type")]
    pub type_name: String,
}

impl UnmarshalConfig {
    /// Create a config decoding into `type_name` with the default encoding.
    pub fn new(metakey: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            encoding: default_encoding(),
            metakey: metakey.into(),
            type_name: type_name.into(),
        }
    }

    /// Set the encoding.
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_defaults_to_json() {
        let config: MarshalConfig = serde_yaml::from_str("metakey: out\n").unwrap();
        assert_eq!(config, MarshalConfig::new("out"));
        assert_eq!(config.encoding, "json");
    }

    #[test]
    fn test_unmarshal_fields() {
        let config: UnmarshalConfig =
            serde_yaml::from_str("encoding: yaml\nmetakey: in\ntype: int\n").unwrap();
        assert_eq!(config, UnmarshalConfig::new("in", "int").with_encoding("yaml"));
    }

    #[test]
    fn test_required_fields() {
        assert!(serde_yaml::from_str::<MarshalConfig>("encoding: yaml\n").is_err());
        assert!(serde_yaml::from_str::<UnmarshalConfig>("metakey: in\n").is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = serde_json::from_str::<MarshalConfig>(r#"{"metakey":"a","codec":"json"}"#);
        assert!(result.is_err());
    }
}
