// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! YAML codec over `serde_yaml`.
//!
//! One value maps to one YAML document. Multi-document streams are rejected
//! on decode.

use std::io::{Read, Write};

use crate::core::{CodecError, DynValue, Result};
use crate::encoding::{Codec, Decoder, Encoder};

const CODEC_NAME: &str = "yaml";

/// YAML codec.
#[derive(Debug, Clone, Default)]
pub struct YamlCodec {
    _private: (),
}

impl YamlCodec {
    /// Create a new YAML codec.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Codec for YamlCodec {
    fn name(&self) -> &str {
        CODEC_NAME
    }

    fn encoder<'a>(&self, sink: &'a mut dyn Write) -> Box<dyn Encoder + 'a> {
        Box::new(YamlEncoder { sink })
    }

    fn decoder<'a>(&self, source: &'a mut dyn Read) -> Box<dyn Decoder + 'a> {
        Box::new(YamlDecoder { source })
    }
}

struct YamlEncoder<'a> {
    sink: &'a mut dyn Write,
}

impl Encoder for YamlEncoder<'_> {
    fn encode(&mut self, value: &dyn DynValue) -> Result<()> {
        serde_yaml::to_writer(&mut *self.sink, value.as_serialize())
            .map_err(|e| CodecError::encode(CODEC_NAME, e.to_string()))
    }
}

struct YamlDecoder<'a> {
    source: &'a mut dyn Read,
}

impl Decoder for YamlDecoder<'_> {
    fn decode(&mut self, target: &mut dyn DynValue) -> Result<()> {
        let de = serde_yaml::Deserializer::from_reader(&mut *self.source);
        let mut erased = <dyn erased_serde::Deserializer>::erase(de);
        target
            .decode_from(&mut erased)
            .map_err(|e| CodecError::decode(CODEC_NAME, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::encoding::{decode_from_slice, encode_to_vec};

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Tagged {
        g_y: String,
    }

    #[test]
    fn test_decode_quoted_scalar() {
        let codec = YamlCodec::new();
        let mut decoded = Tagged::default();
        decode_from_slice(&codec, b"g_y: \"100\"\n", &mut decoded).unwrap();
        assert_eq!(decoded.g_y, "100");
    }

    #[test]
    fn test_encode_then_decode() {
        let codec = YamlCodec::new();
        let original = Tagged { g_y: "200".into() };
        let bytes = encode_to_vec(&codec, &original).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.starts_with("g_y:"), "{text}");

        let mut decoded = Tagged::default();
        decode_from_slice(&codec, &bytes, &mut decoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_multi_document_rejected() {
        let codec = YamlCodec::new();
        let mut decoded = Tagged::default();
        let err = decode_from_slice(&codec, b"g_y: a\n---\ng_y: b\n", &mut decoded).unwrap_err();
        assert!(matches!(err, CodecError::DecodeError { .. }));
        assert_eq!(decoded.g_y, "");
    }

    #[test]
    fn test_type_mismatch() {
        let codec = YamlCodec::new();
        let mut decoded = 0_i64;
        let err = decode_from_slice(&codec, b"[1, 2]\n", &mut decoded).unwrap_err();
        assert!(err.to_string().starts_with("yaml decode error"));
    }
}
