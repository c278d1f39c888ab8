// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # JSON Codec
//!
//! Streaming JSON codec over `serde_json`.
//!
//! The encoder writes one document followed by a newline. The decoder
//! parses one document from the source and leaves any bytes after it unread.
//!
//! ## Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use pipecodec::encoding::{Codec, JsonCodec};
//!
//! let codec = JsonCodec::new();
//! let mut out = Vec::new();
//! codec.encoder(&mut out).encode(&vec![1_u8, 2, 3])?;
//! assert_eq!(out, b"[1,2,3]\n");
//! # Ok(())
//! # }
//! ```

use std::io::{Read, Write};

use crate::core::{CodecError, DynValue, Result};
use crate::encoding::{Codec, Decoder, Encoder};

const CODEC_NAME: &str = "json";

/// JSON codec.
#[derive(Debug, Clone, Default)]
pub struct JsonCodec {
    /// Enable pretty printing
    pretty: bool,
}

impl JsonCodec {
    /// Create a new JSON codec writing compact documents.
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Create a JSON codec writing indented documents.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Codec for JsonCodec {
    fn name(&self) -> &str {
        CODEC_NAME
    }

    fn encoder<'a>(&self, sink: &'a mut dyn Write) -> Box<dyn Encoder + 'a> {
        Box::new(JsonEncoder {
            sink,
            pretty: self.pretty,
        })
    }

    fn decoder<'a>(&self, source: &'a mut dyn Read) -> Box<dyn Decoder + 'a> {
        Box::new(JsonDecoder { source })
    }
}

struct JsonEncoder<'a> {
    sink: &'a mut dyn Write,
    pretty: bool,
}

impl Encoder for JsonEncoder<'_> {
    fn encode(&mut self, value: &dyn DynValue) -> Result<()> {
        let written = if self.pretty {
            serde_json::to_writer_pretty(&mut *self.sink, value.as_serialize())
        } else {
            serde_json::to_writer(&mut *self.sink, value.as_serialize())
        };
        written.map_err(|e| CodecError::encode(CODEC_NAME, e.to_string()))?;
        self.sink.write_all(b"\n")?;
        Ok(())
    }
}

struct JsonDecoder<'a> {
    source: &'a mut dyn Read,
}

impl Decoder for JsonDecoder<'_> {
    fn decode(&mut self, target: &mut dyn DynValue) -> Result<()> {
        let mut de = serde_json::Deserializer::from_reader(&mut *self.source);
        let mut erased = <dyn erased_serde::Deserializer>::erase(&mut de);
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
    struct Reading {
        #[serde(rename = "i_j")]
        i: i64,
        #[serde(rename = "s_j", skip_serializing_if = "Option::is_none", default)]
        s: Option<String>,
    }

    #[test]
    fn test_encode_writes_one_line() {
        let codec = JsonCodec::new();
        let bytes = encode_to_vec(
            &codec,
            &Reading {
                i: 1,
                s: Some("x".into()),
            },
        )
        .unwrap();
        assert_eq!(bytes, b"{\"i_j\":1,\"s_j\":\"x\"}\n");
    }

    #[test]
    fn test_absent_field_round_trips_as_absent() {
        let codec = JsonCodec::new();
        let bytes = encode_to_vec(&codec, &Reading { i: 2, s: None }).unwrap();
        assert_eq!(bytes, b"{\"i_j\":2}\n");

        let mut decoded = Reading::default();
        decode_from_slice(&codec, &bytes, &mut decoded).unwrap();
        assert_eq!(decoded, Reading { i: 2, s: None });
    }

    #[test]
    fn test_pretty_output() {
        let codec = JsonCodec::pretty();
        let bytes = encode_to_vec(&codec, &Reading { i: 3, s: None }).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "{\n  \"i_j\": 3\n}\n");
    }

    #[test]
    fn test_malformed_input() {
        let codec = JsonCodec::new();
        let mut decoded = Reading::default();
        let err = decode_from_slice(&codec, b"{\"i_j\": ", &mut decoded).unwrap_err();
        match err {
            CodecError::DecodeError { codec, message } => {
                assert_eq!(codec, "json");
                assert!(message.contains("EOF"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_reads_only_first_document() {
        let codec = JsonCodec::new();
        let mut source: &[u8] = b"5\n6\n";
        let mut first = 0_i64;
        codec.decoder(&mut source).decode(&mut first).unwrap();
        assert_eq!(first, 5);
    }

    #[test]
    fn test_sink_failure_is_reported() {
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let codec = JsonCodec::new();
        let mut sink = Broken;
        let result = codec.encoder(&mut sink).encode(&1_i64);
        assert!(result.is_err());
    }
}
