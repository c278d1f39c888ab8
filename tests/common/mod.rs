// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use pipecodec::encoding::{decode_from_slice, encode_to_vec, Codec};
use pipecodec::{CodecValue, DynValue};
use serde::{Deserialize, Serialize};

// ============================================================================
// Fixture Types
// ============================================================================

/// Nested part of [`ATestType`].
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct S {
    pub g: String,
}

/// Struct with a scalar and an optional nested struct.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ATestType {
    pub i: i64,
    pub s: Option<S>,
}

/// Struct using the YAML field naming of pipeline configs.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct YamlReading {
    pub g_y: String,
}

/// Struct covering every scalar column kind.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scalars {
    pub flag: bool,
    pub small: i8,
    pub medium: i16,
    pub word: i32,
    pub byte: u8,
    pub half: u16,
    pub unsigned: u32,
    pub large: u64,
    pub single: f32,
    pub double: f64,
    pub text: String,
    pub maybe: Option<i32>,
}

impl Scalars {
    pub fn sample() -> Self {
        Self {
            flag: true,
            small: -8,
            medium: -1600,
            word: 320_000,
            byte: 255,
            half: 65_000,
            unsigned: 4_000_000_000,
            large: 9_000_000_000,
            single: 1.5,
            double: -2.25,
            text: "héllo".to_string(),
            maybe: Some(7),
        }
    }
}

// ============================================================================
// Cases
// ============================================================================

/// Named values covering populated, nested-present, nested-absent and
/// all-default shapes.
pub fn cases() -> Vec<(&'static str, ATestType)> {
    vec![
        (
            "frst",
            ATestType {
                i: 100,
                s: Some(S { g: "100".into() }),
            },
        ),
        (
            "scnd",
            ATestType {
                i: 200,
                s: Some(S { g: "200".into() }),
            },
        ),
        ("thrd", ATestType { i: 300, s: None }),
        ("frth", ATestType::default()),
    ]
}

// ============================================================================
// Helpers
// ============================================================================

/// Encode `value` with `codec` and decode it into a fresh `T`.
pub fn round_trip<T>(codec: &dyn Codec, value: &T) -> T
where
    T: DynValue + Default,
{
    let bytes = encode_to_vec(codec, value)
        .unwrap_or_else(|e| panic!("{} encode failed: {e}", codec.name()));
    assert!(!bytes.is_empty(), "{} produced no bytes", codec.name());
    let mut decoded = T::default();
    decode_from_slice(codec, &bytes, &mut decoded)
        .unwrap_or_else(|e| panic!("{} decode failed: {e}", codec.name()));
    decoded
}

/// Build a struct value from `(name, value)` pairs.
pub fn fields(pairs: &[(&str, CodecValue)]) -> CodecValue {
    CodecValue::Struct(
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect(),
    )
}
