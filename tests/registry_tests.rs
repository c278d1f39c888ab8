// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Registry integration tests.
//!
//! Tests cover:
//! - Not-found lookups in both registries
//! - Referential stability of repeated lookups
//! - Duplicate registration policy
//! - Fresh, zero-valued decode targets

mod common;

use std::sync::Arc;

use common::ATestType;
use pipecodec::encoding::{encode_to_vec, ColumnarCodec, JsonCodec};
use pipecodec::{
    global_registry, global_type_registry, CodecError, CodecRegistry, CodecValue, TypeRegistry,
};

#[test]
fn test_unknown_names_are_not_found() {
    assert!(CodecRegistry::with_builtins().resolve("parquet").is_none());
    assert!(TypeRegistry::with_builtins().resolve("a_test_type").is_none());
}

#[test]
fn test_builtin_types() {
    let types = TypeRegistry::with_builtins();
    assert!(types.resolve("int").unwrap().is::<i64>());
    assert!(types.resolve("string").unwrap().is::<String>());
    assert!(types.resolve("value").unwrap().is::<CodecValue>());
}

#[test]
fn test_repeated_resolve_returns_same_entry() {
    let codecs = CodecRegistry::with_builtins();
    let codec = Arc::new(ColumnarCodec::from_sample(&0_i64).unwrap());
    codecs.register("parquet", codec).unwrap();
    let first = codecs.resolve("parquet").unwrap();
    for _ in 0..10 {
        assert!(Arc::ptr_eq(&first, &codecs.resolve("parquet").unwrap()));
    }

    let types = TypeRegistry::with_builtins();
    let first = types.resolve("int").unwrap();
    for _ in 0..10 {
        assert!(Arc::ptr_eq(&first, &types.resolve("int").unwrap()));
    }
}

#[test]
fn test_builtins_cannot_be_shadowed() {
    let types = TypeRegistry::with_builtins();
    let err = types.register_type::<String>("int").unwrap_err();
    assert!(matches!(err, CodecError::DuplicateRegistration { .. }));
    assert!(types.resolve("int").unwrap().is::<i64>());

    let codecs = CodecRegistry::with_builtins();
    let err = codecs
        .register("json", Arc::new(JsonCodec::pretty()))
        .unwrap_err();
    assert!(matches!(err, CodecError::DuplicateRegistration { .. }));
}

#[test]
fn test_codec_replace_is_explicit() {
    let codecs = CodecRegistry::with_builtins();
    let previous = codecs.replace("json", Arc::new(JsonCodec::pretty()));
    assert!(previous.is_some());

    let codec = codecs.resolve("json").unwrap();
    let bytes = encode_to_vec(codec.as_ref(), &common::fields(&[("a", CodecValue::Int64(1))]))
        .unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), "{\n  \"a\": 1\n}\n");
}

#[test]
fn test_new_instance_is_fresh_and_zeroed() {
    let types = TypeRegistry::new();
    let descriptor = types.register_type::<ATestType>("a_test_type").unwrap();

    let mut first = descriptor.new_instance();
    first.downcast_mut::<ATestType>().unwrap().i = 42;

    let second = descriptor.new_instance();
    assert_eq!(second.downcast_ref::<ATestType>(), Some(&ATestType::default()));
    assert_eq!(first.downcast_ref::<ATestType>().unwrap().i, 42);
}

#[test]
fn test_global_registries_have_builtins() {
    assert!(global_registry().contains("json"));
    assert!(global_registry().contains("yaml"));
    assert!(global_type_registry().contains("int"));
    assert!(global_type_registry().contains("string"));
}

#[test]
fn test_concurrent_type_lookup() {
    let types = Arc::new(TypeRegistry::with_builtins());
    let expected = types.resolve("string").unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let types = Arc::clone(&types);
            let expected = Arc::clone(&expected);
            std::thread::spawn(move || {
                for _ in 0..50 {
                    let descriptor = types.resolve("string").unwrap();
                    assert!(Arc::ptr_eq(&descriptor, &expected));
                    let instance = descriptor.new_instance();
                    assert_eq!(instance.downcast_ref::<String>().map(String::as_str), Some(""));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
