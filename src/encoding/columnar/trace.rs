// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Type-driven schema tracing.
//!
//! A type's `Deserialize` impl is run against [`ShapeTracer`], which hands
//! out placeholder values and records the column kind of everything it is
//! asked for. Optional fields are always entered, so an `Option<Struct>`
//! field yields a group even when the sample holds `None`.

use serde::de::value::StrDeserializer;
use serde::de::{DeserializeOwned, DeserializeSeed, IntoDeserializer, MapAccess, Visitor};
use serde::Deserializer;

use super::schema::{FieldKind, SchemaField};
use crate::core::{CodecError, DynValue, Result};

/// Column kind of `T`.
pub(super) fn trace_type<T: DeserializeOwned>() -> Result<FieldKind> {
    let mut kind = None;
    T::deserialize(ShapeTracer { kind: &mut kind })?;
    Ok(kind.unwrap_or(FieldKind::Null))
}

/// Column kind of the concrete type behind `sample`.
pub(super) fn trace_sample(sample: &dyn DynValue) -> Result<FieldKind> {
    let mut kind = None;
    {
        let mut erased = <dyn erased_serde::Deserializer>::erase(ShapeTracer { kind: &mut kind });
        sample
            .visit_type(&mut erased)
            .map_err(|e| CodecError::unsupported(e.to_string()))?;
    }
    Ok(kind.unwrap_or(FieldKind::Null))
}

struct ShapeTracer<'k> {
    kind: &'k mut Option<FieldKind>,
}

macro_rules! trace_scalar {
    ($($method:ident => $kind:ident, $visit:ident($($placeholder:expr)?);)*) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
                *self.kind = Some(FieldKind::$kind);
                visitor.$visit($($placeholder)?)
            }
        )*
    };
}

impl<'de> Deserializer<'de> for ShapeTracer<'_> {
    type Error = CodecError;

    trace_scalar! {
        deserialize_bool => Boolean, visit_bool(false);
        deserialize_i8 => Int32, visit_i8(0);
        deserialize_i16 => Int32, visit_i16(0);
        deserialize_i32 => Int32, visit_i32(0);
        deserialize_i64 => Int64, visit_i64(0);
        deserialize_u8 => Int32, visit_u8(0);
        deserialize_u16 => Int32, visit_u16(0);
        deserialize_u32 => Int64, visit_u32(0);
        deserialize_u64 => Int64, visit_u64(0);
        deserialize_f32 => Float, visit_f32(0.0);
        deserialize_f64 => Double, visit_f64(0.0);
        deserialize_char => Utf8, visit_char('\0');
        deserialize_str => Utf8, visit_str("");
        deserialize_string => Utf8, visit_string(String::new());
        deserialize_bytes => Binary, visit_bytes(&[]);
        deserialize_byte_buf => Binary, visit_byte_buf(Vec::new());
        deserialize_unit => Null, visit_unit();
    }

    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(CodecError::unsupported(
            "self-describing value has no fixed columnar shape",
        ))
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_some(self)
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(CodecError::unsupported("array field in columnar schema"))
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(CodecError::unsupported(
            "map without fixed keys in columnar schema",
        ))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        let mut children = Vec::with_capacity(fields.len());
        let value = visitor.visit_map(FieldTracer {
            names: fields.iter(),
            pending: None,
            fields: &mut children,
        })?;
        *self.kind = Some(FieldKind::Group(children));
        Ok(value)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        _variants: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value> {
        Err(CodecError::unsupported(format!(
            "enum '{name}' in columnar schema"
        )))
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }
}

/// Feeds a struct visitor every declared field, tracing each value.
struct FieldTracer<'f> {
    names: std::slice::Iter<'static, &'static str>,
    pending: Option<&'static str>,
    fields: &'f mut Vec<SchemaField>,
}

impl<'de> MapAccess<'de> for FieldTracer<'_> {
    type Error = CodecError;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>> {
        let Some(&name) = self.names.next() else {
            return Ok(None);
        };
        self.pending = Some(name);
        let key: StrDeserializer<'_, CodecError> = name.into_deserializer();
        seed.deserialize(key).map(Some)
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value> {
        let name = self
            .pending
            .take()
            .ok_or_else(|| CodecError::invalid_schema("<traced>", "field value before its name"))?;
        let mut kind = None;
        let value = seed.deserialize(ShapeTracer { kind: &mut kind })?;
        self.fields
            .push(SchemaField::new(name, kind.unwrap_or(FieldKind::Null)));
        Ok(value)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.names.len())
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::core::CodecValue;

    #[derive(Debug, Default, Deserialize, serde::Serialize)]
    struct Inner {
        g: String,
    }

    #[derive(Debug, Default, Deserialize, serde::Serialize)]
    struct Outer {
        i: i64,
        #[serde(rename = "nested")]
        s: Option<Inner>,
        small: u8,
        ratio: f32,
    }

    #[derive(Debug, Deserialize, serde::Serialize)]
    struct Meters(f64);

    #[test]
    fn test_absent_option_still_traces_group() {
        let kind = trace_sample(&Outer::default()).unwrap();
        assert_eq!(
            kind,
            FieldKind::Group(vec![
                SchemaField::new("i", FieldKind::Int64),
                SchemaField::new(
                    "nested",
                    FieldKind::Group(vec![SchemaField::new("g", FieldKind::Utf8)])
                ),
                SchemaField::new("small", FieldKind::Int32),
                SchemaField::new("ratio", FieldKind::Float),
            ])
        );
    }

    #[test]
    fn test_scalars_and_newtypes() {
        assert_eq!(trace_type::<bool>().unwrap(), FieldKind::Boolean);
        assert_eq!(trace_type::<u64>().unwrap(), FieldKind::Int64);
        assert_eq!(trace_type::<Option<String>>().unwrap(), FieldKind::Utf8);
        assert_eq!(trace_type::<Meters>().unwrap(), FieldKind::Double);
    }

    #[test]
    fn test_untraceable_types() {
        assert!(matches!(
            trace_type::<Vec<i32>>(),
            Err(CodecError::Unsupported { .. })
        ));
        assert!(matches!(
            trace_type::<std::collections::HashMap<String, i32>>(),
            Err(CodecError::Unsupported { .. })
        ));
        assert!(trace_sample(&CodecValue::Null).is_err());
    }
}
