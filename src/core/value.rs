// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec value type system.
//!
//! Two views of a value live here:
//!
//! - [`DynValue`] - object-safe handle over any serde type, used by codecs,
//!   registries and message slots so the concrete type can be picked at
//!   configuration time.
//! - [`CodecValue`] - ordered dynamic value tree, used wherever a codec has
//!   to look at the structure of a value (the columnar codec) and as a
//!   schemaless decode target.
//!
//! [`to_value`] and [`from_value`] bridge typed values and trees through
//! `serde_json::Value`. Integers come out of the bridge as `Int64` (or
//! `UInt64` above `i64::MAX`) and floats as `Float64`; column writers narrow
//! them again.

use std::any::Any;
use std::fmt;

use serde::de::{DeserializeOwned, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::{CodecError, Result};

/// Ordered field name -> value pairs of a struct value.
pub type Fields = Vec<(String, CodecValue)>;

/// Unified dynamic value.
///
/// Struct fields keep the order in which the source type serialized them,
/// which is what schema inference relies on.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CodecValue {
    // Boolean
    Bool(bool),

    // Signed integers
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),

    // Unsigned integers
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),

    // Floating point
    Float32(f32),
    Float64(f64),

    // String (UTF-8)
    String(String),

    // Binary data
    Bytes(Vec<u8>),

    // Array of values
    Array(Vec<CodecValue>),

    // Nested struct or string-keyed map
    Struct(Fields),

    /// Absent optional value, unit, or unit struct
    #[default]
    Null,
}

impl CodecValue {
    /// Check if this value is an integer type (signed or unsigned).
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            CodecValue::Int8(_)
                | CodecValue::Int16(_)
                | CodecValue::Int32(_)
                | CodecValue::Int64(_)
                | CodecValue::UInt8(_)
                | CodecValue::UInt16(_)
                | CodecValue::UInt32(_)
                | CodecValue::UInt64(_)
        )
    }

    /// Check if this value is a floating-point type.
    pub fn is_float(&self) -> bool {
        matches!(self, CodecValue::Float32(_) | CodecValue::Float64(_))
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, CodecValue::Null)
    }

    /// Try to convert this value to i64 (for integer types only).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CodecValue::Int8(v) => Some(*v as i64),
            CodecValue::Int16(v) => Some(*v as i64),
            CodecValue::Int32(v) => Some(*v as i64),
            CodecValue::Int64(v) => Some(*v),
            CodecValue::UInt8(v) => Some(*v as i64),
            CodecValue::UInt16(v) => Some(*v as i64),
            CodecValue::UInt32(v) => Some(*v as i64),
            CodecValue::UInt64(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Try to convert this value to f64 (for numeric values only).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CodecValue::Float32(v) => Some(*v as f64),
            CodecValue::Float64(v) => Some(*v),
            other => other.as_i64().map(|v| v as f64),
        }
    }

    /// Try to get the inner string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CodecValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner bytes.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            CodecValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Try to get the inner struct fields.
    pub fn as_struct(&self) -> Option<&[(String, CodecValue)]> {
        match self {
            CodecValue::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// Try to get the inner array.
    pub fn as_array(&self) -> Option<&[CodecValue]> {
        match self {
            CodecValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Look up a struct field by name.
    pub fn field(&self, name: &str) -> Option<&CodecValue> {
        self.as_struct()?
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Get the type name of this value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            CodecValue::Bool(_) => "bool",
            CodecValue::Int8(_) => "int8",
            CodecValue::Int16(_) => "int16",
            CodecValue::Int32(_) => "int32",
            CodecValue::Int64(_) => "int64",
            CodecValue::UInt8(_) => "uint8",
            CodecValue::UInt16(_) => "uint16",
            CodecValue::UInt32(_) => "uint32",
            CodecValue::UInt64(_) => "uint64",
            CodecValue::Float32(_) => "float32",
            CodecValue::Float64(_) => "float64",
            CodecValue::String(_) => "string",
            CodecValue::Bytes(_) => "bytes",
            CodecValue::Array(_) => "array",
            CodecValue::Struct(_) => "struct",
            CodecValue::Null => "null",
        }
    }
}

impl fmt::Display for CodecValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecValue::Bool(v) => write!(f, "{v}"),
            CodecValue::Int8(v) => write!(f, "{v}"),
            CodecValue::Int16(v) => write!(f, "{v}"),
            CodecValue::Int32(v) => write!(f, "{v}"),
            CodecValue::Int64(v) => write!(f, "{v}"),
            CodecValue::UInt8(v) => write!(f, "{v}"),
            CodecValue::UInt16(v) => write!(f, "{v}"),
            CodecValue::UInt32(v) => write!(f, "{v}"),
            CodecValue::UInt64(v) => write!(f, "{v}"),
            CodecValue::Float32(v) => write!(f, "{v}"),
            CodecValue::Float64(v) => write!(f, "{v}"),
            CodecValue::String(s) => write!(f, "\"{s}\""),
            CodecValue::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            CodecValue::Array(arr) => {
                write!(f, "[")?;
                for (i, item) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            CodecValue::Struct(fields) => {
                write!(f, "{{")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
            CodecValue::Null => write!(f, "null"),
        }
    }
}

impl Serialize for CodecValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            CodecValue::Bool(v) => serializer.serialize_bool(*v),
            CodecValue::Int8(v) => serializer.serialize_i8(*v),
            CodecValue::Int16(v) => serializer.serialize_i16(*v),
            CodecValue::Int32(v) => serializer.serialize_i32(*v),
            CodecValue::Int64(v) => serializer.serialize_i64(*v),
            CodecValue::UInt8(v) => serializer.serialize_u8(*v),
            CodecValue::UInt16(v) => serializer.serialize_u16(*v),
            CodecValue::UInt32(v) => serializer.serialize_u32(*v),
            CodecValue::UInt64(v) => serializer.serialize_u64(*v),
            CodecValue::Float32(v) => serializer.serialize_f32(*v),
            CodecValue::Float64(v) => serializer.serialize_f64(*v),
            CodecValue::String(s) => serializer.serialize_str(s),
            CodecValue::Bytes(b) => serializer.serialize_bytes(b),
            CodecValue::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for item in arr {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            CodecValue::Struct(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (key, value) in fields {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            CodecValue::Null => serializer.serialize_none(),
        }
    }
}

struct CodecValueVisitor;

impl<'de> Visitor<'de> for CodecValueVisitor {
    type Value = CodecValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any value")
    }

    fn visit_bool<E>(self, v: bool) -> std::result::Result<CodecValue, E> {
        Ok(CodecValue::Bool(v))
    }

    fn visit_i8<E>(self, v: i8) -> std::result::Result<CodecValue, E> {
        Ok(CodecValue::Int8(v))
    }

    fn visit_i16<E>(self, v: i16) -> std::result::Result<CodecValue, E> {
        Ok(CodecValue::Int16(v))
    }

    fn visit_i32<E>(self, v: i32) -> std::result::Result<CodecValue, E> {
        Ok(CodecValue::Int32(v))
    }

    fn visit_i64<E>(self, v: i64) -> std::result::Result<CodecValue, E> {
        Ok(CodecValue::Int64(v))
    }

    fn visit_u8<E>(self, v: u8) -> std::result::Result<CodecValue, E> {
        Ok(CodecValue::UInt8(v))
    }

    fn visit_u16<E>(self, v: u16) -> std::result::Result<CodecValue, E> {
        Ok(CodecValue::UInt16(v))
    }

    fn visit_u32<E>(self, v: u32) -> std::result::Result<CodecValue, E> {
        Ok(CodecValue::UInt32(v))
    }

    fn visit_u64<E>(self, v: u64) -> std::result::Result<CodecValue, E> {
        // Self-describing formats report every non-negative integer as u64.
        Ok(i64::try_from(v).map_or(CodecValue::UInt64(v), CodecValue::Int64))
    }

    fn visit_f32<E>(self, v: f32) -> std::result::Result<CodecValue, E> {
        Ok(CodecValue::Float32(v))
    }

    fn visit_f64<E>(self, v: f64) -> std::result::Result<CodecValue, E> {
        Ok(CodecValue::Float64(v))
    }

    fn visit_str<E>(self, v: &str) -> std::result::Result<CodecValue, E> {
        Ok(CodecValue::String(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> std::result::Result<CodecValue, E> {
        Ok(CodecValue::String(v))
    }

    fn visit_bytes<E>(self, v: &[u8]) -> std::result::Result<CodecValue, E> {
        Ok(CodecValue::Bytes(v.to_vec()))
    }

    fn visit_byte_buf<E>(self, v: Vec<u8>) -> std::result::Result<CodecValue, E> {
        Ok(CodecValue::Bytes(v))
    }

    fn visit_none<E>(self) -> std::result::Result<CodecValue, E> {
        Ok(CodecValue::Null)
    }

    fn visit_unit<E>(self) -> std::result::Result<CodecValue, E> {
        Ok(CodecValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<CodecValue, D::Error> {
        CodecValue::deserialize(deserializer)
    }

    fn visit_newtype_struct<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<CodecValue, D::Error> {
        CodecValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<CodecValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(CodecValue::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<CodecValue, A::Error> {
        let mut fields = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, CodecValue>()? {
            fields.push((key, value));
        }
        Ok(CodecValue::Struct(fields))
    }
}

impl<'de> Deserialize<'de> for CodecValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(CodecValueVisitor)
    }
}

fn conversion_error(err: impl fmt::Display) -> CodecError {
    CodecError::ValueConversion {
        message: err.to_string(),
    }
}

/// Convert any serializable value into a [`CodecValue`] tree.
pub fn to_value<T: ?Sized + Serialize>(value: &T) -> Result<CodecValue> {
    let json = serde_json::to_value(value).map_err(conversion_error)?;
    CodecValue::deserialize(json).map_err(conversion_error)
}

/// Populate `target` from a [`CodecValue`] tree, replacing its previous content.
pub fn from_value(value: CodecValue, target: &mut dyn DynValue) -> Result<()> {
    let json = serde_json::to_value(&value).map_err(conversion_error)?;
    let mut erased = <dyn erased_serde::Deserializer>::erase(json);
    target.decode_from(&mut erased).map_err(conversion_error)
}

// =============================================================================
// Dynamic values
// =============================================================================

/// Object-safe view of a value that can be encoded or used as a decode target.
///
/// Implemented for every `Serialize + DeserializeOwned` type, so registering a
/// type never needs a hand-written impl.
pub trait DynValue: Any + Send + Sync + fmt::Debug {
    /// Borrow the value as an erased serde serializer input.
    fn as_serialize(&self) -> &dyn erased_serde::Serialize;

    /// Replace the value with one read from `deserializer`.
    ///
    /// On error the previous content is left untouched.
    fn decode_from(
        &mut self,
        deserializer: &mut dyn erased_serde::Deserializer<'_>,
    ) -> std::result::Result<(), erased_serde::Error>;

    /// Deserialize and drop a value of the concrete type, leaving `self` as is.
    ///
    /// Lets a deserializer walk the shape of the type behind a sample.
    fn visit_type(
        &self,
        deserializer: &mut dyn erased_serde::Deserializer<'_>,
    ) -> std::result::Result<(), erased_serde::Error>;

    /// Rust type name of the concrete value.
    fn value_type_name(&self) -> &'static str;

    /// Borrow as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Mutably borrow as `Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T> DynValue for T
where
    T: Serialize + DeserializeOwned + Any + Send + Sync + fmt::Debug,
{
    fn as_serialize(&self) -> &dyn erased_serde::Serialize {
        self
    }

    fn decode_from(
        &mut self,
        deserializer: &mut dyn erased_serde::Deserializer<'_>,
    ) -> std::result::Result<(), erased_serde::Error> {
        *self = erased_serde::deserialize::<T>(deserializer)?;
        Ok(())
    }

    fn visit_type(
        &self,
        deserializer: &mut dyn erased_serde::Deserializer<'_>,
    ) -> std::result::Result<(), erased_serde::Error> {
        erased_serde::deserialize::<T>(deserializer).map(drop)
    }

    fn value_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl dyn DynValue {
    /// Downcast to a concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Mutably downcast to a concrete type.
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Convert the value into a [`CodecValue`] tree.
    pub fn to_codec_value(&self) -> Result<CodecValue> {
        to_value(self.as_serialize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Inner {
        g: String,
    }

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Outer {
        i: i32,
        s: Option<Inner>,
    }

    #[test]
    fn test_to_value_keeps_field_order() {
        let value = to_value(&Outer {
            i: 100,
            s: Some(Inner { g: "100".into() }),
        })
        .unwrap();

        let fields = value.as_struct().unwrap();
        assert_eq!(fields[0].0, "i");
        assert_eq!(fields[1].0, "s");
        assert_eq!(value.field("i"), Some(&CodecValue::Int64(100)));
        assert_eq!(
            value.field("s").and_then(|s| s.field("g")),
            Some(&CodecValue::String("100".into()))
        );
    }

    #[test]
    fn test_bridge_widens_numbers() {
        let value = to_value(&(1.5_f32, u64::MAX)).unwrap();
        assert_eq!(
            value,
            CodecValue::Array(vec![CodecValue::Float64(1.5), CodecValue::UInt64(u64::MAX)])
        );

        let mut narrow = (0.0_f32, 0_u8);
        let tree = CodecValue::Array(vec![CodecValue::Float32(0.25), CodecValue::Int64(200)]);
        from_value(tree, &mut narrow).unwrap();
        assert_eq!(narrow, (0.25, 200));
    }

    #[test]
    fn test_absent_option_becomes_null() {
        let value = to_value(&Outer { i: 300, s: None }).unwrap();
        assert_eq!(value.field("s"), Some(&CodecValue::Null));
    }

    #[test]
    fn test_from_value_into_dyn_target() {
        let tree = CodecValue::Struct(vec![
            ("i".into(), CodecValue::Int64(7)),
            (
                "s".into(),
                CodecValue::Struct(vec![("g".into(), CodecValue::String("x".into()))]),
            ),
        ]);
        let mut target: Box<dyn DynValue> = Box::new(Outer::default());
        from_value(tree, target.as_mut()).unwrap();

        let decoded = target.downcast_ref::<Outer>().unwrap();
        assert_eq!(decoded.i, 7);
        assert_eq!(decoded.s.as_ref().map(|s| s.g.as_str()), Some("x"));
    }

    #[test]
    fn test_from_value_type_error_keeps_target() {
        let mut target: Box<dyn DynValue> = Box::new(5_i64);
        let result = from_value(CodecValue::String("nope".into()), target.as_mut());
        assert!(matches!(result, Err(CodecError::ValueConversion { .. })));
        assert_eq!(target.downcast_ref::<i64>(), Some(&5));
    }

    #[test]
    fn test_codec_value_is_its_own_target() {
        let tree = to_value(&Outer { i: 1, s: None }).unwrap();
        let mut target: Box<dyn DynValue> = Box::new(CodecValue::Null);
        from_value(tree.clone(), target.as_mut()).unwrap();
        assert_eq!(target.downcast_ref::<CodecValue>(), Some(&tree));
    }

    #[test]
    fn test_dyn_value_type_name() {
        let value: Box<dyn DynValue> = Box::new(String::from("a"));
        assert!(value.value_type_name().ends_with("String"));
        assert!(value.downcast_ref::<i64>().is_none());
    }

    #[test]
    fn test_display() {
        let value = CodecValue::Struct(vec![
            ("i".into(), CodecValue::Int32(1)),
            ("s".into(), CodecValue::Null),
            ("a".into(), CodecValue::Array(vec![CodecValue::Bool(true)])),
        ]);
        assert_eq!(value.to_string(), "{i: 1, s: null, a: [true]}");
    }

    #[test]
    fn test_numeric_conversions() {
        assert_eq!(CodecValue::UInt64(u64::MAX).as_i64(), None);
        assert_eq!(CodecValue::UInt32(5).as_i64(), Some(5));
        assert_eq!(CodecValue::Int16(-2).as_f64(), Some(-2.0));
        assert!(CodecValue::Float32(1.5).is_float());
        assert!(CodecValue::UInt8(1).is_integer());
    }
}
