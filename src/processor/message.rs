// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! In-flight message carried between pipeline stages.

use std::any::Any;
use std::collections::HashMap;

use crate::core::DynValue;

/// Payload bytes plus named metadata slots holding typed values.
#[derive(Debug, Default)]
pub struct Message {
    payload: Vec<u8>,
    meta: HashMap<String, Box<dyn DynValue>>,
}

impl Message {
    /// Create a message with the given payload and no metadata.
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
            meta: HashMap::new(),
        }
    }

    /// Add a metadata value, builder style.
    pub fn with_meta<T: DynValue>(mut self, key: impl Into<String>, value: T) -> Self {
        self.meta.insert(key.into(), Box::new(value));
        self
    }

    /// Payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Replace the payload.
    pub fn set_payload(&mut self, payload: impl Into<Vec<u8>>) {
        self.payload = payload.into();
    }

    /// Take the payload out of the message.
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    /// Value stored in slot `key`.
    pub fn meta_get(&self, key: &str) -> Option<&dyn DynValue> {
        self.meta.get(key).map(|value| &**value)
    }

    /// Value stored in slot `key`, if it holds a `T`.
    pub fn meta_get_as<T: Any>(&self, key: &str) -> Option<&T> {
        self.meta_get(key).and_then(|value| value.downcast_ref::<T>())
    }

    /// Store a value in slot `key`, returning the previous one.
    pub fn meta_set(
        &mut self,
        key: impl Into<String>,
        value: Box<dyn DynValue>,
    ) -> Option<Box<dyn DynValue>> {
        self.meta.insert(key.into(), value)
    }

    /// Remove slot `key`.
    pub fn meta_remove(&mut self, key: &str) -> Option<Box<dyn DynValue>> {
        self.meta.remove(key)
    }

    /// Names of the occupied slots, sorted.
    pub fn meta_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.meta.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload() {
        let mut message = Message::new(b"abc".to_vec());
        assert_eq!(message.payload(), b"abc");
        message.set_payload("xyz");
        assert_eq!(message.into_payload(), b"xyz");
    }

    #[test]
    fn test_meta_slots() {
        let mut message = Message::default().with_meta("count", 3_i64);
        assert_eq!(message.meta_get_as::<i64>("count"), Some(&3));
        assert!(message.meta_get_as::<String>("count").is_none());
        assert!(message.meta_get("missing").is_none());

        let previous = message.meta_set("count", Box::new(4_i64));
        assert_eq!(previous.unwrap().downcast_ref::<i64>(), Some(&3));

        message.meta_set("name", Box::new(String::from("x")));
        assert_eq!(message.meta_keys(), vec!["count", "name"]);

        assert!(message.meta_remove("name").is_some());
        assert!(message.meta_get("name").is_none());
    }
}
