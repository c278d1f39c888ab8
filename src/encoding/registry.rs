// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec registry for name-based codec selection.
//!
//! This module provides a registry pattern for codecs, allowing:
//! - Selection of a codec by its configured format name
//! - Registration of additional formats during setup
//! - Shared, read-only use of one codec instance by every caller
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use pipecodec::encoding::{Codec, CodecRegistry, ColumnarCodec};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = CodecRegistry::with_builtins();
//! registry.register("parquet", Arc::new(ColumnarCodec::from_sample(&0_i64)?))?;
//! let codec = registry.resolve("parquet").expect("registered above");
//! assert_eq!(codec.name(), "parquet");
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::core::{CodecError, Result};
use crate::encoding::{Codec, JsonCodec, YamlCodec};

/// Registry of shared codec instances.
///
/// Resolving the same name twice returns the same instance. Duplicate
/// registration is rejected; overwriting an entry takes an explicit
/// [`CodecRegistry::replace`].
#[derive(Default)]
pub struct CodecRegistry {
    codecs: RwLock<HashMap<String, Arc<dyn Codec>>>,
}

impl CodecRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the text codecs under `json` and `yaml`.
    ///
    /// The columnar codec needs a sample value, so it is never a built-in.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        let mut codecs = registry.write();
        codecs.insert("json".to_string(), Arc::new(JsonCodec::new()));
        codecs.insert("yaml".to_string(), Arc::new(YamlCodec::new()));
        drop(codecs);
        registry
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Arc<dyn Codec>>> {
        self.codecs.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<dyn Codec>>> {
        self.codecs.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a codec under `name`.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::DuplicateRegistration` if the name is taken.
    pub fn register(&self, name: impl Into<String>, codec: Arc<dyn Codec>) -> Result<()> {
        let name = name.into();
        let mut codecs = self.write();
        if codecs.contains_key(&name) {
            return Err(CodecError::duplicate("codec", name));
        }
        tracing::debug!("Registered codec '{}' ({})", name, codec.name());
        codecs.insert(name, codec);
        Ok(())
    }

    /// Register a codec under `name`, returning the codec it replaced.
    pub fn replace(&self, name: impl Into<String>, codec: Arc<dyn Codec>) -> Option<Arc<dyn Codec>> {
        let name = name.into();
        let previous = self.write().insert(name.clone(), codec);
        if previous.is_some() {
            tracing::debug!("Replaced codec '{}'", name);
        }
        previous
    }

    /// Look up a codec by name.
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn Codec>> {
        self.read().get(name).cloned()
    }

    /// Check if a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Get all registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Get the number of registered codecs.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Global codec registry.
///
/// This is a convenience singleton for accessing the global registry.
/// For custom registries, create a `CodecRegistry` instance directly.
static GLOBAL_REGISTRY: OnceLock<CodecRegistry> = OnceLock::new();

/// Get the process-wide codec registry, pre-loaded with the text codecs.
pub fn global_registry() -> &'static CodecRegistry {
    GLOBAL_REGISTRY.get_or_init(CodecRegistry::with_builtins)
}
