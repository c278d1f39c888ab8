// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Runtime type registry.
//!
//! Maps a configuration-level type name (e.g. `"int"`, `"sensor_reading"`)
//! to a [`TypeDescriptor`] that can mint fresh decode targets. Registration
//! happens during setup; lookups are concurrent afterwards.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{CodecError, Result};
use super::value::{CodecValue, DynValue};

/// Reified reference to a concrete value type.
pub struct TypeDescriptor {
    name: String,
    rust_type: &'static str,
    type_id: TypeId,
    factory: fn() -> Box<dyn DynValue>,
}

impl TypeDescriptor {
    /// Describe `T` under the registry name `name`.
    pub fn of<T>(name: impl Into<String>) -> Self
    where
        T: Serialize + DeserializeOwned + Default + Send + Sync + fmt::Debug + 'static,
    {
        fn make<T>() -> Box<dyn DynValue>
        where
            T: Serialize + DeserializeOwned + Default + Send + Sync + fmt::Debug + 'static,
        {
            Box::new(T::default())
        }

        Self {
            name: name.into(),
            rust_type: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            factory: make::<T>,
        }
    }

    /// Registry name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rust type name of the described type.
    pub fn rust_type(&self) -> &'static str {
        self.rust_type
    }

    /// True if this descriptor describes `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Create a fresh, zero-valued decode target.
    ///
    /// Every call returns a new allocation; targets are never shared or pooled.
    pub fn new_instance(&self) -> Box<dyn DynValue> {
        (self.factory)()
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("rust_type", &self.rust_type)
            .finish()
    }
}

/// Thread-safe registry of decode target types.
///
/// Names are unique: a descriptor, once registered, is never replaced or
/// removed, so a name resolves to the same type for the life of the process.
pub struct TypeRegistry {
    types: RwLock<HashMap<String, Arc<TypeDescriptor>>>,
}

impl TypeRegistry {
    /// Create a new empty type registry.
    pub fn new() -> Self {
        Self {
            types: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry with the built-in scalar types.
    ///
    /// | name     | type         |
    /// |----------|--------------|
    /// | `int`    | `i64`        |
    /// | `string` | `String`     |
    /// | `bool`   | `bool`       |
    /// | `float`  | `f64`        |
    /// | `value`  | [`CodecValue`] (schemaless) |
    pub fn with_builtins() -> Self {
        let mut types = HashMap::new();
        for descriptor in [
            TypeDescriptor::of::<i64>("int"),
            TypeDescriptor::of::<String>("string"),
            TypeDescriptor::of::<bool>("bool"),
            TypeDescriptor::of::<f64>("float"),
            TypeDescriptor::of::<CodecValue>("value"),
        ] {
            types.insert(descriptor.name.clone(), Arc::new(descriptor));
        }
        Self {
            types: RwLock::new(types),
        }
    }

    /// Register a type descriptor under its own name.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::DuplicateRegistration` if the name is taken.
    pub fn register(&self, descriptor: TypeDescriptor) -> Result<Arc<TypeDescriptor>> {
        let mut types = self.types.write().unwrap_or_else(PoisonError::into_inner);
        if types.contains_key(&descriptor.name) {
            return Err(CodecError::duplicate("type", descriptor.name));
        }
        tracing::debug!(
            "Registered type '{}' as {}",
            descriptor.name,
            descriptor.rust_type
        );
        let descriptor = Arc::new(descriptor);
        types.insert(descriptor.name.clone(), Arc::clone(&descriptor));
        Ok(descriptor)
    }

    /// Register `T` under `name`.
    pub fn register_type<T>(&self, name: impl Into<String>) -> Result<Arc<TypeDescriptor>>
    where
        T: Serialize + DeserializeOwned + Default + Send + Sync + fmt::Debug + 'static,
    {
        self.register(TypeDescriptor::of::<T>(name))
    }

    /// Look up a descriptor by name.
    pub fn resolve(&self, name: &str) -> Option<Arc<TypeDescriptor>> {
        let types = self.types.read().unwrap_or_else(PoisonError::into_inner);
        types.get(name).cloned()
    }

    /// Check if a type name is registered.
    pub fn contains(&self, name: &str) -> bool {
        let types = self.types.read().unwrap_or_else(PoisonError::into_inner);
        types.contains_key(name)
    }

    /// Get all registered type names, sorted.
    pub fn names(&self) -> Vec<String> {
        let types = self.types.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = types.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get the number of registered types.
    pub fn len(&self) -> usize {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_TYPE_REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();

/// Get the process-wide type registry, pre-loaded with the built-in types.
pub fn global_type_registry() -> &'static TypeRegistry {
    GLOBAL_TYPE_REGISTRY.get_or_init(TypeRegistry::with_builtins)
}
