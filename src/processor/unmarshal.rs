// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decode-on-input processor.

use std::sync::Arc;

use super::{Message, Processor, UnmarshalConfig, UNMARSHAL_PROCESSOR_NAME};
use crate::core::{global_type_registry, CodecError, Result, TypeDescriptor, TypeRegistry};
use crate::encoding::{global_registry, Codec, CodecRegistry};

/// Decodes the message payload into a registered type and stores it in a
/// metadata slot.
pub struct UnmarshalProcessor {
    codec: Arc<dyn Codec>,
    descriptor: Arc<TypeDescriptor>,
    metakey: String,
}

impl UnmarshalProcessor {
    /// Build the processor, resolving its codec and target type.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnsupportedEncoding` if the encoding is not
    /// registered, or `CodecError::TypeNotRegistered` if the type is not.
    pub fn new(
        config: &UnmarshalConfig,
        codecs: &CodecRegistry,
        types: &TypeRegistry,
    ) -> Result<Self> {
        let codec = codecs
            .resolve(&config.encoding)
            .ok_or_else(|| CodecError::unsupported_encoding(&config.encoding))?;
        let descriptor = types
            .resolve(&config.type_name)
            .ok_or_else(|| CodecError::type_not_registered(&config.type_name))?;
        tracing::debug!(
            "Created {} processor: encoding={}, metakey={}, type={} ({})",
            UNMARSHAL_PROCESSOR_NAME,
            config.encoding,
            config.metakey,
            descriptor.name(),
            descriptor.rust_type()
        );
        Ok(Self {
            codec,
            descriptor,
            metakey: config.metakey.clone(),
        })
    }

    /// Build the processor against the global registries.
    pub fn from_config(config: &UnmarshalConfig) -> Result<Self> {
        Self::new(config, global_registry(), global_type_registry())
    }

    /// Slot written by this processor.
    pub fn metakey(&self) -> &str {
        &self.metakey
    }

    /// Type the payload is decoded into.
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }
}

impl Processor for UnmarshalProcessor {
    fn name(&self) -> &str {
        UNMARSHAL_PROCESSOR_NAME
    }

    fn process(&self, message: &mut Message) -> Result<()> {
        let mut target = self.descriptor.new_instance();
        let mut source = message.payload();
        self.codec.decoder(&mut source).decode(&mut *target)?;

        tracing::debug!(
            "Unmarshalled {} bytes of {} into '{}' as {}",
            message.payload().len(),
            self.codec.name(),
            self.metakey,
            self.descriptor.name()
        );
        message.meta_set(self.metakey.as_str(), target);
        Ok(())
    }
}
