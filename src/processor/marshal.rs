// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encode-on-output processor.

use std::sync::Arc;

use super::{MarshalConfig, Message, Processor, MARSHAL_PROCESSOR_NAME};
use crate::core::{CodecError, Result};
use crate::encoding::{global_registry, Codec, CodecRegistry};

/// Encodes the value in a metadata slot and makes it the message payload.
pub struct MarshalProcessor {
    codec: Arc<dyn Codec>,
    metakey: String,
}

impl MarshalProcessor {
    /// Build the processor, resolving its codec in `codecs`.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnsupportedEncoding` if the encoding is not
    /// registered.
    pub fn new(config: &MarshalConfig, codecs: &CodecRegistry) -> Result<Self> {
        let codec = codecs
            .resolve(&config.encoding)
            .ok_or_else(|| CodecError::unsupported_encoding(&config.encoding))?;
        tracing::debug!(
            "Created {} processor: encoding={}, metakey={}",
            MARSHAL_PROCESSOR_NAME,
            config.encoding,
            config.metakey
        );
        Ok(Self {
            codec,
            metakey: config.metakey.clone(),
        })
    }

    /// Build the processor against the global codec registry.
    pub fn from_config(config: &MarshalConfig) -> Result<Self> {
        Self::new(config, global_registry())
    }

    /// Slot read by this processor.
    pub fn metakey(&self) -> &str {
        &self.metakey
    }
}

impl Processor for MarshalProcessor {
    fn name(&self) -> &str {
        MARSHAL_PROCESSOR_NAME
    }

    fn process(&self, message: &mut Message) -> Result<()> {
        let value = message
            .meta_get(&self.metakey)
            .ok_or_else(|| CodecError::object_not_found(&self.metakey))?;

        let mut encoded = Vec::new();
        self.codec.encoder(&mut encoded).encode(value)?;

        tracing::debug!(
            "Marshalled '{}' as {}: {} bytes",
            self.metakey,
            self.codec.name(),
            encoded.len()
        );
        message.set_payload(encoded);
        Ok(())
    }
}
