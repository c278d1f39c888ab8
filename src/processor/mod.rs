// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Pipeline processors that bridge messages and codecs.
//!
//! - [`MarshalProcessor`] (`marshal`) encodes a value held in a metadata
//!   slot and replaces the payload with the result.
//! - [`UnmarshalProcessor`] (`unmarshal`) decodes the payload into a type
//!   chosen by name and stores it in a metadata slot.
//!
//! Codec and type lookups happen once, when a processor is built, so a
//! misconfigured processor fails at setup rather than per message.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use pipecodec::processor::{
//!     MarshalConfig, MarshalProcessor, Message, Processor, UnmarshalConfig, UnmarshalProcessor,
//! };
//!
//! let unmarshal = UnmarshalProcessor::from_config(&UnmarshalConfig::new("n", "int"))?;
//! let marshal = MarshalProcessor::from_config(&MarshalConfig::new("n").with_encoding("yaml"))?;
//!
//! let mut message = Message::new(b"12".to_vec());
//! unmarshal.process(&mut message)?;
//! marshal.process(&mut message)?;
//! assert_eq!(message.payload(), b"12\n");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod marshal;
pub mod message;
pub mod unmarshal;

pub use config::{MarshalConfig, UnmarshalConfig, DEFAULT_ENCODING};
pub use marshal::MarshalProcessor;
pub use message::Message;
pub use unmarshal::UnmarshalProcessor;

use crate::core::Result;

/// Name of the encode-on-output processor.
pub const MARSHAL_PROCESSOR_NAME: &str = "marshal";

/// Name of the decode-on-input processor.
pub const UNMARSHAL_PROCESSOR_NAME: &str = "unmarshal";

/// A pipeline stage applied to one message at a time.
///
/// Processors are shared across worker threads. A failed call leaves the
/// message's payload and slots as they were.
pub trait Processor: Send + Sync {
    /// Registered processor name.
    fn name(&self) -> &str;

    /// Process one message in place.
    fn process(&self, message: &mut Message) -> Result<()>;
}
