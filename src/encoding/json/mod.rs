// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! JSON codec module.
//!
//! Provides JSON encoding and decoding support.

pub mod codec;

pub use codec::JsonCodec;
