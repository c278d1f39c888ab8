// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! YAML codec module.

pub mod codec;

pub use codec::YamlCodec;
