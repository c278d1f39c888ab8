// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod schema;
mod transcode;

pub use schema::SchemaCmd;
pub use transcode::TranscodeCmd;
