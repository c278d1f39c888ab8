// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Transcode command - re-encode one document in another format.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;

use crate::common::{
    detect_encoding, read_input, reading_codec, write_output, writing_codec, Result,
};
use pipecodec::encoding::{decode_from_slice, encode_to_vec, JsonCodec};
use pipecodec::{CodecValue, Encoding};

/// Decode one document and encode it again in another format.
#[derive(Args, Clone, Debug)]
pub struct TranscodeCmd {
    /// Input format (detected from the file extension if omitted)
    #[arg(long)]
    from: Option<Encoding>,

    /// Output format
    #[arg(long)]
    to: Encoding,

    /// Input file (stdin if omitted or "-")
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file (stdout if omitted or "-")
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Indent JSON output
    #[arg(long)]
    pretty: bool,
}

impl TranscodeCmd {
    pub fn run(self) -> Result<()> {
        let from = self
            .from
            .or_else(|| self.input.as_deref().and_then(detect_encoding))
            .context("Cannot detect the input format, pass --from")?;

        let input = read_input(self.input.as_deref())?;
        let reader = reading_codec(from, &input)?;
        let mut value = CodecValue::Null;
        decode_from_slice(reader.as_ref(), &input, &mut value)
            .with_context(|| format!("Failed to decode {from} input"))?;

        let bytes = if self.to == Encoding::Json && self.pretty {
            encode_to_vec(&JsonCodec::pretty(), &value)?
        } else {
            let writer = writing_codec(self.to, &value)?;
            encode_to_vec(writer.as_ref(), &value)
                .with_context(|| format!("Failed to encode {} output", self.to))?
        };

        tracing::debug!(
            "Transcoded {} bytes of {} into {} bytes of {}",
            input.len(),
            from,
            bytes.len(),
            self.to
        );
        write_output(self.output.as_ref(), &bytes)
    }
}
