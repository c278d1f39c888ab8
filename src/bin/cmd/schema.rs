// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema command - show the columnar schema of a document.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;

use crate::common::{detect_encoding, read_input, reading_codec, Result};
use pipecodec::encoding::{decode_from_slice, ColumnarCodec};
use pipecodec::{CodecValue, Encoding};

/// Print the Parquet schema a document maps to.
///
/// For Parquet input this is the schema stored in the file footer; for text
/// input it is the schema inferred from the decoded document.
#[derive(Args, Clone, Debug)]
pub struct SchemaCmd {
    /// Input format (detected from the file extension if omitted)
    #[arg(long)]
    from: Option<Encoding>,

    /// Input file (stdin if omitted or "-")
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,
}

impl SchemaCmd {
    pub fn run(self) -> Result<()> {
        let from = self
            .from
            .or_else(|| self.input.as_deref().and_then(detect_encoding))
            .context("Cannot detect the input format, pass --from")?;
        let input = read_input(self.input.as_deref())?;

        let codec = if from.is_columnar() {
            ColumnarCodec::from_file_bytes(&input)?
        } else {
            let reader = reading_codec(from, &input)?;
            let mut value = CodecValue::Null;
            decode_from_slice(reader.as_ref(), &input, &mut value)
                .with_context(|| format!("Failed to decode {from} input"))?;
            ColumnarCodec::from_sample(&value)?
        };

        let schema = codec.schema();
        if self.json {
            println!("{}", serde_json::to_string_pretty(schema)?);
        } else {
            println!("{schema}");
        }
        Ok(())
    }
}
