// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use pipecodec::encoding::{Codec, ColumnarCodec};
use pipecodec::{global_registry, CodecValue, Encoding};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// True if `path` names standard input/output.
fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read all bytes from a file, or from stdin when no path (or `-`) is given.
pub fn read_input(input: Option<&Path>) -> Result<Vec<u8>> {
    match input {
        Some(path) if !is_stdio(path) => {
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        _ => {
            let mut buf = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Write bytes to a file, or to stdout when no path (or `-`) is given.
pub fn write_output(output: Option<&PathBuf>, bytes: &[u8]) -> Result<()> {
    match output {
        Some(path) if !is_stdio(path) => {
            fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
        }
        _ => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
            Ok(())
        }
    }
}

/// Guess the encoding of a file from its extension.
pub fn detect_encoding(path: &Path) -> Option<Encoding> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse().ok())
}

/// Codec able to read `input` as `encoding`.
///
/// Parquet input carries its schema in the file footer.
pub fn reading_codec(encoding: Encoding, input: &[u8]) -> Result<Arc<dyn Codec>> {
    if encoding.is_columnar() {
        return Ok(Arc::new(ColumnarCodec::from_file_bytes(input)?));
    }
    registered_codec(encoding)
}

/// Codec able to write `value` as `encoding`.
///
/// Parquet output takes its schema from the value itself.
pub fn writing_codec(encoding: Encoding, value: &CodecValue) -> Result<Arc<dyn Codec>> {
    if encoding.is_columnar() {
        return Ok(Arc::new(ColumnarCodec::from_sample(value)?));
    }
    registered_codec(encoding)
}

fn registered_codec(encoding: Encoding) -> Result<Arc<dyn Codec>> {
    global_registry()
        .resolve(encoding.as_str())
        .ok_or_else(|| anyhow::anyhow!("No codec registered for {encoding}"))
}
