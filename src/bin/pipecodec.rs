// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Pipecodec CLI
//!
//! Command-line front end for the pipecodec codecs.
//!
//! ## Usage
//!
//! ```sh
//! # Convert a YAML document to JSON
//! pipecodec transcode --to json reading.yaml
//!
//! # Write a JSON document as a one-row Parquet file
//! pipecodec transcode --from json --to parquet -o reading.parquet < reading.json
//!
//! # Show the Parquet schema of a file
//! pipecodec schema reading.parquet
//! ```
//!
//! ## Exit codes
//!
//! - `0` success
//! - `1` the document could not be read, converted or written
//! - `2` the requested conversion cannot be set up (unknown encoding, a
//!   document shape with no Parquet schema)

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{SchemaCmd, TranscodeCmd};
use common::Result;
use pipecodec::CodecError;
use tracing_subscriber::EnvFilter;

/// Pipecodec - serialization toolkit
///
/// Move single documents between JSON, YAML and Parquet.
#[derive(Parser, Clone)]
#[command(name = "pipecodec")]
#[command(about = "Serialization toolkit for JSON, YAML and Parquet documents", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Log codec activity to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Re-encode a document in another format
    Transcode(TranscodeCmd),

    /// Show the Parquet schema of a document
    Schema(SchemaCmd),
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Transcode(cmd) => cmd.run(),
        Commands::Schema(cmd) => cmd.run(),
    }
}

/// Exit status for a failed run.
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<CodecError>() {
        Some(codec_error) if codec_error.is_setup_error() => 2,
        _ => 1,
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        if let Some(codec_error) = e.downcast_ref::<CodecError>() {
            for (key, value) in codec_error.log_fields() {
                tracing::debug!("{}={}", key, value);
            }
        }
        eprintln!("Error: {e:#}");
        process::exit(exit_code(&e));
    }
}
