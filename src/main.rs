//! # Repository Backup CLI
//!
//! This is the binary entry point for the `repo-backup` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Executing the appropriate command based on the parsed arguments.
//! - Handling top-level application errors and translating them into a
//!   nonzero exit status with diagnostic output.
//!
//! The core pipeline lives in the `lib.rs` library crate; the binary is a
//! thin wrapper around it. Any error that escapes a command lands here and
//! exits the process with status 1, the whole-run fail-fast contract.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
