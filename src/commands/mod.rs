//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `repo-backup` command-line tool. Each subcommand lives in its own file:
//! an `Args` struct derived with `clap`, and an `execute` function that
//! orchestrates the command by calling into the `repo_backup` library.

pub mod completions;
pub mod run;
pub mod validate;
