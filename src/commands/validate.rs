//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which loads the
//! configuration file, checks it for problems that would otherwise only
//! surface mid-run, and prints a summary of what a backup run would do.
//! It is a safe, read-only operation: no network call, no filesystem
//! change.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use repo_backup::config;
use repo_backup::defaults;
use repo_backup::output::{status, OutputConfig};

/// Validate a repo-backup configuration file
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the configuration file to validate.
    #[arg(short, long, value_name = "FILE", env = "REPO_BACKUP_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Execute the `validate` command.
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_flag(color_flag);
    let config_path = args.config.unwrap_or_else(defaults::default_config_file);

    println!(
        "{} Validating configuration: {}",
        status(&out, "🔍", "[SCAN]"),
        config_path.display()
    );

    let mut config = match config::from_file(&config_path) {
        Ok(config) => config,
        Err(e) => {
            println!(
                "{} Configuration parsing failed: {}",
                status(&out, "❌", "[ERR]"),
                e
            );
            return Err(anyhow::anyhow!("Configuration parsing failed: {}", e));
        }
    };
    config.apply_env();

    if let Err(e) = config.validate() {
        println!("{} Configuration invalid: {}", status(&out, "❌", "[ERR]"), e);
        return Err(anyhow::anyhow!("Configuration invalid: {}", e));
    }

    println!(
        "{} Configuration file parsed successfully",
        status(&out, "✅", "[OK]")
    );
    println!("   Platform:    {}", config.platform.name());
    println!("   Endpoint:    {}", config.endpoint()?);
    println!("   Page size:   {}", config.page_size());
    println!("   Page delay:  {}ms", config.page_delay_ms);
    if config.limit > 0 {
        println!("   Clone limit: {}", config.limit);
    }
    println!("   Working dir: {}", config.work_dir.display());
    println!("   Archive dir: {}", config.archive_dir.display());
    println!(
        "   Token:       {}",
        if config.token.is_some() {
            "configured"
        } else {
            "none (public repositories only)"
        }
    );

    Ok(())
}
