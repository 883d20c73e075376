//! Run command implementation
//!
//! The run command executes the full backup pipeline:
//! 1. Load and validate the configuration
//! 2. Enumerate all repositories via the paginated listing endpoint
//! 3. Clone each repository into a fresh working directory
//! 4. Package the working directory into a timestamped tar.gz archive
//! 5. Remove the working directory

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use repo_backup::archive::TarGzWriter;
use repo_backup::config;
use repo_backup::defaults;
use repo_backup::git::GitCloner;
use repo_backup::listing::HttpPageFetcher;
use repo_backup::output::{status, OutputConfig};
use repo_backup::run::BackupRun;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to config file
    #[arg(short, long, value_name = "PATH", env = "REPO_BACKUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Stop after N successful clones (0 = no limit)
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `run` command.
pub fn execute(args: RunArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_flag(color_flag);
    let start_time = Instant::now();

    let config_path = args.config.unwrap_or_else(defaults::default_config_file);
    if !config_path.exists() {
        anyhow::bail!("Configuration file not found: {}", config_path.display());
    }

    let mut config = config::from_file(&config_path)?;
    config.apply_env();
    if let Some(limit) = args.limit {
        config.limit = limit;
    }
    config.validate()?;

    if !args.quiet {
        println!(
            "{} Backing up {} repositories for {}",
            status(&out, "📦", "[RUN]"),
            config.platform.name(),
            config
                .username
                .as_deref()
                .or(config.host.as_deref())
                .unwrap_or("account"),
        );
    }

    let fetcher = HttpPageFetcher::new(&config)?;
    let run = BackupRun::new(&config, &fetcher, &GitCloner, &TarGzWriter);
    let archive_path = run.execute()?;

    if !args.quiet {
        let duration = start_time.elapsed();
        println!(
            "{} Backup complete in {:.2}s",
            status(&out, "✅", "[OK]"),
            duration.as_secs_f64()
        );
        println!("   Archive: {}", archive_path.display());
    }

    Ok(())
}
