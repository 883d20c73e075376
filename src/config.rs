//! # Backup Configuration
//!
//! This module defines the schema for the `.repo-backup.yaml` configuration
//! file and the [`Platform`] abstraction that captures everything that
//! differs between the supported hosting platforms: the listing endpoint
//! shape, the authentication mechanism, the clone-URL field name, the
//! default page size, and the archive filename prefix.
//!
//! A minimal GitHub configuration:
//!
//! ```yaml
//! platform: github
//! username: octocat
//! token: ghp_xxxx
//! ```
//!
//! A minimal self-hosted GitLab configuration:
//!
//! ```yaml
//! platform: gitlab
//! host: gitlab.example.com
//! token: glpat-xxxx
//! ```
//!
//! Everything else (page size, inter-page delay, clone limit, working and
//! archive directories) has a sensible default and can be overridden. The
//! auth token can also be supplied through the `REPO_BACKUP_TOKEN`
//! environment variable, which takes precedence over the file so the
//! credential never has to live on disk.

use std::path::PathBuf;

use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};

/// Environment variable that overrides the `token` config field.
pub const TOKEN_ENV_VAR: &str = "REPO_BACKUP_TOKEN";

/// The hosting platform a backup run talks to.
///
/// Each variant knows the platform-specific constants of the listing
/// protocol; the rest of the pipeline only ever asks the platform for them
/// and stays platform-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Github,
    Gitlab,
}

impl Platform {
    /// The JSON field on a listing record that holds the clone URL.
    pub fn clone_url_field(&self) -> &'static str {
        match self {
            Platform::Github => "clone_url",
            Platform::Gitlab => "http_url_to_repo",
        }
    }

    /// Prefix for the archive filename, e.g. `Github_Repos_<timestamp>.tar.gz`.
    pub fn archive_prefix(&self) -> &'static str {
        match self {
            Platform::Github => "Github",
            Platform::Gitlab => "Gitlab",
        }
    }

    /// Records per page when the config does not say otherwise.
    ///
    /// GitLab tolerates larger pages than the GitHub default.
    pub fn default_page_size(&self) -> u32 {
        match self {
            Platform::Github => 50,
            Platform::Gitlab => 100,
        }
    }

    /// Human-readable platform name for log and status lines.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Github => "GitHub",
            Platform::Gitlab => "GitLab",
        }
    }
}

fn default_page_delay_ms() -> u64 {
    250
}

fn default_work_dir() -> PathBuf {
    PathBuf::from("repos")
}

fn default_archive_dir() -> PathBuf {
    PathBuf::from("archives")
}

/// Parsed `.repo-backup.yaml` configuration.
///
/// This is the single value threaded through the whole pipeline; no module
/// reads process-wide state behind its back.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackupConfig {
    /// Which hosting platform to back up.
    pub platform: Platform,

    /// Account name owning the repositories (GitHub).
    #[serde(default)]
    pub username: Option<String>,

    /// Hostname of the instance (GitLab, e.g. `gitlab.example.com`).
    #[serde(default)]
    pub host: Option<String>,

    /// Auth token. Optional: public repositories list and clone without one.
    #[serde(default)]
    pub token: Option<String>,

    /// Explicit listing-endpoint override. When unset, the endpoint is
    /// derived from `platform` and `username`/`host`.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Records requested per page. Defaults to the platform's page size.
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Courtesy delay between successive page fetches, in milliseconds.
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    /// Stop after this many successful clones; 0 means no limit.
    #[serde(default)]
    pub limit: usize,

    /// Working directory the repositories are cloned into. Destroyed and
    /// recreated at the start of every run.
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,

    /// Directory the finished archive is written to. Created if absent.
    #[serde(default = "default_archive_dir")]
    pub archive_dir: PathBuf,
}

/// Parse a configuration from YAML text.
pub fn parse(yaml_content: &str) -> Result<BackupConfig> {
    serde_yaml::from_str::<BackupConfig>(yaml_content).map_err(Error::Yaml)
}

/// Load a configuration from a YAML file.
pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<BackupConfig> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

impl BackupConfig {
    /// Replace the token with the `REPO_BACKUP_TOKEN` environment variable
    /// when it is set.
    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            if !token.is_empty() {
                self.token = Some(token);
            }
        }
    }

    /// Effective page size: the configured one, or the platform default.
    pub fn page_size(&self) -> u32 {
        self.page_size
            .unwrap_or_else(|| self.platform.default_page_size())
    }

    /// The listing endpoint this run will page through.
    ///
    /// Fails when the platform's required identity field (`username` for
    /// GitHub, `host` for GitLab) is missing and no explicit `endpoint`
    /// override is present.
    pub fn endpoint(&self) -> Result<String> {
        if let Some(endpoint) = &self.endpoint {
            return Ok(endpoint.clone());
        }

        match self.platform {
            Platform::Github => {
                let username = self.username.as_deref().ok_or_else(|| Error::Config {
                    message: "missing 'username'".to_string(),
                    hint: Some("the github platform needs the account to enumerate".to_string()),
                })?;
                Ok(format!("https://api.github.com/users/{}/repos", username))
            }
            Platform::Gitlab => {
                let host = self.host.as_deref().ok_or_else(|| Error::Config {
                    message: "missing 'host'".to_string(),
                    hint: Some("the gitlab platform needs the instance hostname".to_string()),
                })?;
                Ok(format!("https://{}/api/v4/projects", host))
            }
        }
    }

    /// Check the configuration for problems that would only surface
    /// mid-run: a missing identity field or an unparsable endpoint.
    pub fn validate(&self) -> Result<()> {
        let endpoint = self.endpoint()?;
        Url::parse(&endpoint).map_err(|e| Error::Config {
            message: format!("listing endpoint '{}' is not a valid URL: {}", endpoint, e),
            hint: None,
        })?;
        Ok(())
    }
}
