//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `repo-backup` application. It uses the `thiserror` library to create a
//! single `Error` enum covering every anticipated failure mode, with enough
//! context in each variant to tell the operator exactly which repository,
//! page, or path was involved.
//!
//! There is deliberately no retry or recovery anywhere in this crate: every
//! variant below is fatal to the run, with one exception handled inside the
//! pager itself (a structured error payload from the listing endpoint stops
//! pagination but keeps the records fetched so far). A backup that stops
//! hard is preferable to one that silently ships an incomplete archive.

use thiserror::Error;

/// Main error type for repo-backup operations
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file is missing a required value or holds an
    /// invalid one. Includes an optional hint for how to fix it.
    #[error("Configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Config {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An HTTP call to the listing endpoint failed or returned a body that
    /// could not be decoded as JSON.
    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },

    /// The listing endpoint returned a decodable payload of an unexpected
    /// shape (neither a page of records nor a recognized error object).
    #[error("Unexpected listing payload on page {page}: {message}")]
    Listing { page: u32, message: String },

    /// A listing record lacks the platform's clone-URL field, or carries a
    /// non-string value under it. A repository we cannot resolve a clone URL
    /// for would become a silent gap in the backup, so this is fatal.
    #[error("Listing record {index} has no usable '{field}' field")]
    MissingField { field: String, index: usize },

    /// A `git clone` invocation failed. Aborts the whole run.
    #[error("Failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    /// Creating or writing the archive failed.
    #[error("Archive error for {path}: {message}")]
    Archive { path: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
