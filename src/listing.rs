//! # Repository Listing
//!
//! This module drives paginated retrieval against the platform's repository
//! listing endpoint. It is built around a trait-based design that separates
//! the pagination protocol from the concrete HTTP implementation:
//!
//! - **`PageFetcher`**: the interface for fetching one page of the listing.
//!   The main application uses [`HttpPageFetcher`], which issues real HTTP
//!   requests through `reqwest`. Tests replace it with canned-page stubs to
//!   exercise the pagination protocol without a network.
//!
//! - **`Pager`**: the protocol itself. Starting at page 1 it fetches pages
//!   one at a time, with a fixed courtesy delay between calls, and
//!   accumulates every record in order until a page comes back empty or the
//!   endpoint reports an error.
//!
//! An error payload (`{"error": ..., "error_description": ...}`) stops
//! pagination but keeps the records already fetched; the run continues with
//! what it has. A failed HTTP call or an undecodable body, in contrast, is
//! fatal: there is no way to know what the missing pages held, and a backup
//! must not pretend it got everything.

use std::thread;
use std::time::Duration;

use log::{info, warn};
use reqwest::blocking::Client;
use serde_json::Value;

use crate::config::{BackupConfig, Platform};
use crate::error::{Error, Result};

/// One raw repository record from the listing endpoint. The pipeline only
/// ever looks at the platform's clone-URL field; everything else is opaque.
pub type RepoRecord = Value;

/// Interface for fetching a single page of the repository listing.
pub trait PageFetcher {
    /// Fetch the given 1-based page and decode its JSON payload.
    fn fetch_page(&self, page: u32) -> Result<Value>;
}

/// `PageFetcher` backed by the platform's REST endpoint.
pub struct HttpPageFetcher {
    client: Client,
    endpoint: String,
    platform: Platform,
    page_size: u32,
    token: Option<String>,
}

impl HttpPageFetcher {
    /// Build a fetcher for the endpoint described by `config`.
    pub fn new(config: &BackupConfig) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            endpoint: config.endpoint()?,
            platform: config.platform,
            page_size: config.page_size(),
            token: config.token.clone(),
        })
    }

    fn transport_error(&self, message: String) -> Error {
        Error::Transport {
            url: self.endpoint.clone(),
            message,
        }
    }
}

impl PageFetcher for HttpPageFetcher {
    fn fetch_page(&self, page: u32) -> Result<Value> {
        let mut request = self.client.get(&self.endpoint).query(&[
            ("page", page.to_string()),
            ("per_page", self.page_size.to_string()),
        ]);

        // GitHub authenticates in headers, GitLab in the query string.
        match self.platform {
            Platform::Github => {
                request = request
                    .header("Accept", "application/vnd.github+json")
                    .header("X-GitHub-Api-Version", "2022-11-28");
                if let Some(token) = &self.token {
                    request = request.bearer_auth(token);
                }
            }
            Platform::Gitlab => {
                if let Some(token) = &self.token {
                    request = request.query(&[("private_token", token.as_str())]);
                }
            }
        }

        let response = request
            .send()
            .map_err(|e| self.transport_error(e.to_string()))?;

        response
            .json::<Value>()
            .map_err(|e| self.transport_error(format!("undecodable response body: {}", e)))
    }
}

/// Drives the pagination protocol over a [`PageFetcher`].
pub struct Pager<'a> {
    fetcher: &'a dyn PageFetcher,
    page_delay: Duration,
}

impl<'a> Pager<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, page_delay: Duration) -> Self {
        Self {
            fetcher,
            page_delay,
        }
    }

    /// Fetch every page of the listing and return all records in order.
    ///
    /// Pages are fetched strictly sequentially starting at page 1, with the
    /// configured delay between calls. Termination:
    ///
    /// - an empty page ends the listing normally;
    /// - an error object ends it early, keeping the records fetched so far
    ///   (the error description is logged for the operator);
    /// - any payload that is neither a record array nor an error object is
    ///   fatal ([`Error::Listing`]), as is any transport failure.
    pub fn fetch_all(&self) -> Result<Vec<RepoRecord>> {
        info!("Fetching all pages of the repository listing");
        let mut records: Vec<RepoRecord> = Vec::new();
        let mut page: u32 = 1;

        loop {
            let payload = self.fetcher.fetch_page(page)?;
            match payload {
                Value::Array(entries) => {
                    if entries.is_empty() {
                        break;
                    }
                    records.extend(entries);
                    info!("Processed page {}, {} records so far", page, records.len());
                }
                Value::Object(fields) if fields.contains_key("error") => {
                    let description = fields
                        .get("error_description")
                        .map(describe)
                        .unwrap_or_default();
                    warn!(
                        "Listing endpoint reported an error: {}: {}",
                        describe(&fields["error"]),
                        description
                    );
                    break;
                }
                other => {
                    return Err(Error::Listing {
                        page,
                        message: format!("expected a record array, got: {}", describe(&other)),
                    });
                }
            }

            page += 1;
            thread::sleep(self.page_delay);
        }

        info!("Fetched {} records in {} pages", records.len(), page - 1);
        Ok(records)
    }
}

/// Render a JSON value for a log line: bare strings lose their quotes,
/// anything else keeps its JSON form.
fn describe(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}
