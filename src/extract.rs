//! Clone-URL extraction from raw listing records.
//!
//! A pure mapping step between the pager and the clone orchestrator: each
//! record must yield exactly one clone URL, read from the platform-specific
//! field. Nothing is skipped and nothing is deduplicated. A record the
//! platform listed is a repository the backup must contain, so a missing or
//! malformed URL field is a hard error rather than a warning.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::listing::RepoRecord;

/// Map every listing record to its clone URL, preserving order.
///
/// `field` is the platform's clone-URL key (`clone_url` on GitHub,
/// `http_url_to_repo` on GitLab). Fails on the first record where the field
/// is absent or not a string.
pub fn clone_urls(records: &[RepoRecord], field: &str) -> Result<Vec<String>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .get(field)
                .and_then(Value::as_str)
                .map(str::to_owned)
                .ok_or_else(|| Error::MissingField {
                    field: field.to_string(),
                    index,
                })
        })
        .collect()
}
