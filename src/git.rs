//! # Clone Orchestration
//!
//! Sequentially clones every repository of a run into the working set by
//! shelling out to the system `git` command. Going through the real client
//! means credential helpers, SSH keys, and whatever else is configured in
//! `~/.gitconfig` all work without this tool knowing about any of it.
//!
//! The orchestration policy is fail-fast: the first clone that fails aborts
//! the whole run. There is no retry and no skip-and-continue; an archive
//! produced from a working set with a hole in it would be a corrupt backup
//! wearing a valid filename.
//!
//! The [`Cloner`] trait is the seam that keeps the policy testable: the
//! application wires in [`GitCloner`], tests wire in stubs that succeed,
//! fail at a chosen position, or just record the calls they receive.

use std::path::Path;
use std::process::Command;

use log::info;

use crate::error::{Error, Result};

/// Interface for cloning one repository - allows stubbing in tests
pub trait Cloner {
    /// Clone `url` into a subdirectory of `within`.
    fn clone_repo(&self, url: &str, within: &Path) -> Result<()>;
}

/// `Cloner` backed by the system `git` binary.
pub struct GitCloner;

impl Cloner for GitCloner {
    fn clone_repo(&self, url: &str, within: &Path) -> Result<()> {
        // Capture output instead of inheriting it: cloning dozens of repos
        // would otherwise flood the log with git's own progress text.
        let output = Command::new("git")
            .args(["clone", url])
            .current_dir(within)
            .output()
            .map_err(|e| Error::CloneFailed {
                url: url.to_string(),
                message: format!("failed to run git: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::CloneFailed {
                url: url.to_string(),
                message: format!("git exited with {}: {}", output.status, stderr.trim()),
            });
        }

        Ok(())
    }
}

/// Clone each URL in order into `within`, stopping at the first failure.
///
/// A positive `limit` truncates the run after that many successful clones
/// (useful for manual testing and quota control); 0 means unlimited.
/// Returns the number of repositories cloned.
pub fn clone_all(
    cloner: &dyn Cloner,
    urls: &[String],
    within: &Path,
    limit: usize,
) -> Result<usize> {
    let mut count = 0;
    for url in urls {
        count += 1;
        info!("Cloning repo {}: {}", count, url);
        cloner.clone_repo(url, within)?;
        if limit > 0 && count >= limit {
            info!("Reached clone limit of {}, stopping", limit);
            break;
        }
    }
    Ok(count)
}
