//! # Repository Backup Library
//!
//! This library implements the fetch–clone–archive pipeline behind the
//! `repo-backup` command-line tool: enumerate every repository of an
//! account on a hosted git platform, clone them all to a local working
//! set, and package the working set into one timestamped `.tar.gz` archive
//! for offline storage.
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: the `.repo-backup.yaml` schema and the
//!   [`config::Platform`] abstraction holding everything that differs
//!   between GitHub- and GitLab-style APIs.
//! - **Listing (`listing`)**: the pagination protocol against the REST
//!   listing endpoint, behind the `PageFetcher` seam.
//! - **Extraction (`extract`)**: the pure record-to-clone-URL mapping.
//! - **Cloning (`git`)**: sequential, fail-fast clone orchestration over
//!   the system `git` binary, behind the `Cloner` seam.
//! - **Archiving (`archive`)**: tar.gz creation that keeps symlinks as
//!   links and preserves POSIX mode bits, behind the `ArchiveWriter` seam.
//! - **Run driver (`run`)**: the sequencing of one complete backup and the
//!   working-directory lifecycle.
//!
//! ## Execution Flow
//!
//! [`run::BackupRun::execute`] performs, in order:
//!
//! 1. Destroy any stale working set left by a previous failed run.
//! 2. Create a fresh working directory and the archive output directory.
//! 3. Page through the listing endpoint, accumulating every record.
//! 4. Extract one clone URL per record.
//! 5. Clone each repository sequentially, aborting on the first failure.
//! 6. Write `<Prefix>_Repos_<timestamp>.tar.gz` from the working set.
//! 7. Destroy the working set.
//!
//! Everything is deliberately single-threaded: a backup tool gains nothing
//! from racing its own rate limits.

pub mod archive;
pub mod config;
pub mod defaults;
pub mod error;
pub mod extract;
pub mod git;
pub mod listing;
pub mod output;
pub mod run;
