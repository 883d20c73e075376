//! # Backup Run Driver
//!
//! Sequences one complete backup: enumerate repositories, clone them into a
//! fresh working set, package the working set into a timestamped archive,
//! then destroy the working copies. The driver owns the working directory
//! for the whole run; nothing else touches it.
//!
//! Execution is strictly sequential. Sequential cloning keeps the tool
//! inside API rate limits and keeps external `git` processes from
//! interleaving, at the cost of wall-clock time proportional to repository
//! count. The only timing control is the pager's inter-page delay; there
//! are no timeouts on HTTP calls or on the clone child process, so a hang
//! in either stalls the run.
//!
//! The collaborators (page fetcher, cloner, archive writer) come in through
//! their traits, so a complete run is testable with stubs and no network.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use log::info;

use crate::archive::ArchiveWriter;
use crate::config::BackupConfig;
use crate::error::Result;
use crate::extract;
use crate::git::{self, Cloner};
use crate::listing::{PageFetcher, Pager};

/// Timestamp format used in the archive filename, second resolution.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H%M%S";

/// One backup run wired to its external collaborators.
pub struct BackupRun<'a> {
    config: &'a BackupConfig,
    fetcher: &'a dyn PageFetcher,
    cloner: &'a dyn Cloner,
    archiver: &'a dyn ArchiveWriter,
}

impl<'a> BackupRun<'a> {
    pub fn new(
        config: &'a BackupConfig,
        fetcher: &'a dyn PageFetcher,
        cloner: &'a dyn Cloner,
        archiver: &'a dyn ArchiveWriter,
    ) -> Self {
        Self {
            config,
            fetcher,
            cloner,
            archiver,
        }
    }

    /// Execute the full pipeline and return the path of the archive.
    ///
    /// On any failure the working directory is left as-is: before archiving
    /// it holds whatever was cloned (useful for diagnosis, and the next run
    /// removes it), and there is never a partially written archive promoted
    /// to a deliverable. The working directory is destroyed only after the
    /// archive has been written successfully.
    pub fn execute(&self) -> Result<PathBuf> {
        let work_dir = &self.config.work_dir;

        // A leftover working set from a failed run must not leak into this
        // one. remove_dir_all does not follow symlinks, so links inside the
        // tree cannot reach outside it; their targets simply survive.
        if work_dir.exists() {
            info!("Removing leftover working set: {}", work_dir.display());
            fs::remove_dir_all(work_dir)?;
        }
        fs::create_dir_all(work_dir)?;
        fs::create_dir_all(&self.config.archive_dir)?;

        let pager = Pager::new(
            self.fetcher,
            Duration::from_millis(self.config.page_delay_ms),
        );
        let records = pager.fetch_all()?;

        let urls = extract::clone_urls(&records, self.config.platform.clone_url_field())?;
        info!("Found {} repos to back up", urls.len());

        git::clone_all(self.cloner, &urls, work_dir, self.config.limit)?;

        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        let archive_path = self.config.archive_dir.join(format!(
            "{}_Repos_{}.tar.gz",
            self.config.platform.archive_prefix(),
            timestamp
        ));
        self.archiver.write(work_dir, &archive_path)?;

        fs::remove_dir_all(work_dir)?;

        info!("Backup complete: {}", archive_path.display());
        Ok(archive_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::TarGzWriter;
    use crate::config;
    use crate::error::Error;
    use crate::listing::RepoRecord;
    use serde_json::{json, Value};
    use std::path::Path;
    use tempfile::TempDir;

    /// Serves one page of records followed by an empty page.
    struct SinglePageListing {
        records: Vec<RepoRecord>,
    }

    impl PageFetcher for SinglePageListing {
        fn fetch_page(&self, page: u32) -> Result<Value> {
            if page == 1 {
                Ok(Value::Array(self.records.clone()))
            } else {
                Ok(json!([]))
            }
        }
    }

    /// "Clones" by creating a directory named after the URL's last segment;
    /// optionally fails once a chosen URL comes up.
    struct FakeCloner {
        fail_on: Option<String>,
    }

    impl Cloner for FakeCloner {
        fn clone_repo(&self, url: &str, within: &Path) -> Result<()> {
            if self.fail_on.as_deref() == Some(url) {
                return Err(Error::CloneFailed {
                    url: url.to_string(),
                    message: "stub failure".to_string(),
                });
            }
            let name = url
                .rsplit('/')
                .next()
                .unwrap()
                .trim_end_matches(".git");
            let repo_dir = within.join(name);
            std::fs::create_dir_all(&repo_dir).unwrap();
            std::fs::write(repo_dir.join("README.md"), url).unwrap();
            Ok(())
        }
    }

    fn test_config(temp: &TempDir) -> BackupConfig {
        let yaml = format!(
            "platform: github\nusername: octocat\npage_delay_ms: 0\nwork_dir: {}\narchive_dir: {}\n",
            temp.path().join("repos").display(),
            temp.path().join("archives").display(),
        );
        config::parse(&yaml).unwrap()
    }

    fn two_repo_listing() -> SinglePageListing {
        SinglePageListing {
            records: vec![
                json!({ "clone_url": "https://example.com/u/alpha.git" }),
                json!({ "clone_url": "https://example.com/u/beta.git" }),
            ],
        }
    }

    fn archive_files(dir: &Path) -> Vec<String> {
        std::fs::read_dir(dir)
            .map(|entries| {
                entries
                    .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn test_successful_run_archives_and_cleans_up() {
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp);
        let fetcher = two_repo_listing();
        let cloner = FakeCloner { fail_on: None };

        let run = BackupRun::new(&config, &fetcher, &cloner, &TarGzWriter);
        let archive_path = run.execute().unwrap();

        // One archive, named <Prefix>_Repos_<timestamp>.tar.gz
        let archives = archive_files(&config.archive_dir);
        assert_eq!(archives, vec![archive_path.file_name().unwrap().to_string_lossy().into_owned()]);
        let name = &archives[0];
        assert!(name.starts_with("Github_Repos_"));
        assert!(name.ends_with(".tar.gz"));

        // Working directory is gone after a successful run
        assert!(!config.work_dir.exists());

        // The archive holds both repositories at top level
        let extracted = temp.path().join("extracted");
        std::fs::create_dir_all(&extracted).unwrap();
        let file = std::fs::File::open(&archive_path).unwrap();
        let mut reader = tar::Archive::new(flate2::read::GzDecoder::new(file));
        reader.unpack(&extracted).unwrap();
        assert!(extracted.join("alpha/README.md").is_file());
        assert!(extracted.join("beta/README.md").is_file());
    }

    #[test]
    fn test_clone_failure_leaves_no_archive() {
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp);
        let fetcher = two_repo_listing();
        let cloner = FakeCloner {
            fail_on: Some("https://example.com/u/beta.git".to_string()),
        };

        let run = BackupRun::new(&config, &fetcher, &cloner, &TarGzWriter);
        let err = run.execute().unwrap_err();

        assert!(matches!(err, Error::CloneFailed { .. }));
        // No archive was produced from the partial working set
        assert!(archive_files(&config.archive_dir).is_empty());
        // The partial working set stays on disk for diagnosis
        assert!(config.work_dir.join("alpha").is_dir());
    }

    #[test]
    fn test_stale_working_set_is_destroyed_first() {
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp);

        // Simulate a leftover from a previous failed run
        std::fs::create_dir_all(&config.work_dir).unwrap();
        std::fs::write(config.work_dir.join("stale-marker"), "old").unwrap();

        let fetcher = two_repo_listing();
        let cloner = FakeCloner { fail_on: None };
        let run = BackupRun::new(&config, &fetcher, &cloner, &TarGzWriter);
        let archive_path = run.execute().unwrap();

        // The stale marker must not appear in the archive
        let extracted = temp.path().join("extracted");
        std::fs::create_dir_all(&extracted).unwrap();
        let file = std::fs::File::open(&archive_path).unwrap();
        let mut reader = tar::Archive::new(flate2::read::GzDecoder::new(file));
        reader.unpack(&extracted).unwrap();
        assert!(!extracted.join("stale-marker").exists());
        assert!(extracted.join("alpha").is_dir());
    }

    #[test]
    fn test_limit_is_honored_end_to_end() {
        let temp = TempDir::new().unwrap();
        let mut config = test_config(&temp);
        config.limit = 1;

        let fetcher = two_repo_listing();
        let cloner = FakeCloner { fail_on: None };
        let run = BackupRun::new(&config, &fetcher, &cloner, &TarGzWriter);
        let archive_path = run.execute().unwrap();

        let extracted = temp.path().join("extracted");
        std::fs::create_dir_all(&extracted).unwrap();
        let file = std::fs::File::open(&archive_path).unwrap();
        let mut reader = tar::Archive::new(flate2::read::GzDecoder::new(file));
        reader.unpack(&extracted).unwrap();
        assert!(extracted.join("alpha").is_dir());
        assert!(!extracted.join("beta").exists());
    }

    #[test]
    fn test_missing_url_field_aborts_before_cloning() {
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp);
        let fetcher = SinglePageListing {
            records: vec![json!({ "name": "no-url" })],
        };
        let cloner = FakeCloner { fail_on: None };

        let run = BackupRun::new(&config, &fetcher, &cloner, &TarGzWriter);
        let err = run.execute().unwrap_err();

        assert!(matches!(err, Error::MissingField { .. }));
        assert!(archive_files(&config.archive_dir).is_empty());
    }
}
