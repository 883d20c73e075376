//! # Archive Creation
//!
//! Packages the working set into a single gzip-compressed tar archive. The
//! format choice is load-bearing: tar entries carry symbolic links as links
//! and keep POSIX file-mode and ownership bits, where zip-family formats
//! resolve links and drop attributes. A backup that silently flattens
//! symlinks is not a backup of the repository that was cloned.
//!
//! Entries are rooted at the source directory's *contents*: extracting the
//! archive reproduces the cloned repositories at the extraction root, not
//! nested under an extra directory level.
//!
//! On failure a partially written archive file is left in place. Truncated
//! output is evidence the operator may want to inspect, and the next run
//! writes to a fresh timestamped name anyway.

use std::fs::File;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use log::info;
use tar::Builder;

use crate::error::{Error, Result};

/// Interface for writing the working set to an archive file - allows
/// stubbing in tests
pub trait ArchiveWriter {
    /// Archive the contents of `source_dir` into the file at `out_path`.
    fn write(&self, source_dir: &Path, out_path: &Path) -> Result<()>;
}

/// `ArchiveWriter` producing a `.tar.gz` file.
pub struct TarGzWriter;

impl ArchiveWriter for TarGzWriter {
    fn write(&self, source_dir: &Path, out_path: &Path) -> Result<()> {
        info!(
            "Creating archive {} from {}",
            out_path.display(),
            source_dir.display()
        );

        let archive_error = |message: String| Error::Archive {
            path: out_path.display().to_string(),
            message,
        };

        let file = File::create(out_path)
            .map_err(|e| archive_error(format!("cannot create output file: {}", e)))?;
        let encoder = GzEncoder::new(file, Compression::default());

        let mut builder = Builder::new(encoder);
        // Keep symlinks as symlinks instead of archiving their targets
        builder.follow_symlinks(false);
        builder
            .append_dir_all(".", source_dir)
            .map_err(|e| archive_error(format!("cannot read {}: {}", source_dir.display(), e)))?;

        let encoder = builder
            .into_inner()
            .map_err(|e| archive_error(e.to_string()))?;
        encoder
            .finish()
            .map_err(|e| archive_error(e.to_string()))?;

        Ok(())
    }
}
