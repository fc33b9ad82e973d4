//! Writing resolved times back to the working tree.

use std::io;
use std::path::{Path, PathBuf};

#[cfg(feature = "tracing")]
use tracing::debug;

use crate::engine::ScanOutcome;
use crate::error::ApplyError;
use crate::time::CommitTime;

/// Sets access and modification time on a path.
pub trait TimestampWriter {
    /// Sets both times on `path` to `time` in a single operation, without
    /// following a symbolic link at `path`.
    fn set_times(&self, path: &Path, time: CommitTime) -> io::Result<()>;
}

/// Writes timestamps with `filetime`, resolving paths against a root.
#[derive(Debug, Clone)]
pub struct FileTimeWriter {
    root: PathBuf,
}

impl FileTimeWriter {
    /// Creates a writer for paths relative to `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TimestampWriter for FileTimeWriter {
    fn set_times(&self, path: &Path, time: CommitTime) -> io::Result<()> {
        let ft = time.to_file_time();
        filetime::set_symlink_file_times(self.root.join(path), ft, ft)
    }
}

/// Counts of paths written by [`apply`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    /// Resolved files stamped.
    pub files: usize,
    /// Ledger directories stamped.
    pub directories: usize,
}

/// Stamps every resolved file, then every ledger directory.
///
/// Stops at the first failure; the error names the path that failed.
pub fn apply<W>(outcome: &ScanOutcome, writer: &W) -> Result<ApplySummary, ApplyError>
where
    W: TimestampWriter + ?Sized,
{
    let mut summary = ApplySummary::default();

    for (path, &time) in &outcome.resolved {
        write(writer, path, time)?;
        summary.files += 1;
    }

    for (dir, time) in &outcome.ledger {
        write(writer, dir, time)?;
        summary.directories += 1;
    }

    #[cfg(feature = "tracing")]
    debug!(files = summary.files, directories = summary.directories, "timestamps applied");

    Ok(summary)
}

fn write<W>(writer: &W, path: &Path, time: CommitTime) -> Result<(), ApplyError>
where
    W: TimestampWriter + ?Sized,
{
    writer.set_times(path, time).map_err(|source| ApplyError::Write {
        path: path.to_path_buf(),
        source,
    })
}
