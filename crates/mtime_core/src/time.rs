//! Commit timestamps.

use std::fmt;

use chrono::{DateTime, Utc};
use filetime::FileTime;

/// Committer time of a commit, in whole seconds since the Unix epoch (UTC).
///
/// The UTC offset recorded next to the epoch in git's raw format is not
/// kept: the epoch field is already timezone-normalised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommitTime(i64);

impl CommitTime {
    /// Creates a commit time from epoch seconds.
    #[must_use]
    pub const fn from_epoch(seconds: i64) -> Self {
        Self(seconds)
    }

    /// Returns the epoch seconds.
    #[must_use]
    pub const fn epoch(self) -> i64 {
        self.0
    }

    /// Converts to a UTC date-time, or `None` if out of chrono's range.
    #[must_use]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.0, 0)
    }

    /// Converts to the filesystem timestamp written to disk.
    #[must_use]
    pub fn to_file_time(self) -> FileTime {
        FileTime::from_unix_time(self.0, 0)
    }
}

impl fmt::Display for CommitTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S UTC")),
            None => write!(f, "@{}", self.0),
        }
    }
}
