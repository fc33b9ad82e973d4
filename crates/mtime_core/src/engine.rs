//! Resolution engine: turns a newest-first history stream into per-file
//! commit times and a directory ledger.
//!
//! # Ordering precondition
//!
//! In [`ResolutionMode::FirstMatch`] the engine assumes the stream lists
//! commits newest first by committer time, as `git log` does by default.
//! The first commit that names a file therefore carries its newest time, the
//! file is dropped from the pending set, and the scan stops reading once
//! nothing is pending. The record format cannot prove this ordering; when it
//! cannot be trusted, [`ResolutionMode::Newest`] keeps the maximum time per
//! file over the whole stream instead.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::io::{BufRead, Read as _};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
#[cfg(feature = "tracing")]
use tracing::{debug, trace};

use crate::config::{Config, DEFAULT_MAX_RECORD_BYTES};
use crate::error::ScanError;
use crate::ledger::Ledger;
use crate::propagate::propagate;
use crate::record::{FileList, Record, bytes_to_path, parse_record};
use crate::time::CommitTime;

/// How a file's commit time is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionMode {
    /// First occurrence in the stream wins; the scan ends once every file is
    /// resolved. Requires newest-first ordering.
    #[default]
    FirstMatch,
    /// Newest time across the whole stream wins; the stream is always read
    /// to the end.
    Newest,
}

/// Whether the engine still needs input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// More records may resolve pending files.
    Scanning,
    /// Every tracked file is resolved; further input is ignored.
    Done,
}

/// Removes locally modified paths from the tracked set.
///
/// Files mid-edit keep their current timestamp rather than being stamped
/// with their last commit time.
#[must_use]
pub fn exclude_modified(tracked: Vec<PathBuf>, modified: &[PathBuf]) -> Vec<PathBuf> {
    if modified.is_empty() {
        return tracked;
    }

    let excluded: HashSet<&Path> = modified.iter().map(PathBuf::as_path).collect();
    tracked
        .into_iter()
        .filter(|path| !excluded.contains(path.as_path()))
        .collect()
}

/// Consumes history records and resolves a commit time for each tracked file.
#[derive(Debug)]
pub struct Engine {
    mode: ResolutionMode,
    max_record_bytes: usize,
    pending: HashSet<PathBuf>,
    resolved: BTreeMap<PathBuf, CommitTime>,
    ledger: Ledger,
    current: Option<CommitTime>,
    state: ScanState,
    lines_read: usize,
}

impl Engine {
    /// Creates an engine whose pending set is `tracked`.
    ///
    /// An engine with nothing to resolve starts out [`ScanState::Done`].
    #[must_use]
    pub fn new(tracked: impl IntoIterator<Item = PathBuf>, mode: ResolutionMode) -> Self {
        let pending: HashSet<PathBuf> = tracked.into_iter().collect();
        let state = if pending.is_empty() {
            ScanState::Done
        } else {
            ScanState::Scanning
        };

        Self {
            mode,
            max_record_bytes: DEFAULT_MAX_RECORD_BYTES,
            pending,
            resolved: BTreeMap::new(),
            ledger: Ledger::new(),
            current: None,
            state,
            lines_read: 0,
        }
    }

    /// Creates an engine using the mode and line limit from `config`.
    #[must_use]
    pub fn from_config(tracked: impl IntoIterator<Item = PathBuf>, config: &Config) -> Self {
        Self::new(tracked, config.resolution).with_max_record_bytes(config.max_record_bytes)
    }

    /// Sets the longest line [`Engine::scan`] accepts.
    #[must_use]
    pub const fn with_max_record_bytes(mut self, limit: usize) -> Self {
        self.max_record_bytes = limit;
        self
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ScanState {
        self.state
    }

    /// Returns `true` if `path` is still waiting for a commit time.
    #[must_use]
    pub fn is_pending(&self, path: &Path) -> bool {
        self.pending.contains(path) && !self.resolved.contains_key(path)
    }

    /// Number of files still waiting for a commit time.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        match self.mode {
            ResolutionMode::FirstMatch => self.pending.len(),
            ResolutionMode::Newest => self.pending.len() - self.resolved.len(),
        }
    }

    /// Returns the commit time resolved so far for `path`.
    #[must_use]
    pub fn resolved_time(&self, path: &Path) -> Option<CommitTime> {
        self.resolved.get(path).copied()
    }

    /// Processes one line of the history stream, without its newline.
    ///
    /// Once [`ScanState::Done`], lines are not even parsed.
    pub fn feed(&mut self, line: &[u8]) -> ScanState {
        if self.state == ScanState::Done {
            return self.state;
        }

        self.lines_read += 1;

        match parse_record(line) {
            Record::Committer(time) => self.current = Some(time),
            Record::Files(list) => self.resolve_list(&list),
            Record::Other => {}
        }

        if self.mode == ResolutionMode::FirstMatch && self.pending.is_empty() {
            #[cfg(feature = "tracing")]
            debug!(lines_read = self.lines_read, "all tracked files resolved");
            self.state = ScanState::Done;
        }

        self.state
    }

    /// Reads newline-terminated lines from `reader` until the stream ends or
    /// the engine is [`ScanState::Done`].
    ///
    /// Stops without consuming more input as soon as the last pending file
    /// resolves, so the caller can close a live producer early.
    pub fn scan<R: BufRead>(&mut self, mut reader: R) -> Result<ScanState, ScanError> {
        let limit = self.max_record_bytes;
        let mut line = Vec::new();

        while self.state == ScanState::Scanning {
            line.clear();

            let read = (&mut reader).take(limit as u64 + 1).read_until(b'\n', &mut line)?;
            if read == 0 {
                #[cfg(feature = "tracing")]
                debug!(
                    lines_read = self.lines_read,
                    pending = self.pending_count(),
                    "history stream ended"
                );
                break;
            }

            if line.last() == Some(&b'\n') {
                line.pop();
            } else if line.len() > limit {
                return Err(ScanError::RecordTooLong { limit });
            }

            self.feed(&line);
        }

        Ok(self.state)
    }

    /// Consumes the engine and returns what it resolved.
    #[must_use]
    pub fn finish(self) -> ScanOutcome {
        let unresolved = self
            .pending
            .into_iter()
            .filter(|path| !self.resolved.contains_key(path))
            .collect();

        ScanOutcome {
            resolved: self.resolved,
            unresolved,
            ledger: self.ledger,
            lines_read: self.lines_read,
            state: self.state,
        }
    }

    fn resolve_list(&mut self, list: &FileList<'_>) {
        let Some(time) = self.current else {
            return;
        };

        for raw in list.paths() {
            let path = bytes_to_path(raw);
            match self.mode {
                ResolutionMode::FirstMatch => {
                    if self.pending.remove(path.as_ref()) {
                        self.record(path.into_owned(), time);
                    }
                }
                ResolutionMode::Newest => {
                    if self.pending.contains(path.as_ref()) {
                        self.record(path.into_owned(), time);
                    }
                }
            }
        }
    }

    fn record(&mut self, path: PathBuf, time: CommitTime) {
        match self.resolved.entry(path) {
            Entry::Vacant(entry) => {
                #[cfg(feature = "tracing")]
                trace!(path = %entry.key().display(), %time, "resolved");
                propagate(&mut self.ledger, entry.key(), time);
                entry.insert(time);
            }
            Entry::Occupied(mut entry) if time > *entry.get() => {
                propagate(&mut self.ledger, entry.key(), time);
                entry.insert(time);
            }
            Entry::Occupied(_) => {}
        }
    }
}

/// Result of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Files matched to a commit, with their commit time.
    pub resolved: BTreeMap<PathBuf, CommitTime>,
    /// Tracked files that never appeared in the stream. They keep their
    /// existing timestamps.
    pub unresolved: BTreeSet<PathBuf>,
    /// Newest resolved time per directory.
    pub ledger: Ledger,
    /// Number of lines consumed from the stream.
    pub lines_read: usize,
    /// State the engine was in when the scan ended.
    pub state: ScanState,
}

impl ScanOutcome {
    /// Returns `true` if the scan stopped because nothing was left to resolve.
    #[must_use]
    pub fn stopped_early(&self) -> bool {
        self.state == ScanState::Done
    }
}
