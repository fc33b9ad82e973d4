//! Directory timestamp ledger.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::{Path, PathBuf};

use crate::time::CommitTime;

/// Maps each directory to the newest commit time of any resolved file
/// beneath it.
///
/// Entries only ever grow: [`Ledger::observe`] keeps the maximum and never
/// removes a directory. Iteration is in path order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    dirs: BTreeMap<PathBuf, CommitTime>,
}

impl Ledger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `time` for `dir`, keeping the later of the stored and new time.
    ///
    /// Returns `true` if the entry was created or moved forward. An equal
    /// time is not an update.
    pub fn observe(&mut self, dir: &Path, time: CommitTime) -> bool {
        match self.dirs.entry(dir.to_path_buf()) {
            Entry::Vacant(entry) => {
                entry.insert(time);
                true
            }
            Entry::Occupied(mut entry) if time > *entry.get() => {
                entry.insert(time);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Returns the recorded time for `dir`.
    #[must_use]
    pub fn get(&self, dir: &Path) -> Option<CommitTime> {
        self.dirs.get(dir).copied()
    }

    /// Number of directories in the ledger.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    /// Returns `true` if no directory has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Iterates over `(directory, time)` pairs in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, CommitTime)> {
        self.dirs.iter().map(|(dir, &time)| (dir.as_path(), time))
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = (&'a Path, CommitTime);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
