//! Upward propagation of a file's commit time onto its ancestors.

use std::path::Path;

use crate::ledger::Ledger;
use crate::time::CommitTime;

/// Root of a relative path chain.
pub const RELATIVE_ROOT: &str = ".";

/// Returns the directory containing `path`.
///
/// The chain reaches a fixed point at the root: `.` for relative paths and
/// `/` (or a drive prefix) for absolute ones, whose parent is themselves.
#[must_use]
pub fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new(RELATIVE_ROOT),
        Some(parent) => parent,
        None if path.as_os_str().is_empty() => Path::new(RELATIVE_ROOT),
        None => path,
    }
}

/// Records `time` on every ancestor directory of `file`, up to and including
/// the root.
///
/// Every ancestor is visited even when it already holds an equal or newer
/// time, since a sibling resolved earlier says nothing about the rest of
/// this chain.
pub fn propagate(ledger: &mut Ledger, file: &Path, time: CommitTime) {
    let mut dir = parent_dir(file);
    loop {
        ledger.observe(dir, time);

        let next = parent_dir(dir);
        if next == dir {
            break;
        }
        dir = next;
    }
}
