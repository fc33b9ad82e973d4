//! Property-based tests for `mtime_core`.
//!
//! These tests verify invariants that should hold for any newest-first
//! history, catching edge cases that hand-written tests might miss.

use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use mtime_core::prelude::*;
use mtime_core::propagate::parent_dir;
use proptest::prelude::*;

const POOL: &[&str] = &[
    "a/b.txt",
    "a/c.txt",
    "d.txt",
    "a/x/y.rs",
    "e/f/g/h.md",
    "e/f/i.md",
    "z",
];

/// Commits as `(epoch, indices into POOL)`, sorted newest first.
fn history_strategy() -> impl Strategy<Value = Vec<(i64, Vec<usize>)>> {
    prop::collection::vec(
        (1i64..2_000_000_000, prop::collection::vec(0..POOL.len(), 0..5)),
        0..12,
    )
    .prop_map(|mut commits| {
        commits.sort_by(|a, b| b.0.cmp(&a.0));
        commits
    })
}

fn tracked_strategy() -> impl Strategy<Value = Vec<PathBuf>> {
    prop::collection::vec(any::<bool>(), POOL.len()).prop_map(|mask| {
        POOL.iter()
            .zip(mask)
            .filter(|(_, keep)| *keep)
            .map(|(p, _)| PathBuf::from(p))
            .collect()
    })
}

fn render(history: &[(i64, Vec<usize>)]) -> Vec<u8> {
    let mut out = Vec::new();
    for (n, (epoch, files)) in history.iter().enumerate() {
        out.extend_from_slice(
            format!("commit {n:040x}\ncommitter P <p@q> {epoch} -0700\n\n    msg {n}\n\n").as_bytes(),
        );
        for &idx in files {
            out.extend_from_slice(POOL[idx].as_bytes());
            out.push(b'\0');
        }
        out.extend_from_slice(b"\0\n");
    }
    out
}

fn scan(tracked: &[PathBuf], mode: ResolutionMode, stream: &[u8]) -> ScanOutcome {
    let mut engine = Engine::new(tracked.to_vec(), mode);
    engine.scan(Cursor::new(stream)).expect("in-memory scan cannot fail");
    engine.finish()
}

fn ancestors(file: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let mut dir = parent_dir(file);
    loop {
        out.push(dir.to_path_buf());
        let next = parent_dir(dir);
        if next == dir {
            return out;
        }
        dir = next;
    }
}

proptest! {
    /// Each resolved file carries the time of the newest commit naming it.
    #[test]
    fn resolved_time_is_newest_occurrence(
        tracked in tracked_strategy(),
        history in history_strategy(),
    ) {
        let outcome = scan(&tracked, ResolutionMode::FirstMatch, &render(&history));

        for path in &tracked {
            let newest = history
                .iter()
                .find(|(_, files)| files.iter().any(|&i| Path::new(POOL[i]) == path))
                .map(|(epoch, _)| CommitTime::from_epoch(*epoch));

            prop_assert_eq!(outcome.resolved.get(path).copied(), newest);
            prop_assert_eq!(outcome.unresolved.contains(path), newest.is_none());
        }
    }

    /// Every ledger entry is exactly the maximum over resolved descendants.
    #[test]
    fn ledger_is_max_over_descendants(
        tracked in tracked_strategy(),
        history in history_strategy(),
    ) {
        let outcome = scan(&tracked, ResolutionMode::FirstMatch, &render(&history));

        let mut expected: BTreeMap<PathBuf, CommitTime> = BTreeMap::new();
        for (file, &time) in &outcome.resolved {
            for dir in ancestors(file) {
                let slot = expected.entry(dir).or_insert(time);
                *slot = (*slot).max(time);
            }
        }

        let actual: BTreeMap<PathBuf, CommitTime> =
            outcome.ledger.iter().map(|(d, t)| (d.to_path_buf(), t)).collect();
        prop_assert_eq!(actual, expected);
    }

    /// Two scans over the same input agree.
    #[test]
    fn scan_is_idempotent(
        tracked in tracked_strategy(),
        history in history_strategy(),
    ) {
        let stream = render(&history);
        prop_assert_eq!(
            scan(&tracked, ResolutionMode::FirstMatch, &stream),
            scan(&tracked, ResolutionMode::FirstMatch, &stream)
        );
    }

    /// Once everything is resolved, trailing input cannot change the result.
    #[test]
    fn trailing_input_after_done_is_ignored(
        tracked in tracked_strategy(),
        history in history_strategy(),
        trailing in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        let stream = render(&history);
        let base = scan(&tracked, ResolutionMode::FirstMatch, &stream);
        prop_assume!(base.stopped_early());

        let mut extended = stream;
        extended.extend_from_slice(&trailing);
        let with_trailing = scan(&tracked, ResolutionMode::FirstMatch, &extended);

        prop_assert_eq!(base.resolved, with_trailing.resolved);
        prop_assert_eq!(base.ledger, with_trailing.ledger);
    }

    /// On ordered input both modes agree on every time.
    #[test]
    fn newest_mode_matches_first_match_on_ordered_history(
        tracked in tracked_strategy(),
        history in history_strategy(),
    ) {
        let stream = render(&history);
        let first = scan(&tracked, ResolutionMode::FirstMatch, &stream);
        let newest = scan(&tracked, ResolutionMode::Newest, &stream);

        prop_assert_eq!(first.resolved, newest.resolved);
        prop_assert_eq!(first.ledger, newest.ledger);
        prop_assert_eq!(first.unresolved, newest.unresolved);
    }

    /// Locally modified files never resolve.
    #[test]
    fn excluded_files_never_resolve(
        tracked in tracked_strategy(),
        history in history_strategy(),
        excluded_idx in 0..POOL.len(),
    ) {
        let modified = vec![PathBuf::from(POOL[excluded_idx])];
        let working = exclude_modified(tracked, &modified);
        let outcome = scan(&working, ResolutionMode::FirstMatch, &render(&history));

        prop_assert!(!outcome.resolved.contains_key(&modified[0]));
    }
}
