//! The `git set-mtime` pipeline: enumerate, resolve, apply.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use mtime_core::CONFIG_FILENAME;
use mtime_core::prelude::*;
#[cfg(feature = "tracing")]
use tracing::debug;

use crate::git::{self, HistoryStream};
use crate::ui::{print_summary, print_warning};

/// Stamps the repository containing the current directory.
pub fn run() -> super::Result {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let root = git::toplevel(&cwd).context("not a git repository")?;

    let config = Config::load(&root.join(CONFIG_FILENAME)).context("loading config")?;

    let files = working_set(&root, &config)?;

    if git::is_shallow(&root) {
        print_warning("shallow clone detected, files older than the shallow boundary get its commit time");
    }

    let outcome = resolve(&root, files, &config)?;

    let summary = apply(&outcome, &FileTimeWriter::new(&root))?;
    print_summary(&summary, outcome.unresolved.len());

    Ok(())
}

/// Tracked files, minus local modifications when configured.
fn working_set(root: &Path, config: &Config) -> super::Result<Vec<PathBuf>> {
    let tracked = git::tracked_files(root).context("listing tracked files")?;

    if !config.skip_modified {
        return Ok(tracked);
    }

    let modified = git::modified_files(root).context("listing modified files")?;

    #[cfg(feature = "tracing")]
    debug!(tracked = tracked.len(), modified = modified.len(), "working set");

    Ok(exclude_modified(tracked, &modified))
}

/// Streams `git log` through the engine.
///
/// The producer's exit is checked before anything is written, so a failed
/// `git log` never leaves a partially stamped tree.
fn resolve(root: &Path, files: Vec<PathBuf>, config: &Config) -> super::Result<ScanOutcome> {
    let mut engine = Engine::from_config(files, config);
    if engine.state() == ScanState::Done {
        return Ok(engine.finish());
    }

    let mut stream = HistoryStream::spawn(root)?;
    let scanned = engine.scan(stream.reader());
    let closed_early = matches!(scanned, Ok(ScanState::Done) | Err(_));
    let exit = stream.finish(closed_early)?;

    scanned.context("reading `git log` output")?;
    exit.check()?;

    Ok(engine.finish())
}
