//! Commit-history timestamp resolution for git working trees.
//!
//! Given the files tracked by a repository and a newest-first stream of raw
//! `git log` records, this crate finds the most recent commit time for every
//! file, lifts those times onto each containing directory, and writes them
//! back to the filesystem.
//!
//! # Main Types
//!
//! - [`Engine`] - Consumes the history stream and resolves commit times
//! - [`Ledger`] - Newest commit time per directory
//! - [`ScanOutcome`] - Resolved and unresolved files plus the ledger
//! - [`TimestampWriter`] - Seam for setting file times, see [`FileTimeWriter`]
//! - [`Config`] - Repository configuration loaded from `.git-set-mtime.toml`
//!
//! # Error Handling
//!
//! This crate uses [`thiserror`] for typed errors:
//!
//! - [`ScanError`] - The history stream could not be read
//! - [`ProducerError`] - The history producer failed
//! - [`ApplyError`] - A timestamp could not be written
//! - [`ConfigError`] - Configuration loading/parsing failures
//! - [`MtimeError`] - Top-level error enum combining the above
//!
//! The CLI crate (`mtime_cli`) uses `anyhow` for error propagation.

/// Writing resolved times to the filesystem.
pub mod apply;
/// User configuration loaded from `.git-set-mtime.toml`.
pub mod config;
/// The resolution engine that consumes the history stream.
pub mod engine;
/// Error types for scanning, applying, and producer failures.
pub mod error;
/// Directory-to-time ledger.
pub mod ledger;
/// Common re-exports for internal use.
pub mod prelude;
/// Exit classification for the history producer.
pub mod producer;
/// Directory propagation of commit times.
pub mod propagate;
/// Classification of raw history lines.
pub mod record;
#[cfg(test)]
pub(crate) mod test_utils;
/// Commit timestamps.
pub mod time;

pub use apply::{ApplySummary, FileTimeWriter, TimestampWriter, apply};
pub use config::{Config, ConfigError};
pub use engine::{Engine, ResolutionMode, ScanOutcome, ScanState, exclude_modified};
pub use error::{ApplyError, MtimeError, ProducerError, ScanError};
pub use ledger::Ledger;
pub use producer::ProducerExit;
pub use propagate::{parent_dir, propagate};
pub use record::{Record, parse_record, split_nul_paths};
pub use time::CommitTime;

/// Default filename for repository configuration.
pub const CONFIG_FILENAME: &str = ".git-set-mtime.toml";
