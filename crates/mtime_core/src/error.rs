use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading the history stream.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The stream could not be read.
    #[error("failed to read history stream: {0}")]
    Read(#[from] std::io::Error),

    /// A single line exceeded the configured maximum length.
    #[error("history record longer than {limit} bytes")]
    RecordTooLong {
        /// The configured limit in bytes.
        limit: usize,
    },
}

/// Errors raised while writing timestamps to the filesystem.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// Setting access and modification time on a path failed.
    #[error("failed to set times on '{path}': {source}")]
    Write {
        /// The path whose timestamps could not be set.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ApplyError {
    /// Returns the path that failed.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Write { path, .. } => path,
        }
    }
}

/// Errors reported for the process that produced the history stream.
#[derive(Debug, Error)]
pub enum ProducerError {
    /// The producer exited unsuccessfully for a reason other than the
    /// reader closing the stream early.
    #[error("history producer failed ({})", describe_code(*.code))]
    Failed {
        /// Exit code, if the process exited normally.
        code: Option<i32>,
    },
}

fn describe_code(code: Option<i32>) -> String {
    code.map_or_else(|| "terminated by signal".to_string(), |c| format!("exit code {c}"))
}

/// Top-level error type for the resolve-then-apply pipeline.
///
/// Unifies configuration, scan, producer and apply errors for callers that
/// orchestrate the full workflow.
#[derive(Debug, Error)]
pub enum MtimeError {
    /// Configuration could not be read or parsed.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// The history stream could not be consumed.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// The history producer failed.
    #[error(transparent)]
    Producer(#[from] ProducerError),

    /// A timestamp could not be written.
    #[error(transparent)]
    Apply(#[from] ApplyError),
}
