//! Exit classification for the process feeding the history stream.

use crate::error::ProducerError;

/// How the history producer ended, as reported by the process wrapper.
///
/// `closed_by_reader` is set by the wrapper when the producer died from the
/// reader closing the pipe (SIGPIPE on Unix). Keeping that check in the
/// wrapper leaves this type free of platform details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProducerExit {
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
    /// The process ended because the reader closed the stream early.
    pub closed_by_reader: bool,
}

impl ProducerExit {
    /// A producer that exited with status zero.
    #[must_use]
    pub const fn success() -> Self {
        Self {
            code: Some(0),
            closed_by_reader: false,
        }
    }

    /// Accepts a clean exit or an exit caused by our own early close.
    pub fn check(self) -> Result<(), ProducerError> {
        if self.code == Some(0) || self.closed_by_reader {
            return Ok(());
        }

        Err(ProducerError::Failed { code: self.code })
    }
}
