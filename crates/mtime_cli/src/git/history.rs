//! Live `git log` output as a buffered stream.

use std::io::BufReader;
use std::path::Path;
use std::process::{Child, ChildStdout, ExitStatus, Stdio};

use anyhow::Context as _;
use mtime_core::ProducerExit;
#[cfg(feature = "tracing")]
use tracing::debug;

use super::git_command;

/// Every commit reachable from HEAD, one record per parent for merges, with
/// the committer header and the NUL-separated list of touched paths.
const LOG_ARGS: &[&str] = &["log", "-m", "-r", "--name-only", "--no-color", "--pretty=raw", "-z"];

const READ_BUFFER_SIZE: usize = 64 * 1024;

#[cfg(unix)]
const SIGPIPE: i32 = 13;

/// A running `git log` whose stdout is read line by line.
///
/// Call [`HistoryStream::finish`] to close the pipe and reap the process.
#[derive(Debug)]
pub struct HistoryStream {
    child: Child,
    stdout: BufReader<ChildStdout>,
}

impl HistoryStream {
    /// Starts `git log` in `root` with its stdout piped to us. Stderr is
    /// inherited so git's own messages reach the user.
    pub fn spawn(root: &Path) -> anyhow::Result<Self> {
        let mut child = git_command(root, LOG_ARGS)
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to start `git log`")?;

        let stdout = child.stdout.take().context("`git log` stdout was not captured")?;

        Ok(Self {
            child,
            stdout: BufReader::with_capacity(READ_BUFFER_SIZE, stdout),
        })
    }

    /// Buffered reader over the log output.
    pub fn reader(&mut self) -> &mut BufReader<ChildStdout> {
        &mut self.stdout
    }

    /// Closes our end of the pipe and waits for `git log` to exit.
    ///
    /// `closed_early` says whether we stopped reading before end-of-stream.
    /// A producer still writing at that point dies from a broken pipe, which
    /// is reported as `closed_by_reader`.
    pub fn finish(self, closed_early: bool) -> anyhow::Result<ProducerExit> {
        let Self { mut child, stdout } = self;
        drop(stdout);

        let status = child.wait().context("failed to wait for `git log`")?;

        #[cfg(feature = "tracing")]
        debug!(%status, closed_early, "git log exited");

        Ok(ProducerExit {
            code: status.code(),
            closed_by_reader: closed_by_reader(status, closed_early),
        })
    }
}

#[cfg(unix)]
fn closed_by_reader(status: ExitStatus, _closed_early: bool) -> bool {
    use std::os::unix::process::ExitStatusExt as _;

    status.signal() == Some(SIGPIPE)
}

/// Without signals, a write to a closed pipe surfaces as a plain failure
/// exit, so any failure after an early close is attributed to it.
#[cfg(not(unix))]
fn closed_by_reader(status: ExitStatus, closed_early: bool) -> bool {
    closed_early && !status.success()
}
