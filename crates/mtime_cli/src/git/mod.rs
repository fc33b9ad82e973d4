//! Git repository access via the `git` executable.

mod history;

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use anyhow::Context as _;
use mtime_core::record::{bytes_to_path, split_nul_paths};
#[cfg(feature = "tracing")]
use tracing::debug;

pub use self::history::HistoryStream;

fn git_command(dir: &Path, args: &[&str]) -> Command {
    #[cfg(feature = "tracing")]
    debug!(dir = %dir.display(), "git {}", args.join(" "));

    let mut cmd = Command::new("git");
    cmd.args(args).current_dir(dir).stdin(Stdio::null());
    cmd
}

/// Runs `git <args>` in `dir` and returns its stdout, failing on a non-zero
/// exit with git's stderr in the message.
fn run_git(dir: &Path, args: &[&str]) -> anyhow::Result<Vec<u8>> {
    let output = git_command(dir, args)
        .output()
        .with_context(|| format!("failed to run `git {}`", args.join(" ")))?;

    if !output.status.success() {
        anyhow::bail!(
            "`git {}` failed ({}): {}",
            args.join(" "),
            describe_status(output.status),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(output.stdout)
}

fn describe_status(status: ExitStatus) -> String {
    status
        .code()
        .map_or_else(|| "terminated by signal".to_string(), |code| format!("exit code {code}"))
}

/// Returns the top-level directory of the working tree containing `dir`.
pub fn toplevel(dir: &Path) -> anyhow::Result<PathBuf> {
    let stdout = run_git(dir, &["rev-parse", "--show-toplevel"])?;
    let trimmed = stdout.strip_suffix(b"\n").unwrap_or(&stdout);
    Ok(bytes_to_path(trimmed).into_owned())
}

/// Lists tracked files, relative to `root`.
pub fn tracked_files(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    run_git(root, &["ls-files", "-z"]).map(|out| split_nul_paths(&out))
}

/// Lists tracked files whose working-tree content differs from the index.
pub fn modified_files(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    run_git(root, &["ls-files", "--modified", "-z"]).map(|out| split_nul_paths(&out))
}

/// Returns `true` if the repository is a shallow clone.
///
/// Errors are treated as "not shallow"; older git versions lack the flag.
#[must_use]
pub fn is_shallow(root: &Path) -> bool {
    run_git(root, &["rev-parse", "--is-shallow-repository"]).is_ok_and(|out| out.starts_with(b"true"))
}
