//! Test utilities for `mtime_core` (compiled only during testing).

use std::path::PathBuf;

pub fn paths(items: &[&str]) -> Vec<PathBuf> {
    items.iter().map(PathBuf::from).collect()
}

/// Builds byte streams shaped like
/// `git log -m -r --name-only --no-color --pretty=raw -z`.
///
/// Commits are added newest first. Each record ends with its NUL-separated
/// file list and a terminating NUL, after which the next record's header
/// follows on the same line.
#[derive(Debug, Default)]
pub struct HistoryBuilder {
    out: Vec<u8>,
    seq: u32,
}

impl HistoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commit(mut self, epoch: i64, files: &[&str]) -> Self {
        let sha = self.next_sha();
        self.record(&format!("commit {sha}"), epoch, files);
        self
    }

    /// Adds a merge commit, emitting one record per parent diff as `-m` does.
    pub fn merge(mut self, epoch: i64, parent_diffs: &[&[&str]]) -> Self {
        let sha = self.next_sha();
        for (n, files) in parent_diffs.iter().enumerate() {
            self.record(&format!("commit {sha} (from {:040x})", n + 1), epoch, files);
        }
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.out
    }

    fn next_sha(&mut self) -> String {
        self.seq += 1;
        format!("{:040x}", u64::from(self.seq) << 8)
    }

    fn record(&mut self, header: &str, epoch: i64, files: &[&str]) {
        let text = format!(
            "{header}\n\
             tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\n\
             author Test User <test@example.com> {epoch} +0100\n\
             committer Test User <test@example.com> {epoch} +0100\n\
             \n    change {seq}\n\n",
            seq = self.seq,
        );
        self.out.extend_from_slice(text.as_bytes());

        for file in files {
            self.out.extend_from_slice(file.as_bytes());
            self.out.push(b'\0');
        }
        self.out.push(b'\0');
    }
}
