//! Line classification for `git log --pretty=raw --name-only -z` output.
//!
//! The raw stream interleaves commit headers, indented message lines and
//! NUL-separated file lists. Only two shapes matter here: the `committer`
//! header, which carries the commit time, and the file list, which names
//! the paths the commit touched. Everything else is [`Record::Other`].

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::bytes::Regex;

use crate::time::CommitTime;

/// Separator between paths in a file-list line.
pub const SEPARATOR: u8 = b'\0';

/// Doubled separator that ends the file list of one commit.
const LIST_TERMINATOR: &[u8] = b"\0\0";

static COMMITTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[expect(clippy::unwrap_used, reason = "static regex is known-valid at compile time")]
    Regex::new(r"^committer .*? (\d+) [-+]\d+$").unwrap()
});

/// A classified line of the history stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record<'a> {
    /// A `committer` header with its epoch seconds.
    Committer(CommitTime),
    /// Paths touched by the current commit.
    Files(FileList<'a>),
    /// Anything else: headers, message lines, malformed committer lines.
    Other,
}

/// The paths of one file-list line, borrowed from the line buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileList<'a> {
    raw: &'a [u8],
}

impl<'a> FileList<'a> {
    /// Iterates over the non-empty paths in the list.
    pub fn paths(&self) -> impl Iterator<Item = &'a [u8]> + use<'a> {
        self.raw.split(|&b| b == SEPARATOR).filter(|p| !p.is_empty())
    }

    /// Returns `true` if the list names no paths (e.g. an empty merge diff).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths().next().is_none()
    }
}

/// Classifies one line of the history stream, without its trailing newline.
///
/// A line containing [`SEPARATOR`] is a file list; otherwise a line shaped
/// like `committer <ident> <epoch> <+/-offset>` yields its epoch. Lines that
/// match neither are [`Record::Other`], including committer lines whose epoch
/// does not fit in an `i64`.
#[must_use]
pub fn parse_record(line: &[u8]) -> Record<'_> {
    if line.contains(&SEPARATOR) {
        return Record::Files(parse_file_list(line));
    }

    parse_committer(line).map_or(Record::Other, Record::Committer)
}

fn parse_file_list(line: &[u8]) -> FileList<'_> {
    let list = find_subslice(line, LIST_TERMINATOR).map_or(line, |end| &line[..end]);

    let mut end = list.len();
    while end > 0 && list[end - 1] == SEPARATOR {
        end -= 1;
    }

    FileList { raw: &list[..end] }
}

fn parse_committer(line: &[u8]) -> Option<CommitTime> {
    let captures = COMMITTER_PATTERN.captures(line)?;
    let digits = std::str::from_utf8(captures.get(1)?.as_bytes()).ok()?;
    digits.parse::<i64>().ok().map(CommitTime::from_epoch)
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Splits NUL-separated output (as printed by `git ls-files -z`) into paths,
/// skipping empty entries.
#[must_use]
pub fn split_nul_paths(output: &[u8]) -> Vec<PathBuf> {
    output
        .split(|&b| b == SEPARATOR)
        .filter(|p| !p.is_empty())
        .map(|p| bytes_to_path(p).into_owned())
        .collect()
}

/// Interprets raw path bytes from git as a filesystem path.
///
/// Bytes are kept verbatim on Unix. Elsewhere git emits UTF-8, and any
/// invalid sequence is replaced.
#[cfg(unix)]
#[must_use]
pub fn bytes_to_path(bytes: &[u8]) -> Cow<'_, Path> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt as _;

    Cow::Borrowed(Path::new(OsStr::from_bytes(bytes)))
}

/// Interprets raw path bytes from git as a filesystem path.
///
/// Bytes are kept verbatim on Unix. Elsewhere git emits UTF-8, and any
/// invalid sequence is replaced.
#[cfg(not(unix))]
#[must_use]
pub fn bytes_to_path(bytes: &[u8]) -> Cow<'_, Path> {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(s) => Cow::Borrowed(Path::new(s)),
        Cow::Owned(s) => Cow::Owned(PathBuf::from(s)),
    }
}
