use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::engine::ResolutionMode;

/// Default upper bound on a single history line (8 MiB).
///
/// A file-list line holds every path a commit touched, so large commits
/// produce very long lines.
pub const DEFAULT_MAX_RECORD_BYTES: usize = 8 * 1024 * 1024;

/// Repository-level configuration loaded from `.git-set-mtime.toml`.
///
/// Every field is optional; a missing file behaves like an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Leave files with uncommitted local modifications untouched.
    pub skip_modified: bool,

    /// How a file's commit time is chosen from the history stream.
    pub resolution: ResolutionMode,

    /// Longest history line accepted, in bytes. Zero is rejected.
    #[serde(deserialize_with = "non_zero_bytes")]
    pub max_record_bytes: usize,
}

fn non_zero_bytes<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let bytes = usize::deserialize(deserializer)?;
    if bytes == 0 {
        return Err(serde::de::Error::custom("max_record_bytes must be greater than zero"));
    }
    Ok(bytes)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skip_modified: true,
            resolution: ResolutionMode::default(),
            max_record_bytes: DEFAULT_MAX_RECORD_BYTES,
        }
    }
}

impl Config {
    /// Creates a default configuration with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a `.git-set-mtime.toml` file.
    ///
    /// Returns the default configuration if the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })
    }
}

/// Errors that can occur when reading or parsing a `.git-set-mtime.toml`
/// configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read from disk.
    #[error("failed to read config '{path}': {source}")]
    Read {
        /// Path to the config file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file contained invalid TOML or unexpected values.
    #[error("failed to parse config '{path}': {source}")]
    Parse {
        /// Path to the config file that could not be parsed.
        path: PathBuf,
        /// The underlying TOML deserialization error.
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// Returns the file path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn default_skips_modified_and_uses_first_match() {
        let config = Config::default();
        assert!(config.skip_modified);
        assert_eq!(config.resolution, ResolutionMode::FirstMatch);
        assert_eq!(config.max_record_bytes, DEFAULT_MAX_RECORD_BYTES);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn from_toml_parses_all_fields() {
        let toml = r#"
            skip_modified = false
            resolution = "newest"
            max_record_bytes = 1024
        "#;
        let config = Config::from_toml(toml).unwrap();
        assert!(!config.skip_modified);
        assert_eq!(config.resolution, ResolutionMode::Newest);
        assert_eq!(config.max_record_bytes, 1024);
    }

    #[test]
    fn from_toml_parses_first_match() {
        let config = Config::from_toml(r#"resolution = "first-match""#).unwrap();
        assert_eq!(config.resolution, ResolutionMode::FirstMatch);
    }

    #[test]
    fn from_toml_rejects_unknown_keys() {
        let err = Config::from_toml("skip_modifed = false").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn from_toml_rejects_unknown_resolution() {
        assert!(Config::from_toml(r#"resolution = "oldest""#).is_err());
    }

    #[test]
    fn from_toml_rejects_zero_record_limit() {
        let err = Config::from_toml("max_record_bytes = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn load_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "skip_modified = false").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(!config.skip_modified);
    }

    #[test]
    fn load_reports_path_on_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "max_record_bytes = \"lots\"").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert_eq!(err.path(), file.path());
    }
}
