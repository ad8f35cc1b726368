//! Unhealthy-lag threshold resolution.
//!
//! The threshold is looked up on every evaluation so operators can change it
//! by writing a single integer to the override file, without a restart.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A present but unusable threshold override.
#[derive(Debug, Error)]
pub enum ThresholdError {
    #[error("threshold override {} is not an integer: {content:?}", .path.display())]
    Malformed { path: PathBuf, content: String },

    #[error("threshold override {} must be greater than zero", .path.display())]
    NotPositive { path: PathBuf },

    #[error("failed to read threshold override {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("threshold lookup task failed")]
    Lookup(#[source] tokio::task::JoinError),
}

/// Source of the maximum tolerated `trusted - local` height difference.
///
/// `resolve` may block; the evaluator calls it on the blocking pool.
pub trait ThresholdSource: Send + Sync {
    fn resolve(&self) -> Result<u64, ThresholdError>;
}

/// Threshold read from an optional override file, else a compiled default.
#[derive(Debug, Clone)]
pub struct FileThreshold {
    path: PathBuf,
    default: u64,
}

impl FileThreshold {
    pub fn new(path: impl Into<PathBuf>, default: u64) -> Self {
        Self {
            path: path.into(),
            default,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThresholdSource for FileThreshold {
    fn resolve(&self) -> Result<u64, ThresholdError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(self.default),
            Err(source) => {
                return Err(ThresholdError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(self.default);
        }

        let value: u64 = trimmed.parse().map_err(|_| ThresholdError::Malformed {
            path: self.path.clone(),
            content: trimmed.to_string(),
        })?;
        if value == 0 {
            return Err(ThresholdError::NotPositive {
                path: self.path.clone(),
            });
        }

        tracing::debug!(path = %self.path.display(), threshold = value, "Using threshold override");
        Ok(value)
    }
}

/// A constant threshold.
#[derive(Debug, Clone, Copy)]
pub struct FixedThreshold(pub u64);

impl ThresholdSource for FixedThreshold {
    fn resolve(&self) -> Result<u64, ThresholdError> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_in(dir: &tempfile::TempDir) -> FileThreshold {
        FileThreshold::new(dir.path().join("unhealthy_block_threshold"), 15)
    }

    #[test]
    fn test_missing_file_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(source_in(&dir).resolve().unwrap(), 15);
    }

    #[test]
    fn test_override_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let source = source_in(&dir);
        fs::write(source.path(), "42").unwrap();
        assert_eq!(source.resolve().unwrap(), 42);
    }

    #[test]
    fn test_override_tolerates_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let source = source_in(&dir);
        fs::write(source.path(), "42\n").unwrap();
        assert_eq!(source.resolve().unwrap(), 42);
    }

    #[test]
    fn test_read_fresh_each_time() {
        let dir = tempfile::tempdir().unwrap();
        let source = source_in(&dir);
        assert_eq!(source.resolve().unwrap(), 15);

        fs::write(source.path(), "7").unwrap();
        assert_eq!(source.resolve().unwrap(), 7);

        fs::remove_file(source.path()).unwrap();
        assert_eq!(source.resolve().unwrap(), 15);
    }

    #[test]
    fn test_malformed_override_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = source_in(&dir);
        fs::write(source.path(), "abc").unwrap();

        let err = source.resolve().unwrap_err();
        assert!(matches!(err, ThresholdError::Malformed { ref content, .. } if content == "abc"));
    }

    #[test]
    fn test_negative_and_zero_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let source = source_in(&dir);

        fs::write(source.path(), "-5").unwrap();
        assert!(matches!(source.resolve(), Err(ThresholdError::Malformed { .. })));

        fs::write(source.path(), "0").unwrap();
        assert!(matches!(source.resolve(), Err(ThresholdError::NotPositive { .. })));
    }

    #[test]
    fn test_empty_file_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let source = source_in(&dir);
        fs::write(source.path(), "").unwrap();
        assert_eq!(source.resolve().unwrap(), 15);
    }

    #[test]
    fn test_directory_in_place_of_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = source_in(&dir);
        fs::create_dir(source.path()).unwrap();
        assert!(matches!(source.resolve(), Err(ThresholdError::Io { .. })));
    }

    #[test]
    fn test_fixed() {
        assert_eq!(FixedThreshold(3).resolve().unwrap(), 3);
    }
}
