use std::path::PathBuf;

use thiserror::Error;

use crate::fragment::FragmentError;

/// Describes the potential error conditions that might arise from locating,
/// validating, or creating a repository.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    #[error("configuration missing: {0}")]
    MissingConfig(String),

    #[error("unsupported repositoryformatversion: {0:?}")]
    UnsupportedFormatVersion(String),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("{} is not empty", .0.display())]
    TargetNotEmpty(PathBuf),

    #[error("invalid path fragment {fragment:?}: {reason}")]
    InvalidPathFragment {
        fragment: String,
        reason: FragmentError,
    },

    #[error("malformed config at line {line}: {message}")]
    ConfigParse { line: usize, message: String },

    #[error("invalid value for {key}: {value:?}")]
    InvalidConfigValue { key: String, value: String },

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// A specialized `Result` type for repository operations.
pub type Result<T> = std::result::Result<T, Error>;
