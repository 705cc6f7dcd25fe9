use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShrinkError {
    #[error("Directory not found: {0}")]
    NotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to compress {path}: {reason}")]
    Compression { path: PathBuf, reason: String },

    #[error("Failed to {op} {path}: {source}")]
    Filesystem {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Walkdir error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Path {path} is not under {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("Staging directory already exists and is not empty: {0}")]
    StagingNotEmpty(PathBuf),

    #[error("Staged file missing before swap: {0}")]
    MissingStagedFile(PathBuf),

    #[error("Cannot place a staging directory next to {0}")]
    NoStagingLocation(PathBuf),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
}

impl ShrinkError {
    pub fn fs(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ShrinkError::Filesystem {
            op,
            path: path.into(),
            source,
        }
    }

    pub fn compression(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ShrinkError::Compression {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShrinkError>;
