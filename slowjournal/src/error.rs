use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no entry at index {index} (list has {len})")]
    Index { index: usize, len: usize },
    #[error("skipped \"{name}\": {reason}")]
    Parse { name: String, reason: &'static str },
    #[error("invalid title \"{0}\": use a non-empty name without '_', '.', '/' or '\\'")]
    InvalidTitle(String),
    #[error("no journal directory is open")]
    NoDirectory,
    #[error("the scratch document has no file; keep it as an entry first")]
    Unmanaged,
    #[error("there is no scratch document to keep")]
    NotScratch,
}

impl JournalError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        JournalError::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, JournalError>;
