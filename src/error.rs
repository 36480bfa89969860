use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the registry and option-assembly core. The CLI layer wraps
/// these in `anyhow` for reporting; nothing here is recoverable in place.
#[derive(Debug, Error)]
pub enum Error {
    /// The registry file is missing, unreadable, or holds a malformed line.
    #[error("registry <{}>: {reason}", path.display())]
    Storage { path: PathBuf, reason: String },

    /// The code being added is already assigned. `names` lists every country
    /// currently holding it (more than one only if the file was hand-edited
    /// into a corrupt state).
    #[error("<{code}> is already set to <{names:?}>")]
    DuplicateCode { code: String, names: Vec<String> },

    /// A structured option (e.g. `marker`) does not have the expected shape.
    #[error("option <{key}> is malformed: {reason}")]
    MalformedOption { key: String, reason: String },

    /// The table lacks a column the pipeline requires.
    #[error("table has no <{0}> column")]
    MissingColumn(String),
}

impl Error {
    pub(crate) fn storage(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::Storage {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed_option(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedOption {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
