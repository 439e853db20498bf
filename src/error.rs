//! Error taxonomy for snippet discovery and parsing
//!
//! None of these are fatal: every variant is reported to the user and the
//! pipeline keeps going with whatever the other sources produced.

use std::path::PathBuf;

/// Error raised while locating, reading or parsing snippet sources
#[derive(Debug, thiserror::Error)]
pub enum SnippetError {
    #[error("Error reading directory {}: {source}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error reading file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parsing of snippet file {} failed: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Invalid regex for \"excludeRegex\" {pattern:?}: {source}")]
    InvalidExclude {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl SnippetError {
    /// Path of the file or directory the error refers to, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            SnippetError::DirectoryRead { path, .. }
            | SnippetError::FileRead { path, .. }
            | SnippetError::Parse { path, .. } => Some(path),
            SnippetError::InvalidExclude { .. } => None,
        }
    }
}
