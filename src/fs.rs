//! File system seam used by the locator and the parser
//!
//! All snippet I/O goes through [`SnippetFs`] so hosts can plug in a virtual
//! file system and tests can observe how many reads a query performed.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

/// Asynchronous, read-only file system access
#[async_trait]
pub trait SnippetFs: Send + Sync {
    /// List the entries of a directory (non-recursive)
    async fn read_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Read a whole file as UTF-8
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Whether the path exists and is a directory
    async fn is_dir(&self, path: &Path) -> bool;
}

/// [`SnippetFs`] backed by `tokio::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFs;

#[async_trait]
impl SnippetFs for TokioFs {
    async fn read_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(dir).await?;
        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            paths.push(entry.path());
        }
        Ok(paths)
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    async fn is_dir(&self, path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }
}
