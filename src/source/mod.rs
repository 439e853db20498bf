//! Snippet source discovery
//!
//! Enumerates snippet files from:
//! 1. Workspace folders: `<folder>/.vscode/*.code-snippets`
//! 2. Global store: `*.json` and `*.code-snippets`
//! 3. Contributed bundles (when enabled): every declared (language, file)
//!
//! Sources come back in that order; nothing is sorted across classes.

mod bundle;

pub use bundle::{
    BundleRegistry, ContributedBundle, MANIFEST_FILE, ManifestBundleRegistry, SnippetContribution,
    StaticBundles, bundle_from_manifest, contributed_sources,
};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;
use tracing::debug;

use crate::domain::{Dialect, SnippetSource, SourceOrigin};
use crate::error::SnippetError;
use crate::fs::SnippetFs;

/// Per-folder directory holding workspace snippet files
pub const WORKSPACE_CONFIG_DIR: &str = ".vscode";

/// Result of a full enumeration: whatever could be found, plus the
/// directories that failed along the way
#[derive(Debug, Default)]
pub struct Enumeration {
    pub sources: Vec<SnippetSource>,
    pub errors: Vec<SnippetError>,
}

/// List the snippet files directly inside `dir` whose extension matches one
/// of `dialects`, sorted by file name
pub async fn sources_in_dir(
    fs: &dyn SnippetFs,
    dir: &Path,
    dialects: &[Dialect],
    origin: SourceOrigin,
) -> Result<Vec<SnippetSource>, SnippetError> {
    let mut entries = fs
        .read_dir(dir)
        .await
        .map_err(|e| SnippetError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
    entries.sort();

    let sources = entries
        .into_iter()
        .filter_map(|path| {
            let dialect = Dialect::from_path(&path).filter(|d| dialects.contains(d))?;
            Some(SnippetSource::from_file(path, dialect, origin.clone()))
        })
        .collect();

    Ok(sources)
}

/// Locates snippet sources across workspace, global and contributed stores
pub struct SourceLocator {
    fs: Arc<dyn SnippetFs>,
    workspace_folders: Vec<PathBuf>,
    global_dir: PathBuf,
    bundles: Arc<dyn BundleRegistry>,
}

impl SourceLocator {
    pub fn new(
        fs: Arc<dyn SnippetFs>,
        workspace_folders: Vec<PathBuf>,
        global_dir: PathBuf,
        bundles: Arc<dyn BundleRegistry>,
    ) -> Self {
        Self {
            fs,
            workspace_folders,
            global_dir,
            bundles,
        }
    }

    pub fn global_dir(&self) -> &Path {
        &self.global_dir
    }

    pub fn workspace_folders(&self) -> &[PathBuf] {
        &self.workspace_folders
    }

    /// Enumerate every source; directory failures are isolated per directory
    pub async fn enumerate(&self, include_contributed: bool) -> Enumeration {
        let mut enumeration = Enumeration::default();

        let workspace = join_all(
            self.workspace_folders
                .iter()
                .map(|folder| self.workspace_sources(folder)),
        )
        .await;
        for result in workspace {
            match result {
                Ok(sources) => enumeration.sources.extend(sources),
                Err(e) => enumeration.errors.push(e),
            }
        }

        match self.global_sources().await {
            Ok(sources) => enumeration.sources.extend(sources),
            Err(e) => enumeration.errors.push(e),
        }

        if include_contributed {
            let bundles = self.bundles.bundles().await;
            enumeration.sources.extend(contributed_sources(&bundles));
        }

        debug!(
            "Enumerated {} snippet sources ({} errors)",
            enumeration.sources.len(),
            enumeration.errors.len()
        );
        enumeration
    }

    async fn global_sources(&self) -> Result<Vec<SnippetSource>, SnippetError> {
        if !self.fs.is_dir(&self.global_dir).await {
            debug!("Global snippet directory does not exist: {:?}", self.global_dir);
            return Ok(Vec::new());
        }
        sources_in_dir(
            self.fs.as_ref(),
            &self.global_dir,
            &[Dialect::SingleScope, Dialect::MultiScope],
            SourceOrigin::Global,
        )
        .await
    }

    async fn workspace_sources(&self, folder: &Path) -> Result<Vec<SnippetSource>, SnippetError> {
        let dir = folder.join(WORKSPACE_CONFIG_DIR);
        if !self.fs.is_dir(&dir).await {
            debug!("Workspace snippet directory does not exist: {:?}", dir);
            return Ok(Vec::new());
        }
        sources_in_dir(
            self.fs.as_ref(),
            &dir,
            &[Dialect::MultiScope],
            SourceOrigin::Workspace,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::TokioFs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "{}").unwrap();
    }

    fn locator(folders: Vec<PathBuf>, global: PathBuf, bundles: StaticBundles) -> SourceLocator {
        SourceLocator::new(Arc::new(TokioFs), folders, global, Arc::new(bundles))
    }

    #[tokio::test]
    async fn test_sources_in_dir_filters_extensions() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("python.json"));
        touch(&temp.path().join("all.code-snippets"));
        touch(&temp.path().join("notes.md"));

        let sources = sources_in_dir(
            &TokioFs,
            temp.path(),
            &[Dialect::MultiScope],
            SourceOrigin::Workspace,
        )
        .await
        .unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].label, "all");
        assert_eq!(sources[0].dialect, Dialect::MultiScope);
    }

    #[tokio::test]
    async fn test_sources_in_missing_dir_is_error() {
        let temp = TempDir::new().unwrap();
        let result = sources_in_dir(
            &TokioFs,
            &temp.path().join("missing"),
            &[Dialect::SingleScope],
            SourceOrigin::Global,
        )
        .await;
        assert!(matches!(result, Err(SnippetError::DirectoryRead { .. })));
    }

    #[tokio::test]
    async fn test_enumeration_order_workspace_global_contributed() {
        let temp = TempDir::new().unwrap();
        let ws = temp.path().join("ws");
        let global = temp.path().join("global");
        touch(&ws.join(".vscode/project.code-snippets"));
        touch(&ws.join(".vscode/settings.json"));
        touch(&global.join("python.json"));
        touch(&global.join("shared.code-snippets"));

        let bundles = StaticBundles(vec![ContributedBundle {
            id: "acme.go".to_string(),
            location: Some(temp.path().join("ext")),
            snippets: vec![SnippetContribution {
                language: "go".to_string(),
                path: "go.json".to_string(),
            }],
        }]);

        let locator = locator(vec![ws], global, bundles);
        let labels: Vec<String> = locator
            .enumerate(true)
            .await
            .sources
            .into_iter()
            .map(|s| s.label)
            .collect();
        assert_eq!(
            labels,
            vec!["project", "python", "shared", "acme.go => go"]
        );

        let without = locator.enumerate(false).await;
        assert_eq!(without.sources.len(), 3);
    }

    #[tokio::test]
    async fn test_missing_workspace_dir_is_silent() {
        let temp = TempDir::new().unwrap();
        let global = temp.path().join("global");
        touch(&global.join("rust.json"));

        let locator = locator(
            vec![temp.path().join("no-vscode")],
            global,
            StaticBundles::default(),
        );
        let enumeration = locator.enumerate(false).await;
        assert_eq!(enumeration.sources.len(), 1);
        assert!(enumeration.errors.is_empty());
    }

    #[tokio::test]
    async fn test_missing_global_dir_is_silent() {
        let temp = TempDir::new().unwrap();
        let ws = temp.path().join("ws");
        touch(&ws.join(".vscode/team.code-snippets"));

        let locator = locator(
            vec![ws],
            temp.path().join("missing-global"),
            StaticBundles::default(),
        );
        let enumeration = locator.enumerate(false).await;
        assert_eq!(enumeration.sources.len(), 1);
        assert!(enumeration.errors.is_empty());
    }

    /// Directories exist but cannot be listed
    struct UnlistableFs;

    #[async_trait::async_trait]
    impl SnippetFs for UnlistableFs {
        async fn read_dir(&self, _dir: &Path) -> std::io::Result<Vec<PathBuf>> {
            Err(std::io::Error::from(std::io::ErrorKind::PermissionDenied))
        }

        async fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
            TokioFs.read_to_string(path).await
        }

        async fn is_dir(&self, _path: &Path) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn test_unreadable_dirs_are_isolated() {
        let locator = SourceLocator::new(
            Arc::new(UnlistableFs),
            vec![PathBuf::from("/ws")],
            PathBuf::from("/global"),
            Arc::new(StaticBundles(vec![ContributedBundle {
                id: "acme.go".to_string(),
                location: Some(PathBuf::from("/ext")),
                snippets: vec![SnippetContribution {
                    language: "go".to_string(),
                    path: "go.json".to_string(),
                }],
            }])),
        );
        let enumeration = locator.enumerate(true).await;
        assert_eq!(enumeration.sources.len(), 1);
        assert_eq!(enumeration.errors.len(), 2);
        assert!(enumeration
            .errors
            .iter()
            .all(|e| matches!(e, SnippetError::DirectoryRead { .. })));
    }
}
