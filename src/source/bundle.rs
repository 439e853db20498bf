//! Snippet files contributed by installed bundles (editor extensions)
//!
//! A bundle declares its snippet files in its manifest:
//! ```json
//! { "publisher": "acme", "name": "go-tools",
//!   "contributes": { "snippets": [ { "language": "go", "path": "./snippets/go.json" } ] } }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{SnippetSource, SourceKey};
use crate::fs::SnippetFs;

/// Manifest file name inside a bundle directory
pub const MANIFEST_FILE: &str = "package.json";

/// One `contributes.snippets` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetContribution {
    pub language: String,
    /// Path relative to the bundle location
    pub path: String,
}

/// Metadata of one installed bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributedBundle {
    /// `publisher.name`
    pub id: String,
    /// Install directory; bundles without one are ignored
    pub location: Option<PathBuf>,
    pub snippets: Vec<SnippetContribution>,
}

/// Host query for the installed bundles
#[async_trait]
pub trait BundleRegistry: Send + Sync {
    async fn bundles(&self) -> Vec<ContributedBundle>;
}

/// Bundles supplied directly by the host
#[derive(Debug, Clone, Default)]
pub struct StaticBundles(pub Vec<ContributedBundle>);

#[async_trait]
impl BundleRegistry for StaticBundles {
    async fn bundles(&self) -> Vec<ContributedBundle> {
        self.0.clone()
    }
}

/// Reads bundle manifests from an extensions directory (`<dir>/<bundle>/package.json`)
pub struct ManifestBundleRegistry {
    extensions_dir: PathBuf,
    fs: Arc<dyn SnippetFs>,
}

impl ManifestBundleRegistry {
    pub fn new(extensions_dir: PathBuf, fs: Arc<dyn SnippetFs>) -> Self {
        Self { extensions_dir, fs }
    }

    async fn read_manifest(&self, bundle_dir: &Path) -> Option<ContributedBundle> {
        let manifest_path = bundle_dir.join(MANIFEST_FILE);
        let content = match self.fs.read_to_string(&manifest_path).await {
            Ok(content) => content,
            Err(e) => {
                debug!("No readable manifest at {:?}: {}", manifest_path, e);
                return None;
            }
        };

        let manifest: Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to parse bundle manifest {:?}: {}", manifest_path, e);
                return None;
            }
        };

        bundle_from_manifest(&manifest, bundle_dir)
    }
}

#[async_trait]
impl BundleRegistry for ManifestBundleRegistry {
    async fn bundles(&self) -> Vec<ContributedBundle> {
        let entries = match self.fs.read_dir(&self.extensions_dir).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "Failed to read extensions directory {:?}: {}",
                    self.extensions_dir, e
                );
                return Vec::new();
            }
        };

        let mut dirs = entries;
        dirs.sort();

        let mut bundles = Vec::new();
        for dir in dirs {
            if !self.fs.is_dir(&dir).await {
                continue;
            }
            if let Some(bundle) = self.read_manifest(&dir).await {
                bundles.push(bundle);
            }
        }
        bundles
    }
}

/// Extract the bundle id and snippet declarations from a manifest
pub fn bundle_from_manifest(manifest: &Value, location: &Path) -> Option<ContributedBundle> {
    let name = manifest.get("name").and_then(Value::as_str)?;
    let id = match manifest.get("publisher").and_then(Value::as_str) {
        Some(publisher) => format!("{}.{}", publisher, name),
        None => name.to_string(),
    };

    let snippets = manifest
        .get("contributes")
        .filter(|c| c.is_object())?
        .get("snippets")?
        .as_array()?
        .iter()
        .filter_map(|entry| {
            let language = entry.get("language").and_then(Value::as_str)?;
            let path = entry.get("path").and_then(Value::as_str)?;
            Some(SnippetContribution {
                language: language.to_string(),
                path: path.to_string(),
            })
        })
        .collect();

    Some(ContributedBundle {
        id,
        location: Some(location.to_path_buf()),
        snippets,
    })
}

/// One source per declared (language, file); a repeated (path, language)
/// pair keeps its first position but takes the last registration
pub fn contributed_sources(bundles: &[ContributedBundle]) -> Vec<SnippetSource> {
    let mut sources: Vec<SnippetSource> = Vec::new();
    let mut index: HashMap<SourceKey, usize> = HashMap::new();

    for bundle in bundles {
        let Some(location) = &bundle.location else {
            debug!("Bundle {} has no install location", bundle.id);
            continue;
        };

        for contribution in &bundle.snippets {
            let path = location.join(contribution.path.trim_start_matches("./"));
            let source = SnippetSource::contributed(&bundle.id, &contribution.language, path);
            match index.get(&source.key()) {
                Some(&i) => sources[i] = source,
                None => {
                    index.insert(source.key(), sources.len());
                    sources.push(source);
                }
            }
        }
    }

    sources
}
