use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Separator between bundle id and language in contributed source labels
pub const CONTRIBUTED_LABEL_DELIMITER: &str = " => ";

/// Command id the host binds to snippet insertion
pub const INSERT_COMMAND_ID: &str = "snippets-view.insertSnippet";

/// On-disk flavour of a snippet file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// `<language>.json`: entries without `scope` belong to the file's language
    SingleScope,
    /// `*.code-snippets`: every entry declares its own `scope` (or none = global)
    MultiScope,
}

impl Dialect {
    /// Recognised file extension (without the dot)
    pub fn extension(&self) -> &'static str {
        match self {
            Dialect::SingleScope => "json",
            Dialect::MultiScope => "code-snippets",
        }
    }

    /// Map a path's extension to a dialect
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str())? {
            "json" => Some(Dialect::SingleScope),
            "code-snippets" => Some(Dialect::MultiScope),
            _ => None,
        }
    }
}

/// Where a snippet source was found
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceOrigin {
    /// A workspace folder's local config directory
    Workspace,
    /// The user's global snippet store
    Global,
    /// A file declared by an installed bundle for one language
    Contributed { bundle_id: String, language: String },
}

/// Cache identity of a source: the path plus the contributed language, since
/// one physical file can be declared for several languages
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceKey {
    pub path: PathBuf,
    pub language: Option<String>,
}

/// A single file contributing zero or more snippet records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetSource {
    /// Display label (file stem, or `bundle => language` for contributed files)
    pub label: String,
    /// Absolute path of the file
    pub path: PathBuf,
    pub dialect: Dialect,
    pub origin: SourceOrigin,
}

impl SnippetSource {
    /// Create a workspace or global source from a file path
    pub fn from_file(path: PathBuf, dialect: Dialect, origin: SourceOrigin) -> Self {
        let label = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            label,
            path,
            dialect,
            origin,
        }
    }

    /// Create a source for a file contributed by a bundle for one language
    pub fn contributed(bundle_id: &str, language: &str, path: PathBuf) -> Self {
        Self {
            label: format!("{}{}{}", bundle_id, CONTRIBUTED_LABEL_DELIMITER, language),
            path,
            // Bundle files are always interpreted against their declared language
            dialect: Dialect::SingleScope,
            origin: SourceOrigin::Contributed {
                bundle_id: bundle_id.to_string(),
                language: language.to_string(),
            },
        }
    }

    /// Language declared by the contributing bundle
    pub fn contributed_language(&self) -> Option<&str> {
        match &self.origin {
            SourceOrigin::Contributed { language, .. } => Some(language),
            _ => None,
        }
    }

    pub fn is_contributed(&self) -> bool {
        matches!(self.origin, SourceOrigin::Contributed { .. })
    }

    pub fn key(&self) -> SourceKey {
        SourceKey {
            path: self.path.clone(),
            language: self.contributed_language().map(String::from),
        }
    }

    /// Scope assigned to entries that don't declare one
    pub fn default_scope(&self) -> Option<&str> {
        if let Some(language) = self.contributed_language() {
            return Some(language);
        }
        match self.dialect {
            Dialect::SingleScope => Some(&self.label),
            Dialect::MultiScope => None,
        }
    }
}

/// Snippet body: a single string or lines joined by newline on use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnippetBody {
    Text(String),
    Lines(Vec<String>),
}

impl Default for SnippetBody {
    fn default() -> Self {
        SnippetBody::Text(String::new())
    }
}

impl SnippetBody {
    /// Text handed to the insertion collaborator
    pub fn to_text(&self) -> String {
        match self {
            SnippetBody::Text(text) => text.clone(),
            SnippetBody::Lines(lines) => lines.join("\n"),
        }
    }
}

/// Snippet prefix; VS Code accepts a single trigger or a list of them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnippetPrefix {
    One(String),
    Many(Vec<String>),
}

impl Default for SnippetPrefix {
    fn default() -> Self {
        SnippetPrefix::Many(Vec::new())
    }
}

impl SnippetPrefix {
    pub fn as_vec(&self) -> Vec<&str> {
        match self {
            SnippetPrefix::One(p) => vec![p.as_str()],
            SnippetPrefix::Many(ps) => ps.iter().map(|p| p.as_str()).collect(),
        }
    }
}

/// Insertion payload attached to every record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertCommand {
    pub command: String,
    pub title: String,
    pub body: SnippetBody,
}

impl InsertCommand {
    pub fn new(body: SnippetBody) -> Self {
        Self {
            command: INSERT_COMMAND_ID.to_string(),
            title: "Insert Snippet".to_string(),
            body,
        }
    }
}

/// One named snippet definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetRecord {
    /// Entry name, unique within the source file
    pub key: String,
    /// Language ids the snippet applies to; empty means every language
    pub scope: Vec<String>,
    #[serde(default)]
    pub prefix: SnippetPrefix,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub command: InsertCommand,
    pub source: Arc<SnippetSource>,
}

impl SnippetRecord {
    pub fn is_global(&self) -> bool {
        self.scope.is_empty()
    }

    pub fn scope_label(&self) -> String {
        self.scope.join(",")
    }
}

/// Split a `scope` declaration into language ids
pub fn split_scope(scope: &str) -> Vec<String> {
    scope
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
