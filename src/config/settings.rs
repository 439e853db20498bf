//! User-facing option values

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw option values as stored by the configuration collaborator
///
/// Field names follow the host's option names (`flatten`, `excludeRegex`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Show every snippet in one list instead of grouping by file
    #[serde(default)]
    pub flatten: bool,

    /// Hide snippets scoped to languages other than the active document's
    #[serde(default)]
    pub only_for_active_editor: bool,

    /// Also list snippet files contributed by installed extensions
    #[serde(default)]
    pub include_extension_snippets: bool,

    /// Show the scope next to each snippet
    #[serde(default = "default_show_scope")]
    pub show_scope: bool,

    /// Hide snippets whose name matches this regex (case-insensitive, empty = off)
    #[serde(default)]
    pub exclude_regex: String,

    /// Return focus to the editor after inserting a snippet
    #[serde(default = "default_focus_editor_after_insertion")]
    pub focus_editor_after_insertion: bool,

    /// Render file nodes collapsed
    #[serde(default)]
    pub tree_view_collapsed_by_default: bool,

    /// Override for the global snippet store (read at startup)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_snippets_dir: Option<PathBuf>,

    /// Override for the installed extensions directory (read at startup)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions_dir: Option<PathBuf>,
}

fn default_show_scope() -> bool {
    true
}

fn default_focus_editor_after_insertion() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            flatten: false,
            only_for_active_editor: false,
            include_extension_snippets: false,
            show_scope: default_show_scope(),
            exclude_regex: String::new(),
            focus_editor_after_insertion: default_focus_editor_after_insertion(),
            tree_view_collapsed_by_default: false,
            global_snippets_dir: None,
            extensions_dir: None,
        }
    }
}

impl Settings {
    /// Global snippet store: the override, or the editor's user snippets folder
    pub fn resolve_global_snippets_dir(&self) -> PathBuf {
        self.global_snippets_dir.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Code")
                .join("User")
                .join("snippets")
        })
    }

    /// Extensions directory: the override, or `~/.vscode/extensions`
    pub fn resolve_extensions_dir(&self) -> PathBuf {
        self.extensions_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".vscode")
                .join("extensions")
        })
    }
}
