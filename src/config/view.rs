//! Immutable configuration snapshot consumed by the provider

use regex::{Regex, RegexBuilder};

use super::Settings;
use crate::error::SnippetError;

/// Compiled `excludeRegex`, matched case-insensitively against snippet names
#[derive(Debug, Clone)]
pub struct ExcludePattern(Regex);

impl ExcludePattern {
    /// Compile a pattern; an empty string clears the exclusion
    pub fn compile(pattern: &str) -> Result<Option<Self>, SnippetError> {
        if pattern.is_empty() {
            return Ok(None);
        }
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map(|re| Some(Self(re)))
            .map_err(|e| SnippetError::InvalidExclude {
                pattern: pattern.to_string(),
                source: e,
            })
    }

    pub fn is_match(&self, key: &str) -> bool {
        self.0.is_match(key)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialEq for ExcludePattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

/// Everything the filter, sort and presentation stages read
///
/// Replaced as a whole on every change, never edited in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub flatten: bool,
    pub only_for_active_editor: bool,
    pub include_extension_snippets: bool,
    pub show_scope: bool,
    pub focus_editor_after_insertion: bool,
    pub tree_view_collapsed_by_default: bool,
    pub exclude: Option<ExcludePattern>,
    /// Language id of the focused document, if known
    pub active_language: Option<String>,
}

impl ViewConfig {
    pub fn new(
        settings: &Settings,
        exclude: Option<ExcludePattern>,
        active_language: Option<String>,
    ) -> Self {
        Self {
            flatten: settings.flatten,
            only_for_active_editor: settings.only_for_active_editor,
            include_extension_snippets: settings.include_extension_snippets,
            show_scope: settings.show_scope,
            focus_editor_after_insertion: settings.focus_editor_after_insertion,
            tree_view_collapsed_by_default: settings.tree_view_collapsed_by_default,
            exclude,
            active_language,
        }
    }

    /// The language the active-context filter restricts to, when it applies
    pub fn active_filter_language(&self) -> Option<&str> {
        if self.only_for_active_editor {
            self.active_language.as_deref()
        } else {
            None
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::new(&Settings::default(), None, None)
    }
}
