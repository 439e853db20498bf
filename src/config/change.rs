//! How option changes propagate through the pipeline
//!
//! Every option maps to a [`ChangeEffect`]. Options that change what is
//! discovered or how it is parsed invalidate the session cache; the others are
//! re-evaluated per query against cached data.

use serde::{Deserialize, Serialize};

use super::Settings;

/// A named configuration option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfigOption {
    Flatten,
    OnlyForActiveEditor,
    IncludeExtensionSnippets,
    ShowScope,
    ExcludeRegex,
    FocusEditorAfterInsertion,
    TreeViewCollapsedByDefault,
}

/// Pipeline stage an option feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    /// Source enumeration and parsing
    Enumeration,
    /// Per-query filtering
    Filter,
    /// Rendering only
    Presentation,
    /// The insertion collaborator; the tree is unaffected
    Insertion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEffect {
    pub invalidate: bool,
    pub stage: PipelineStage,
}

impl ChangeEffect {
    const fn new(invalidate: bool, stage: PipelineStage) -> Self {
        Self { invalidate, stage }
    }

    /// Whether the tree has to be redrawn
    pub fn needs_refresh(&self) -> bool {
        self.stage != PipelineStage::Insertion
    }
}

pub const OPTION_EFFECTS: &[(ConfigOption, ChangeEffect)] = &[
    (
        ConfigOption::Flatten,
        ChangeEffect::new(true, PipelineStage::Enumeration),
    ),
    (
        ConfigOption::OnlyForActiveEditor,
        ChangeEffect::new(true, PipelineStage::Enumeration),
    ),
    (
        ConfigOption::IncludeExtensionSnippets,
        ChangeEffect::new(true, PipelineStage::Enumeration),
    ),
    (
        ConfigOption::ExcludeRegex,
        ChangeEffect::new(false, PipelineStage::Filter),
    ),
    (
        ConfigOption::ShowScope,
        ChangeEffect::new(false, PipelineStage::Presentation),
    ),
    (
        ConfigOption::TreeViewCollapsedByDefault,
        ChangeEffect::new(false, PipelineStage::Presentation),
    ),
    (
        ConfigOption::FocusEditorAfterInsertion,
        ChangeEffect::new(false, PipelineStage::Insertion),
    ),
];

impl ConfigOption {
    /// Option name as used in settings files
    pub fn name(&self) -> &'static str {
        match self {
            ConfigOption::Flatten => "flatten",
            ConfigOption::OnlyForActiveEditor => "onlyForActiveEditor",
            ConfigOption::IncludeExtensionSnippets => "includeExtensionSnippets",
            ConfigOption::ShowScope => "showScope",
            ConfigOption::ExcludeRegex => "excludeRegex",
            ConfigOption::FocusEditorAfterInsertion => "focusEditorAfterInsertion",
            ConfigOption::TreeViewCollapsedByDefault => "treeViewCollapsedByDefault",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        OPTION_EFFECTS
            .iter()
            .map(|(option, _)| *option)
            .find(|option| option.name() == name)
    }

    pub fn effect(&self) -> ChangeEffect {
        OPTION_EFFECTS
            .iter()
            .find(|(option, _)| option == self)
            .map(|(_, effect)| *effect)
            // every option is listed; see test_every_option_has_an_effect
            .unwrap_or(ChangeEffect::new(true, PipelineStage::Enumeration))
    }

    fn differs(&self, old: &Settings, new: &Settings) -> bool {
        match self {
            ConfigOption::Flatten => old.flatten != new.flatten,
            ConfigOption::OnlyForActiveEditor => {
                old.only_for_active_editor != new.only_for_active_editor
            }
            ConfigOption::IncludeExtensionSnippets => {
                old.include_extension_snippets != new.include_extension_snippets
            }
            ConfigOption::ShowScope => old.show_scope != new.show_scope,
            ConfigOption::ExcludeRegex => old.exclude_regex != new.exclude_regex,
            ConfigOption::FocusEditorAfterInsertion => {
                old.focus_editor_after_insertion != new.focus_editor_after_insertion
            }
            ConfigOption::TreeViewCollapsedByDefault => {
                old.tree_view_collapsed_by_default != new.tree_view_collapsed_by_default
            }
        }
    }
}

/// What a settings update requires
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangePlan {
    pub changed: Vec<ConfigOption>,
    pub invalidate: bool,
    pub refresh: bool,
}

impl ChangePlan {
    pub fn touches(&self, option: ConfigOption) -> bool {
        self.changed.contains(&option)
    }
}

/// Diff two settings values and fold the effects of every changed option
pub fn plan_changes(old: &Settings, new: &Settings) -> ChangePlan {
    let mut plan = ChangePlan::default();
    for (option, effect) in OPTION_EFFECTS {
        if !option.differs(old, new) {
            continue;
        }
        plan.changed.push(*option);
        plan.invalidate |= effect.invalidate;
        plan.refresh |= effect.needs_refresh();
    }
    plan
}
