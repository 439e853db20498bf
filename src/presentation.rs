//! Presentation adapter: turns [`Node`]s into host-neutral tree items
//!
//! The provider never deals with icons or collapse state; hosts render
//! whatever [`tree_item`] returns.

use serde::Serialize;
use std::path::PathBuf;

use crate::config::ViewConfig;
use crate::domain::{Dialect, InsertCommand, Node, SnippetRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    File,
    Folder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collapsible {
    None,
    Collapsed,
    Expanded,
}

/// Rendering data for one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeItem {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    pub collapsible: Collapsible,
    /// Context key hosts use to pick menu actions
    pub context_value: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<InsertCommand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<PathBuf>,
}

pub fn tree_item(node: &Node, config: &ViewConfig) -> TreeItem {
    match node {
        Node::Source(source) => TreeItem {
            label: source.label.clone(),
            description: None,
            tooltip: None,
            icon: Some(if source.is_contributed() {
                Icon::Folder
            } else {
                Icon::File
            }),
            collapsible: if config.tree_view_collapsed_by_default {
                Collapsible::Collapsed
            } else {
                Collapsible::Expanded
            },
            context_value: "snippetFile",
            command: None,
            resource: Some(source.path.clone()),
        },
        Node::Record(record) => TreeItem {
            label: record.key.clone(),
            description: record_description(record, config),
            tooltip: Some(record.scope_label()),
            icon: None,
            collapsible: Collapsible::None,
            context_value: "snippet",
            command: Some(record.command.clone()),
            resource: None,
        },
    }
}

/// Scope shown next to a record; redundant under a single-scope file node
fn record_description(record: &SnippetRecord, config: &ViewConfig) -> Option<String> {
    if record.source.dialect == Dialect::SingleScope && !config.flatten {
        return None;
    }
    if !config.show_scope {
        return None;
    }
    Some(record.scope_label())
}

/// What the insertion collaborator receives
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsertRequest {
    pub snippet: String,
    pub focus_editor: bool,
}

pub fn insert_request(record: &SnippetRecord, config: &ViewConfig) -> InsertRequest {
    InsertRequest {
        snippet: record.command.body.to_text(),
        focus_editor: config.focus_editor_after_insertion,
    }
}

/// File to open for a node, and the symbol to reveal in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTarget {
    pub path: PathBuf,
    pub symbol: String,
}

pub fn open_target(node: &Node) -> OpenTarget {
    OpenTarget {
        path: node.source().path.clone(),
        symbol: node.label().to_string(),
    }
}
