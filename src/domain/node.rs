use std::sync::Arc;

use super::{SnippetRecord, SnippetSource};

/// Element of the snippet hierarchy handed to the host UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A snippet file; its children are the records it defines
    Source(Arc<SnippetSource>),
    /// A single snippet; always a leaf
    Record(Arc<SnippetRecord>),
}

impl Node {
    pub fn label(&self) -> &str {
        match self {
            Node::Source(source) => &source.label,
            Node::Record(record) => &record.key,
        }
    }

    /// The file this node comes from
    pub fn source(&self) -> &SnippetSource {
        match self {
            Node::Source(source) => source,
            Node::Record(record) => &record.source,
        }
    }

    pub fn as_record(&self) -> Option<&SnippetRecord> {
        match self {
            Node::Record(record) => Some(record),
            Node::Source(_) => None,
        }
    }
}
