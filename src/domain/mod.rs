//! Core domain types for snippet browsing

mod node;
mod snippet;

pub use node::Node;
pub use snippet::{
    CONTRIBUTED_LABEL_DELIMITER, Dialect, INSERT_COMMAND_ID, InsertCommand, SnippetBody,
    SnippetPrefix, SnippetRecord, SnippetSource, SourceKey, SourceOrigin, split_scope,
};
