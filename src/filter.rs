//! Record filtering and relevance ordering

use std::cmp::Reverse;
use std::sync::Arc;

use crate::config::ViewConfig;
use crate::domain::SnippetRecord;

/// Whether a record survives the exclusion pattern and the active-context filter
pub fn keep(record: &SnippetRecord, config: &ViewConfig) -> bool {
    if let Some(exclude) = &config.exclude {
        if exclude.is_match(&record.key) {
            return false;
        }
    }

    // Global snippets always apply
    if let Some(language) = config.active_filter_language() {
        if !record.scope.is_empty() && !record.scope.iter().any(|s| s == language) {
            return false;
        }
    }

    true
}

/// Scope specificity: a single scope ranks above everything, then fewer
/// scopes above more, and global snippets last
pub fn specificity(record: &SnippetRecord) -> usize {
    match record.scope.len() {
        1 => usize::MAX,
        n => n,
    }
}

/// Stable sort by descending specificity
pub fn sort_by_scope(records: &mut [Arc<SnippetRecord>]) {
    records.sort_by_key(|r| Reverse(specificity(r)));
}

/// Filter then sort, returning a fresh sequence
pub fn apply(records: &[Arc<SnippetRecord>], config: &ViewConfig) -> Vec<Arc<SnippetRecord>> {
    let mut kept: Vec<Arc<SnippetRecord>> = records
        .iter()
        .filter(|r| keep(r, config))
        .cloned()
        .collect();
    sort_by_scope(&mut kept);
    kept
}
