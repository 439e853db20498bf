//! Session cache for enumerated sources and parsed records
//!
//! Two independent slots:
//! - the enumerated source list (one sequence)
//! - parsed records per [`SourceKey`]
//!
//! Both are populated on miss and cleared together by [`SessionCache::invalidate`].
//! Concurrent population of the same key may redo the work; the last write wins.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{SnippetRecord, SnippetSource, SourceKey};

pub type SourceList = Arc<Vec<Arc<SnippetSource>>>;
pub type RecordList = Arc<Vec<Arc<SnippetRecord>>>;

/// Snapshot of what the cache currently holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub sources_cached: bool,
    pub parsed_sources: usize,
}

#[derive(Debug, Default)]
pub struct SessionCache {
    sources: RwLock<Option<SourceList>>,
    records: RwLock<HashMap<SourceKey, RecordList>>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sources(&self) -> Option<SourceList> {
        self.sources.read().await.clone()
    }

    pub async fn store_sources(&self, sources: SourceList) {
        *self.sources.write().await = Some(sources);
    }

    pub async fn records(&self, key: &SourceKey) -> Option<RecordList> {
        self.records.read().await.get(key).cloned()
    }

    pub async fn store_records(&self, key: SourceKey, records: RecordList) {
        self.records.write().await.insert(key, records);
    }

    /// Drop everything; the next query re-enumerates and re-parses
    pub async fn invalidate(&self) {
        *self.sources.write().await = None;
        self.records.write().await.clear();
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            sources_cached: self.sources.read().await.is_some(),
            parsed_sources: self.records.read().await.len(),
        }
    }
}
