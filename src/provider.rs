//! Snippet provider: the aggregation engine behind the snippet tree
//!
//! Answers `get_children` queries for the host UI. Root queries return either
//! the source files (tree mode) or every record across all files (flatten
//! mode); source queries return that file's records. Records are always
//! filtered and sorted against the current [`ViewConfig`] snapshot, while
//! enumeration and parsing results come from the [`SessionCache`].

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use futures::future::join_all;
use tokio::sync::watch;
use tracing::debug;

use crate::cache::{CacheStats, RecordList, SessionCache, SourceList};
use crate::config::{ConfigOption, ExcludePattern, Settings, ViewConfig, plan_changes};
use crate::domain::{Node, SnippetRecord, SnippetSource};
use crate::filter;
use crate::fs::SnippetFs;
use crate::notify::{LogNotifier, Notifier};
use crate::parser::parse_snippet_file;
use crate::source::SourceLocator;

/// Result of applying new settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeOutcome {
    pub changed: Vec<ConfigOption>,
    pub invalidated: bool,
    pub refreshed: bool,
}

pub struct SnippetProvider {
    locator: SourceLocator,
    fs: Arc<dyn SnippetFs>,
    cache: SessionCache,
    /// Current snapshot; replaced by a single assignment
    config: RwLock<Arc<ViewConfig>>,
    /// Raw settings the snapshot was built from, used to diff updates
    settings: Mutex<Settings>,
    notifier: Arc<dyn Notifier>,
    /// Bumped on every refresh
    changes: watch::Sender<u64>,
}

impl SnippetProvider {
    /// Create a provider reporting errors through `tracing`
    pub fn new(locator: SourceLocator, fs: Arc<dyn SnippetFs>, settings: Settings) -> Self {
        Self::with_notifier(locator, fs, settings, Arc::new(LogNotifier))
    }

    pub fn with_notifier(
        locator: SourceLocator,
        fs: Arc<dyn SnippetFs>,
        settings: Settings,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let exclude = ExcludePattern::compile(&settings.exclude_regex).unwrap_or_else(|e| {
            notifier.error(&e);
            None
        });
        let config = ViewConfig::new(&settings, exclude, None);
        let (changes, _) = watch::channel(0);

        Self {
            locator,
            fs,
            cache: SessionCache::new(),
            config: RwLock::new(Arc::new(config)),
            settings: Mutex::new(settings),
            notifier,
            changes,
        }
    }

    /// Current configuration snapshot
    pub fn config(&self) -> Arc<ViewConfig> {
        let guard = self.config.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    pub fn settings(&self) -> Settings {
        self.settings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn locator(&self) -> &SourceLocator {
        &self.locator
    }

    /// Replace the configuration snapshot wholesale
    pub fn update_config(&self, config: ViewConfig) {
        let mut guard = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(config);
    }

    /// Observe refreshes; the value is a generation counter
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    /// Notify observers that the tree changed, optionally dropping the cache
    pub async fn refresh(&self, invalidate_cache: bool) {
        if invalidate_cache {
            debug!("Invalidating snippet cache");
            self.cache.invalidate().await;
        }
        self.changes.send_modify(|generation| *generation += 1);
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Children of `node`, or the root level when `node` is `None`
    pub async fn get_children(&self, node: Option<&Node>) -> Vec<Node> {
        let config = self.config();
        match node {
            Some(Node::Source(source)) => {
                let records = self.records_for(source).await;
                filter::apply(&records, &config)
                    .into_iter()
                    .map(Node::Record)
                    .collect()
            }
            Some(Node::Record(_)) => Vec::new(),
            None if config.flatten => {
                let records = self.all_records(&config).await;
                filter::apply(&records, &config)
                    .into_iter()
                    .map(Node::Record)
                    .collect()
            }
            None => self
                .sources(&config)
                .await
                .iter()
                .cloned()
                .map(Node::Source)
                .collect(),
        }
    }

    /// Enumerated sources, cache-first
    async fn sources(&self, config: &ViewConfig) -> SourceList {
        if let Some(sources) = self.cache.sources().await {
            debug!("Take all snippet files from cache");
            return sources;
        }

        let enumeration = self
            .locator
            .enumerate(config.include_extension_snippets)
            .await;
        for err in &enumeration.errors {
            self.notifier.error(err);
        }

        // A failed directory stays empty until the next invalidation
        let sources: SourceList =
            Arc::new(enumeration.sources.into_iter().map(Arc::new).collect());
        self.cache.store_sources(Arc::clone(&sources)).await;
        sources
    }

    /// Parsed records of one source, cache-first; failures yield an empty,
    /// uncached result
    async fn records_for(&self, source: &Arc<SnippetSource>) -> RecordList {
        let key = source.key();
        if let Some(records) = self.cache.records(&key).await {
            debug!("Take file content from cache {:?}", key.path);
            return records;
        }

        match parse_snippet_file(self.fs.as_ref(), source).await {
            Ok(records) => {
                debug!("Read snippet file {:?} ({} records)", key.path, records.len());
                let records: RecordList = Arc::new(records.into_iter().map(Arc::new).collect());
                self.cache.store_records(key, Arc::clone(&records)).await;
                records
            }
            Err(e) => {
                self.notifier.error(&e);
                Arc::new(Vec::new())
            }
        }
    }

    async fn all_records(&self, config: &ViewConfig) -> Vec<Arc<SnippetRecord>> {
        let sources = self.sources(config).await;
        let parsed = join_all(sources.iter().map(|source| self.records_for(source))).await;
        parsed
            .iter()
            .flat_map(|records| records.iter().cloned())
            .collect()
    }

    /// Apply a new settings value: every changed option goes through the
    /// change table, the snapshot is swapped, then the tree is refreshed
    pub async fn apply_settings(&self, new: Settings) -> ChangeOutcome {
        let plan = {
            let mut current = self.settings.lock().unwrap_or_else(PoisonError::into_inner);
            let plan = plan_changes(&current, &new);
            if plan.changed.is_empty() {
                return ChangeOutcome::default();
            }

            let previous = self.config();
            let exclude = if plan.touches(ConfigOption::ExcludeRegex) {
                match ExcludePattern::compile(&new.exclude_regex) {
                    Ok(pattern) => pattern,
                    Err(e) => {
                        // Keep the previous exclusion rather than dropping it
                        self.notifier.error(&e);
                        previous.exclude.clone()
                    }
                }
            } else {
                previous.exclude.clone()
            };

            self.update_config(ViewConfig::new(
                &new,
                exclude,
                previous.active_language.clone(),
            ));
            *current = new;
            plan
        };

        debug!(
            "Settings changed: {:?} (invalidate: {})",
            plan.changed, plan.invalidate
        );
        if plan.refresh {
            self.refresh(plan.invalidate).await;
        }

        ChangeOutcome {
            changed: plan.changed,
            invalidated: plan.refresh && plan.invalidate,
            refreshed: plan.refresh,
        }
    }

    /// Active-context signal from the host
    ///
    /// The language is always recorded; the tree is refreshed only when the
    /// active-context filter is on and the language actually changed.
    pub async fn set_active_language(&self, language: Option<String>) -> bool {
        let filtering = {
            // Same lock as `apply_settings`, so neither update is lost
            let _settings = self.settings.lock().unwrap_or_else(PoisonError::into_inner);
            let previous = self.config();
            if previous.active_language == language {
                return false;
            }

            let mut next = ViewConfig::clone(&previous);
            next.active_language = language;
            self.update_config(next);
            previous.only_for_active_editor
        };

        if !filtering {
            return false;
        }
        self.refresh(false).await;
        true
    }
}
