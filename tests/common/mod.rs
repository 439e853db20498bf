//! Shared test utilities for provider integration tests

#![allow(dead_code)]

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tempfile::TempDir;

use snippets_view::SnippetProvider;
use snippets_view::config::Settings;
use snippets_view::fs::{SnippetFs, TokioFs};
use snippets_view::notify::RecordingNotifier;
use snippets_view::source::{ContributedBundle, SourceLocator, StaticBundles};

/// [`SnippetFs`] that counts every call before delegating to `tokio::fs`
#[derive(Debug, Default)]
pub struct CountingFs {
    dir_reads: AtomicUsize,
    file_reads: AtomicUsize,
}

impl CountingFs {
    pub fn dir_reads(&self) -> usize {
        self.dir_reads.load(Ordering::SeqCst)
    }

    pub fn file_reads(&self) -> usize {
        self.file_reads.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.dir_reads() + self.file_reads()
    }
}

#[async_trait]
impl SnippetFs for CountingFs {
    async fn read_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        self.dir_reads.fetch_add(1, Ordering::SeqCst);
        TokioFs.read_dir(dir).await
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.file_reads.fetch_add(1, Ordering::SeqCst);
        TokioFs.read_to_string(path).await
    }

    async fn is_dir(&self, path: &Path) -> bool {
        TokioFs.is_dir(path).await
    }
}

/// Temporary layout with a workspace folder, a global store and an extensions dir
pub struct Fixture {
    pub temp: TempDir,
    pub fs: Arc<CountingFs>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Fixture {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        std::fs::create_dir_all(temp.path().join("global")).expect("Failed to create global dir");
        Self {
            temp,
            fs: Arc::new(CountingFs::default()),
            notifier: Arc::new(RecordingNotifier::new()),
        }
    }

    pub fn workspace(&self) -> PathBuf {
        self.temp.path().join("workspace")
    }

    pub fn global(&self) -> PathBuf {
        self.temp.path().join("global")
    }

    pub fn ext_dir(&self, bundle: &str) -> PathBuf {
        self.temp.path().join("extensions").join(bundle)
    }

    pub fn write_global(&self, name: &str, content: &str) -> PathBuf {
        write(&self.global().join(name), content)
    }

    pub fn write_workspace(&self, name: &str, content: &str) -> PathBuf {
        write(&self.workspace().join(".vscode").join(name), content)
    }

    pub fn write_ext(&self, bundle: &str, name: &str, content: &str) -> PathBuf {
        write(&self.ext_dir(bundle).join(name), content)
    }

    pub fn provider(&self, settings: Settings) -> SnippetProvider {
        self.provider_with_bundles(settings, Vec::new())
    }

    pub fn provider_with_bundles(
        &self,
        settings: Settings,
        bundles: Vec<ContributedBundle>,
    ) -> SnippetProvider {
        let fs: Arc<dyn SnippetFs> = self.fs.clone();
        let locator = SourceLocator::new(
            Arc::clone(&fs),
            vec![self.workspace()],
            self.global(),
            Arc::new(StaticBundles(bundles)),
        );
        SnippetProvider::with_notifier(locator, fs, settings, self.notifier.clone())
    }
}

fn write(path: &Path, content: &str) -> PathBuf {
    std::fs::create_dir_all(path.parent().expect("path has a parent"))
        .expect("Failed to create parent dir");
    std::fs::write(path, content).expect("Failed to write fixture file");
    path.to_path_buf()
}

pub fn flat() -> Settings {
    Settings {
        flatten: true,
        ..Settings::default()
    }
}
