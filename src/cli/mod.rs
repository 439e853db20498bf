//! CLI command implementations

pub mod list;

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use snippets_view::SnippetProvider;
use snippets_view::config::Settings;
use snippets_view::fs::{SnippetFs, TokioFs};
use snippets_view::source::{ManifestBundleRegistry, SourceLocator};

/// View options that override the settings file for one invocation
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Show all snippets in one list
    #[arg(long)]
    pub flat: bool,

    /// Language id of the "active document"
    #[arg(short, long)]
    pub language: Option<String>,

    /// Only show snippets for --language (plus global ones)
    #[arg(long)]
    pub only_active: bool,

    /// Hide snippets whose name matches this regex
    #[arg(long)]
    pub exclude: Option<String>,

    /// Include snippet files contributed by installed extensions
    #[arg(long)]
    pub extensions: bool,
}

impl ViewArgs {
    /// Settings with the command-line overrides applied
    pub fn apply(&self, settings: &Settings) -> Settings {
        let mut settings = settings.clone();
        settings.flatten |= self.flat;
        settings.only_for_active_editor |= self.only_active;
        settings.include_extension_snippets |= self.extensions;
        if let Some(exclude) = &self.exclude {
            settings.exclude_regex = exclude.clone();
        }
        settings
    }
}

/// Load settings from an explicit file or the workspace lookup chain
pub fn load_settings(workspace: &Path, config: Option<&Path>) -> Result<Settings> {
    match config {
        Some(path) => Settings::from_file(path),
        None => Settings::from_dir(workspace),
    }
}

/// Build a provider over the real file system
pub fn build_provider(workspaces: Vec<PathBuf>, settings: Settings) -> SnippetProvider {
    let fs: Arc<dyn SnippetFs> = Arc::new(TokioFs);
    let bundles = ManifestBundleRegistry::new(settings.resolve_extensions_dir(), Arc::clone(&fs));
    let locator = SourceLocator::new(
        Arc::clone(&fs),
        workspaces,
        settings.resolve_global_snippets_dir(),
        Arc::new(bundles),
    );
    SnippetProvider::new(locator, fs, settings)
}
