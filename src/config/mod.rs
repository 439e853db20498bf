//! Configuration loading and change handling

mod change;
mod settings;
mod view;

pub use change::{
    ChangeEffect, ChangePlan, ConfigOption, OPTION_EFFECTS, PipelineStage, plan_changes,
};
pub use settings::Settings;
pub use view::{ExcludePattern, ViewConfig};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Directory holding the settings file, both per workspace and under `$HOME`
pub const CONFIG_DIR_NAME: &str = ".snippets-view";
pub const CONFIG_FILE_NAME: &str = "config.toml";

impl Settings {
    /// Get the global config directory path (~/.snippets-view/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
    }

    /// Get the global config file path (~/.snippets-view/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join(CONFIG_FILE_NAME)
    }

    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Load settings for a workspace
    /// Looks for: <dir>/.snippets-view/config.toml, then the global file, then defaults
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let local_path = dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
        if local_path.exists() {
            return Self::from_file(&local_path);
        }

        Self::load()
    }

    /// Load the global settings, or defaults when no file exists
    pub fn load() -> Result<Self> {
        let global_path = Self::global_config_path();
        if global_path.exists() {
            return Self::from_file(&global_path);
        }

        Ok(Self::default())
    }
}
