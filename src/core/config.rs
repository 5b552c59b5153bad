//! User settings, stored as `settings.json` in the config directory.

use crate::core::dirs::get_config_directory;
use crate::core::error::GitEmblemsError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Quiet period after the last submission before a batch is processed
    pub debounce_ms: u64,
    /// How often hosts poll the worker for ready results
    pub poll_interval_ms: u64,
    /// Draw the explicit clean emblem on clean files and folders
    pub show_clean: bool,
    /// Ask git for ignored paths too, so they resolve as ignored
    pub include_ignored: bool,
    pub git_program: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debounce_ms: 10,
            poll_interval_ms: 50,
            show_clean: false,
            include_ignored: true,
            git_program: "git".to_string(),
        }
    }
}

impl Settings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn load_or_create() -> Result<Self, GitEmblemsError> {
        Self::load_or_create_in(&get_config_directory()?)
    }

    pub fn load_or_create_in(config_dir: &Path) -> Result<Self, GitEmblemsError> {
        let settings_file = config_dir.join(SETTINGS_FILE);

        if settings_file.exists() {
            let content = std::fs::read_to_string(&settings_file)?;
            serde_json::from_str(&content)
                .map_err(|e| GitEmblemsError::settings_parse_failed(&settings_file, e))
        } else {
            let settings = Self::default();
            settings.save_in(config_dir)?;
            Ok(settings)
        }
    }

    pub fn save_in(&self, config_dir: &Path) -> Result<PathBuf, GitEmblemsError> {
        std::fs::create_dir_all(config_dir)?;

        let settings_file = config_dir.join(SETTINGS_FILE);
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&settings_file, content)?;

        log::debug!("wrote default settings to {}", settings_file.display());
        Ok(settings_file)
    }
}
