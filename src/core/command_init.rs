//! Centralized initialization shared by the CLI commands.
//!
//! This module provides [`CommandInit`] which loads everything a command needs
//! before touching a repository: the settings file, the blacklist and a
//! [`RepoLocator`] wired to the configured git program.
//!
//! # Public API
//! - [`CommandInit`]: Main initializer with static methods
//! - [`CommandContext`]: Initialized context containing all required data
//! - [`ConfigOverrides`]: command line values that win over the files
//!
//! # Initialization Steps
//! 1. **Config directory**: `--config-dir` or the per-user default
//! 2. **Settings**: load `settings.json`, writing defaults on first run
//! 3. **Blacklist**: load `blacklist.conf`, writing the template on first run
//! 4. **Locator**: git runner plus blacklist

use crate::core::{
    blacklist::{Blacklist, BLACKLIST_FILE},
    config::Settings,
    dirs::get_config_directory,
    error::Result,
    git::GitCli,
    locator::RepoLocator,
    worker::WorkerOptions,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_dir: Option<PathBuf>,
    pub debounce_ms: Option<u64>,
}

/// Initialization context for commands that query repositories
pub struct CommandContext {
    pub config_dir: PathBuf,
    pub settings: Settings,
    pub blacklist_path: PathBuf,
    pub blacklist: Arc<Blacklist>,
    pub locator: RepoLocator,
}

impl CommandContext {
    pub fn worker_options(&self) -> WorkerOptions {
        WorkerOptions::from(&self.settings)
    }
}

pub struct CommandInit;

impl CommandInit {
    /// Load settings and blacklist and build a locator
    pub fn initialize(overrides: &ConfigOverrides) -> Result<CommandContext> {
        let config_dir = match &overrides.config_dir {
            Some(dir) => dir.clone(),
            None => get_config_directory()?,
        };
        log::debug!("using config directory {}", config_dir.display());

        let mut settings = Settings::load_or_create_in(&config_dir)?;
        if let Some(debounce_ms) = overrides.debounce_ms {
            settings.debounce_ms = debounce_ms;
        }

        let blacklist_path = config_dir.join(BLACKLIST_FILE);
        let blacklist = Arc::new(Blacklist::load_or_create_at(&blacklist_path)?);
        log::debug!("{} blacklisted directories", blacklist.entries().len());

        let git = Arc::new(GitCli::new(&settings.git_program));
        let locator = RepoLocator::new(git, Arc::clone(&blacklist));

        Ok(CommandContext {
            config_dir,
            settings,
            blacklist_path,
            blacklist,
            locator,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{blacklist::BLACKLIST_TEMPLATE, config::SETTINGS_FILE};
    use tempfile::TempDir;

    #[test]
    fn test_first_run_writes_both_files() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let overrides = ConfigOverrides {
            config_dir: Some(temp_dir.path().join("cfg")),
            debounce_ms: None,
        };

        let context = CommandInit::initialize(&overrides)?;
        assert!(context.config_dir.join(SETTINGS_FILE).exists());
        assert_eq!(std::fs::read_to_string(&context.blacklist_path)?, BLACKLIST_TEMPLATE);
        assert_eq!(context.settings, Settings::default());
        Ok(())
    }

    #[test]
    fn test_debounce_override_wins() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let overrides = ConfigOverrides {
            config_dir: Some(temp_dir.path().to_path_buf()),
            debounce_ms: Some(250),
        };

        let context = CommandInit::initialize(&overrides)?;
        assert_eq!(context.settings.debounce_ms, 250);
        assert_eq!(context.worker_options().debounce.as_millis(), 250);
        Ok(())
    }
}
