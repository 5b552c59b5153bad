//! Directories excluded from status scanning.
//!
//! The blacklist is a plain text file with one absolute directory per line.
//! Blank lines and lines starting with `#` are ignored. A listed directory
//! excludes itself and everything beneath it.

use crate::core::dirs::get_config_directory;
use crate::core::error::{GitEmblemsError, Result};
use std::path::{Path, PathBuf};

pub const BLACKLIST_FILE: &str = "blacklist.conf";

pub const BLACKLIST_TEMPLATE: &str = "# git-emblems blacklist file.
#
# Files in any directory listed here, and in any of its subdirectories, get
# no git emblems and never cause git to be run.
#
# Blank lines and lines beginning with '#' are ignored. A '#' character within
# a line is treated as part of the directory path, so end-of-line comments are
# not allowed.

# Example:
/home/user/clones/example_repo.git

# Another example:
/home/user/clones/some_other_example_huge_repo.git
";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    entries: Vec<PathBuf>,
}

impl Blacklist {
    pub fn new<I, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(PathBuf::from)
            .collect();
        Self { entries }
    }

    /// Load the blacklist from the default config directory
    pub fn load_or_create() -> Result<Self> {
        let path = get_config_directory()?.join(BLACKLIST_FILE);
        Self::load_or_create_at(&path)
    }

    /// Load the blacklist file, writing the template first if it is missing
    pub fn load_or_create_at(path: &Path) -> Result<Self> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| GitEmblemsError::blacklist_write_failed(path, e))?;
            }
            std::fs::write(path, BLACKLIST_TEMPLATE)
                .map_err(|e| GitEmblemsError::blacklist_write_failed(path, e))?;
            log::debug!("created blacklist template at {}", path.display());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| GitEmblemsError::blacklist_read_failed(path, e))?;
        Ok(Self::parse(&content))
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Whether `path` is a listed directory or lies beneath one
    pub fn contains(&self, path: &Path) -> bool {
        let hit = self.entries.iter().any(|entry| path.starts_with(entry));
        if hit {
            log::debug!("path is blacklisted: {}", path.display());
        }
        hit
    }
}
