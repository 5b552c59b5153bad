//! Locating repositories on disk.
//!
//! [`RepoLocator`] answers the questions the aggregator asks about a path
//! before scanning it: is it a repository root, is it inside a work tree,
//! where is its root, and does it have unpushed commits. Blacklisted paths
//! never reach git.

use crate::core::{
    blacklist::Blacklist,
    error::{GitEmblemsError, Result},
    git::GitRunner,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Name of the repository metadata directory
pub const DOT_GIT: &str = ".git";

#[derive(Clone)]
pub struct RepoLocator {
    git: Arc<dyn GitRunner>,
    blacklist: Arc<Blacklist>,
}

impl RepoLocator {
    pub fn new(git: Arc<dyn GitRunner>, blacklist: Arc<Blacklist>) -> Self {
        Self { git, blacklist }
    }

    pub fn git(&self) -> &dyn GitRunner {
        self.git.as_ref()
    }

    pub fn is_blacklisted(&self, path: &Path) -> bool {
        self.blacklist.contains(path)
    }

    /// Whether `path` has a `.git` directory directly beneath it
    pub fn is_repo(&self, path: &Path) -> bool {
        !self.is_blacklisted(path) && path.join(DOT_GIT).is_dir()
    }

    /// Whether `path` is inside a work tree (not inside `.git`)
    pub fn is_in_work_tree(&self, path: &Path) -> bool {
        if self.is_blacklisted(path) {
            return false;
        }
        match self.git.run(path, &["rev-parse", "--is-inside-work-tree"]) {
            Ok(output) => output.trim() == "true",
            Err(e) => {
                if !e.is_not_a_repository() {
                    log::warn!("work tree check failed for {}: {e}", path.display());
                }
                false
            }
        }
    }

    /// Root directory of the repository containing `path`
    pub fn repo_root(&self, path: &Path) -> Result<PathBuf> {
        if self.is_blacklisted(path) {
            return Err(GitEmblemsError::not_a_repository(path));
        }
        let output = self.git.run(path, &["rev-parse", "--git-dir"])?;
        let git_dir = output.trim();

        if git_dir == DOT_GIT {
            return Ok(path.to_path_buf());
        }
        // Anywhere but the root itself git answers with an absolute path
        Path::new(git_dir)
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| GitEmblemsError::not_a_repository(path))
    }

    /// Whether any local branch is ahead of its upstream
    pub fn is_ahead(&self, path: &Path) -> Result<bool> {
        let output = self.git.run(
            path,
            &["for-each-ref", "--format=%(push:track)", "refs/heads"],
        )?;
        Ok(output.contains("ahead"))
    }
}
