//! Mapping statuses to overlay emblems.
//!
//! An emblem is composed of up to four sub-icons placed in fixed slots:
//! an "ahead" marker, a "repo" marker, a left sub-icon (the index side, or
//! our side of a conflict) and a right sub-icon (the work tree side, or
//! their side of a conflict). Its name is `git-` followed by the present
//! sub-icons joined with `-`, e.g. `git-repo-added-modified`.
//!
//! [`emblem_for`] is pure: the same status and style always give the same
//! emblem. [`vocabulary`] lists every emblem it can produce, which is the
//! set of icons a theme has to ship.

use crate::core::status::{
    IndexStatus, MergeStatus, RepoStatus, Status, SyncStatus, WorktreeStatus,
};
use serde::{Serialize, Serializer};
use std::fmt;

const AHEAD: &str = "ahead";
const REPO: &str = "repo";
const CLEAN: &str = "clean";
const ADDED: &str = "added";
const RENAMED: &str = "renamed";
const DELETED: &str = "deleted";
const MODIFIED: &str = "modified";
const UNTRACKED: &str = "untracked";
const UNMERGED_ADDED: &str = "unmerged-added";
const UNMERGED_DELETED: &str = "unmerged-deleted";
const UNMERGED_MODIFIED: &str = "unmerged-modified";
const DOTGIT: &str = "dotgit";

/// Rendering options for [`emblem_for`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmblemStyle {
    /// Draw `git-clean` on files and folders with nothing to report
    pub show_clean: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Emblem {
    ahead: bool,
    repo: bool,
    left: Option<&'static str>,
    right: Option<&'static str>,
}

impl Emblem {
    const fn new(
        ahead: bool,
        repo: bool,
        left: Option<&'static str>,
        right: Option<&'static str>,
    ) -> Self {
        Self {
            ahead,
            repo,
            left,
            right,
        }
    }

    /// Emblem for the repository metadata directory
    pub const DOTGIT: Emblem = Emblem::new(false, false, None, Some(DOTGIT));

    /// Present sub-icons in slot order
    pub fn parts(&self) -> Vec<&'static str> {
        let mut parts = Vec::with_capacity(4);
        if self.ahead {
            parts.push(AHEAD);
        }
        if self.repo {
            parts.push(REPO);
        }
        parts.extend(self.left);
        parts.extend(self.right);
        parts
    }

    /// Icon name as installed in an icon theme
    pub fn name(&self) -> String {
        format!("git-{}", self.parts().join("-"))
    }
}

impl fmt::Display for Emblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl Serialize for Emblem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}

/// The emblem to draw for a status, or `None` if there is nothing to show
pub fn emblem_for(status: &Status, style: EmblemStyle) -> Option<Emblem> {
    let (sync, repo, files) = match status {
        Status::File(files) => {
            if files.worktree == WorktreeStatus::IsDotGit {
                return Some(Emblem::DOTGIT);
            }
            (SyncStatus::NotAhead, RepoStatus::NotARepo, *files)
        }
        Status::Repo(overall) => (overall.sync, overall.repo, overall.files),
    };
    let ahead = sync == SyncStatus::Ahead;
    let is_repo = repo == RepoStatus::IsARepo;

    let indeterminate = files.index == IndexStatus::Error
        || files.worktree == WorktreeStatus::Error
        || files.merge == MergeStatus::Error;

    let (left, mut right) = if indeterminate {
        (None, None)
    } else if files.worktree == WorktreeStatus::Unmerged {
        match files.merge {
            MergeStatus::TheyDeleted => (Some(UNMERGED_MODIFIED), Some(UNMERGED_DELETED)),
            MergeStatus::WeDeleted => (Some(UNMERGED_DELETED), Some(UNMERGED_MODIFIED)),
            MergeStatus::BothAdded => (Some(UNMERGED_ADDED), Some(UNMERGED_ADDED)),
            MergeStatus::BothModified => (Some(UNMERGED_MODIFIED), Some(UNMERGED_MODIFIED)),
            MergeStatus::NoConflict | MergeStatus::Error => (None, None),
        }
    } else {
        let left = match (files.index, files.worktree) {
            // A clean index is only worth showing next to untracked content
            (IndexStatus::Clean, WorktreeStatus::Untracked) => Some(CLEAN),
            (IndexStatus::Added, _) => Some(ADDED),
            (IndexStatus::Renamed, _) => Some(RENAMED),
            (IndexStatus::Deleted, _) => Some(DELETED),
            (IndexStatus::Modified, _) => Some(MODIFIED),
            _ => None,
        };
        let right = match files.worktree {
            WorktreeStatus::Clean => Some(CLEAN),
            WorktreeStatus::Untracked => Some(UNTRACKED),
            WorktreeStatus::Deleted => Some(DELETED),
            WorktreeStatus::Modified => Some(MODIFIED),
            _ => None,
        };
        (left, right)
    };

    let marked = ahead || is_repo;
    if !marked && left.is_none() && right == Some(CLEAN) && !style.show_clean {
        right = None;
    }
    if marked && left.is_none() && files.worktree == WorktreeStatus::Ignored {
        // A repository holding nothing but ignored files is clean
        right = Some(CLEAN);
    }

    if !marked && left.is_none() && right.is_none() {
        return None;
    }
    Some(Emblem::new(ahead, is_repo, left, right))
}

/// Every emblem [`emblem_for`] can produce
pub fn vocabulary() -> Vec<Emblem> {
    let unstaged = [CLEAN, MODIFIED, DELETED, UNTRACKED];
    let staged = [MODIFIED, RENAMED, ADDED, DELETED];
    let unmerged = [
        (UNMERGED_MODIFIED, UNMERGED_MODIFIED),
        (UNMERGED_MODIFIED, UNMERGED_DELETED),
        (UNMERGED_DELETED, UNMERGED_MODIFIED),
        (UNMERGED_ADDED, UNMERGED_ADDED),
    ];

    let mut sides: Vec<(Option<&'static str>, &'static str)> =
        unstaged.iter().map(|&right| (None, right)).collect();
    for &right in &unstaged {
        sides.extend(staged.iter().map(|&left| (Some(left), right)));
    }
    sides.push((Some(CLEAN), UNTRACKED));
    sides.extend(unmerged.iter().map(|&(left, right)| (Some(left), right)));

    let mut emblems = Vec::with_capacity(sides.len() * 3 + 3);
    for (ahead, repo) in [(false, false), (false, true), (true, true)] {
        emblems.extend(
            sides
                .iter()
                .map(|&(left, right)| Emblem::new(ahead, repo, left, Some(right))),
        );
    }
    // Bare markers for repositories whose files are indeterminate
    emblems.push(Emblem::new(false, true, None, None));
    emblems.push(Emblem::new(true, true, None, None));
    emblems.push(Emblem::DOTGIT);
    emblems
}
