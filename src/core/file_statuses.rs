//! Per-repository path to status map with ancestor fallback.
//!
//! `git status` abbreviates its output: an untracked or ignored directory is
//! listed once instead of file by file. [`FileStatuses::get_status`] therefore
//! falls back to the nearest listed ancestor, bounded by the repository root,
//! and remembers the directories it walked through so the next lookup from the
//! same area is a direct hit.

use crate::core::status::FileStatus;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Upper bound on ancestor steps for a single lookup
pub const MAX_ANCESTOR_STEPS: usize = 1000;

#[derive(Debug, Clone)]
pub struct FileStatuses {
    repo_root: PathBuf,
    entries: HashMap<PathBuf, FileStatus>,
    walked: RefCell<HashMap<PathBuf, FileStatus>>,
}

impl FileStatuses {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            entries: HashMap::new(),
            walked: RefCell::new(HashMap::new()),
        }
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, status: FileStatus) -> Option<FileStatus> {
        self.entries.insert(path.into(), status)
    }

    /// The status recorded for exactly this path, or remembered from an earlier walk
    pub fn get(&self, path: &Path) -> Option<FileStatus> {
        self.entries
            .get(path)
            .copied()
            .or_else(|| self.walked.borrow().get(path).copied())
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recorded entries, excluding paths only remembered from walks
    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &FileStatus)> {
        self.entries.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = FileStatus> + '_ {
        self.entries.values().copied()
    }

    /// Status of `path`, falling back to its nearest recorded ancestor.
    ///
    /// The walk stops at the repository root (inclusive) or the filesystem
    /// root and then yields [`FileStatus::ERROR`].
    pub fn get_status(&self, path: &Path) -> FileStatus {
        if let Some(status) = self.get(path) {
            return status;
        }

        let mut tried = vec![path.to_path_buf()];
        let mut current = path;
        for _ in 0..MAX_ANCESTOR_STEPS {
            if current == self.repo_root {
                return FileStatus::ERROR;
            }
            let Some(parent) = current.parent() else {
                return FileStatus::ERROR;
            };
            if let Some(status) = self.get(parent) {
                let mut walked = self.walked.borrow_mut();
                for dir in tried {
                    walked.insert(dir, status);
                }
                return status;
            }
            tried.push(parent.to_path_buf());
            current = parent;
        }

        log::warn!(
            "ancestor lookup for {} exceeded {MAX_ANCESTOR_STEPS} steps",
            path.display()
        );
        FileStatus::ERROR
    }
}

// Walk memos depend on earlier lookups, not on what was recorded
impl PartialEq for FileStatuses {
    fn eq(&self, other: &Self) -> bool {
        self.repo_root == other.repo_root && self.entries == other.entries
    }
}

impl Eq for FileStatuses {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::status::{IndexStatus, MergeStatus, WorktreeStatus};

    fn untracked() -> FileStatus {
        FileStatus::new(
            IndexStatus::NotInIndex,
            WorktreeStatus::Untracked,
            MergeStatus::NoConflict,
        )
    }

    #[test]
    fn test_exact_lookup() {
        let mut statuses = FileStatuses::new("/repo");
        statuses.insert("/repo/file.txt", FileStatus::CLEAN);
        assert_eq!(statuses.get_status(Path::new("/repo/file.txt")), FileStatus::CLEAN);
    }

    #[test]
    fn test_directory_entry_with_trailing_slash_matches() {
        let mut statuses = FileStatuses::new("/repo");
        statuses.insert("/repo/build/", untracked());
        assert_eq!(statuses.get_status(Path::new("/repo/build")), untracked());
        assert_eq!(statuses.get_status(Path::new("/repo/build/out.o")), untracked());
    }

    #[test]
    fn test_ancestor_walk_memoizes_visited_directories() {
        let mut statuses = FileStatuses::new("/repo");
        statuses.insert("/repo", untracked());

        assert_eq!(statuses.get_status(Path::new("/repo/a/b/c")), untracked());

        // Walked directories are now direct hits
        assert_eq!(statuses.get(Path::new("/repo/a/b")), Some(untracked()));
        assert_eq!(statuses.get(Path::new("/repo/a")), Some(untracked()));
        assert_eq!(statuses.get_status(Path::new("/repo/a/b")), untracked());

        // Memoized paths are not reported as recorded entries
        assert_eq!(statuses.len(), 1);
    }

    #[test]
    fn test_walk_stops_at_repo_root() {
        let mut statuses = FileStatuses::new("/home/user/repo");
        statuses.insert("/home/user", untracked());
        assert_eq!(
            statuses.get_status(Path::new("/home/user/repo/src/main.rs")),
            FileStatus::ERROR
        );
    }

    #[test]
    fn test_walk_stops_at_filesystem_root() {
        let statuses = FileStatuses::new("/not/an/ancestor");
        assert_eq!(statuses.get_status(Path::new("/x/y")), FileStatus::ERROR);
    }

    #[test]
    fn test_deep_walk_gives_up_after_step_limit() {
        let statuses = FileStatuses::new("/repo");
        let mut deep = PathBuf::from("/elsewhere");
        for _ in 0..MAX_ANCESTOR_STEPS + 100 {
            deep.push("d");
        }
        assert_eq!(statuses.get_status(&deep), FileStatus::ERROR);
        assert_eq!(statuses.get(deep.parent().unwrap_or(&deep)), None);
    }

    #[test]
    fn test_equality_ignores_walk_memo() {
        let mut walked = FileStatuses::new("/repo");
        walked.insert("/repo", untracked());
        let fresh = walked.clone();

        walked.get_status(Path::new("/repo/a/b"));
        assert_eq!(walked.get(Path::new("/repo/a")), Some(untracked()));
        assert_eq!(fresh.get(Path::new("/repo/a")), None);
        assert_eq!(walked, fresh);

        let mut other = fresh.clone();
        other.insert("/repo/x", FileStatus::CLEAN);
        assert_ne!(walked, other);
    }

    #[test]
    fn test_error_results_are_not_memoized() {
        let statuses = FileStatuses::new("/repo");
        assert_eq!(statuses.get_status(Path::new("/repo/a/b")), FileStatus::ERROR);
        assert_eq!(statuses.get(Path::new("/repo/a")), None);
    }
}
