//! Type-safe git status model.
//!
//! This module defines the severity axes used to describe a file, folder or
//! repository, and the raw status codes reported by `git status -z`.
//!
//! # Public API
//! - [`SyncStatus`], [`RepoStatus`], [`IndexStatus`], [`WorktreeStatus`], [`MergeStatus`]:
//!   independent severity axes, each totally ordered by severity
//! - [`FileStatus`]: the (index, worktree, merge) triple for one path
//! - [`RepoOverallStatus`]: a repository's sync and repo axes plus its aggregated triple
//! - [`Status`]: tagged variant distinguishing file/folder statuses from repository statuses
//! - [`FileStatusCode`]: the raw two-character codes plus synthetic codes
//!
//! # Ordering
//! Every axis derives `Ord` with variants declared from least to most severe.
//! `Error` is always the last variant, so a per-axis `max` lets an
//! indeterminate status win over any real one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a repository has unpushed commits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SyncStatus {
    NotAhead,
    Ahead,
    Error,
}

/// Whether a folder is a git repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RepoStatus {
    NotARepo,
    IsARepo,
    Error,
}

/// Status of a path in the index, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IndexStatus {
    NotInIndex,
    Clean,
    Added,
    Renamed,
    Deleted,
    Modified,
    Error,
}

/// Status of a path in the work tree, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WorktreeStatus {
    Ignored,
    Clean,
    Untracked,
    Deleted,
    Modified,
    Unmerged,
    IsDotGit,
    Error,
}

/// Kind of merge conflict for an unmerged path, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MergeStatus {
    NoConflict,
    TheyDeleted,
    WeDeleted,
    BothAdded,
    BothModified,
    Error,
}

/// The (index, worktree, merge) status of a single path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileStatus {
    pub index: IndexStatus,
    pub worktree: WorktreeStatus,
    pub merge: MergeStatus,
}

impl FileStatus {
    /// Tracked and unmodified in both index and work tree
    pub const CLEAN: FileStatus = FileStatus::new(
        IndexStatus::Clean,
        WorktreeStatus::Clean,
        MergeStatus::NoConflict,
    );

    /// Indeterminate on every axis
    pub const ERROR: FileStatus = FileStatus::new(
        IndexStatus::Error,
        WorktreeStatus::Error,
        MergeStatus::Error,
    );

    /// The repository's own metadata directory
    pub const IS_DOT_GIT: FileStatus = FileStatus::new(
        IndexStatus::Clean,
        WorktreeStatus::IsDotGit,
        MergeStatus::NoConflict,
    );

    pub const fn new(index: IndexStatus, worktree: WorktreeStatus, merge: MergeStatus) -> Self {
        Self {
            index,
            worktree,
            merge,
        }
    }

    /// Per-axis maximum of two statuses
    pub fn max(self, other: FileStatus) -> FileStatus {
        FileStatus {
            index: self.index.max(other.index),
            worktree: self.worktree.max(other.worktree),
            merge: self.merge.max(other.merge),
        }
    }

    /// Per-axis maximum over any number of statuses, `None` if there are none
    pub fn most_severe<I>(statuses: I) -> Option<FileStatus>
    where
        I: IntoIterator<Item = FileStatus>,
    {
        statuses.into_iter().reduce(FileStatus::max)
    }

    pub fn is_error(&self) -> bool {
        *self == FileStatus::ERROR
    }
}

/// Overall status of a repository: sync and repo axes plus the aggregated file axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoOverallStatus {
    pub sync: SyncStatus,
    pub repo: RepoStatus,
    pub files: FileStatus,
}

impl RepoOverallStatus {
    /// A repository whose status could not be determined
    pub const ERROR: RepoOverallStatus =
        RepoOverallStatus::new(SyncStatus::Error, RepoStatus::Error, FileStatus::ERROR);

    pub const fn new(sync: SyncStatus, repo: RepoStatus, files: FileStatus) -> Self {
        Self { sync, repo, files }
    }
}

/// A status as reported for one directory entry
///
/// Files and ordinary folders carry a [`FileStatus`]; repositories (top-level
/// or submodules) carry a [`RepoOverallStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Status {
    File(FileStatus),
    Repo(RepoOverallStatus),
}

impl Status {
    /// The index/worktree/merge axes regardless of variant
    pub fn file_axes(&self) -> FileStatus {
        match self {
            Status::File(status) => *status,
            Status::Repo(status) => status.files,
        }
    }

    pub fn is_repo(&self) -> bool {
        matches!(self, Status::Repo(_))
    }
}

impl From<FileStatus> for Status {
    fn from(status: FileStatus) -> Self {
        Status::File(status)
    }
}

impl From<RepoOverallStatus> for Status {
    fn from(status: RepoOverallStatus) -> Self {
        Status::Repo(status)
    }
}

/// Raw status codes from `git status -z`, plus synthetic codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileStatusCode {
    /// ` M`
    UnstagedModified,
    /// `MM`
    StagedModifiedUnstagedModified,
    /// `AM`
    AddedUnstagedModified,
    /// `RM`
    RenamedUnstagedModified,
    /// `M `
    StagedModified,
    /// `R `
    StagedRenamed,
    /// `A `
    StagedAdded,
    /// `D `
    StagedDeleted,
    /// ` D`
    UnstagedDeleted,
    /// `MD`
    StagedModifiedUnstagedDeleted,
    /// `AD`
    AddedUnstagedDeleted,
    /// `RD`
    RenamedUnstagedDeleted,
    /// `UD`
    UnmergedTheyDeleted,
    /// `DU`
    UnmergedWeDeleted,
    /// `AA`
    UnmergedBothAdded,
    /// `UU`
    UnmergedBothModified,
    /// `??`
    Untracked,
    /// `!!`
    Ignored,
    /// Tracked but absent from `git status` output
    Clean,
    /// Listed twice: staged for deletion and present again in the work tree
    DeletedUntracked,
    /// The `.git` directory itself
    IsDotGit,
    /// Anything that could not be decoded
    Error,
}

impl FileStatusCode {
    /// Decode a raw two-character code.
    ///
    /// Type changes (`T`) count as modifications and copies (`C`) as additions.
    /// Returns `None` for codes with no defined meaning.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .chars()
            .map(|c| match c {
                'T' => 'M',
                'C' => 'A',
                other => other,
            })
            .collect();

        let code = match normalized.as_str() {
            " M" => Self::UnstagedModified,
            "MM" => Self::StagedModifiedUnstagedModified,
            "AM" => Self::AddedUnstagedModified,
            "RM" => Self::RenamedUnstagedModified,
            "M " => Self::StagedModified,
            "R " => Self::StagedRenamed,
            "A " => Self::StagedAdded,
            "D " => Self::StagedDeleted,
            " D" => Self::UnstagedDeleted,
            "MD" => Self::StagedModifiedUnstagedDeleted,
            "AD" => Self::AddedUnstagedDeleted,
            "RD" => Self::RenamedUnstagedDeleted,
            "UD" => Self::UnmergedTheyDeleted,
            "DU" => Self::UnmergedWeDeleted,
            "AA" => Self::UnmergedBothAdded,
            "UU" => Self::UnmergedBothModified,
            "??" => Self::Untracked,
            "!!" => Self::Ignored,
            _ => return None,
        };
        Some(code)
    }

    /// The structured status this code stands for
    pub fn status(&self) -> FileStatus {
        use IndexStatus as I;
        use MergeStatus as M;
        use WorktreeStatus as W;

        let (index, worktree, merge) = match self {
            Self::UnstagedModified => (I::Clean, W::Modified, M::NoConflict),
            Self::StagedModifiedUnstagedModified => (I::Modified, W::Modified, M::NoConflict),
            Self::AddedUnstagedModified => (I::Added, W::Modified, M::NoConflict),
            Self::RenamedUnstagedModified => (I::Renamed, W::Modified, M::NoConflict),
            Self::StagedModified => (I::Modified, W::Clean, M::NoConflict),
            Self::StagedRenamed => (I::Renamed, W::Clean, M::NoConflict),
            Self::StagedAdded => (I::Added, W::Clean, M::NoConflict),
            Self::StagedDeleted => (I::Deleted, W::Clean, M::NoConflict),
            Self::UnstagedDeleted => (I::Clean, W::Deleted, M::NoConflict),
            Self::StagedModifiedUnstagedDeleted => (I::Modified, W::Deleted, M::NoConflict),
            Self::AddedUnstagedDeleted => (I::Added, W::Deleted, M::NoConflict),
            Self::RenamedUnstagedDeleted => (I::Renamed, W::Deleted, M::NoConflict),
            Self::UnmergedTheyDeleted => (I::Clean, W::Unmerged, M::TheyDeleted),
            Self::UnmergedWeDeleted => (I::Clean, W::Unmerged, M::WeDeleted),
            Self::UnmergedBothAdded => (I::Clean, W::Unmerged, M::BothAdded),
            Self::UnmergedBothModified => (I::Clean, W::Unmerged, M::BothModified),
            Self::Untracked => (I::NotInIndex, W::Untracked, M::NoConflict),
            Self::Ignored => (I::NotInIndex, W::Ignored, M::NoConflict),
            Self::Clean => return FileStatus::CLEAN,
            Self::DeletedUntracked => (I::Deleted, W::Untracked, M::NoConflict),
            Self::IsDotGit => return FileStatus::IS_DOT_GIT,
            Self::Error => return FileStatus::ERROR,
        };
        FileStatus::new(index, worktree, merge)
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}/{:?}/{:?}", self.index, self.worktree, self.merge)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::File(status) => write!(f, "{status}"),
            Status::Repo(status) => write!(
                f,
                "{:?}/{:?}/{}",
                status.sync, status.repo, status.files
            ),
        }
    }
}
