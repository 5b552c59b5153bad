//! Aggregating per-file statuses into folder, repository and submodule statuses.
//!
//! [`StatusEngine`] computes the status of every entry of a directory in one
//! go. Inside a work tree it scans the whole repository once and derives each
//! child's status from that scan; outside any work tree it reports the overall
//! status of every child that is itself a repository.
//!
//! Aggregation always takes the per-axis maximum of the contributing file
//! statuses, so the most severe index, work tree and merge state wins
//! independently.
//!
//! Scans and listings are cached for the duration of one pass only. Callers
//! start a new pass with [`StatusEngine::begin_pass`] so results always
//! reflect the filesystem at the time of that pass.

use crate::core::{
    error::{GitEmblemsError, Result},
    file_statuses::FileStatuses,
    locator::{RepoLocator, DOT_GIT},
    parser::{add_tracked_files, parse_status_output},
    status::{FileStatus, RepoOverallStatus, RepoStatus, Status, SyncStatus},
};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

const LS_TREE_ARGS: [&str; 5] = ["ls-tree", "--full-tree", "-zr", "--name-only", "HEAD"];

/// stderr of `git ls-tree` in a repository without commits
const NO_HEAD_MARKER: &str = "Not a valid object name HEAD";

/// Status of every entry of one directory; `None` for entries with no git status
pub type DirectoryListing = HashMap<PathBuf, Option<Status>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Pass `--ignored` to `git status`
    pub include_ignored: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            include_ignored: true,
        }
    }
}

/// The result of scanning one repository
#[derive(Debug)]
pub struct RepoScan {
    pub root: PathBuf,
    pub overall: RepoOverallStatus,
    pub statuses: FileStatuses,
}

/// Most severe status among `contributing`, or the ancestor lookup of
/// `path` in `all` when nothing beneath `path` was listed.
pub fn folder_overall_status(
    path: &Path,
    contributing: &HashSet<FileStatus>,
    all: &FileStatuses,
) -> FileStatus {
    FileStatus::most_severe(contributing.iter().copied()).unwrap_or_else(|| all.get_status(path))
}

/// Group statuses by the immediate child of `dir` they fall under.
///
/// An entry for the child itself (an untracked directory, say) counts
/// towards that child.
pub fn statuses_by_child(dir: &Path, statuses: &FileStatuses) -> HashMap<PathBuf, HashSet<FileStatus>> {
    let mut by_child: HashMap<PathBuf, HashSet<FileStatus>> = HashMap::new();
    for (path, status) in statuses.iter() {
        let Ok(relative) = path.strip_prefix(dir) else {
            continue;
        };
        let Some(first) = relative.components().next() else {
            continue;
        };
        by_child.entry(dir.join(first)).or_default().insert(*status);
    }
    by_child
}

/// Aggregated file axes for a whole repository; an empty repository is clean
fn repo_file_axes(path: &Path, statuses: &FileStatuses) -> FileStatus {
    if statuses.is_empty() {
        return FileStatus::CLEAN;
    }
    let all: HashSet<FileStatus> = statuses.values().collect();
    folder_overall_status(path, &all, statuses)
}

fn list_children(dir: &Path) -> Vec<PathBuf> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .collect(),
        Err(e) => {
            // Deleted, unmounted, or otherwise gone
            log::debug!("could not list {}: {e}", dir.display());
            Vec::new()
        }
    }
}

pub struct StatusEngine {
    locator: RepoLocator,
    options: ScanOptions,
    repo_scans: HashMap<PathBuf, Rc<RepoScan>>,
    listings: HashMap<PathBuf, Rc<DirectoryListing>>,
}

impl StatusEngine {
    pub fn new(locator: RepoLocator, options: ScanOptions) -> Self {
        Self {
            locator,
            options,
            repo_scans: HashMap::new(),
            listings: HashMap::new(),
        }
    }

    pub fn locator(&self) -> &RepoLocator {
        &self.locator
    }

    /// Forget every scan and listing from the previous pass
    pub fn begin_pass(&mut self) {
        self.repo_scans.clear();
        self.listings.clear();
    }

    /// Scan the repository containing `path`, reusing this pass's scan if any
    pub fn repo_scan(&mut self, path: &Path) -> Result<Rc<RepoScan>> {
        let root = self.locator.repo_root(path)?;
        if let Some(scan) = self.repo_scans.get(&root) {
            return Ok(Rc::clone(scan));
        }

        let scan = Rc::new(self.scan_repository(&root)?);
        self.repo_scans.insert(root, Rc::clone(&scan));
        Ok(scan)
    }

    fn scan_repository(&self, root: &Path) -> Result<RepoScan> {
        log::debug!("scanning repository {}", root.display());
        let git = self.locator.git();

        let mut status_args = vec!["status", "-z"];
        if self.options.include_ignored {
            status_args.push("--ignored");
        }
        let output = git.run(root, &status_args)?;
        let mut statuses = parse_status_output(&output, root);

        match git.run(root, &LS_TREE_ARGS) {
            Ok(tracked) => add_tracked_files(&mut statuses, &tracked),
            Err(e) if e.stderr_contains(NO_HEAD_MARKER) => {
                log::debug!("{} has no commits yet", root.display());
            }
            Err(e) => return Err(e),
        }

        let overall = self.repo_overall_status(root, &statuses)?;
        Ok(RepoScan {
            root: root.to_path_buf(),
            overall,
            statuses,
        })
    }

    /// Overall status of the repository at `path` given its file statuses
    pub fn repo_overall_status(
        &self,
        path: &Path,
        statuses: &FileStatuses,
    ) -> Result<RepoOverallStatus> {
        let sync = match self.locator.is_ahead(path) {
            Ok(true) => SyncStatus::Ahead,
            Ok(false) => SyncStatus::NotAhead,
            Err(e) if e.is_not_a_repository() => return Err(e),
            Err(e) => {
                log::warn!("could not check {} for unpushed commits: {e}", path.display());
                SyncStatus::Error
            }
        };
        Ok(RepoOverallStatus::new(
            sync,
            RepoStatus::IsARepo,
            repo_file_axes(path, statuses),
        ))
    }

    /// Overall status of a repository nested in a parent's work tree.
    ///
    /// The nested repository is aggregated as if it contained an entry for
    /// itself carrying the parent's view of it, so a submodule that is clean
    /// inside but checked out at a different commit shows as modified.
    pub fn submodule_status(
        &mut self,
        path: &Path,
        parent_statuses: &FileStatuses,
    ) -> Result<RepoOverallStatus> {
        let parent_view = parent_statuses.get_status(path);
        let scan = self.repo_scan(path)?;

        let files = if parent_view.is_error() {
            log::debug!("parent repository has no entry for {}", path.display());
            repo_file_axes(path, &scan.statuses)
        } else {
            let mut statuses = scan.statuses.clone();
            statuses.insert(path, parent_view);
            repo_file_axes(path, &statuses)
        };
        Ok(RepoOverallStatus::new(
            scan.overall.sync,
            RepoStatus::IsARepo,
            files,
        ))
    }

    /// Status of every entry of `dir`, reusing this pass's listing if any.
    ///
    /// A repository that vanishes mid-scan yields an empty listing; any other
    /// git failure is logged and every entry gets the error status.
    pub fn directory_listing_status(&mut self, dir: &Path) -> Rc<DirectoryListing> {
        if let Some(listing) = self.listings.get(dir) {
            return Rc::clone(listing);
        }

        let listing = if self.locator.is_in_work_tree(dir) {
            self.work_tree_listing(dir)
        } else {
            self.plain_listing(dir)
        };

        let listing = Rc::new(listing);
        self.listings.insert(dir.to_path_buf(), Rc::clone(&listing));
        listing
    }

    /// Listing of a directory outside any work tree: only repositories get a status
    fn plain_listing(&mut self, dir: &Path) -> DirectoryListing {
        let mut listing = DirectoryListing::new();
        for child in list_children(dir) {
            let status = if child.is_dir() && self.locator.is_repo(&child) {
                match self.repo_scan(&child) {
                    Ok(scan) => Some(Status::Repo(scan.overall)),
                    Err(e) if e.is_not_a_repository() => continue,
                    Err(e) => {
                        log::warn!("failed to scan repository {}: {e}", child.display());
                        Some(Status::Repo(RepoOverallStatus::ERROR))
                    }
                }
            } else {
                None
            };
            listing.insert(child, status);
        }
        listing
    }

    /// Listing of a directory inside a work tree
    fn work_tree_listing(&mut self, dir: &Path) -> DirectoryListing {
        let children = list_children(dir);
        let scan = match self.repo_scan(dir) {
            Ok(scan) => scan,
            Err(e) if e.is_not_a_repository() => {
                log::debug!("repository at {} disappeared", dir.display());
                return DirectoryListing::new();
            }
            Err(e) => return error_listing(dir, children, &e),
        };

        let by_child = statuses_by_child(dir, &scan.statuses);
        let nothing = HashSet::new();

        let mut listing = DirectoryListing::new();
        for child in children {
            let status = if child.file_name().is_some_and(|name| name == DOT_GIT) {
                Status::File(FileStatus::IS_DOT_GIT)
            } else if !child.is_dir() {
                Status::File(scan.statuses.get_status(&child))
            } else if self.locator.is_repo(&child) {
                match self.submodule_status(&child, &scan.statuses) {
                    Ok(status) => Status::Repo(status),
                    Err(e) if e.is_not_a_repository() => continue,
                    Err(e) => {
                        log::warn!("failed to scan submodule {}: {e}", child.display());
                        Status::Repo(RepoOverallStatus::ERROR)
                    }
                }
            } else {
                let contributing = by_child.get(&child).unwrap_or(&nothing);
                Status::File(folder_overall_status(&child, contributing, &scan.statuses))
            };
            listing.insert(child, Some(status));
        }
        listing
    }
}

fn error_listing(dir: &Path, children: Vec<PathBuf>, error: &GitEmblemsError) -> DirectoryListing {
    log::warn!("failed to scan {}: {error}", dir.display());
    children
        .into_iter()
        .map(|child| (child, Some(Status::File(FileStatus::ERROR))))
        .collect()
}
