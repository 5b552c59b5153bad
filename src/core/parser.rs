//! Parsing of `git status -z` and `git ls-tree -z` output.
//!
//! [`parse_status_output`] turns the NUL-separated status stream into a
//! [`FileStatuses`] map keyed by absolute path. [`add_tracked_files`] then
//! fills in every committed path that the status stream left out, since
//! git only reports files that differ from HEAD.

use crate::core::{
    file_statuses::FileStatuses,
    status::{FileStatus, FileStatusCode},
};
use std::path::Path;

/// Offset of the path within a status entry: two code characters and a space
const PATH_OFFSET: usize = 3;

/// Split NUL-terminated output into entries, dropping the trailing empty one
fn split_entries(output: &str) -> impl Iterator<Item = &str> {
    let trimmed = output.strip_suffix('\0').unwrap_or(output);
    trimmed.split('\0').filter(|entry| !entry.is_empty())
}

/// Parse `git status -z` output into per-file statuses rooted at `repo_root`.
///
/// Undecodable codes and unexpected duplicate entries are logged and recorded
/// as [`FileStatus::ERROR`]; the rest of the stream is still processed.
pub fn parse_status_output(output: &str, repo_root: &Path) -> FileStatuses {
    let mut statuses = FileStatuses::new(repo_root);
    let mut entries = split_entries(output);

    while let Some(entry) = entries.next() {
        let (Some(raw), Some(relpath)) = (entry.get(..2), entry.get(PATH_OFFSET..)) else {
            log::warn!("malformed git status entry: {entry:?}");
            continue;
        };
        let path = repo_root.join(relpath);

        // Renames and copies are followed by the origin path, which we skip
        if raw.starts_with(['R', 'C']) {
            entries.next();
        }

        let status = match FileStatusCode::from_raw(raw) {
            Some(code) => code.status(),
            None => {
                log::warn!("undecodable git status code {raw:?} for {}", path.display());
                FileStatus::ERROR
            }
        };

        let resolved = match statuses.get(&path) {
            None => status,
            Some(previous) => resolve_duplicate(&path, previous, raw),
        };
        statuses.insert(path, resolved);
    }

    statuses
}

/// A path listed twice is only understood as "staged deletion, present again"
fn resolve_duplicate(path: &Path, previous: FileStatus, raw: &str) -> FileStatus {
    let staged_deletion = FileStatusCode::StagedDeleted.status();
    if previous == staged_deletion && FileStatusCode::from_raw(raw) == Some(FileStatusCode::Untracked)
    {
        return FileStatusCode::DeletedUntracked.status();
    }

    log::warn!(
        "{} listed twice by git status, with statuses {previous} and {raw:?}",
        path.display()
    );
    FileStatus::ERROR
}

/// Record every path from `git ls-tree -z --name-only` output that has no
/// status yet as clean.
pub fn add_tracked_files(statuses: &mut FileStatuses, ls_tree_output: &str) {
    let repo_root = statuses.repo_root().to_path_buf();
    for relpath in split_entries(ls_tree_output) {
        let path = repo_root.join(relpath);
        if !statuses.contains(&path) {
            statuses.insert(path, FileStatus::CLEAN);
        }
    }
}
