//! Computed emblems waiting to be picked up by the host.
//!
//! Entries are consumed on read: the host asks about a path again mostly
//! when something changed, so a second question always triggers a fresh
//! computation instead of returning a stale answer.

use crate::core::emblems::Emblem;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Default)]
pub struct EmblemCache {
    entries: Mutex<HashMap<PathBuf, Option<Emblem>>>,
}

impl EmblemCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return the entry for `path`.
    ///
    /// The outer `Option` tells whether anything was cached; the inner one is
    /// the emblem itself, `None` for a path with nothing to show.
    pub fn take(&self, path: &Path) -> Option<Option<Emblem>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path)
    }

    pub fn store(&self, path: PathBuf, emblem: Option<Emblem>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, emblem);
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_consumed_on_read() {
        let cache = EmblemCache::new();
        cache.store(PathBuf::from("/repo/a.txt"), Some(Emblem::DOTGIT));

        assert_eq!(cache.take(Path::new("/repo/a.txt")), Some(Some(Emblem::DOTGIT)));
        assert_eq!(cache.take(Path::new("/repo/a.txt")), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cached_absence_differs_from_miss() {
        let cache = EmblemCache::new();
        cache.store(PathBuf::from("/plain"), None);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.take(Path::new("/plain")), Some(None));
        assert_eq!(cache.take(Path::new("/other")), None);
    }

    #[test]
    fn test_store_replaces_previous_entry() {
        let cache = EmblemCache::new();
        cache.store(PathBuf::from("/x"), None);
        cache.store(PathBuf::from("/x"), Some(Emblem::DOTGIT));
        assert_eq!(cache.take(Path::new("/x")), Some(Some(Emblem::DOTGIT)));
    }
}
