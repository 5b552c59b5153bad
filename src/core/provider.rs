//! The host-facing entry point.
//!
//! A file manager calls [`EmblemProvider::update_file_info`] for every path it
//! displays. The answer comes from the cache without blocking; on a miss the
//! path is handed to the worker and the host gets nothing for now. The host
//! then calls [`EmblemProvider::poll`] periodically. Each poll moves finished
//! results into the cache and asks the host to invalidate the directories
//! holding them, which makes it query those paths again.

use crate::core::{
    cache::EmblemCache,
    emblems::Emblem,
    error::Result,
    locator::RepoLocator,
    worker::{Progress, WorkerHandle, WorkerOptions},
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// The file manager side of the integration
pub trait Host {
    /// Forget what was shown for the entries of `dir` and query them again
    fn invalidate_directory(&self, dir: &Path);
}

impl<F: Fn(&Path)> Host for F {
    fn invalidate_directory(&self, dir: &Path) {
        self(dir)
    }
}

pub struct EmblemProvider<H: Host> {
    worker: WorkerHandle,
    cache: EmblemCache,
    host: H,
}

impl<H: Host> EmblemProvider<H> {
    pub fn new(worker: WorkerHandle, host: H) -> Self {
        Self {
            worker,
            cache: EmblemCache::new(),
            host,
        }
    }

    /// Start a worker and wrap it
    pub fn spawn(locator: RepoLocator, options: WorkerOptions, host: H) -> Result<Self> {
        Ok(Self::new(WorkerHandle::spawn(locator, options)?, host))
    }

    /// The emblem for `path` if one is ready, submitting it for computation otherwise
    pub fn update_file_info(&self, path: &Path) -> Result<Option<Emblem>> {
        if let Some(emblem) = self.cache.take(path) {
            return Ok(emblem);
        }
        self.worker.submit(path)?;
        Ok(None)
    }

    /// Collect finished results and invalidate their directories.
    ///
    /// Returns [`Progress::AllDone`] once the host may stop polling until it
    /// submits again.
    pub fn poll(&self) -> Result<Progress> {
        let batch = self.worker.poll()?;

        let mut dirs: BTreeSet<PathBuf> = BTreeSet::new();
        for (path, emblem) in batch.results {
            if let Some(parent) = path.parent() {
                dirs.insert(parent.to_path_buf());
            }
            self.cache.store(path, emblem);
        }

        for dir in &dirs {
            log::debug!("invalidating {}", dir.display());
            self.host.invalidate_directory(dir);
        }
        Ok(batch.progress)
    }

    pub fn cache(&self) -> &EmblemCache {
        &self.cache
    }
}
