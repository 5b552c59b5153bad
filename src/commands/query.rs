//! `git-emblems query`: ask the background worker about paths, the way a
//! file manager does.
//!
//! Every path is submitted through an [`EmblemProvider`]. The worker is then
//! polled until it reports that nothing is pending, and each `path emblem`
//! pair is printed as soon as it arrives.

use crate::core::{
    command_init::{CommandInit, ConfigOverrides},
    emblems::Emblem,
    error::Result,
    provider::EmblemProvider,
    worker::Progress,
};
use std::collections::BTreeSet;
use std::env;
use std::path::{Path, PathBuf};
use std::thread;

/// Absolute, symlink-free form of `path` when it exists
fn resolve(path: &Path) -> Result<PathBuf> {
    match path.canonicalize() {
        Ok(path) => Ok(path),
        Err(_) if path.is_absolute() => Ok(path.to_path_buf()),
        Err(_) => Ok(env::current_dir()?.join(path)),
    }
}

pub fn format_answer(path: &Path, emblem: Option<&Emblem>) -> String {
    match emblem {
        Some(emblem) => format!("{} {}", path.display(), emblem),
        None => format!("{} -", path.display()),
    }
}

pub fn execute_query(overrides: &ConfigOverrides, paths: Vec<PathBuf>) -> Result<()> {
    let context = CommandInit::initialize(overrides)?;
    let poll_interval = context.settings.poll_interval();
    let options = context.worker_options();

    let host = |dir: &Path| log::debug!("results ready in {}", dir.display());
    let provider = EmblemProvider::spawn(context.locator, options, host)?;

    let mut outstanding = BTreeSet::new();
    for path in &paths {
        let path = resolve(path)?;
        // Nothing is cached yet, so this only submits
        provider.update_file_info(&path)?;
        outstanding.insert(path);
    }

    loop {
        let progress = provider.poll()?;
        outstanding.retain(|path| match provider.cache().take(path) {
            Some(emblem) => {
                println!("{}", format_answer(path, emblem.as_ref()));
                false
            }
            None => true,
        });

        if progress == Progress::AllDone {
            break;
        }
        thread::sleep(poll_interval);
    }

    // Dropped silently by the worker, e.g. because their directory vanished
    for path in outstanding {
        println!("{}", format_answer(&path, None));
    }
    Ok(())
}
