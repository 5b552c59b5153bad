//! `git-emblems status`: the status and emblem of every entry of a directory.

use crate::core::{
    aggregator::StatusEngine,
    command_init::{CommandInit, ConfigOverrides},
    emblems::{emblem_for, Emblem, EmblemStyle},
    error::Result,
    output::{print_entry, print_info, print_section_header},
    status::Status,
};
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};

/// One directory entry as reported by the status command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryReport {
    pub path: PathBuf,
    pub status: Option<Status>,
    pub emblem: Option<Emblem>,
}

impl EntryReport {
    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Entries of `dir` sorted by path, with their statuses and emblems
pub fn collect_entries(engine: &mut StatusEngine, dir: &Path, style: EmblemStyle) -> Vec<EntryReport> {
    let listing = engine.directory_listing_status(dir);
    let mut entries: Vec<EntryReport> = listing
        .iter()
        .map(|(path, status)| EntryReport {
            path: path.clone(),
            status: *status,
            emblem: status.and_then(|status| emblem_for(&status, style)),
        })
        .collect();
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    entries
}

pub fn execute_status(overrides: &ConfigOverrides, dir: Option<PathBuf>, json: bool) -> Result<()> {
    let context = CommandInit::initialize(overrides)?;
    let dir = match dir {
        Some(dir) => dir,
        None => env::current_dir()?,
    };
    // git reports absolute, symlink-free paths
    let dir = dir.canonicalize()?;

    let scan = context.worker_options().scan;
    let style = EmblemStyle {
        show_clean: context.settings.show_clean,
    };
    let mut engine = StatusEngine::new(context.locator, scan);
    let entries = collect_entries(&mut engine, &dir, style);

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        print_info(&format!("Nothing to show in {}", dir.display()));
        return Ok(());
    }

    print_section_header(&dir.display().to_string());
    for entry in &entries {
        let detail = entry
            .status
            .map(|status| status.to_string())
            .unwrap_or_default();
        print_entry(&entry.name(), entry.emblem.as_ref(), &detail);
    }
    println!();
    Ok(())
}
