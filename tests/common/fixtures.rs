//! Test data generation utilities and predefined scenarios
//!
//! Provides functions for creating repositories with specific file states
//! and configurations to test various git scenarios consistently.

#![allow(dead_code)]

use super::repository::*;
use git_emblems::core::{
    aggregator::{ScanOptions, StatusEngine},
    blacklist::Blacklist,
    git::GitCli,
    locator::RepoLocator,
};
use git_emblems::core::error::Result;
use std::sync::Arc;

/// Scenario: one repository with every common kind of change
///
/// - `modified.txt`: committed, then changed in the work tree
/// - `deleted.txt`: committed, then removed from the work tree
/// - `staged.txt`: new and staged
/// - `untracked.txt`: new and not staged
/// - `src/lib.rs`: committed and clean
/// - `build/out.o`: ignored through `.gitignore`
pub fn create_mixed_repo() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_test_files(&repo.path, &["modified.txt", "deleted.txt", "src/lib.rs"])?;
    create_file(&repo.path, ".gitignore", "build/\n")?;
    git_add(&repo.path, ".")?;
    git_commit(&repo.path, "Initial commit")?;

    modify_test_files(&repo.path, &["modified.txt"])?;
    remove_file(&repo.path, "deleted.txt")?;
    create_file(&repo.path, "staged.txt", "staged\n")?;
    git_add(&repo.path, "staged.txt")?;
    create_file(&repo.path, "untracked.txt", "untracked\n")?;
    create_file(&repo.path, "build/out.o", "binary\n")?;

    Ok(repo)
}

/// Scenario: a nested repository committed into its parent, whose own HEAD
/// then moved on so the parent sees it as modified while it is clean inside
pub fn create_repo_with_moved_submodule() -> Result<TestRepo> {
    let repo = setup_test_repo_with_initial_commit()?;
    let sub = repo.join("sub");

    init_repo(&sub)?;
    create_file(&sub, "a.txt", "a\n")?;
    git_add(&sub, "a.txt")?;
    git_commit(&sub, "Sub initial")?;

    git_add(&repo.path, "sub")?;
    git_commit(&repo.path, "Add sub")?;

    create_file(&sub, "a.txt", "a2\n")?;
    git_add(&sub, "a.txt")?;
    git_commit(&sub, "Sub moves on")?;

    Ok(repo)
}

/// Scenario: a repository with a commit that was never pushed
pub fn create_ahead_repo() -> Result<TestRepo> {
    let repo = setup_test_repo_with_initial_commit()?;
    add_pushed_remote(&repo)?;

    create_file(&repo.path, "local.txt", "local\n")?;
    git_add(&repo.path, "local.txt")?;
    git_commit(&repo.path, "Local only")?;

    Ok(repo)
}

/// A status engine running the real git binary
pub fn real_engine(blacklist: Blacklist) -> StatusEngine {
    let locator = RepoLocator::new(Arc::new(GitCli::default()), Arc::new(blacklist));
    StatusEngine::new(locator, ScanOptions::default())
}
