//! Git repository management and setup utilities
//!
//! Provides functions for creating and managing throwaway repositories with
//! the real `git` binary, in the states the status engine has to recognise.

#![allow(dead_code)]

use git_emblems::core::error::{GitEmblemsError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test repository setup result containing both the temporary directory
/// and the repository path. The TempDir must be kept alive for the duration
/// of the test to prevent cleanup.
///
/// The repository lives in a `repo` subdirectory so the temporary directory
/// itself is a plain directory containing one repository.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    /// Get the repository path as a reference
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The plain directory holding the repository
    pub fn parent(&self) -> PathBuf {
        self.path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.path.clone())
    }

    /// Absolute path of an entry inside the repository
    pub fn join(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }
}

/// Runs git in `dir`, failing the test setup if git does
pub fn run_git(dir: &Path, args: &[&str]) -> Result<String> {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()?;

    if !output.status.success() {
        return Err(GitEmblemsError::command_failed(
            args,
            output.status.code(),
            String::from_utf8_lossy(&output.stderr),
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Initializes a repository in `path` with test identity and no signing
pub fn init_repo(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    run_git(path, &["init"])?;

    // Set git config to avoid prompts during tests
    run_git(path, &["config", "user.name", "Test User"])?;
    run_git(path, &["config", "user.email", "test@example.com"])?;
    run_git(path, &["config", "commit.gpgsign", "false"])?;
    Ok(())
}

/// Sets up a fresh git repository for testing
///
/// # Example
///
/// ```rust
/// #[test]
/// fn my_test() -> anyhow::Result<()> {
///     let repo = setup_test_repo()?;
///     // Use repo.path() for git operations
///     Ok(())
/// }
/// ```
pub fn setup_test_repo() -> Result<TestRepo> {
    let temp_dir = TempDir::new()?;
    // git reports symlink-free paths
    let repo_path = temp_dir.path().canonicalize()?.join("repo");
    init_repo(&repo_path)?;

    Ok(TestRepo {
        temp_dir,
        path: repo_path,
    })
}

/// Sets up a git repository with an initial commit containing "initial.txt"
pub fn setup_test_repo_with_initial_commit() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_file(&repo.path, "initial.txt", "initial content\n")?;
    git_add(&repo.path, "initial.txt")?;
    git_commit(&repo.path, "Initial commit")?;

    Ok(repo)
}

/// Creates a file (and any missing parent directories) with the given content
pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> Result<()> {
    let path = repo_path.join(filename);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Adds a file to the git index ("." for all files)
pub fn git_add(repo_path: &Path, filename: &str) -> Result<()> {
    run_git(repo_path, &["add", filename])?;
    Ok(())
}

/// Creates a git commit with the specified message
pub fn git_commit(repo_path: &Path, message: &str) -> Result<()> {
    run_git(repo_path, &["commit", "-m", message])?;
    Ok(())
}

/// Removes a file from the filesystem (not from git)
pub fn remove_file(repo_path: &Path, filename: &str) -> Result<()> {
    fs::remove_file(repo_path.join(filename))?;
    Ok(())
}

/// Creates multiple test files with sequential content
pub fn create_test_files(repo_path: &Path, filenames: &[&str]) -> Result<()> {
    for (i, filename) in filenames.iter().enumerate() {
        let content = format!("content{}\nline 2\n", i + 1);
        create_file(repo_path, filename, &content)?;
    }
    Ok(())
}

/// Modifies multiple test files with new content
pub fn modify_test_files(repo_path: &Path, filenames: &[&str]) -> Result<()> {
    for (i, filename) in filenames.iter().enumerate() {
        let content = format!("modified{}\nline 2\nnew line\n", i + 1);
        create_file(repo_path, filename, &content)?;
    }
    Ok(())
}

/// Gives the repository a bare remote and pushes the current branch to it
pub fn add_pushed_remote(repo: &TestRepo) -> Result<PathBuf> {
    let remote = repo.parent().join("remote.git");
    fs::create_dir_all(&remote)?;
    run_git(&remote, &["init", "--bare"])?;

    let remote_url = remote.to_string_lossy().into_owned();
    run_git(&repo.path, &["remote", "add", "origin", &remote_url])?;
    run_git(&repo.path, &["push", "-u", "origin", "HEAD"])?;
    Ok(remote)
}

/// A fresh config directory for CLI runs, so tests never touch the user's
pub fn config_dir(repo: &TestRepo) -> PathBuf {
    repo.parent().join("config")
}
