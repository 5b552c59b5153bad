//! The git command collaborator.
//!
//! All repository knowledge comes from running the `git` executable with a
//! working directory and an argument vector. [`GitRunner`] is the seam: the
//! engine only ever talks to a runner, so tests can swap in [`StubGit`] with
//! canned output instead of a real binary.
//!
//! # Failure classification
//! A run either yields stdout, or fails as one of:
//! - [`GitEmblemsError::NotARepository`]: stderr carries git's repository-absence
//!   marker, or the process could not be launched in that directory at all
//!   (the directory vanished, or git is missing)
//! - [`GitEmblemsError::CommandFailed`]: any other non-zero exit

use crate::core::error::{GitEmblemsError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;

/// Text git prints on stderr when there is no repository at or above the working directory
pub const NOT_A_REPOSITORY_MARKER: &str = "not a git repository";

/// Runs git with a working directory and arguments, returning stdout
pub trait GitRunner: Send + Sync {
    fn run(&self, cwd: &Path, args: &[&str]) -> Result<String>;
}

/// Runs the real `git` executable as a subprocess
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl GitCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitCli {
    /// The command for one run, with messages forced to the untranslated locale
    fn command(&self, cwd: &Path, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args).current_dir(cwd).env("LC_ALL", "C");
        cmd
    }
}

impl GitRunner for GitCli {
    fn run(&self, cwd: &Path, args: &[&str]) -> Result<String> {
        log::debug!("git {} (in {})", args.join(" "), cwd.display());

        let mut cmd = self.command(cwd, args);

        let output = match cmd.output() {
            Ok(output) => output,
            Err(e) => {
                // The directory may have been removed between listing and scanning
                log::debug!("could not run git in {}: {e}", cwd.display());
                return Err(GitEmblemsError::not_a_repository(cwd));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(cwd, args, output.status.code(), &stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Decide whether a failed run means "no repository here" or a real failure
pub fn classify_failure(cwd: &Path, args: &[&str], code: Option<i32>, stderr: &str) -> GitEmblemsError {
    if stderr.to_lowercase().contains(NOT_A_REPOSITORY_MARKER) {
        GitEmblemsError::not_a_repository(cwd)
    } else {
        GitEmblemsError::command_failed(args, code, stderr.trim())
    }
}

/// A canned reply for [`StubGit`]
#[derive(Debug, Clone)]
pub struct StubReply {
    pub stdout: String,
    pub stderr: String,
    pub code: i32,
}

impl StubReply {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            code: 0,
        }
    }

    pub fn fail(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            code,
        }
    }
}

/// A [`GitRunner`] answering from a table of canned replies.
///
/// Replies are keyed by working directory and the space-joined argument
/// vector. Unknown invocations fail as "not a git repository", like git
/// does outside a repository. Every invocation is recorded.
#[derive(Debug, Default)]
pub struct StubGit {
    replies: HashMap<(PathBuf, String), StubReply>,
    calls: Mutex<Vec<(PathBuf, String)>>,
}

impl StubGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, cwd: impl Into<PathBuf>, args: &[&str], reply: StubReply) -> Self {
        self.replies.insert((cwd.into(), args.join(" ")), reply);
        self
    }

    /// How many times an argument vector was run, in any directory
    pub fn call_count(&self, args: &[&str]) -> usize {
        let wanted = args.join(" ");
        self.calls
            .lock()
            .map(|calls| calls.iter().filter(|(_, a)| *a == wanted).count())
            .unwrap_or(0)
    }
}

impl GitRunner for StubGit {
    fn run(&self, cwd: &Path, args: &[&str]) -> Result<String> {
        let key = (cwd.to_path_buf(), args.join(" "));
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(key.clone());
        }

        match self.replies.get(&key) {
            Some(reply) if reply.code == 0 => Ok(reply.stdout.clone()),
            Some(reply) => Err(classify_failure(cwd, args, Some(reply.code), &reply.stderr)),
            None => Err(GitEmblemsError::not_a_repository(cwd)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use tempfile::TempDir;

    #[test]
    fn test_classify_not_a_repository() {
        let err = classify_failure(
            Path::new("/tmp"),
            &["status", "-z"],
            Some(128),
            "fatal: not a git repository (or any of the parent directories): .git",
        );
        assert!(err.is_not_a_repository());
    }

    #[test]
    fn test_classify_other_failure() {
        let err = classify_failure(
            Path::new("/repo"),
            &["status", "-z"],
            Some(128),
            "fatal: index file corrupt\n",
        );
        assert!(!err.is_not_a_repository());
        assert!(err.to_string().contains("index file corrupt"));
    }

    #[test]
    fn test_git_cli_outside_repository() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let git = GitCli::default();
        let result = git.run(temp_dir.path(), &["rev-parse", "--is-inside-work-tree"]);
        // With no repository above the temp dir git reports absence
        if let Err(e) = result {
            assert!(e.is_not_a_repository());
        }
        Ok(())
    }

    #[test]
    fn test_git_cli_uses_untranslated_messages() {
        let cmd = GitCli::default().command(Path::new("/repo"), &["status", "-z"]);
        let envs: Vec<_> = cmd.get_envs().collect();
        assert!(envs.contains(&(OsStr::new("LC_ALL"), Some(OsStr::new("C")))));
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/repo")));
    }

    #[test]
    fn test_git_cli_missing_directory() {
        let git = GitCli::default();
        let result = git.run(Path::new("/definitely/not/a/real/dir"), &["status"]);
        assert!(matches!(result, Err(ref e) if e.is_not_a_repository()));
    }

    #[test]
    fn test_stub_replies_and_records() -> Result<()> {
        let stub = StubGit::new()
            .reply("/repo", &["rev-parse", "--git-dir"], StubReply::ok(".git\n"))
            .reply("/broken", &["status", "-z"], StubReply::fail(128, "fatal: bad"));

        assert_eq!(stub.run(Path::new("/repo"), &["rev-parse", "--git-dir"])?, ".git\n");
        assert!(stub
            .run(Path::new("/elsewhere"), &["rev-parse", "--git-dir"])
            .is_err_and(|e| e.is_not_a_repository()));
        assert!(stub
            .run(Path::new("/broken"), &["status", "-z"])
            .is_err_and(|e| !e.is_not_a_repository()));
        assert_eq!(stub.call_count(&["rev-parse", "--git-dir"]), 2);
        Ok(())
    }
}
