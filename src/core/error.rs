//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`GitEmblemsError`] which covers every failure mode of the
//! status engine, the worker and the configuration layer. It uses `thiserror` for
//! ergonomic error definitions and includes constructors for the common cases.
//!
//! # Public API
//! - [`GitEmblemsError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, GitEmblemsError>`
//!
//! # Error Categories
//! - **Repository absence**: expected and recoverable, callers treat it as "no status"
//! - **Command failures**: git ran but failed for another reason, logged and
//!   surfaced as the ERROR status for the affected scope
//! - **Internal inconsistencies**: undecodable codes, unexpected collisions
//! - **Configuration**: settings and blacklist file errors

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for git-emblems
#[derive(Error, Debug)]
pub enum GitEmblemsError {
    // Repository errors
    #[error("Not a git repository: {}", path.display())]
    NotARepository { path: PathBuf },

    #[error("git {command} failed (exit code {}): {stderr}", code.map_or_else(|| "none".to_string(), |c| c.to_string()))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Internal inconsistency: {message}")]
    InternalInconsistency { message: String },

    // File operation errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Configuration errors
    #[error("Could not find config directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to parse settings file '{}': {source}", path.display())]
    SettingsParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to read blacklist file '{}': {source}", path.display())]
    BlacklistReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write blacklist file '{}': {source}", path.display())]
    BlacklistWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    // Worker errors
    #[error("Status worker is no longer running")]
    WorkerDisconnected,
}

/// Convenience type alias for Results using GitEmblemsError
pub type Result<T> = std::result::Result<T, GitEmblemsError>;

impl GitEmblemsError {
    /// Create a not-a-repository error for a path
    pub fn not_a_repository(path: impl Into<PathBuf>) -> Self {
        Self::NotARepository { path: path.into() }
    }

    /// Create a command failure from the git arguments, exit code and stderr
    pub fn command_failed(args: &[&str], code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: args.join(" "),
            code,
            stderr: stderr.into(),
        }
    }

    /// Create an internal inconsistency error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalInconsistency {
            message: message.into(),
        }
    }

    /// Create a settings parse error
    pub fn settings_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::SettingsParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a blacklist read error
    pub fn blacklist_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::BlacklistReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a blacklist write error
    pub fn blacklist_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::BlacklistWriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Whether this is the expected, silently-handled "no repository here" case
    pub fn is_not_a_repository(&self) -> bool {
        matches!(self, Self::NotARepository { .. })
    }

    /// Whether a failed command's stderr mentions the given text
    pub fn stderr_contains(&self, needle: &str) -> bool {
        match self {
            Self::CommandFailed { stderr, .. } => stderr.contains(needle),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_a_repository_display() {
        let err = GitEmblemsError::not_a_repository("/tmp/nowhere");
        assert_eq!(err.to_string(), "Not a git repository: /tmp/nowhere");
        assert!(err.is_not_a_repository());
    }

    #[test]
    fn test_command_failed_display() {
        let err = GitEmblemsError::command_failed(&["status", "-z"], Some(128), "fatal: bad object");
        assert_eq!(
            err.to_string(),
            "git status -z failed (exit code 128): fatal: bad object"
        );
        assert!(!err.is_not_a_repository());
    }

    #[test]
    fn test_command_failed_without_exit_code() {
        let err = GitEmblemsError::command_failed(&["status"], None, "killed");
        assert!(err.to_string().contains("exit code none"));
    }

    #[test]
    fn test_stderr_contains() {
        let err = GitEmblemsError::command_failed(
            &["ls-tree"],
            Some(128),
            "fatal: Not a valid object name HEAD",
        );
        assert!(err.stderr_contains("Not a valid object name HEAD"));
        assert!(!GitEmblemsError::WorkerDisconnected.stderr_contains("HEAD"));
    }

    #[test]
    fn test_blacklist_read_failed() {
        let path = std::path::PathBuf::from("/test/blacklist.conf");
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = GitEmblemsError::blacklist_read_failed(&path, io_err);
        assert!(err.to_string().contains("/test/blacklist.conf"));
        assert!(err.to_string().contains("access denied"));
    }

    #[test]
    fn test_settings_parse_failed() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ invalid json").unwrap_err();
        let err = GitEmblemsError::settings_parse_failed("/test/settings.json", json_err);
        assert!(err.to_string().contains("/test/settings.json"));
        assert!(err.to_string().contains("Failed to parse"));
    }
}
