//! Core functionality for git-emblems.
//!
//! This module provides the status model, the git collaborator, the
//! aggregation engine, the background worker and the CLI presentation helpers.

pub mod aggregator;
pub mod blacklist;
pub mod cache;
pub mod colors;
pub mod command_init;
pub mod config;
pub mod dirs;
pub mod emblems;
pub mod error;
pub mod file_statuses;
pub mod git;
pub mod locator;
pub mod output;
pub mod parser;
pub mod provider;
pub mod status;
pub mod worker;

// === Error handling ===
// Core error types and result type used throughout the application
pub use error::{GitEmblemsError, Result};

// === Status model ===
// Severity axes and the per-path / per-repository status values
pub use status::{
    FileStatus, FileStatusCode, IndexStatus, MergeStatus, RepoOverallStatus, RepoStatus, Status,
    SyncStatus, WorktreeStatus,
};

// === Git collaborator ===
// Runner trait, subprocess implementation and the canned-reply stub
pub use git::{GitCli, GitRunner, StubGit, StubReply};

// === Status computation ===
// Parsing, repository discovery and aggregation
pub use aggregator::{DirectoryListing, ScanOptions, StatusEngine};
pub use blacklist::Blacklist;
pub use file_statuses::FileStatuses;
pub use locator::RepoLocator;
pub use parser::{add_tracked_files, parse_status_output};

// === Emblems ===
// Pure status to emblem mapping and the emblem vocabulary
pub use emblems::{emblem_for, vocabulary, Emblem, EmblemStyle};

// === Worker and host integration ===
// Background computation, consume-on-read cache and host-facing provider
pub use cache::EmblemCache;
pub use provider::{EmblemProvider, Host};
pub use worker::{Progress, ReadyBatch, Request, Response, WorkerHandle, WorkerOptions};

// === Configuration ===
pub use command_init::{CommandContext, CommandInit, ConfigOverrides};
pub use config::Settings;

// === Output formatting ===
// Unified output formatting for consistent CLI presentation
pub use colors::{get_colored_emblem, get_colored_path, get_emblem_color_style, EmblemTone};
pub use output::{print_entry, print_error, print_info, print_section_header};
