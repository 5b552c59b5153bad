//! git-emblems - git status emblems for file manager overlays.
//!
//! This library computes, for every entry of a directory, an aggregated git
//! status and the overlay emblem that represents it. The work runs on a
//! background worker so a file manager never waits on `git`.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - The status model and the `git status -z` parser
//! - Folder, repository and submodule aggregation ([`StatusEngine`])
//! - The emblem mapper and its vocabulary
//! - The worker protocol and the host-facing [`EmblemProvider`]
//! - Error handling and result types

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    // Emblems
    emblem_for,
    vocabulary,
    Blacklist,
    Emblem,
    EmblemProvider,
    EmblemStyle,
    FileStatus,
    FileStatusCode,
    FileStatuses,
    // Git collaborator
    GitCli,
    // Error handling
    GitEmblemsError,
    GitRunner,
    Host,
    Progress,
    RepoLocator,
    RepoOverallStatus,
    Result,
    ScanOptions,
    Settings,
    Status,
    // Status computation
    StatusEngine,
    WorkerHandle,
    WorkerOptions,
};
