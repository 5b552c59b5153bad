//! Common assertion helpers for test output validation
//!
//! Provides predicates for validating git-emblems command output and the
//! statuses and emblems computed for directory entries.

#![allow(dead_code)]

use git_emblems::core::{
    aggregator::DirectoryListing,
    emblems::{emblem_for, EmblemStyle},
};
use predicates::prelude::*;
use std::path::Path;

/// Creates a predicate that checks for a `query` answer line
pub fn has_answer(path: &Path, emblem: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("{} {}", path.display(), emblem))
}

/// Creates a predicate that checks for an emblem name anywhere in the output
pub fn has_emblem(emblem: &str) -> impl Predicate<str> {
    predicates::str::contains(emblem.to_string())
}

/// Creates a predicate that checks for the error banner
pub fn has_error() -> impl Predicate<str> {
    predicates::str::contains("Error:")
}

/// The emblem name the listing gives `path`, if any
pub fn emblem_name(listing: &DirectoryListing, path: &Path) -> Option<String> {
    listing
        .get(path)
        .copied()
        .flatten()
        .and_then(|status| emblem_for(&status, EmblemStyle::default()))
        .map(|emblem| emblem.name())
}
