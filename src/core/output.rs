//! Unified output formatting utilities for consistent CLI presentation.
//!
//! # Design Principles
//! - **Consistent color scheme**: Red for errors, emblem colors for entries
//! - **Standardized spacing**: Newline before and after messages
//! - **Aligned listings**: entry name, emblem and status in fixed columns

use crate::core::colors::{get_colored_emblem, get_colored_path};
use crate::core::emblems::Emblem;
use colored::*;

/// Width of the name column in entry listings
const NAME_WIDTH: usize = 32;
/// Width of the emblem column in entry listings
const EMBLEM_WIDTH: usize = 34;

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    eprintln!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints an informational message with consistent styling
pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// Formats and prints a section header with consistent styling
///
/// # Format
/// ```text
///
/// <header>:
///
/// ```
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}

/// One listing line: name and emblem colored alike, then a muted detail column
pub fn format_entry(name: &str, emblem: Option<&Emblem>, detail: &str) -> String {
    let name = format!("{name:<NAME_WIDTH$}");
    let emblem_text = format!("{:<EMBLEM_WIDTH$}", get_colored_emblem(emblem));
    format!(
        "  {} {} {}",
        get_colored_path(emblem, &name),
        emblem_text,
        detail.bright_black()
    )
}

pub fn print_entry(name: &str, emblem: Option<&Emblem>, detail: &str) {
    println!("{}", format_entry(name, emblem, detail));
}
