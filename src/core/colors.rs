//! Terminal colors for emblems.
//!
//! The CLI prints emblem names next to paths; the color follows the most
//! urgent sub-icon of the emblem so a listing reads at a glance.
//!
//! # Public API
//! - [`EmblemTone`]: the color class of an emblem
//! - [`get_emblem_color_style`]: color function for an emblem, or for no emblem
//! - [`get_colored_emblem`]: the emblem name, colored
//! - [`get_colored_path`]: a path colored like its emblem
//!
//! # Color Scheme
//! - **Conflict**: Red bold for any unmerged sub-icon
//! - **Deleted**: Red
//! - **Modified**: Yellow
//! - **Added**: Green
//! - **Renamed**: Blue
//! - **Untracked**: Cyan
//! - **Clean**, `.git` and no emblem: muted

use crate::core::emblems::Emblem;
use colored::*;

/// Color class of an emblem, ordered from least to most urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EmblemTone {
    Muted,
    Untracked,
    Renamed,
    Added,
    Modified,
    Deleted,
    Conflict,
}

impl EmblemTone {
    fn of_part(part: &str) -> Self {
        match part {
            p if p.starts_with("unmerged") => EmblemTone::Conflict,
            "deleted" => EmblemTone::Deleted,
            "modified" => EmblemTone::Modified,
            "added" => EmblemTone::Added,
            "renamed" => EmblemTone::Renamed,
            "untracked" => EmblemTone::Untracked,
            _ => EmblemTone::Muted,
        }
    }

    /// Tone of the most urgent sub-icon
    pub fn of(emblem: Option<&Emblem>) -> Self {
        emblem
            .and_then(|emblem| emblem.parts().into_iter().map(Self::of_part).max())
            .unwrap_or(EmblemTone::Muted)
    }
}

/// Returns a closure applying the color of `emblem` to any text
pub fn get_emblem_color_style(emblem: Option<&Emblem>) -> Box<dyn Fn(&str) -> ColoredString> {
    match EmblemTone::of(emblem) {
        EmblemTone::Conflict => Box::new(|text: &str| text.red().bold()),
        EmblemTone::Deleted => Box::new(|text: &str| text.red()),
        EmblemTone::Modified => Box::new(|text: &str| text.yellow()),
        EmblemTone::Added => Box::new(|text: &str| text.green()),
        EmblemTone::Renamed => Box::new(|text: &str| text.blue()),
        EmblemTone::Untracked => Box::new(|text: &str| text.cyan()),
        EmblemTone::Muted => Box::new(|text: &str| text.bright_black()),
    }
}

/// The emblem name in its color, `-` when there is none
pub fn get_colored_emblem(emblem: Option<&Emblem>) -> ColoredString {
    let color_fn = get_emblem_color_style(emblem);
    match emblem {
        Some(emblem) => color_fn(&emblem.name()),
        None => color_fn("-"),
    }
}

pub fn get_colored_path(emblem: Option<&Emblem>, path: &str) -> ColoredString {
    let color_fn = get_emblem_color_style(emblem);
    color_fn(path)
}
