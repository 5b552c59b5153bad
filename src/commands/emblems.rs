//! `git-emblems emblems`: every emblem name an icon theme has to provide.

use crate::core::{emblems::vocabulary, error::Result};

/// Emblem names in sorted order
pub fn emblem_names() -> Vec<String> {
    let mut names: Vec<String> = vocabulary().iter().map(|emblem| emblem.name()).collect();
    names.sort();
    names.dedup();
    names
}

pub fn execute_emblems() -> Result<()> {
    for name in emblem_names() {
        println!("{name}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique_and_prefixed() {
        let names = emblem_names();
        assert_eq!(names.len(), vocabulary().len());
        assert!(names.iter().all(|name| name.starts_with("git-")));
        assert!(names.contains(&"git-dotgit".to_string()));
        assert!(names.contains(&"git-ahead-repo-clean".to_string()));
    }
}
