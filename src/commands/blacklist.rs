//! `git-emblems blacklist`: where the blacklist lives and what it excludes.

use crate::core::{
    command_init::{CommandInit, ConfigOverrides},
    error::Result,
    output::{print_info, print_section_header},
};

pub fn execute_blacklist(overrides: &ConfigOverrides) -> Result<()> {
    let context = CommandInit::initialize(overrides)?;

    print_section_header(&format!("Blacklist ({})", context.blacklist_path.display()));
    if context.blacklist.entries().is_empty() {
        println!("  No directories are blacklisted");
    }
    for entry in context.blacklist.entries() {
        println!("  {}", entry.display());
    }
    print_info("Listed directories and everything beneath them get no emblems.");
    Ok(())
}
