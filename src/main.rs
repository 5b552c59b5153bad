use clap::{Parser, Subcommand};
use git_emblems::commands::*;
use git_emblems::core::{command_init::ConfigOverrides, error::Result, print_error};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "git-emblems")]
#[command(about = "Git status emblems for file manager overlays")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Read settings.json and blacklist.conf from this directory
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Quiet period in milliseconds before submitted paths are processed
    #[arg(long, global = true, value_name = "MS")]
    debounce_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the status and emblem of every entry of a directory
    Status {
        /// Directory to list (defaults to the current directory)
        dir: Option<PathBuf>,
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Compute emblems for paths through the background worker
    Query {
        /// Paths to look up
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// List every emblem name an icon theme must provide
    Emblems,
    /// Show the blacklist file and its entries
    Blacklist,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let overrides = ConfigOverrides {
        config_dir: cli.config_dir,
        debounce_ms: cli.debounce_ms,
    };

    let result = match cli.command {
        Commands::Status { dir, json } => execute_status(&overrides, dir, json),
        Commands::Query { paths } => execute_query(&overrides, paths),
        Commands::Emblems => execute_emblems(),
        Commands::Blacklist => execute_blacklist(&overrides),
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
