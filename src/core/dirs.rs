use crate::core::error::GitEmblemsError;
use std::path::PathBuf;

const APP_DIR: &str = "git-emblems";

pub fn get_config_directory() -> Result<PathBuf, GitEmblemsError> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config"))),
        _ => dirs::config_dir(),
    };

    base.map(|base| base.join(APP_DIR))
        .ok_or(GitEmblemsError::ConfigDirectoryNotFound)
}
