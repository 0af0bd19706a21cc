// ABOUTME: Per-user locations of the storage file, logs and config file
// ABOUTME: Resolved through directories, with relative fallbacks

use directories::ProjectDirs;
use std::path::PathBuf;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "uddoubled";
const APPLICATION: &str = "qa-admin";

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Falls back to ./data without a home directory
pub fn data_dir() -> PathBuf {
    project_dirs()
        .map(|p| p.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./data"))
}

pub fn log_dir() -> PathBuf {
    data_dir().join("logs")
}

/// Default location of the local question storage file
pub fn storage_file() -> PathBuf {
    data_dir().join("questions.db")
}

fn config_dir() -> PathBuf {
    project_dirs()
        .map(|p| p.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Searched last when no config path is given
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}
