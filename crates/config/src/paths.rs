//! Platform directories for pirtuk.

use directories::ProjectDirs;
use std::path::PathBuf;

const APPLICATION: &str = "pirtuk";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APPLICATION)
}

/// Where `config.toml` is looked up (`~/.config/pirtuk` on Linux).
pub(crate) fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Where the store lives by default (`~/.local/share/pirtuk` on Linux).
pub(crate) fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

