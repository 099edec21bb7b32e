//! Config file location.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Application directory under the config root.
const APP_DIR: &str = "popmovies";

/// Config file name.
const CONFIG_FILE: &str = "config.toml";

/// Resolves the config file path from the process environment.
///
/// See [`resolve_config_path_with`].
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is usable
/// (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    resolve_config_path_with(dir, |name| std::env::var(name).ok())
}

/// Resolves the config file path, reading variables through `lookup`.
///
/// Lookup order:
/// 1. `{dir}/config.toml` when `dir` is given.
/// 2. `$XDG_CONFIG_HOME/popmovies/config.toml` when set to an absolute path.
/// 3. `$HOME/.config/popmovies/config.toml`.
///
/// # Errors
///
/// Returns an error if neither variable yields a usable directory.
pub fn resolve_config_path_with<F>(dir: Option<&PathBuf>, lookup: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }

    // Relative XDG paths are invalid and ignored.
    if let Some(xdg) = lookup("XDG_CONFIG_HOME").filter(|v| Path::new(v).is_absolute()) {
        return Ok(PathBuf::from(xdg).join(APP_DIR).join(CONFIG_FILE));
    }

    match lookup("HOME").filter(|v| !v.is_empty()) {
        Some(home) => Ok(PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join(CONFIG_FILE)),
        None => bail!("cannot locate config directory: set HOME or XDG_CONFIG_HOME, or pass --dir"),
    }
}
