//! Path utilities.

use std::path::PathBuf;

use crate::simple_error;
use crate::utils::Result;

/// Name of the application data directory.
const APP_DIR: &str = "SurveyConsole";

/// Get the base application directory (`SurveyConsole`).
///
/// Lives under `AppData` on Windows, `Library/Application Support` on macOS
/// and `$XDG_DATA_HOME` (or `~/.local/share`) elsewhere.
#[inline]
pub fn get_app_dir() -> Result<PathBuf> {
    let base_dir = match std::env::consts::OS {
        "windows" => std::env::var("APPDATA")
            .ok()
            .map(PathBuf::from)
            .ok_or_else(|| simple_error!(Config, "Could not determine AppData directory"))?,
        "macos" => std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Application Support"))
            .ok_or_else(|| simple_error!(Config, "Could not determine home directory"))?,
        _ => std::env::var("XDG_DATA_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".local").join("share"))
            })
            .ok_or_else(|| simple_error!(Config, "Could not determine home directory"))?,
    };
    Ok(base_dir.join(APP_DIR))
}

/// Path of the configuration file inside the application directory.
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_app_dir()?.join("config.json"))
}
