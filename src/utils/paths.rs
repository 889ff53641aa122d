use anyhow::{Result, anyhow};
use std::path::PathBuf;

const APP_DIR_NAME: &str = "tray-clip";
pub const ENTRIES_FILE: &str = "entries.json";

/// Per-user application data directory, e.g. `%APPDATA%\tray-clip` or
/// `~/.local/share/tray-clip`.
pub fn get_app_data_dir() -> Result<PathBuf> {
    let data = dirs::data_dir().ok_or_else(|| anyhow!("Could not find application data directory"))?;
    Ok(data.join(APP_DIR_NAME))
}

pub fn get_entries_path() -> Result<PathBuf> {
    Ok(get_app_data_dir()?.join(ENTRIES_FILE))
}

pub fn get_log_path() -> Result<PathBuf> {
    Ok(get_app_data_dir()?.join("tray-clip.log"))
}

pub fn get_config_path() -> Result<PathBuf> {
    let config = dirs::config_dir().ok_or_else(|| anyhow!("Could not find config directory"))?;
    Ok(config.join(APP_DIR_NAME).join("config.toml"))
}
