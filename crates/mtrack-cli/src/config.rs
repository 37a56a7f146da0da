use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Contents of `config.toml`. Every section and key is optional.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MtrackConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub session: SessionSection,
    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ApiSection {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SessionSection {
    pub path: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UiSection {
    pub timezone: Option<String>,
    pub currency_symbol: Option<String>,
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_session_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join(mtrack_core::session::SESSION_FILE))
}

pub fn read_config(path: &Path) -> anyhow::Result<MtrackConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("mtrack"));
        }
    }
    Ok(home_dir()?.join(".config").join("mtrack"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("mtrack"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("mtrack"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
