use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User preferences, read from TOML.
///
/// ```toml
/// exec = "xdg-open"
/// show_unused = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FtagsConfig {
    /// Program launched with the matched files when querying
    pub exec: Option<String>,
    /// List tags that no file carries
    pub show_unused: Option<bool>,
}

impl FtagsConfig {
    pub fn show_unused(&self) -> bool {
        self.show_unused.unwrap_or(false)
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ftags")
        .join("config.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<FtagsConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: FtagsConfig = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
    Ok(Some(config))
}
