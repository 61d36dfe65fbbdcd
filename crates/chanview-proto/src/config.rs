use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::platform;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub player: PlayerConfig,
}

/// Where the channel backend lives and how `/channels` should be ordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Forwarded as `sort_by`; the backend sorts by this channel field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// Forwarded as `group_by`; the backend groups pages by this field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
    /// Whole-request timeout. Unset means the transport default (none).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// External player hand-off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// URI scheme registered by the player, e.g. `vlc` → `vlc://<url>`.
    #[serde(default = "default_scheme")]
    pub scheme: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            sort_by: None,
            group_by: None,
            timeout_secs: None,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:40006".to_string()
}

fn default_scheme() -> String {
    "vlc".to_string()
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.backend.base_url, "http://127.0.0.1:40006");
        assert_eq!(config.player.scheme, "vlc");
        assert!(config.backend.sort_by.is_none());
        assert!(config.backend.timeout_secs.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = Config::from_toml_str(
            r#"
            [backend]
            base_url = "http://guide.lan:8080"
            group_by = "group_title"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.base_url, "http://guide.lan:8080");
        assert_eq!(config.backend.group_by.as_deref(), Some("group_title"));
        assert_eq!(config.player.scheme, "vlc");
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.backend.base_url, Config::default().backend.base_url);
    }
}
