use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use super::platform;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Where refreshed episode lists come from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeedSourceKind {
    /// Reshuffle the bundled catalog after an artificial delay.
    #[default]
    Bundled,
    /// Fetch a catalog payload from `feed.url`.
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default)]
    pub source: FeedSourceKind,
    #[serde(default)]
    pub url: String,
    /// Simulated network latency for the bundled source.
    #[serde(default = "default_refresh_latency_ms")]
    pub refresh_latency_ms: u64,
    /// Pause after the new list lands before the refresh indicator clears.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    /// Leading episodes shown in the editor's pick strip instead of the list.
    #[serde(default = "default_editors_pick_count")]
    pub editors_pick_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_buffering_ms")]
    pub buffering_ms: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    #[default]
    Dark,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub color_scheme: ColorScheme,
    #[serde(default = "default_show_keys_bar")]
    pub show_keys_bar: bool,
}

impl FeedConfig {
    pub fn refresh_latency(&self) -> Duration {
        Duration::from_millis(self.refresh_latency_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

impl PlayerConfig {
    pub fn buffering(&self) -> Duration {
        Duration::from_millis(self.buffering_ms)
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            source: FeedSourceKind::default(),
            url: String::new(),
            refresh_latency_ms: default_refresh_latency_ms(),
            settle_ms: default_settle_ms(),
            editors_pick_count: default_editors_pick_count(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            buffering_ms: default_buffering_ms(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::default(),
            show_keys_bar: default_show_keys_bar(),
        }
    }
}

fn default_refresh_latency_ms() -> u64 {
    1000
}

fn default_settle_ms() -> u64 {
    500
}

fn default_editors_pick_count() -> usize {
    5
}

fn default_buffering_ms() -> u64 {
    400
}

fn default_show_keys_bar() -> bool {
    true
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            info!("wrote default config to {}", config_path.display());
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(
            "loaded config from {} (source {:?})",
            config_path.display(),
            config.feed.source
        );
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        if config.feed.source == FeedSourceKind::Http && config.feed.url.trim().is_empty() {
            anyhow::bail!("feed.source = \"http\" requires feed.url");
        }
        Ok(config)
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
        assert_eq!(config.feed.source, FeedSourceKind::Bundled);
        assert_eq!(config.feed.refresh_latency(), Duration::from_millis(1000));
        assert_eq!(config.feed.settle(), Duration::from_millis(500));
        assert_eq!(config.feed.editors_pick_count, 5);
        assert_eq!(config.ui.color_scheme, ColorScheme::Dark);
        assert!(config.ui.show_keys_bar);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = Config::from_toml_str("[feed]\nsettle_ms = 10\n[ui]\ncolor_scheme = \"light\"\n")
            .unwrap();
        assert_eq!(config.feed.settle_ms, 10);
        assert_eq!(config.feed.refresh_latency_ms, 1000);
        assert_eq!(config.player.buffering_ms, 400);
        assert_eq!(config.ui.color_scheme, ColorScheme::Light);
    }

    #[test]
    fn test_http_source_requires_url() {
        let err = Config::from_toml_str("[feed]\nsource = \"http\"\n").unwrap_err();
        assert!(err.to_string().contains("feed.url"));

        let ok = Config::from_toml_str("[feed]\nsource = \"http\"\nurl = \"https://example.com/feed.json\"\n")
            .unwrap();
        assert_eq!(ok.feed.source, FeedSourceKind::Http);
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let back = Config::from_toml_str(&text).unwrap();
        assert_eq!(back.feed.editors_pick_count, 5);
    }
}
