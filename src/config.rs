use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::engine::SearchEngine;
use crate::error::{AppError, AppResult};

const APP_DIR: &str = "mhome";

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub suggest: SuggestConfig,
    pub storage: StorageConfig,
    pub feeds: FeedsConfig,
    pub keymap: KeymapConfig,
    pub ui: UiConfig,
    /// Replaces the built-in engine list when non-empty.
    pub engines: Vec<SearchEngine>,
}

/// Upper bound on suggestions shown per query, whatever the provider sends.
pub const SUGGESTION_LIMIT: usize = 8;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub blur_grace_ms: u64,
    pub max_suggestions: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 250,
            blur_grace_ms: 200,
            max_suggestions: SUGGESTION_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SuggestConfig {
    pub timeout_ms: u64,
    /// Uniform JSON endpoint queried as `{proxy_url}?engine={id}&q={query}`.
    pub proxy_url: Option<String>,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 4000,
            proxy_url: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct StorageConfig {
    pub preference_path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolved_preference_path(&self) -> Option<PathBuf> {
        self.preference_path
            .clone()
            .or_else(|| default_data_dir().map(|dir| dir.join("preferences.json")))
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FeedsConfig {
    pub wallpaper_url: Option<String>,
    pub wallpaper_host: String,
    pub quote_url: Option<String>,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            wallpaper_url: Some("https://magichear.github.io/images.json".to_string()),
            wallpaper_host: "https://www.cn.bing.com".to_string(),
            quote_url: Some("https://v1.hitokoto.cn".to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeymapConfig {
    pub preset: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            preset: "default".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UiConfig {
    pub redraw_interval_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            redraw_interval_ms: 250,
        }
    }
}

impl Config {
    pub fn load(explicit: Option<&Path>) -> AppResult<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file missing, using defaults");
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(AppError::invalid_argument(format!(
                "config path is not a regular file: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|source| {
            AppError::io_with_context(source, format!("failed to read config: {}", path.display()))
        })?;
        let parsed = toml::from_str::<Self>(&raw).map_err(|source| {
            AppError::invalid_argument(format!(
                "failed to parse config {}: {source}",
                path.display()
            ))
        })?;
        Ok(parsed.sanitized())
    }

    fn sanitized(mut self) -> Self {
        self.search.debounce_ms = self.search.debounce_ms.max(1);
        self.search.max_suggestions = self.search.max_suggestions.clamp(1, SUGGESTION_LIMIT);
        self.suggest.timeout_ms = self.suggest.timeout_ms.max(1);
        self.ui.redraw_interval_ms = self.ui.redraw_interval_ms.max(16);
        if self
            .suggest
            .proxy_url
            .as_deref()
            .is_some_and(|url| url.trim().is_empty())
        {
            self.suggest.proxy_url = None;
        }
        if self.feeds.wallpaper_host.trim().is_empty() {
            self.feeds.wallpaper_host = FeedsConfig::default().wallpaper_host;
        }
        self
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("MHOME_CONFIG_PATH")
        && !explicit.is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join(APP_DIR).join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join(APP_DIR)
                .join("config.toml"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join(APP_DIR).join("config.toml"));
    }
    None
}

pub fn default_data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join(APP_DIR));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".local")
                .join("share")
                .join(APP_DIR),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join(APP_DIR));
    }
    None
}

pub fn default_log_path() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_STATE_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join(APP_DIR).join("mhome.log"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_DIR)
                .join("mhome.log"),
        );
    }
    default_data_dir().map(|dir| dir.join("mhome.log"))
}
