use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::CastlistError;
use crate::favorites::FavoriteSort;
use crate::pipeline::ShowSort;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    File,
    Sqlite,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub default_sort: String,
    pub default_favorites_sort: String,
}

impl AppConfig {
    /// Load config: user file (if exists) merged over built-in defaults.
    pub fn load() -> Result<Self, CastlistError> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from an explicit path, merged over built-in defaults.
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, CastlistError> {
        let mut merged = parse_table(DEFAULT_CONFIG)?;
        if path.exists() {
            let user_str = std::fs::read_to_string(path)?;
            merge(&mut merged, parse_table(&user_str)?);
        }
        merged
            .try_into::<AppConfig>()
            .map_err(|e: toml::de::Error| CastlistError::Config(e.to_string()))
    }

    /// Save current config to the user config file.
    pub fn save(&self) -> Result<(), CastlistError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), CastlistError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CastlistError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Directory holding favorites and session data.
    pub fn data_dir(&self) -> PathBuf {
        self.storage.data_dir.clone().unwrap_or_else(|| {
            Self::project_dirs()
                .map(|d| d.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("castlist-data"))
        })
    }

    pub fn show_sort(&self) -> Result<ShowSort, CastlistError> {
        self.display
            .default_sort
            .parse()
            .map_err(|e: crate::pipeline::UnknownSort| CastlistError::Config(e.to_string()))
    }

    pub fn favorite_sort(&self) -> Result<FavoriteSort, CastlistError> {
        self.display
            .default_favorites_sort
            .parse()
            .map_err(|e: crate::pipeline::UnknownSort| CastlistError::Config(e.to_string()))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "castlist")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

fn parse_table(s: &str) -> Result<toml::Value, CastlistError> {
    s.parse::<toml::Table>()
        .map(toml::Value::Table)
        .map_err(|e| CastlistError::Config(e.to_string()))
}

/// Recursively overlay `top` onto `base`; tables merge, other values replace.
fn merge(base: &mut toml::Value, top: toml::Value) {
    match (base, top) {
        (toml::Value::Table(base), toml::Value::Table(top)) => {
            for (key, value) in top {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, top) => *base = top,
    }
}
