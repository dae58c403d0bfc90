use crate::query::cache::DEFAULT_CAPACITY;
use crate::query::filter::{FilterMode, FilterRules, MonsterFilter};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "dropfinder";
const CONFIG_FILE: &str = "config.json";

/// Application configuration stored in the app data directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Number of keyword result sets kept in the search cache
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// What counts as a linked monster on list pages
    #[serde(default)]
    pub monster_filter: MonsterFilter,

    /// Filter applied when the caller does not ask for one
    #[serde(default)]
    pub default_filter: FilterMode,

    /// Dataset blob to load when none is given on the command line
    #[serde(default)]
    pub data_path: Option<PathBuf>,
}

fn default_cache_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_capacity: default_cache_capacity(),
            monster_filter: MonsterFilter::default(),
            default_filter: FilterMode::default(),
            data_path: None,
        }
    }
}

impl AppConfig {
    /// Load config from the app data directory, or return default if not found
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load config from an explicit path, or return default if not found
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = fs::read_to_string(config_path)
                .context("Failed to read config file")?;
            let config: AppConfig = serde_json::from_str(&content)
                .context("Failed to parse config file")?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the app data directory
    pub fn save(&self) -> Result<()> {
        let config_path = get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(config_path, content)
            .context("Failed to write config file")?;
        Ok(())
    }

    /// Cache capacity with zero resolved to one
    pub fn effective_cache_capacity(&self) -> usize {
        self.cache_capacity.max(1)
    }

    pub fn filter_rules(&self) -> FilterRules {
        FilterRules {
            monster: self.monster_filter,
        }
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(CONFIG_FILE))
}

/// Get the application data directory
pub fn get_app_data_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir()
            .map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: use XDG_DATA_HOME or ~/.local/share
        dirs::data_dir()
    };

    let base = base.context("Could not determine app data directory")?;
    let app_dir = base.join(APP_NAME);

    fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}
