use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_SETTINGS_FILE: &str = "settings.json";
const APP_DIR_NAME: &str = "nebula-groups";
const CATALOG_ENV: &str = "NEBULA_GROUPS_CATALOG";
const CONFIG_DIR_ENV: &str = "NEBULA_GROUPS_CONFIG_DIR";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub window_width: Option<i32>,
    #[serde(default)]
    pub window_height: Option<i32>,
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    #[serde(default = "default_rebuild_batch_size")]
    pub rebuild_batch_size: usize,
    #[serde(default = "default_tile_icon_size")]
    pub tile_icon_size: i32,
}

fn default_rebuild_batch_size() -> usize {
    1
}

fn default_tile_icon_size() -> i32 {
    64
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            window_width: None,
            window_height: None,
            catalog_path: None,
            rebuild_batch_size: default_rebuild_batch_size(),
            tile_icon_size: default_tile_icon_size(),
        }
    }
}

impl AppSettings {
    /// Catalog file to load. The environment override beats the settings file;
    /// `None` means the built-in catalog.
    pub fn resolved_catalog_path(&self) -> Option<PathBuf> {
        if let Ok(custom) = env::var(CATALOG_ENV) {
            let trimmed = custom.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        self.catalog_path.clone()
    }

    pub fn batch_size(&self) -> usize {
        self.rebuild_batch_size.max(1)
    }
}

pub fn load_app_settings() -> AppSettings {
    let Some(path) = app_settings_path() else {
        return AppSettings::default();
    };

    let Ok(content) = fs::read_to_string(&path) else {
        return AppSettings::default();
    };

    parse_app_settings(&content)
}

fn parse_app_settings(content: &str) -> AppSettings {
    match serde_json::from_str(content) {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!("Ignoring malformed settings file: {}", err);
            AppSettings::default()
        }
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Unable to determine settings directory")]
    NoConfigDir,

    #[error("Failed to write settings {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub fn save_app_settings(settings: &AppSettings) -> Result<(), SettingsError> {
    let path = app_settings_path().ok_or(SettingsError::NoConfigDir)?;
    write_app_settings(&path, settings)
}

fn write_app_settings(path: &Path, settings: &AppSettings) -> Result<(), SettingsError> {
    let write_error = |source| SettingsError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    let data = serde_json::to_string_pretty(settings)?;
    fs::write(path, data).map_err(write_error)
}

/// Where the settings directory may come from, in priority order: the
/// variable to read and the components appended to its value.
const CONFIG_DIR_SOURCES: &[(&str, &[&str])] = &[
    (CONFIG_DIR_ENV, &[]),
    ("XDG_CONFIG_HOME", &[APP_DIR_NAME]),
    ("HOME", &[".config", APP_DIR_NAME]),
];

fn config_dir_from(lookup: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    CONFIG_DIR_SOURCES.iter().find_map(|(var, suffix)| {
        let value = lookup(var)?;
        let base = value.trim();
        if base.is_empty() {
            return None;
        }
        Some(suffix.iter().fold(PathBuf::from(base), |dir, part| dir.join(part)))
    })
}

fn app_settings_path() -> Option<PathBuf> {
    config_dir_from(|var| env::var(var).ok()).map(|dir| dir.join(APP_SETTINGS_FILE))
}
