//! Host settings

use std::path::{Path, PathBuf};

use anyhow::Context;
use lat_graph::ExplorerConfig;
use serde::{Deserialize, Serialize};

/// Host settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Seed, filters, range and refresh period for the explorer
    pub explorer: ExplorerConfig,
    /// JSON catalog to load instead of the built-in reference catalog
    pub catalog_path: Option<PathBuf>,
    /// Point whose first connection is selected at startup
    pub select_point: Option<String>,
    /// Where to write the final connection snapshot on shutdown
    pub export_path: Option<PathBuf>,
}

impl Settings {
    /// Get the XDG config directory for latmap
    /// Uses $XDG_CONFIG_HOME/latmap on Linux/macOS, falls back to ~/.config/latmap
    fn config_dir() -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_config);
            if path.is_absolute() {
                return Some(path.join("latmap"));
            }
        }

        dirs::home_dir().map(|h| h.join(".config").join("latmap"))
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Self {
        Self::settings_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load settings from a file; a missing or malformed file gives defaults
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| match serde_json::from_str(&s) {
                Ok(settings) => Some(settings),
                Err(e) => {
                    tracing::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Save settings to the default location
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::settings_path().context("Could not determine settings path")?;
        self.save_to(&path)
    }

    /// Save settings to a file, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write settings {}", path.display()))?;

        Ok(())
    }
}
