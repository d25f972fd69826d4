//! Shell configuration loaded from `opshell.toml`.
//!
//! Every field has a default, so a missing or partial file still yields a
//! usable configuration.

use super::error::ShellError;
use super::panel::{WindowSize, COLLAPSED_WINDOW_SIZE, NOMINAL_WINDOW_SIZE};
use super::theme::{ThemeChoice, DEFAULT_COLOR_OVERRIDES};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "opshell.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetConfig {
    pub id: String,
    pub label: String,
    /// Asset file name, relative to the asset directory
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub window_title: String,
    pub nominal_size: WindowSize,
    pub collapsed_size: WindowSize,
    /// Flavor used until the user picks one (the pick is persisted by eframe)
    pub theme: ThemeChoice,
    /// Token name → `#rrggbb[aa]`
    pub colors: BTreeMap<String, String>,
    pub asset_dir: PathBuf,
    pub targets: Vec<TargetConfig>,
    /// Artificial latency of the placeholder pipeline
    pub placeholder_delay_ms: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        let colors = DEFAULT_COLOR_OVERRIDES
            .iter()
            .map(|(token, hex)| (token.name().to_string(), hex.to_string()))
            .collect();

        Self {
            window_title: "Operation Shell".to_string(),
            nominal_size: NOMINAL_WINDOW_SIZE,
            collapsed_size: COLLAPSED_WINDOW_SIZE,
            theme: ThemeChoice::default(),
            colors,
            asset_dir: PathBuf::from("assets"),
            targets: vec![
                TargetConfig {
                    id: "primary".to_string(),
                    label: "Primary".to_string(),
                    icon: "primary.png".to_string(),
                },
                TargetConfig {
                    id: "secondary".to_string(),
                    label: "Secondary".to_string(),
                    icon: "secondary.png".to_string(),
                },
                TargetConfig {
                    id: "wip".to_string(),
                    label: "WIP".to_string(),
                    icon: "WIP.png".to_string(),
                },
            ],
            placeholder_delay_ms: 0,
        }
    }
}

impl ShellConfig {
    /// Default location under the platform config directory
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "", "opshell")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ShellError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ShellError::Config(format!("{}: {}", path.as_ref().display(), e)))?;
        toml::from_str(&content).map_err(|e| ShellError::Config(e.to_string()))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ShellError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ShellError::Config(e.to_string()))?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| ShellError::Config(format!("{}: {}", path.as_ref().display(), e)))
    }

    /// Load `path` if it exists, otherwise defaults. Parse errors fall back too.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        if !path.exists() {
            info!("No config at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(config) => {
                info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                warn!("Failed to load config, using defaults: {}", e);
                Self::default()
            }
        }
    }
}
