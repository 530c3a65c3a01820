//! Startup configuration, read once from `<config_dir>/remotepad/config.toml`.
//!
//! Missing or broken files degrade to defaults so the client always starts.
//! Nothing is ever written back; binding edits made at runtime live only as
//! long as the window.

use crate::mapping::control::UnknownControl;
use crate::mapping::{DeviceMode, InputConfig, LogicalControl, MappingTable};
use crate::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

const CONFIG_DIR: &str = "remotepad";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_ENV: &str = "REMOTEPAD_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    UnknownControl(#[from] UnknownControl),
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub transport: TransportConfig,
    pub input: InputSettings,
    pub gamepad: GamepadSettings,
}

/// Initial values for the live input configuration
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct InputSettings {
    pub mode: DeviceMode,
    pub player_name: String,
    /// Key code overrides by control name, e.g. `A_BUTTON = "Space"`
    pub keys: HashMap<String, String>,
    /// Button index overrides by control name
    pub buttons: HashMap<String, usize>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GamepadSettings {
    pub enabled: bool,
}

impl Default for GamepadSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl InputSettings {
    pub fn to_input_config(&self) -> Result<InputConfig, ConfigError> {
        let keys = self
            .keys
            .iter()
            .map(|(name, key)| Ok((name.parse::<LogicalControl>()?, key.clone())))
            .collect::<Result<HashMap<_, _>, ConfigError>>()?;
        let buttons = self
            .buttons
            .iter()
            .map(|(name, index)| Ok((name.parse::<LogicalControl>()?, *index)))
            .collect::<Result<HashMap<_, _>, ConfigError>>()?;

        Ok(InputConfig {
            mapping: MappingTable::with_overrides(&keys, &buttons),
            mode: self.mode,
            player_name: self.player_name.clone(),
        })
    }
}

impl AppConfig {
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        let mut path = dirs::config_dir().unwrap_or_else(|| {
            warn!("No config directory found, falling back to home");
            let mut home = dirs::home_dir().unwrap_or_default();
            home.push(".config");
            home
        });
        path.push(CONFIG_DIR);
        path.push(CONFIG_FILE);
        path
    }

    pub async fn read(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
        Self::parse(&content)
    }

    /// Reads the config file, falling back to defaults on any problem
    pub async fn load_or_default() -> Self {
        let path = Self::path();
        match tokio::fs::try_exists(&path).await {
            Ok(true) => {}
            Ok(false) => {
                info!("No config at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                warn!("Could not check {}: {}", path.display(), e);
                return Self::default();
            }
        }

        match Self::read(&path).await {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                debug!("{:?}", config);
                config
            }
            Err(e) => {
                warn!("Ignoring config: {}", e);
                Self::default()
            }
        }
    }
}
