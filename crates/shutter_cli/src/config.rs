//! Shutter configuration file handling
//!
//! Settings come from an optional `shutter.toml`:
//!
//! ```toml
//! [motion]
//! max_duration = 3.0
//!
//! [tiles]
//! grid_spacing = 4.0
//!
//! [tiles.share]
//! width = 390.0
//! row_height = 140.0
//! ```
//!
//! Every key is optional; anything left out keeps its built-in default.

use serde::{Deserialize, Serialize};
use shutter_motion::IntegratorConfig;
use shutter_tiles::{EventLayout, InboxCardLayout, ShareLayout};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "shutter.toml";

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`ShutterConfig`]
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level `shutter.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShutterConfig {
    pub motion: IntegratorConfig,
    pub tiles: TilesConfig,
}

/// `[tiles]` section: parameters for every packing strategy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TilesConfig {
    /// Gutter between template grid cells
    pub grid_spacing: f32,
    pub share: ShareLayout,
    pub event: EventLayout,
    pub inbox: InboxCardLayout,
}

impl Default for TilesConfig {
    fn default() -> Self {
        Self {
            grid_spacing: 2.0,
            share: ShareLayout::default(),
            event: EventLayout::default(),
            inbox: InboxCardLayout::default(),
        }
    }
}

impl TilesConfig {
    /// Override the group width of every strategy
    pub fn with_width(mut self, width: f32) -> Self {
        self.share.width = width;
        self.event.width = width;
        self.inbox.width = width;
        self
    }
}

impl ShutterConfig {
    /// Load configuration
    ///
    /// An explicit `path` must exist. Without one, `shutter.toml` in the
    /// working directory is used if present, and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load_from_file(path)
                } else {
                    tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
