use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::types::Waypoint;

/// Top-level configuration for the paddock site engine.
///
/// Loaded from `~/.paddock/config.toml` by default. Every section falls back
/// to its defaults when absent, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaddockConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub flight: FlightConfig,
}

impl PaddockConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: PaddockConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Chat widget settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Simulated "thinking" delay before a reply is appended.
    pub response_delay_ms: u64,
    /// First bot message of every session. Empty disables it.
    pub greeting: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            response_delay_ms: 500,
            greeting: "Hello! I'm your AI assistant. I can answer questions about Devkanta's \
                       skills, projects, experience, and how to get in touch. Feel free to ask \
                       me anything!"
                .to_string(),
        }
    }
}

/// Drone flight settings for the location map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    /// Wide view the drone starts from.
    pub source: Waypoint,
    /// Campus the drone lands on.
    pub destination: Waypoint,
    pub start_zoom: f64,
    pub end_zoom: f64,
    pub duration_ms: u64,
    /// Delay between animation frames (~60 fps by default).
    pub frame_interval_ms: u64,
    /// How far the settle motion dips below `end_zoom`.
    pub settle_depth: f64,
    /// Duration of each of the two settle legs.
    pub settle_leg_ms: u64,
    /// Wait after the map is ready before the drone flight starts.
    pub start_delay_ms: u64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            source: Waypoint::new(25.578068478722315, 91.89466789826267),
            destination: Waypoint::new(26.1881, 91.6919),
            start_zoom: 2.0,
            end_zoom: 14.0,
            duration_ms: 8000,
            frame_interval_ms: 16,
            settle_depth: 0.2,
            settle_leg_ms: 300,
            start_delay_ms: 2500,
            min_zoom: 2.0,
            max_zoom: 19.0,
        }
    }
}
