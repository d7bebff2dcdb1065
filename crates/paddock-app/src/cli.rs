//! CLI argument definitions for the Paddock shell.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use paddock_core::types::Waypoint;

/// Paddock: the portfolio chatbot and drone map flight, headless.
#[derive(Parser, Debug)]
#[command(name = "paddock", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Ask the chatbot a single question.
    Ask {
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },
    /// Chat over stdin. `/1`..`/6` send a quick question, `/quit` exits.
    Chat,
    /// Fly the drone from the wide view down to the destination.
    Fly {
        /// Your position, shown as an extra marker.
        #[arg(long, num_args = 2, value_names = ["LAT", "LNG"], allow_negative_numbers = true)]
        location: Option<Vec<f64>>,

        /// Skip the pause before take-off.
        #[arg(long)]
        no_delay: bool,
    },
    /// Write the default configuration file.
    Init,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > PADDOCK_CONFIG env var > ~/.paddock/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        self.config_path_from(
            std::env::var("PADDOCK_CONFIG").ok(),
            home_dir(),
        )
    }

    fn config_path_from(&self, env_path: Option<String>, home: Option<String>) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Some(p) = env_path {
            return PathBuf::from(p);
        }
        match home {
            Some(home) => PathBuf::from(home).join(".paddock").join("config.toml"),
            None => PathBuf::from("config.toml"),
        }
    }

    /// Resolve the log level: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}

impl Command {
    /// The `--location` pair of `fly`, if given.
    pub fn location(&self) -> Option<Waypoint> {
        match self {
            Command::Fly {
                location: Some(coords),
                ..
            } if coords.len() == 2 => Some(Waypoint::new(coords[0], coords[1])),
            _ => None,
        }
    }
}

fn home_dir() -> Option<String> {
    #[cfg(target_os = "windows")]
    let var = "USERPROFILE";
    #[cfg(not(target_os = "windows"))]
    let var = "HOME";
    std::env::var(var).ok()
}
