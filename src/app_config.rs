use anyhow::{anyhow, Context, Result};
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::playback::{DEFAULT_JUMP_MS, SUPPORTED_RATES};

/// Application configuration module
/// This module handles loading, validating and saving the settings of the
/// command-line player.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Playback settings
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Terminal display settings
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Settings for the simulated playback clock
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaybackConfig {
    // @field: Playback speed, one of the supported rates
    #[serde(default = "default_rate")]
    pub rate: f32,

    // @field: Interval between position updates in ms
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    // @field: Distance of a skip back/forward in ms
    #[serde(default = "default_jump_ms")]
    pub jump_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            rate: default_rate(),
            tick_ms: default_tick_ms(),
            jump_ms: default_jump_ms(),
        }
    }
}

/// Settings for rendering the karaoke line
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DisplayConfig {
    /// Whether to colour the spoken and pending text
    #[serde(default = "default_true")]
    pub color: bool,

    /// Whether to prefix each rendered line with the cue's time range
    #[serde(default)]
    pub show_timestamps: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_timestamps: false,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

fn default_rate() -> f32 {
    1.0
}

fn default_tick_ms() -> u64 {
    50
}

fn default_jump_ms() -> u64 {
    DEFAULT_JUMP_MS
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_RATES.contains(&self.playback.rate) {
            return Err(anyhow!(
                "Unsupported playback rate {} (expected one of {:?})",
                self.playback.rate,
                SUPPORTED_RATES
            ));
        }

        if self.playback.tick_ms == 0 || self.playback.tick_ms > 1000 {
            return Err(anyhow!(
                "Playback tick must be between 1 and 1000 ms, got {}",
                self.playback.tick_ms
            ));
        }

        if self.playback.jump_ms == 0 {
            return Err(anyhow!("Playback jump distance must be positive"));
        }

        Ok(())
    }

    /// Load the configuration at `path`, writing a default one if it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;

            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());

        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: LogLevel::default(),
            playback: PlaybackConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}
