//! # Configuration Management
//!
//! This module loads runtime settings from `battery-profile.toml`: where the
//! learned curves live on disk, how aggressively new measurements are blended
//! in, the live-sampling limits and the chart layout.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "battery-profile.toml";

/// Application configuration loaded from battery-profile.toml
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Learning and persistence settings
    pub profile: ProfileConfig,
    /// Live percentage history limits
    pub series: SeriesConfig,
    /// ASCII chart settings
    pub chart: ChartConfig,
}

/// Learning and persistence settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileConfig {
    /// Hardware configuration used when none is given on the command line
    pub config_id: String,
    /// Directory holding the profile CSV files.
    /// Defaults to `~/.config-root/gnome-power-manager` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Weight in percent given to the old value when blending a new sample
    pub smooth_save_percent: u32,
    /// Samples taken at a lower accuracy than this are not learned
    pub min_accuracy: u32,
}

/// Soft limits for the live percentage history
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeriesConfig {
    /// Decimate once the history holds more points than this
    pub max_points: usize,
    /// Trim the head once the history spans more seconds than this
    pub max_width: u32,
}

/// ASCII chart settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChartConfig {
    /// Chart height in text rows
    pub rows: usize,
    /// Odd number of taps of the smoothing kernel
    pub smooth_kernel_length: usize,
    /// Standard deviation of the smoothing kernel, in buckets
    pub smooth_sigma: f32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            profile: ProfileConfig {
                config_id: "default".to_string(),
                data_dir: None,
                smooth_save_percent: 80,
                min_accuracy: 20,
            },
            series: SeriesConfig {
                max_points: 120,
                max_width: 10 * 60,
            },
            chart: ChartConfig {
                rows: 16,
                smooth_kernel_length: 11,
                smooth_sigma: 2.0,
            },
        }
    }
}

impl ProfileConfig {
    /// Directory the profile files are read from and written to.
    pub fn resolved_data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config-root")
                .join("gnome-power-manager"),
        }
    }
}

impl Config {
    /// Load configuration from battery-profile.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    log::info!("loaded configuration for {}", config.profile.config_id);
                    config
                }
                Err(e) => {
                    log::warn!("invalid config file format: {}", e);
                    log::warn!("using default configuration");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no config file found, using default configuration");
                Self::default()
            }
        }
    }

    /// Save current configuration to the given path
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        log::info!("configuration saved to {}", path.as_ref().display());
        Ok(())
    }
}
