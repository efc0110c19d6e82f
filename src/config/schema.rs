//! Configuration schema types
//!
//! This module defines the configuration structure for Rollforge. Every section
//! has defaults, so an empty file is a valid configuration.

use crate::core::distribution::{DEFAULT_REGISTRANTS_PER_STATION_MAX, DEFAULT_UNISEX_TRIGGER};
use serde::{Deserialize, Serialize};

/// Main Rollforge configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RollforgeConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Station distribution parameters
    #[serde(default)]
    pub distribution: DistributionConfig,

    /// Registry snapshot and station store locations
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Where job directories are created
    #[serde(default)]
    pub output: OutputConfig,

    /// Built-in text renderer settings
    #[serde(default)]
    pub renderer: RendererConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RollforgeConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.distribution.validate()?;
        self.registry.validate()?;
        self.output.validate()?;
        self.renderer.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Station distribution parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionConfig {
    /// Most registrants a station should hold
    #[serde(default = "default_registrants_per_station_max")]
    pub registrants_per_station_max: usize,

    /// A gender group smaller than this is merged into a unisex station
    #[serde(default = "default_unisex_trigger")]
    pub unisex_trigger: usize,
}

impl DistributionConfig {
    fn validate(&self) -> Result<(), String> {
        if self.registrants_per_station_max == 0 {
            return Err("distribution.registrants_per_station_max must be > 0".to_string());
        }
        // A group below the trigger must fit in a single station.
        if self.unisex_trigger > self.registrants_per_station_max {
            return Err(format!(
                "distribution.unisex_trigger ({}) must not exceed registrants_per_station_max ({})",
                self.unisex_trigger, self.registrants_per_station_max
            ));
        }
        Ok(())
    }
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            registrants_per_station_max: default_registrants_per_station_max(),
            unisex_trigger: default_unisex_trigger(),
        }
    }
}

/// Registry data locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// JSON registry snapshot (centers, offices, registrations, current election)
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,

    /// JSON file holding persisted station summaries
    #[serde(default = "default_station_store_path")]
    pub station_store_path: String,
}

impl RegistryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.snapshot_path.trim().is_empty() {
            return Err("registry.snapshot_path cannot be empty".to_string());
        }
        if self.station_store_path.trim().is_empty() {
            return Err("registry.station_store_path cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            station_store_path: default_station_store_path(),
        }
    }
}

/// Output location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory in which job directories are created
    #[serde(default = "default_output_root")]
    pub root: String,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.root.trim().is_empty() {
            return Err("output.root cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: default_output_root(),
        }
    }
}

/// Text renderer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Roll lines per page in registration books and exhibition lists
    #[serde(default = "default_lines_per_page_registration")]
    pub lines_per_page_registration: usize,

    /// Roll lines per page in polling lists and station books
    #[serde(default = "default_lines_per_page_polling")]
    pub lines_per_page_polling: usize,

    /// Center names longer than this are cut and marked with `...`
    #[serde(default = "default_center_name_truncate_after")]
    pub center_name_truncate_after: usize,
}

impl RendererConfig {
    fn validate(&self) -> Result<(), String> {
        if self.lines_per_page_registration == 0 {
            return Err("renderer.lines_per_page_registration must be > 0".to_string());
        }
        if self.lines_per_page_polling == 0 {
            return Err("renderer.lines_per_page_polling must be > 0".to_string());
        }
        if self.center_name_truncate_after == 0 {
            return Err("renderer.center_name_truncate_after must be > 0".to_string());
        }
        Ok(())
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            lines_per_page_registration: default_lines_per_page_registration(),
            lines_per_page_polling: default_lines_per_page_polling(),
            center_name_truncate_after: default_center_name_truncate_after(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_registrants_per_station_max() -> usize {
    DEFAULT_REGISTRANTS_PER_STATION_MAX
}

fn default_unisex_trigger() -> usize {
    DEFAULT_UNISEX_TRIGGER
}

fn default_snapshot_path() -> String {
    "registry.json".to_string()
}

fn default_station_store_path() -> String {
    "stations.json".to_string()
}

fn default_output_root() -> String {
    ".".to_string()
}

fn default_lines_per_page_registration() -> usize {
    25
}

fn default_lines_per_page_polling() -> usize {
    15
}

fn default_center_name_truncate_after() -> usize {
    75
}

fn default_true() -> bool {
    true
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
