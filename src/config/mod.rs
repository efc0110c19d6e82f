//! Configuration management for Rollforge.
//!
//! # Overview
//!
//! Rollforge uses a TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `ROLLFORGE_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rollforge::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("rollforge.toml")?;
//!
//! println!("Station capacity: {}", config.distribution.registrants_per_station_max);
//! println!("Jobs are written under {}", config.output.root);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`DistributionConfig`] - Station capacity and unisex trigger
//! - [`RegistryConfig`] - Registry snapshot and station store files
//! - [`OutputConfig`] - Root directory for job output
//! - [`RendererConfig`] - Text renderer pagination
//! - [`LoggingConfig`] - Local log files
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [distribution]
//! registrants_per_station_max = 550
//! unisex_trigger = 25
//!
//! [registry]
//! snapshot_path = "${ROLLFORGE_DATA}/registry.json"
//! station_store_path = "${ROLLFORGE_DATA}/stations.json"
//!
//! [output]
//! root = "/srv/rolls"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, DistributionConfig, LoggingConfig, OutputConfig, RegistryConfig,
    RendererConfig, RollforgeConfig,
};
