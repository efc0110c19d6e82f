//! Validate config command implementation

use crate::cli::{EXIT_CONFIGURATION, EXIT_OK};
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIGURATION);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  Registrants per Station: {}",
            config.distribution.registrants_per_station_max
        );
        println!("  Unisex Trigger: {}", config.distribution.unisex_trigger);
        println!("  Registry Snapshot: {}", config.registry.snapshot_path);
        println!("  Station Store: {}", config.registry.station_store_path);
        println!("  Output Root: {}", config.output.root);
        println!(
            "  Lines per Page: {} (registration), {} (polling)",
            config.renderer.lines_per_page_registration, config.renderer.lines_per_page_polling
        );
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                format!("{} ({})", config.logging.local_path, config.logging.local_rotation)
            } else {
                "disabled".to_string()
            }
        );

        Ok(EXIT_OK)
    }
}
