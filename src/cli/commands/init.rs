//! Init command implementation
//!
//! Writes a commented configuration file holding every default.

use crate::cli::{EXIT_CONFIGURATION, EXIT_FATAL, EXIT_OK};
use clap::Args;
use std::fs;
use std::path::Path;

/// Default configuration written by `init`
pub const DEFAULT_CONFIG: &str = r#"# Rollforge Configuration File
#
# Every value below is the default. Any value can also be set through an
# environment variable, e.g. ROLLFORGE_OUTPUT_ROOT=/srv/rolls. Values may
# reference environment variables with ${VAR}.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Station Distribution
# ============================================================================
[distribution]
# Largest number of registrants assigned to one polling station
registrants_per_station_max = 550

# When either gender has fewer registrants than this, the last station of
# each gender is merged into a single unisex station
unisex_trigger = 25

# ============================================================================
# Registry
# ============================================================================
[registry]
# JSON export of centers, offices, registrations and the current election
snapshot_path = "registry.json"

# JSON file where polling jobs persist station summaries
station_store_path = "stations.json"

# ============================================================================
# Output
# ============================================================================
[output]
# Job directories are created inside this directory
root = "."

# ============================================================================
# Built-in Text Renderer
# ============================================================================
[renderer]
lines_per_page_registration = 25
lines_per_page_polling = 15

# Longer center names are cut and end with "..."
center_name_truncate_after = 75

# ============================================================================
# Logging
# ============================================================================
[logging]
# JSON logs in a rolling file, in addition to the console
local_enabled = true
local_path = "./logs"

# Rotation: daily | hourly
local_rotation = "daily"
"#;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "rollforge.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Rollforge configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIGURATION);
        }

        match fs::write(&self.output, DEFAULT_CONFIG) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Export the registry snapshot to registry.snapshot_path");
                println!("  3. Validate configuration: rollforge validate-config");
                println!("  4. Generate: rollforge generate in-person");
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_config, RollforgeConfig};
    use tempfile::TempDir;

    #[test]
    fn test_default_config_matches_defaults() {
        let config = parse_config(DEFAULT_CONFIG, |_| None).unwrap();
        assert_eq!(config, RollforgeConfig::default());
    }

    #[tokio::test]
    async fn test_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rollforge.toml");
        std::fs::write(&path, "# mine").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), EXIT_CONFIGURATION);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");

        let args = InitArgs { force: true, ..args };
        assert_eq!(args.execute().await.unwrap(), EXIT_OK);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
