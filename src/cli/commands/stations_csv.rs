//! Stations CSV command implementation

use super::report_failure;
use crate::adapters::registry::{FileStationStore, SnapshotRegistry};
use crate::cli::EXIT_OK;
use crate::config::load_config;
use crate::core::stations_report::write_station_report;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the stations-csv command
#[derive(Args, Debug)]
pub struct StationsCsvArgs {
    /// Where to write the CSV
    #[arg(short, long, default_value = "stations.csv")]
    pub output: PathBuf,
}

impl StationsCsvArgs {
    /// Execute the stations-csv command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => return Ok(report_failure("Failed to load configuration file", &e)),
        };

        let registry = match SnapshotRegistry::from_file(&config.registry.snapshot_path) {
            Ok(r) => r,
            Err(e) => return Ok(report_failure("Failed to load registry snapshot", &e)),
        };
        let store = FileStationStore::new(config.registry.station_store_path.as_str());

        match write_station_report(&registry, &store, &self.output) {
            Ok(()) => {
                println!("✅ Station report written: {}", self.output.display());
                Ok(EXIT_OK)
            }
            Err(e) => Ok(report_failure("Failed to write station report", &e)),
        }
    }
}
