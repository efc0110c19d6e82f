//! Status command implementation

use super::report_failure;
use crate::cli::{EXIT_OK, EXIT_PRECONDITION};
use crate::core::naming::is_job_output_dir;
use crate::core::overview::JobOverview;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Job directory to inspect
    pub job_dir: PathBuf,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(path = %self.job_dir.display(), "Checking job status");

        if !is_job_output_dir(&self.job_dir) {
            eprintln!("❌ Not a job directory: {}", self.job_dir.display());
            return Ok(EXIT_PRECONDITION);
        }

        match JobOverview::load(&self.job_dir) {
            Ok(overview) => {
                println!("📊 {}", overview.format_summary());
                Ok(EXIT_OK)
            }
            Err(e) => Ok(report_failure("Failed to read job directory", &e)),
        }
    }
}
