//! Verify command implementation

use super::report_failure;
use crate::cli::{EXIT_FATAL, EXIT_OK};
use crate::core::verification::verify_job;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the verify command
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Finished job directory to audit
    pub job_dir: PathBuf,
}

impl VerifyArgs {
    /// Execute the verify command
    ///
    /// A job whose files do not match its manifest exits with the fatal code.
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let report = match verify_job(&self.job_dir) {
            Ok(r) => r,
            Err(e) => return Ok(report_failure("Failed to verify job", &e)),
        };

        println!("{}", report.format_summary());
        if report.is_success() {
            println!("✅ Job output matches its manifest");
            Ok(EXIT_OK)
        } else {
            println!("❌ Job output does not match its manifest");
            Ok(EXIT_FATAL)
        }
    }
}
