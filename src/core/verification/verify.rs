//! Audit a finished job against its manifest
//!
//! The manifest is checked against its sidecar hash first, then every file it
//! lists is re-read and compared by size and hash.

use crate::core::job::{JobManifest, MANIFEST_FILENAME, MANIFEST_HASH_FILENAME};
use crate::core::verification::checksum::{calculate_checksum_bytes, checksum_file};
use crate::core::verification::report::{VerificationFailure, VerificationReport};
use crate::domain::{Result, RollError};
use std::path::Path;
use std::time::Instant;

/// Verify the job in `job_dir`
///
/// # Errors
///
/// Returns an error if the manifest or its sidecar cannot be read. Mismatched
/// or missing documents are reported, not returned as errors.
///
/// # Examples
///
/// ```no_run
/// use rollforge::core::verification::verify_job;
///
/// # fn example() -> rollforge::domain::Result<()> {
/// let report = verify_job("2024-01-01.09-30-00-000000-amal".as_ref())?;
/// println!("{}", report.format_summary());
/// # Ok(())
/// # }
/// ```
pub fn verify_job(job_dir: &Path) -> Result<VerificationReport> {
    let start = Instant::now();
    let mut report = VerificationReport::new();

    tracing::info!(path = %job_dir.display(), "Starting job verification");

    let manifest_path = job_dir.join(MANIFEST_FILENAME);
    let manifest_bytes = std::fs::read(&manifest_path).map_err(|e| {
        RollError::Io(format!("Failed to read {}: {}", manifest_path.display(), e))
    })?;
    let hash_path = job_dir.join(MANIFEST_HASH_FILENAME);
    let recorded_hash = std::fs::read_to_string(&hash_path)
        .map_err(|e| RollError::Io(format!("Failed to read {}: {}", hash_path.display(), e)))?;

    report.manifest_intact = calculate_checksum_bytes(&manifest_bytes) == recorded_hash.trim();
    if !report.manifest_intact {
        tracing::warn!(path = %manifest_path.display(), "Manifest does not match its hash");
    }

    let manifest = JobManifest::load(job_dir)?;
    for (relative_path, record) in &manifest.files {
        let path = job_dir.join(relative_path);
        match checksum_file(&path) {
            Ok((hash, size)) if hash == record.hash && size == record.size => report.record_pass(),
            Ok((hash, size)) => {
                let reason = if size != record.size {
                    format!("Size mismatch: expected {} bytes, found {}", record.size, size)
                } else {
                    "Hash mismatch".to_string()
                };
                report.record_failure(VerificationFailure {
                    path: relative_path.clone(),
                    expected_hash: record.hash.clone(),
                    actual_hash: hash,
                    reason,
                });
            }
            Err(e) => report.record_failure(VerificationFailure {
                path: relative_path.clone(),
                expected_hash: record.hash.clone(),
                actual_hash: String::new(),
                reason: e.to_string(),
            }),
        }
    }

    report.set_duration(start.elapsed().as_millis() as u64);

    tracing::info!(
        passed = report.passed,
        failed = report.failed,
        manifest_intact = report.manifest_intact,
        duration_ms = report.duration_ms,
        "Job verification completed"
    );

    Ok(report)
}
