//! Verification report structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of auditing a finished job against its manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    /// When the verification was performed
    pub verified_at: DateTime<Utc>,

    /// Whether the manifest matches its sidecar hash
    pub manifest_intact: bool,

    /// Files listed in the manifest that were checked
    pub total_verified: usize,

    /// Files whose size and hash match the manifest
    pub passed: usize,

    /// Files that are missing or differ from the manifest
    pub failed: usize,

    /// Details of each failed file
    pub failures: Vec<VerificationFailure>,

    /// Duration of verification in milliseconds
    pub duration_ms: u64,
}

/// A file that does not match the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationFailure {
    /// Path relative to the job directory
    pub path: String,

    /// Hash recorded in the manifest
    pub expected_hash: String,

    /// Hash of the file on disk; empty if it could not be read
    pub actual_hash: String,

    /// Reason for failure
    pub reason: String,
}

impl VerificationReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self {
            verified_at: Utc::now(),
            manifest_intact: true,
            total_verified: 0,
            passed: 0,
            failed: 0,
            failures: Vec::new(),
            duration_ms: 0,
        }
    }

    /// Record a file that matched
    pub fn record_pass(&mut self) {
        self.total_verified += 1;
        self.passed += 1;
    }

    /// Record a file that did not match
    pub fn record_failure(&mut self, failure: VerificationFailure) {
        self.total_verified += 1;
        self.failed += 1;
        self.failures.push(failure);
    }

    /// Set the duration of verification
    pub fn set_duration(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
    }

    /// Whether the manifest and every file matched
    pub fn is_success(&self) -> bool {
        self.manifest_intact && self.failed == 0
    }

    /// Format the report as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("📊 Verification Report\n");
        summary.push_str(&format!("  Verified at: {}\n", self.verified_at));
        summary.push_str(&format!("  Duration: {} ms\n", self.duration_ms));
        summary.push_str(&format!(
            "  Manifest hash: {}\n",
            if self.manifest_intact { "ok" } else { "MISMATCH" }
        ));
        summary.push_str(&format!("  Total verified: {}\n", self.total_verified));
        summary.push_str(&format!("  ✅ Passed: {}\n", self.passed));
        summary.push_str(&format!("  ❌ Failed: {}\n", self.failed));

        if !self.failures.is_empty() {
            summary.push_str("\n❌ Failures:\n");
            for (i, failure) in self.failures.iter().enumerate() {
                summary.push_str(&format!("  {}. {}\n", i + 1, failure.path));
                summary.push_str(&format!("     Reason: {}\n", failure.reason));
            }
        }

        summary
    }
}

impl Default for VerificationReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(path: &str) -> VerificationFailure {
        VerificationFailure {
            path: path.to_string(),
            expected_hash: "abc123".to_string(),
            actual_hash: "def456".to_string(),
            reason: "Hash mismatch".to_string(),
        }
    }

    #[test]
    fn test_new_report_is_success() {
        let report = VerificationReport::new();
        assert_eq!(report.total_verified, 0);
        assert!(report.failures.is_empty());
        assert!(report.is_success());
    }

    #[test]
    fn test_record_pass_and_failure() {
        let mut report = VerificationReport::new();
        report.record_pass();
        report.record_failure(failure("4/11001_1_book.pdf"));

        assert_eq!(report.total_verified, 2);
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 1);
        assert!(!report.is_success());
    }

    #[test]
    fn test_manifest_mismatch_fails() {
        let mut report = VerificationReport::new();
        report.record_pass();
        report.manifest_intact = false;
        assert!(!report.is_success());
    }

    #[test]
    fn test_format_summary() {
        let mut report = VerificationReport::new();
        report.record_pass();
        report.record_failure(failure("4/11001_1_book.pdf"));
        report.set_duration(12);

        let summary = report.format_summary();
        assert!(summary.contains("Duration: 12 ms"));
        assert!(summary.contains("Manifest hash: ok"));
        assert!(summary.contains("Passed: 1"));
        assert!(summary.contains("1. 4/11001_1_book.pdf"));
        assert!(summary.contains("Reason: Hash mismatch"));
    }
}
