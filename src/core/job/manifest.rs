//! Job manifest
//!
//! The manifest is written once, after every document has been generated. Its
//! keys are stable across releases because finished job directories are read
//! back long after they were produced.

use super::tracker::FileRecord;
use super::{MANIFEST_FILENAME, MANIFEST_HASH_FILENAME};
use crate::core::verification::checksum::calculate_checksum_bytes;
use crate::domain::{
    CenterId, ConstituencyId, Office, OfficeId, Phase, Result, RollError, StorageResultExt,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// The arguments a job was started with, kept so the job can be reproduced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputArguments {
    /// Phase
    pub phase: Phase,

    /// Run even if some centers have no registrants
    #[serde(default)]
    pub forgive_no_voters: bool,

    /// Run even if some centers have no office
    #[serde(default)]
    pub forgive_no_office: bool,

    /// Offices the centers were selected by, if any
    #[serde(default)]
    pub office_ids: Vec<OfficeId>,

    /// Centers selected explicitly, if any
    #[serde(default)]
    pub center_ids: Vec<CenterId>,

    /// Constituencies the centers were selected by, if any
    #[serde(default)]
    pub constituency_ids: Vec<ConstituencyId>,
}

impl InputArguments {
    /// Arguments for `phase` with nothing forgiven and no selection criteria
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            forgive_no_voters: false,
            forgive_no_office: false,
            office_ids: Vec::new(),
            center_ids: Vec::new(),
            constituency_ids: Vec::new(),
        }
    }
}

/// When the job ran
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeInformation {
    /// Start of generation
    pub begin: DateTime<Utc>,

    /// End of generation
    pub end: DateTime<Utc>,

    /// Seconds between `begin` and `end`
    pub elapsed: f64,
}

impl TimeInformation {
    /// Build from start and end timestamps
    pub fn new(begin: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let elapsed = (end - begin)
            .to_std()
            .map(|d| d.as_secs_f64())
            .unwrap_or_default();
        Self {
            begin,
            end,
            elapsed,
        }
    }
}

/// Everything a job run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobManifest {
    /// Always true; failed jobs leave a failure marker instead of a manifest
    pub successful: bool,

    /// Timing
    pub time_information: TimeInformation,

    /// Operator who ran the job
    pub user: String,

    /// Arguments the job was started with
    pub input_arguments: InputArguments,

    /// Center ids processed, sorted
    pub registration_centers_processed: Vec<CenterId>,

    /// Number of documents generated
    pub total_pdf_file_count: usize,

    /// Pages across all documents
    pub total_pdf_page_count: u64,

    /// Bytes across all documents
    pub total_pdf_byte_count: u64,

    /// Documents keyed by path relative to the job directory
    pub files: BTreeMap<String, FileRecord>,

    /// Offices as they were when the job ran
    pub offices: Vec<Office>,
}

impl JobManifest {
    /// Serialize the manifest and its hash sidecar into `job_dir`
    ///
    /// The sidecar holds the SHA-256 of the manifest bytes exactly as written.
    ///
    /// # Errors
    ///
    /// Returns [`RollError::OutOfStorage`] if the disk fills up, or another
    /// error if serialization or writing fails.
    pub fn write(&self, job_dir: &Path) -> Result<()> {
        let json = serde_json::to_vec_pretty(self)?;
        let manifest_path = job_dir.join(MANIFEST_FILENAME);
        std::fs::write(&manifest_path, &json)
            .check_storage(|| format!("writing {}", manifest_path.display()))?;

        let hash_path = job_dir.join(MANIFEST_HASH_FILENAME);
        std::fs::write(&hash_path, calculate_checksum_bytes(&json))
            .check_storage(|| format!("writing {}", hash_path.display()))?;

        tracing::debug!(path = %manifest_path.display(), "Wrote job manifest");
        Ok(())
    }

    /// Read the manifest from `job_dir`
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest is missing or malformed.
    pub fn load(job_dir: &Path) -> Result<Self> {
        let path = job_dir.join(MANIFEST_FILENAME);
        let contents = std::fs::read(&path)
            .map_err(|e| RollError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        serde_json::from_slice(&contents).map_err(|e| {
            RollError::Serialization(format!("Invalid manifest {}: {}", path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    fn manifest() -> JobManifest {
        let begin = Utc::now();
        let mut files = BTreeMap::new();
        files.insert(
            "4/11001_book_f.txt".to_string(),
            FileRecord {
                n_pages: 2,
                size: 40,
                hash: "ab".repeat(32),
            },
        );
        JobManifest {
            successful: true,
            time_information: TimeInformation::new(begin, begin + Duration::milliseconds(1500)),
            user: "operator".to_string(),
            input_arguments: InputArguments::new(Phase::InPerson),
            registration_centers_processed: vec![CenterId::new(11001).unwrap()],
            total_pdf_file_count: 1,
            total_pdf_page_count: 2,
            total_pdf_byte_count: 40,
            files,
            offices: vec![Office::new(OfficeId::new(4), "Tripoli")],
        }
    }

    #[test]
    fn test_elapsed_seconds() {
        assert!((manifest().time_information.elapsed - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_manifest_keys_are_stable() {
        let value = serde_json::to_value(manifest()).unwrap();
        for key in [
            "successful",
            "time_information",
            "user",
            "input_arguments",
            "registration_centers_processed",
            "total_pdf_file_count",
            "total_pdf_page_count",
            "total_pdf_byte_count",
            "files",
            "offices",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(value["input_arguments"]["phase"], "in-person");
        assert_eq!(value["files"]["4/11001_book_f.txt"]["n_pages"], 2);
        assert_eq!(value["registration_centers_processed"][0], 11001);
    }

    #[test]
    fn test_write_and_sidecar() {
        let dir = TempDir::new().unwrap();
        let manifest = manifest();
        manifest.write(dir.path()).unwrap();

        let bytes = std::fs::read(dir.path().join(MANIFEST_FILENAME)).unwrap();
        let sidecar = std::fs::read_to_string(dir.path().join(MANIFEST_HASH_FILENAME)).unwrap();
        assert_eq!(sidecar, calculate_checksum_bytes(&bytes));

        assert_eq!(JobManifest::load(dir.path()).unwrap(), manifest);
    }
}
