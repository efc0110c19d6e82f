//! Job overview
//!
//! Reconstructs what a job directory holds from the files on disk alone. A
//! failure marker takes precedence over everything else; a directory with
//! neither a failure marker nor a manifest is still running (or was killed).

use crate::core::job::{center_id_from_filename, JobManifest, FAILURE_FILENAME, MANIFEST_FILENAME};
use crate::domain::{CenterId, Office, OfficeId, Phase, Result, RollError};
use chrono::{DateTime, Timelike, Utc};
use std::collections::BTreeMap;
use std::path::Path;

/// Summary of a job directory
#[derive(Debug, Clone, PartialEq)]
pub struct JobOverview {
    /// Name of the job directory
    pub dirname: String,

    /// What the directory says about the job
    pub state: JobState,
}

/// Where a job stands
#[derive(Debug, Clone, PartialEq)]
pub enum JobState {
    /// A failure marker exists; holds its contents
    Failed(String),
    /// Neither a failure marker nor a manifest exists yet
    InProgress,
    /// The manifest was written
    Finished(Box<FinishedJob>),
}

/// One generated document as listed in an overview
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FileInfo {
    /// File name without the office directory
    pub name: String,

    /// Size in bytes
    pub n_bytes: u64,

    /// Page count
    pub n_pages: u32,
}

impl FileInfo {
    /// Center the file was generated for
    pub fn center_id(&self) -> Option<CenterId> {
        center_id_from_filename(&self.name)
    }
}

/// Summary of a job whose manifest exists
#[derive(Debug, Clone, PartialEq)]
pub struct FinishedJob {
    /// Phase the documents were generated for
    pub phase: Phase,

    /// When the job started, to the second
    pub start_time: DateTime<Utc>,

    /// When the job ended, to the second
    pub end_time: DateTime<Utc>,

    /// Number of documents written
    pub n_files: usize,

    /// Total page count across all documents
    pub n_pages: u64,

    /// User who ran the job
    pub user: String,

    /// Offices as recorded when the job ran
    pub offices: BTreeMap<OfficeId, Office>,
    /// Files per office, sorted by name
    pub files: BTreeMap<OfficeId, Vec<FileInfo>>,
    /// Centers processed, sorted
    pub center_ids: Vec<CenterId>,
    /// Office each center's files were written under
    pub center_to_office: BTreeMap<CenterId, OfficeId>,
}

/// Centers grouped by the first three digits of their id
///
/// Each center is paired with the office holding its files, or `None` when it
/// produced no files.
pub type CenterBins = BTreeMap<String, Vec<(CenterId, Option<OfficeId>)>>;

impl JobOverview {
    /// Read the overview of the job in `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the failure marker or manifest exists but cannot
    /// be read, or if the manifest lists a file outside an office directory.
    pub fn load(path: &Path) -> Result<Self> {
        let dirname = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let failure_path = path.join(FAILURE_FILENAME);
        let state = if failure_path.exists() {
            let message = std::fs::read_to_string(&failure_path).map_err(|e| {
                RollError::Io(format!("Failed to read {}: {}", failure_path.display(), e))
            })?;
            JobState::Failed(message)
        } else if !path.join(MANIFEST_FILENAME).exists() {
            JobState::InProgress
        } else {
            let manifest = JobManifest::load(path)?;
            JobState::Finished(Box::new(FinishedJob::from_manifest(manifest)?))
        };

        Ok(Self { dirname, state })
    }

    /// Human-readable summary for the terminal
    pub fn format_summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Job: {}\n", self.dirname));
        match &self.state {
            JobState::Failed(message) => {
                out.push_str(&format!("Status: failed\n\n{message}\n"));
            }
            JobState::InProgress => {
                out.push_str("Status: in progress\n");
            }
            JobState::Finished(job) => {
                out.push_str("Status: finished\n");
                out.push_str(&format!("Phase: {}\n", job.phase.label()));
                out.push_str(&format!("User: {}\n", job.user));
                out.push_str(&format!("Started: {}\n", job.start_time));
                out.push_str(&format!("Ended: {}\n", job.end_time));
                out.push_str(&format!("Files: {}\n", job.n_files));
                out.push_str(&format!("Pages: {}\n", job.n_pages));
                out.push_str(&format!("Centers: {}\n", job.center_ids.len()));
                for (office_id, files) in &job.files {
                    let name = job
                        .offices
                        .get(office_id)
                        .map(|office| office.name_english.as_str())
                        .unwrap_or_default();
                    out.push_str(&format!("  Office {office_id} {name}: {} files\n", files.len()));
                }
                let (_, n_empty_centers) = job.bin_center_ids();
                if n_empty_centers > 0 {
                    out.push_str(&format!("Centers without files: {n_empty_centers}\n"));
                }
            }
        }
        out
    }
}

impl FinishedJob {
    fn from_manifest(manifest: JobManifest) -> Result<Self> {
        let mut files: BTreeMap<OfficeId, Vec<FileInfo>> = BTreeMap::new();
        let mut center_to_office = BTreeMap::new();

        for (relative_path, record) in manifest.files {
            let (office_id, name) = parse_relative_path(&relative_path)?;
            if let Some(center_id) = center_id_from_filename(name) {
                center_to_office.insert(center_id, office_id);
            }
            files.entry(office_id).or_default().push(FileInfo {
                name: name.to_string(),
                n_bytes: record.size,
                n_pages: record.n_pages,
            });
        }
        for office_files in files.values_mut() {
            office_files.sort();
        }

        let mut center_ids = manifest.registration_centers_processed;
        center_ids.sort();

        Ok(Self {
            phase: manifest.input_arguments.phase,
            start_time: drop_fraction(manifest.time_information.begin),
            end_time: drop_fraction(manifest.time_information.end),
            n_files: manifest.total_pdf_file_count,
            n_pages: manifest.total_pdf_page_count,
            user: manifest.user,
            offices: manifest
                .offices
                .into_iter()
                .map(|office| (office.id, office))
                .collect(),
            files,
            center_ids,
            center_to_office,
        })
    }

    /// Office ids, sorted
    pub fn office_ids(&self) -> Vec<OfficeId> {
        self.offices.keys().copied().collect()
    }

    /// Group centers by id prefix and count those that produced no files
    ///
    /// Centers without files only occur when missing registrants were
    /// forgiven.
    pub fn bin_center_ids(&self) -> (CenterBins, usize) {
        let mut bins = CenterBins::new();
        let mut n_empty_centers = 0;
        for center_id in &self.center_ids {
            let key: String = center_id.to_string().chars().take(3).collect();
            let office_id = self.center_to_office.get(center_id).copied();
            if office_id.is_none() {
                n_empty_centers += 1;
            }
            bins.entry(key).or_default().push((*center_id, office_id));
        }
        (bins, n_empty_centers)
    }
}

fn parse_relative_path(relative_path: &str) -> Result<(OfficeId, &str)> {
    relative_path
        .split_once('/')
        .and_then(|(office, name)| Some((office.parse().ok()?, name)))
        .ok_or_else(|| {
            RollError::Serialization(format!(
                "Manifest entry is not inside an office directory: {relative_path}"
            ))
        })
}

fn drop_fraction(time: DateTime<Utc>) -> DateTime<Utc> {
    time.with_nanosecond(0).unwrap_or(time)
}
