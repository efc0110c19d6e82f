//! Roll generation jobs
//!
//! A job directory looks like this once a job has finished:
//!
//! ```text
//! <job>/
//!   this_is_a_rollforge_job.txt
//!   job_metadata.json
//!   job_metadata.json.sha256
//!   voters_by_national_id.csv             (polling only)
//!   voters_by_center_and_station.csv      (polling only)
//!   <office_id>/<center_id>_...           documents
//!   <office_id>.zip
//! ```
//!
//! A failed job has `failure_info.txt` instead of the manifest.

pub mod archive;
pub mod exports;
pub mod failure;
pub mod filenames;
pub mod manifest;
pub mod orchestrator;
pub mod tracker;

pub use archive::archive_office;
pub use exports::{write_voter_station_exports, VoterStation};
pub use failure::{failure_message, handle_job_failure, handle_job_panic};
pub use filenames::{center_id_from_filename, OutputFile};
pub use manifest::{InputArguments, JobManifest, TimeInformation};
pub use orchestrator::{Job, JobContext};
pub use tracker::{FileRecord, FileTracker};

/// Marker file identifying a directory as job output
pub const MARKER_FILENAME: &str = "this_is_a_rollforge_job.txt";

/// Contents of the marker file
pub const MARKER_CONTENT: &str =
    "This file identifies this directory as rollforge output. It has no other purpose.";

/// Manifest written at the end of a successful job
pub const MANIFEST_FILENAME: &str = "job_metadata.json";

/// SHA-256 of the manifest bytes
pub const MANIFEST_HASH_FILENAME: &str = "job_metadata.json.sha256";

/// Written instead of the manifest when a job fails
pub const FAILURE_FILENAME: &str = "failure_info.txt";

/// Polling export ordered by national id
pub const VOTERS_BY_NATIONAL_ID_FILENAME: &str = "voters_by_national_id.csv";

/// Polling export ordered by center, station and national id
pub const VOTERS_BY_CENTER_AND_STATION_FILENAME: &str = "voters_by_center_and_station.csv";
