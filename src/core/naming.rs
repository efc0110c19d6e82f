//! Job directory names

use crate::core::job::MARKER_FILENAME;
use chrono::{DateTime, Utc};
use std::path::Path;

/// Unique directory name for a job started by `user` at `now`
///
/// The timestamp is microsecond-granular, which keeps names unique even when
/// the user is unknown, e.g. `2014-05-19.15-44-36-401151-amal`.
pub fn job_name(user: &str, now: DateTime<Utc>) -> String {
    format!("{}-{}", now.format("%Y-%m-%d.%H-%M-%S-%6f"), user)
}

/// Whether `path` is a job directory, judged by its marker file
pub fn is_job_output_dir(path: &Path) -> bool {
    path.join(MARKER_FILENAME).is_file()
}
