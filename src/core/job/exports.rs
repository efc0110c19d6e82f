//! Polling-phase voter/station exports
//!
//! The same rows are written twice, in two orders. Both files are derived from
//! one in-memory list, so they always contain the same rows.

use super::{VOTERS_BY_CENTER_AND_STATION_FILENAME, VOTERS_BY_NATIONAL_ID_FILENAME};
use crate::domain::{CenterId, NationalId, Result, StorageResultExt};
use serde::Serialize;
use std::path::Path;

/// Header shared by both exports
pub const VOTER_STATION_HEADER: [&str; 3] = ["national_id", "center_id", "station_number"];

/// Which station an individual votes at
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct VoterStation {
    /// Individual
    pub national_id: NationalId,

    /// Center, by the center's own id (copy centers keep theirs)
    pub center_id: CenterId,

    /// Station number within the center
    pub station_number: u32,
}

/// Write both exports into `job_dir`
///
/// `rows` is sorted in place, first by national id, then by center and
/// station. A header is written even when there are no rows.
///
/// # Errors
///
/// Returns [`crate::domain::RollError::OutOfStorage`] if the disk fills up.
pub fn write_voter_station_exports(job_dir: &Path, rows: &mut [VoterStation]) -> Result<()> {
    rows.sort();
    write_csv(&job_dir.join(VOTERS_BY_NATIONAL_ID_FILENAME), rows)?;

    rows.sort_by_key(|row| (row.center_id, row.station_number, row.national_id));
    write_csv(&job_dir.join(VOTERS_BY_CENTER_AND_STATION_FILENAME), rows)?;

    tracing::info!(n_rows = rows.len(), "Wrote voter station exports");
    Ok(())
}

fn write_csv(path: &Path, rows: &[VoterStation]) -> Result<()> {
    let context = || format!("writing {}", path.display());

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .check_storage(context)?;
    writer.write_record(VOTER_STATION_HEADER).check_storage(context)?;
    for row in rows {
        writer.serialize(row).check_storage(context)?;
    }
    writer.flush().check_storage(context)?;
    Ok(())
}
