//! Per-office zip archives

use crate::domain::{OfficeId, Result, StorageResultExt};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Archive the contents of `<job_dir>/<office_id>/` into `<job_dir>/<office_id>.zip`
///
/// Entries are stored under their bare file names, in sorted order.
///
/// # Errors
///
/// Returns [`crate::domain::RollError::OutOfStorage`] if the disk fills up.
pub fn archive_office(job_dir: &Path, office_id: OfficeId) -> Result<PathBuf> {
    let office_dir = job_dir.join(office_id.to_string());
    let zip_path = job_dir.join(format!("{office_id}.zip"));

    let mut entries: Vec<(String, PathBuf)> = std::fs::read_dir(&office_dir)
        .check_storage(|| format!("listing {}", office_dir.display()))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| (entry.file_name().to_string_lossy().into_owned(), entry.path()))
        .collect();
    entries.sort();

    let file = File::create(&zip_path)
        .check_storage(|| format!("creating {}", zip_path.display()))?;
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, path) in &entries {
        zip.start_file(name.as_str(), options)
            .check_storage(|| format!("adding {name} to {}", zip_path.display()))?;
        let mut source = BufReader::new(
            File::open(path).check_storage(|| format!("opening {}", path.display()))?,
        );
        io::copy(&mut source, &mut zip)
            .check_storage(|| format!("adding {name} to {}", zip_path.display()))?;
    }

    zip.finish()
        .check_storage(|| format!("finishing {}", zip_path.display()))?;

    tracing::info!(
        %office_id,
        n_files = entries.len(),
        path = %zip_path.display(),
        "Archived office output"
    );
    Ok(zip_path)
}
