//! Failure marker
//!
//! When a job fails, a failure marker is written into its directory so that
//! anyone reading the directory later sees why. Partial output is left in
//! place for diagnosis.

use super::FAILURE_FILENAME;
use crate::domain::RollError;
use std::backtrace::Backtrace;
use std::path::Path;

/// Text written to the failure marker for `err`
pub fn failure_message(err: &RollError) -> String {
    match err {
        RollError::OutOfStorage { context, trace } => {
            format!("Out of disk space. Stack trace follows.\n\n{context}\n\n{trace}")
        }
        err if err.is_precondition() => err.to_string(),
        err => unanticipated_message(&err.to_string(), &Backtrace::force_capture().to_string()),
    }
}

fn unanticipated_message(message: &str, trace: &str) -> String {
    format!("Execution failed with the following error:\n{message}\nStack trace follows.\n\n{trace}")
}

/// Write the failure marker for `err` into `job_dir`
///
/// Returns whether the failure was anticipated. Unanticipated failures are
/// also logged at error level.
pub fn handle_job_failure(err: &RollError, job_dir: &Path) -> bool {
    let anticipated = err.is_anticipated();
    if !anticipated {
        tracing::error!(error = %err, path = %job_dir.display(), "Error executing job");
    }
    write_marker(job_dir, &failure_message(err));
    anticipated
}

/// Write the failure marker for a panic raised while the job was running
///
/// A panic is always unanticipated.
pub fn handle_job_panic(panic_message: &str, job_dir: &Path) {
    tracing::error!(
        error = %panic_message,
        path = %job_dir.display(),
        "Job panicked"
    );
    let message = unanticipated_message(
        &format!("panic: {panic_message}"),
        &Backtrace::force_capture().to_string(),
    );
    write_marker(job_dir, &message);
}

fn write_marker(job_dir: &Path, message: &str) {
    let path = job_dir.join(FAILURE_FILENAME);
    // Nothing further can be reported if the marker itself cannot be written.
    if let Err(e) = std::fs::write(&path, message.as_bytes()) {
        tracing::error!(
            error = %e,
            path = %path.display(),
            "Failed to write failure marker"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CenterId;
    use tempfile::TempDir;

    fn read_marker(dir: &TempDir) -> String {
        std::fs::read_to_string(dir.path().join(FAILURE_FILENAME)).unwrap()
    }

    #[test]
    fn test_precondition_writes_message_only() {
        let dir = TempDir::new().unwrap();
        let err = RollError::MissingPrerequisites {
            no_office: vec![CenterId::new(11001).unwrap()],
            no_registrants: vec![],
        };

        assert!(handle_job_failure(&err, dir.path()));
        assert_eq!(
            read_marker(&dir),
            "The following centers have no associated office: [11001]."
        );
    }

    #[test]
    fn test_out_of_storage_writes_trace() {
        let dir = TempDir::new().unwrap();
        let err = RollError::OutOfStorage {
            context: "writing 4/11001_1_book.txt".to_string(),
            trace: "frame 0\nframe 1".to_string(),
        };

        assert!(handle_job_failure(&err, dir.path()));
        assert_eq!(
            read_marker(&dir),
            "Out of disk space. Stack trace follows.\n\nwriting 4/11001_1_book.txt\n\nframe 0\nframe 1"
        );
    }

    #[test]
    fn test_out_of_storage_names_the_failed_write() {
        let err = RollError::out_of_storage(
            "writing 4/11001_1_book.txt: No space left on device (os error 28)",
        );
        let message = failure_message(&err);
        assert!(message.starts_with("Out of disk space. Stack trace follows.\n\n"));
        assert!(message.contains("4/11001_1_book.txt: No space left on device"));
    }

    #[test]
    fn test_unanticipated_writes_message_and_trace() {
        let dir = TempDir::new().unwrap();
        let err = RollError::Render("font missing".to_string());

        assert!(!handle_job_failure(&err, dir.path()));
        let marker = read_marker(&dir);
        assert!(marker.starts_with(
            "Execution failed with the following error:\nRender error: font missing\nStack trace follows.\n\n"
        ));
    }

    #[test]
    fn test_panic_marker() {
        let dir = TempDir::new().unwrap();
        handle_job_panic("index out of bounds", dir.path());
        assert!(read_marker(&dir).contains("panic: index out of bounds"));
    }
}
