//! Storage exhaustion checks for write call sites
//!
//! Every write performed by a job goes through [`StorageResultExt::check_storage`],
//! which turns a full disk into [`RollError::OutOfStorage`] and any other I/O
//! failure into [`RollError::Io`], tagged with what was being written.

use super::errors::RollError;
use super::result::Result;
use std::io;

/// `ENOSPC` on Linux and macOS
const ENOSPC: i32 = 28;

/// Whether `err` means the underlying storage is full
pub fn is_out_of_storage(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::StorageFull || err.raw_os_error() == Some(ENOSPC)
}

/// Convert an I/O error raised while writing into a [`RollError`]
pub fn classify_write_error(err: io::Error, context: impl Into<String>) -> RollError {
    let context = context.into();
    if is_out_of_storage(&err) {
        RollError::out_of_storage(format!("{context}: {err}"))
    } else {
        RollError::Io(format!("{context}: {err}"))
    }
}

/// Typed storage check for fallible writes
pub trait StorageResultExt<T> {
    /// Map the error of a write, naming the operation lazily
    fn check_storage<F, S>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> StorageResultExt<T> for io::Result<T> {
    fn check_storage<F, S>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|err| classify_write_error(err, context()))
    }
}

impl<T> StorageResultExt<T> for std::result::Result<T, csv::Error> {
    fn check_storage<F, S>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|err| {
            let context = context().into();
            match err.into_kind() {
                csv::ErrorKind::Io(io_err) => classify_write_error(io_err, context),
                other => RollError::Serialization(format!("{context}: {other:?}")),
            }
        })
    }
}

impl<T> StorageResultExt<T> for zip::result::ZipResult<T> {
    fn check_storage<F, S>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|err| {
            let context = context().into();
            match err {
                zip::result::ZipError::Io(io_err) => classify_write_error(io_err, context),
                other => RollError::Archive(format!("{context}: {other}")),
            }
        })
    }
}
