//! Checksums and post-run audit of job output

pub mod checksum;
pub mod report;
pub mod verify;

pub use report::{VerificationFailure, VerificationReport};
pub use verify::verify_job;
