//! Domain error types
//!
//! This module defines the error hierarchy for Rollforge. Errors fall into three
//! groups:
//! - precondition errors, detected before any output is written
//! - storage exhaustion, detected at write call sites
//! - everything else, which is treated as an unanticipated defect

use crate::domain::ids::CenterId;
use std::backtrace::Backtrace;
use thiserror::Error;

/// Main Rollforge error type
#[derive(Debug, Error)]
pub enum RollError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// One or more centers lack an office and/or registrants
    #[error("{}", missing_prerequisites_message(.no_office, .no_registrants))]
    MissingPrerequisites {
        /// Centers with no valid office association
        no_office: Vec<CenterId>,
        /// Centers (or the originals of copy centers) with no registrants
        no_registrants: Vec<CenterId>,
    },

    /// The polling phase needs a current election
    #[error("There is no current in-person election.")]
    NoElection,

    /// Center selection errors (unknown ids, empty selection)
    #[error("{0}")]
    Selection(String),

    /// The underlying storage is full
    #[error("Out of disk space: {context}")]
    OutOfStorage {
        /// What was being written when storage ran out
        context: String,
        /// Stack trace captured where the condition was detected
        trace: String,
    },

    /// Registry lookups and station persistence
    #[error("Registry error: {0}")]
    Registry(String),

    /// Document rendering failures
    #[error("Render error: {0}")]
    Render(String),

    /// Archive packaging failures
    #[error("Archive error: {0}")]
    Archive(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors other than storage exhaustion
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl RollError {
    /// Build an out-of-storage error, capturing the current stack
    pub fn out_of_storage(context: impl Into<String>) -> Self {
        RollError::OutOfStorage {
            context: context.into(),
            trace: Backtrace::force_capture().to_string(),
        }
    }

    /// Whether this is an expected operational condition rather than a defect
    ///
    /// Precondition failures and storage exhaustion are anticipated; the caller
    /// fixes inputs or frees space and runs the job again.
    pub fn is_anticipated(&self) -> bool {
        matches!(
            self,
            RollError::MissingPrerequisites { .. }
                | RollError::NoElection
                | RollError::Selection(_)
                | RollError::OutOfStorage { .. }
        )
    }

    /// Whether this error was raised before the job touched the disk
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            RollError::MissingPrerequisites { .. } | RollError::NoElection | RollError::Selection(_)
        )
    }
}

fn missing_prerequisites_message(no_office: &[CenterId], no_registrants: &[CenterId]) -> String {
    let mut parts = Vec::new();
    if !no_office.is_empty() {
        parts.push(format!(
            "The following centers have no associated office: {}.",
            join_ids(no_office)
        ));
    }
    if !no_registrants.is_empty() {
        parts.push(format!(
            "The following centers have no registrants: {}.",
            join_ids(no_registrants)
        ));
    }
    parts.join(" ")
}

fn join_ids(ids: &[CenterId]) -> String {
    let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    format!("[{}]", ids.join(", "))
}

// Conversion from std::io::Error
//
// Write paths go through `StorageResultExt` so that storage exhaustion is
// classified at the call site; this conversion covers reads.
impl From<std::io::Error> for RollError {
    fn from(err: std::io::Error) -> Self {
        RollError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for RollError {
    fn from(err: serde_json::Error) -> Self {
        RollError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for RollError {
    fn from(err: toml::de::Error) -> Self {
        RollError::Configuration(format!("TOML parse error: {err}"))
    }
}
