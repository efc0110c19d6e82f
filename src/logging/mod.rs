//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - console output on stderr
//! - JSON logs in a rolling local file
//! - level from configuration, overridable with `RUST_LOG`
//!
//! # Example
//!
//! ```no_run
//! use rollforge::logging::init_logging;
//! use rollforge::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(center_id = 11001, "Completed center");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log progress through a job's centers
///
/// # Example
///
/// ```no_run
/// use rollforge::log_center_progress;
///
/// log_center_progress!(11001, 3, 12);
/// ```
#[macro_export]
macro_rules! log_center_progress {
    ($center_id:expr, $completed:expr, $total:expr) => {
        tracing::info!(
            center_id = %$center_id,
            completed = $completed,
            total = $total,
            progress_pct = ($completed as f64 / $total as f64 * 100.0),
            "Completed center"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use rollforge::log_error_with_context;
/// use rollforge::domain::RollError;
///
/// let error = RollError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
