//! CLI command implementations

pub mod generate;
pub mod init;
pub mod stations_csv;
pub mod status;
pub mod validate;
pub mod verify;

use super::exit_code_for;
use crate::domain::RollError;

/// Print a failed step and return its exit code
fn report_failure(what: &str, err: &RollError) -> i32 {
    crate::log_error_with_context!(err, what);
    eprintln!("❌ {what}");
    eprintln!("   Error: {err}");
    exit_code_for(err)
}
