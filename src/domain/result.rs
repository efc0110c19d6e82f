//! Result type alias for Rollforge

use super::errors::RollError;

/// Result type alias for Rollforge operations
///
/// ```
/// use rollforge::domain::{CenterId, Result, RollError};
///
/// fn parse_center(text: &str) -> Result<CenterId> {
///     text.parse().map_err(RollError::Selection)
/// }
///
/// assert!(parse_center("11001").is_ok());
/// assert!(parse_center("42").is_err());
/// ```
pub type Result<T> = std::result::Result<T, RollError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CenterId;

    #[test]
    fn test_question_mark_converts_io_errors() {
        fn read_missing() -> Result<String> {
            Ok(std::fs::read_to_string("/nonexistent/rollforge/registry.json")?)
        }

        assert!(matches!(read_missing(), Err(RollError::Io(_))));
    }

    #[test]
    fn test_selection_error_message_is_kept() {
        let result: Result<CenterId> = "abc".parse().map_err(RollError::Selection);
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Center id must be exactly 5 digits, got 'abc'");
        assert!(err.is_precondition());
    }
}
