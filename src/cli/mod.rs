//! CLI interface and argument parsing
//!
//! Exit codes shared by every command:
//!
//! | code | meaning |
//! |------|---------|
//! | 0 | success |
//! | 2 | configuration error |
//! | 3 | precondition failure or out of storage |
//! | 5 | fatal (unanticipated) error |

pub mod commands;

use crate::domain::RollError;
use clap::{Parser, Subcommand};

/// Success
pub const EXIT_OK: i32 = 0;
/// Configuration could not be loaded or is invalid
pub const EXIT_CONFIGURATION: i32 = 2;
/// Inputs need fixing or storage needs freeing before re-running
pub const EXIT_PRECONDITION: i32 = 3;
/// Unanticipated failure
pub const EXIT_FATAL: i32 = 5;

/// Exit code for a failed operation
pub fn exit_code_for(err: &RollError) -> i32 {
    match err {
        RollError::Configuration(_) => EXIT_CONFIGURATION,
        err if err.is_anticipated() => EXIT_PRECONDITION,
        _ => EXIT_FATAL,
    }
}

/// Rollforge - polling station distribution and voter roll generation
#[derive(Parser, Debug)]
#[command(name = "rollforge")]
#[command(version, about, long_about = None)]
#[command(author = "Rollforge Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "rollforge.toml", env = "ROLLFORGE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ROLLFORGE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the documents of one phase for a selection of centers
    Generate(commands::generate::GenerateArgs),

    /// Show the status of a job directory
    Status(commands::status::StatusArgs),

    /// Check a finished job's files against its manifest
    Verify(commands::verify::VerifyArgs),

    /// Write the station summary CSV for the current election
    StationsCsv(commands::stations_csv::StationsCsvArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CenterId, Phase};

    #[test]
    fn test_cli_parse_generate() {
        let cli = Cli::parse_from(["rollforge", "generate", "polling"]);
        assert_eq!(cli.config, "rollforge.toml");
        match cli.command {
            Commands::Generate(args) => assert_eq!(args.phase, Phase::Polling),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["rollforge", "--config", "custom.toml", "validate-config"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["rollforge", "--log-level", "debug", "init"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_status_and_verify() {
        let cli = Cli::parse_from(["rollforge", "status", "out/job"]);
        assert!(matches!(cli.command, Commands::Status(_)));
        let cli = Cli::parse_from(["rollforge", "verify", "out/job"]);
        assert!(matches!(cli.command, Commands::Verify(_)));
    }

    #[test]
    fn test_cli_parse_stations_csv() {
        let cli = Cli::parse_from(["rollforge", "stations-csv", "--output", "s.csv"]);
        assert!(matches!(cli.command, Commands::StationsCsv(_)));
    }

    #[test]
    fn test_selection_options_conflict() {
        let result = Cli::try_parse_from([
            "rollforge",
            "generate",
            "in-person",
            "--center-ids",
            "11001",
            "--office-ids",
            "4",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_phase_rejected() {
        assert!(Cli::try_parse_from(["rollforge", "generate", "counting"]).is_err());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            exit_code_for(&RollError::Configuration("x".into())),
            EXIT_CONFIGURATION
        );
        assert_eq!(exit_code_for(&RollError::NoElection), EXIT_PRECONDITION);
        assert_eq!(
            exit_code_for(&RollError::MissingPrerequisites {
                no_office: vec![CenterId::new(11001).unwrap()],
                no_registrants: vec![],
            }),
            EXIT_PRECONDITION
        );
        assert_eq!(
            exit_code_for(&RollError::out_of_storage("writing")),
            EXIT_PRECONDITION
        );
        assert_eq!(exit_code_for(&RollError::Render("x".into())), EXIT_FATAL);
    }
}
