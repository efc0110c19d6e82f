//! Generate command implementation
//!
//! Resolves the center selection, creates the job directory and runs the job
//! on a blocking background task. Any failure, including a panic inside the
//! job, leaves a failure marker in the job directory.

use super::report_failure;
use crate::adapters::registry::{FileStationStore, SnapshotRegistry};
use crate::adapters::renderer::TextRenderer;
use crate::cli::{exit_code_for, EXIT_FATAL, EXIT_OK};
use crate::config::load_config;
use crate::core::distribution::StationDistributor;
use crate::core::job::{handle_job_failure, handle_job_panic, Job, JobContext};
use crate::core::naming::job_name;
use crate::core::selection::{parse_ids, read_ids, split_id_list, CenterSelection};
use crate::domain::{CenterId, ConstituencyId, OfficeId, Phase, Result};
use chrono::Utc;
use clap::{ArgGroup, Args};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::task::JoinError;

/// Arguments for the generate command
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("selection").multiple(false)))]
pub struct GenerateArgs {
    /// Phase to generate (in-person, exhibitions, polling)
    pub phase: Phase,

    /// Comma-separated center ids to process
    #[arg(long, group = "selection")]
    pub center_ids: Option<String>,

    /// File with one center id per line
    #[arg(long, group = "selection")]
    pub center_id_file: Option<PathBuf>,

    /// Comma-separated office ids to process
    #[arg(long, group = "selection")]
    pub office_ids: Option<String>,

    /// File with one office id per line
    #[arg(long, group = "selection")]
    pub office_id_file: Option<PathBuf>,

    /// Comma-separated constituency ids to process
    #[arg(long, group = "selection")]
    pub constituency_ids: Option<String>,

    /// File with one constituency id per line
    #[arg(long, group = "selection")]
    pub constituency_id_file: Option<PathBuf>,

    /// Directory in which to create the job directory (defaults to output.root)
    #[arg(long)]
    pub output_root: Option<PathBuf>,

    /// Process centers even if they have no associated office
    #[arg(long)]
    pub forgive_no_office: bool,

    /// Process centers even if they have no registrants
    #[arg(long)]
    pub forgive_no_voters: bool,

    /// Operator name recorded in the job name and manifest
    #[arg(long, env = "USER", default_value = "unknown")]
    pub user: String,
}

impl GenerateArgs {
    /// Execute the generate command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(phase = %self.phase, "Starting generate command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => return Ok(report_failure("Failed to load configuration file", &e)),
        };

        let selection = match self.selection() {
            Ok(s) => s,
            Err(e) => return Ok(report_failure("Invalid center selection", &e)),
        };

        let registry = match SnapshotRegistry::from_file(&config.registry.snapshot_path) {
            Ok(r) => r,
            Err(e) => return Ok(report_failure("Failed to load registry snapshot", &e)),
        };

        let centers = match selection.resolve(&registry) {
            Ok(c) => c,
            Err(e) => return Ok(report_failure("Invalid center selection", &e)),
        };

        let mut input_arguments = selection.input_arguments(self.phase);
        input_arguments.forgive_no_office = self.forgive_no_office;
        input_arguments.forgive_no_voters = self.forgive_no_voters;

        let output_root = self
            .output_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.output.root));
        let job_dir = output_root.join(job_name(&self.user, Utc::now()));

        let n_centers = centers.len();
        let job = match Job::new(
            self.phase,
            centers,
            input_arguments,
            self.user.as_str(),
            &job_dir,
        ) {
            Ok(j) => j,
            Err(e) => return Ok(report_failure("Failed to create job directory", &e)),
        };

        println!(
            "🚀 Generating {} documents for {} centers",
            self.phase.label(),
            n_centers
        );
        println!("   Output: {}", job_dir.display());

        let station_store = FileStationStore::new(config.registry.station_store_path.as_str());
        let renderer = TextRenderer::from_config(&config.renderer);
        let distributor = StationDistributor::from_config(&config.distribution);

        let handle = tokio::task::spawn_blocking(move || {
            job.run(&JobContext {
                registry: &registry,
                station_store: &station_store,
                renderer: &renderer,
                distributor,
            })
        });

        match handle.await {
            Ok(Ok(manifest)) => {
                println!();
                println!("✅ Job complete");
                println!("   Centers: {}", manifest.registration_centers_processed.len());
                println!("   Files: {}", manifest.total_pdf_file_count);
                println!("   Pages: {}", manifest.total_pdf_page_count);
                println!("   Bytes: {}", manifest.total_pdf_byte_count);
                println!("   Elapsed: {:.2}s", manifest.time_information.elapsed);
                Ok(EXIT_OK)
            }
            Ok(Err(e)) => {
                let anticipated = handle_job_failure(&e, &job_dir);
                eprintln!("❌ Job failed: {e}");
                eprintln!("   Details: {}", job_dir.display());
                Ok(if anticipated { exit_code_for(&e) } else { EXIT_FATAL })
            }
            Err(join_error) => {
                let message = panic_message(join_error);
                handle_job_panic(&message, &job_dir);
                eprintln!("❌ Job aborted: {message}");
                eprintln!("   Details: {}", job_dir.display());
                Ok(EXIT_FATAL)
            }
        }
    }

    /// The center selection named by the options, if any
    fn selection(&self) -> Result<CenterSelection> {
        if let Some(ids) = ids::<CenterId>(&self.center_ids, &self.center_id_file)? {
            return Ok(CenterSelection::Centers(ids));
        }
        if let Some(ids) = ids::<OfficeId>(&self.office_ids, &self.office_id_file)? {
            return Ok(CenterSelection::Offices(ids));
        }
        if let Some(ids) =
            ids::<ConstituencyId>(&self.constituency_ids, &self.constituency_id_file)?
        {
            return Ok(CenterSelection::Constituencies(ids));
        }
        Ok(CenterSelection::All)
    }
}

fn ids<T: FromStr>(list: &Option<String>, file: &Option<PathBuf>) -> Result<Option<Vec<T>>> {
    let values = match (list, file) {
        (Some(list), _) => split_id_list(list),
        (None, Some(path)) => read_ids(Path::new(path))?,
        (None, None) => return Ok(None),
    };
    parse_ids(&values).map(Some)
}

fn panic_message(err: JoinError) -> String {
    match err.try_into_panic() {
        Ok(payload) => payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string()),
        Err(err) => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args(extra: &[&str]) -> GenerateArgs {
        let mut argv = vec!["rollforge", "generate", "in-person"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Generate(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_no_selection_means_all() {
        assert_eq!(args(&[]).selection().unwrap(), CenterSelection::All);
    }

    #[test]
    fn test_center_id_list() {
        let selection = args(&["--center-ids", "11001,11002"]).selection().unwrap();
        assert_eq!(
            selection,
            CenterSelection::Centers(vec![
                CenterId::new(11001).unwrap(),
                CenterId::new(11002).unwrap()
            ])
        );
    }

    #[test]
    fn test_short_center_id_rejected() {
        let err = args(&["--center-ids", "1100"]).selection().unwrap_err();
        assert_eq!(err.to_string(), "These ids are invalid: 1100");
    }

    #[test]
    fn test_office_id_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "4\n\n5").unwrap();
        let path = file.path().to_string_lossy().to_string();
        let selection = args(&["--office-id-file", &path]).selection().unwrap();
        assert_eq!(
            selection,
            CenterSelection::Offices(vec![OfficeId::new(4), OfficeId::new(5)])
        );
    }

    #[tokio::test]
    async fn test_panic_message_extracted() {
        let handle = tokio::task::spawn_blocking(|| -> i32 { panic!("renderer exploded") });
        let err = handle.await.unwrap_err();
        assert_eq!(panic_message(err), "renderer exploded");
    }
}
