//! Job orchestration
//!
//! A [`Job`] is one run of one phase over an ordered list of centers. Running
//! it validates the centers, generates every document into office
//! subdirectories of the job directory, writes the polling exports and the
//! manifest, and finally zips each office's documents.
//!
//! Centers are processed one at a time. Each center's files and export rows
//! are collected into a shard that is merged into the job totals once the
//! center is done.

use super::archive::archive_office;
use super::exports::{write_voter_station_exports, VoterStation};
use super::filenames::OutputFile;
use super::manifest::{InputArguments, JobManifest, TimeInformation};
use super::tracker::FileTracker;
use super::{MARKER_CONTENT, MARKER_FILENAME};
use crate::adapters::registry::{Registry, StationStore};
use crate::adapters::renderer::{Document, DocumentCenter, DocumentRenderer};
use crate::core::distribution::StationDistributor;
use crate::domain::{
    Center, CenterId, ElectionId, Gender, Individual, Office, OfficeId, Phase, Result, RollError,
    Station, StationGender, StorageResultExt,
};
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Genders rendered for the in-person and exhibitions phases, in output order
const REGISTRATION_GENDERS: [Gender; 2] = [Gender::Female, Gender::Male];

/// Collaborators a job run needs
pub struct JobContext<'a> {
    /// Reference data and rosters
    pub registry: &'a dyn Registry,
    /// Where polling stations are persisted
    pub station_store: &'a dyn StationStore,
    /// Document renderer
    pub renderer: &'a dyn DocumentRenderer,
    /// Station distributor
    pub distributor: StationDistributor,
}

/// What one center contributed to the job
#[derive(Debug, Default)]
struct CenterShard {
    files: FileTracker,
    voter_stations: Vec<VoterStation>,
}

/// One roll generation run
#[derive(Debug, Clone)]
pub struct Job {
    phase: Phase,
    centers: Vec<Center>,
    input_arguments: InputArguments,
    user: String,
    output_path: PathBuf,
}

impl Job {
    /// Create a job and its output directory
    ///
    /// The directory is created if needed and the job marker file is written
    /// immediately, so the directory is recognizable as job output before
    /// anything else happens.
    ///
    /// # Errors
    ///
    /// Returns [`RollError::OutOfStorage`] if the disk is full, or an I/O
    /// error if the directory cannot be created.
    pub fn new(
        phase: Phase,
        centers: Vec<Center>,
        input_arguments: InputArguments,
        user: impl Into<String>,
        output_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let output_path = output_path.into();
        std::fs::create_dir_all(&output_path)
            .check_storage(|| format!("creating {}", output_path.display()))?;

        let marker = output_path.join(MARKER_FILENAME);
        std::fs::write(&marker, MARKER_CONTENT)
            .check_storage(|| format!("writing {}", marker.display()))?;

        Ok(Self {
            phase,
            centers,
            input_arguments,
            user: user.into(),
            output_path,
        })
    }

    /// Phase this job generates
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Centers, in processing order
    pub fn centers(&self) -> &[Center] {
        &self.centers
    }

    /// Job directory
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Operator running the job
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Generate every document for this job
    ///
    /// # Errors
    ///
    /// - [`RollError::MissingPrerequisites`] or [`RollError::NoElection`] if
    ///   validation fails; nothing has been written beyond the marker file.
    /// - [`RollError::OutOfStorage`] if the disk fills up; partial output is
    ///   left in place.
    /// - Any registry, renderer or I/O error, unchanged.
    pub fn run(&self, context: &JobContext<'_>) -> Result<JobManifest> {
        let begin = Utc::now();
        tracing::info!(
            phase = %self.phase,
            n_centers = self.centers.len(),
            path = %self.output_path.display(),
            "Starting job"
        );

        let election_id = self.validate(context.registry)?;
        let copied_by = copies_by_original(context.registry)?;

        let mut files = FileTracker::new();
        let mut voter_stations = Vec::new();
        let mut offices: BTreeMap<OfficeId, Office> = BTreeMap::new();

        let n_centers = self.centers.len();
        for (index, center) in self.centers.iter().enumerate() {
            let office = resolve_office(context.registry, center)?;
            let office_dir = self.output_path.join(office.id.to_string());
            std::fs::create_dir_all(&office_dir)
                .check_storage(|| format!("creating {}", office_dir.display()))?;

            let document_center = DocumentCenter {
                center,
                copied_by: copied_by
                    .get(&center.center_id)
                    .map(Vec::as_slice)
                    .unwrap_or_default(),
            };
            let shard = self.process_center(context, document_center, &office_dir, election_id)?;

            files.merge(shard.files);
            voter_stations.extend(shard.voter_stations);
            offices.entry(office.id).or_insert(office);

            crate::log_center_progress!(center.center_id, index + 1, n_centers);
        }

        let end = Utc::now();

        if self.phase == Phase::Polling {
            write_voter_station_exports(&self.output_path, &mut voter_stations)?;
        }

        let mut center_ids: Vec<CenterId> = self.centers.iter().map(|c| c.center_id).collect();
        center_ids.sort();

        let manifest = JobManifest {
            successful: true,
            time_information: TimeInformation::new(begin, end),
            user: self.user.clone(),
            input_arguments: self.input_arguments.clone(),
            registration_centers_processed: center_ids,
            total_pdf_file_count: files.n_files(),
            total_pdf_page_count: files.n_pages(),
            total_pdf_byte_count: files.n_bytes(),
            files: files.into_files(),
            offices: offices.values().cloned().collect(),
        };
        manifest.write(&self.output_path)?;

        tracing::info!("Zipping output");
        for office_id in offices.keys() {
            archive_office(&self.output_path, *office_id)?;
        }

        tracing::info!(
            n_files = manifest.total_pdf_file_count,
            n_pages = manifest.total_pdf_page_count,
            n_bytes = manifest.total_pdf_byte_count,
            elapsed_secs = manifest.time_information.elapsed,
            "Job complete"
        );
        Ok(manifest)
    }

    /// Check every center before any output is written
    ///
    /// Returns the current election for the polling phase.
    fn validate(&self, registry: &dyn Registry) -> Result<Option<ElectionId>> {
        let mut no_office = Vec::new();
        let mut no_registrants = Vec::new();

        for center in &self.centers {
            if !self.input_arguments.forgive_no_office && !has_valid_office(registry, center)? {
                no_office.push(center.center_id);
            }
            if !self.input_arguments.forgive_no_voters
                && !registry.has_registrants(center.roster_source())?
            {
                no_registrants.push(center.center_id);
            }
        }

        if !no_office.is_empty() || !no_registrants.is_empty() {
            return Err(RollError::MissingPrerequisites {
                no_office,
                no_registrants,
            });
        }

        if self.phase == Phase::Polling {
            return registry
                .current_election()?
                .map(Some)
                .ok_or(RollError::NoElection);
        }
        Ok(None)
    }

    fn process_center(
        &self,
        context: &JobContext<'_>,
        center: DocumentCenter<'_>,
        office_dir: &Path,
        election_id: Option<ElectionId>,
    ) -> Result<CenterShard> {
        let center_id = center.center.center_id;
        let roster = context.registry.roster(center.center.roster_source())?;
        let mut shard = CenterShard::default();

        match (self.phase, election_id) {
            (Phase::InPerson, _) => {
                for gender in REGISTRATION_GENDERS {
                    let document = Document::RegistrationBook {
                        center,
                        gender,
                        roster: &roster,
                    };
                    let file = OutputFile::RegistrationBook { center_id, gender };
                    self.write_document(context, office_dir, file, &document, &mut shard.files)?;
                }
            }
            (Phase::Exhibitions, _) => {
                for gender in REGISTRATION_GENDERS {
                    let document = Document::RegistrationList {
                        center,
                        gender,
                        roster: &roster,
                    };
                    let file = OutputFile::RegistrationList { center_id, gender };
                    self.write_document(context, office_dir, file, &document, &mut shard.files)?;
                }
            }
            (Phase::Polling, Some(election_id)) => {
                self.process_polling_center(
                    context,
                    center,
                    &roster,
                    office_dir,
                    election_id,
                    &mut shard,
                )?;
            }
            (Phase::Polling, None) => return Err(RollError::NoElection),
        }

        tracing::info!(%center_id, n_files = shard.files.n_files(), "Saved documents for center");
        Ok(shard)
    }

    fn process_polling_center(
        &self,
        context: &JobContext<'_>,
        center: DocumentCenter<'_>,
        roster: &[Individual],
        office_dir: &Path,
        election_id: ElectionId,
        shard: &mut CenterShard,
    ) -> Result<()> {
        let center_id = center.center.center_id;
        let stations = context.distributor.distribute(roster);

        let created_at = Utc::now();
        let records: Vec<_> = stations
            .iter()
            .map(|station| station.to_record(election_id, center_id, created_at))
            .collect();
        context
            .station_store
            .replace_stations(election_id, center_id, &records)?;

        for station in &stations {
            shard
                .voter_stations
                .extend(station.roll().iter().map(|voter| VoterStation {
                    national_id: voter.national_id,
                    center_id,
                    station_number: station.number,
                }));
        }

        for gender in genders_present(&stations) {
            let document = Document::PollingCenterList {
                center,
                gender,
                stations: &stations,
            };
            let file = OutputFile::PollingList { center_id, gender };
            self.write_document(context, office_dir, file, &document, &mut shard.files)?;
        }

        for station in &stations {
            let station_number = station.number;

            let book = Document::StationBook { center, station };
            let file = OutputFile::StationBook {
                center_id,
                station_number,
            };
            self.write_document(context, office_dir, file, &book, &mut shard.files)?;

            let sign = Document::StationSign { center, station };
            let file = OutputFile::StationSign {
                center_id,
                station_number,
            };
            self.write_document(context, office_dir, file, &sign, &mut shard.files)?;
        }

        Ok(())
    }

    fn write_document(
        &self,
        context: &JobContext<'_>,
        office_dir: &Path,
        file: OutputFile,
        document: &Document<'_>,
        files: &mut FileTracker,
    ) -> Result<()> {
        let rendered = context.renderer.render(document)?;
        let path = office_dir.join(file.file_name(context.renderer.extension()));

        std::fs::write(&path, &rendered.bytes)
            .check_storage(|| format!("writing {}", path.display()))?;
        files.record_file(&self.output_path, &path, rendered.n_pages)?;

        tracing::debug!(
            kind = document.kind(),
            path = %path.display(),
            n_pages = rendered.n_pages,
            "Wrote document"
        );
        Ok(())
    }
}

fn has_valid_office(registry: &dyn Registry, center: &Center) -> Result<bool> {
    match center.office_id {
        Some(office_id) if office_id != OfficeId::UNASSIGNED => {
            Ok(registry.office(office_id)?.is_some())
        }
        _ => Ok(false),
    }
}

/// The office a center's output is grouped under
///
/// Centers without a valid office (only reachable when that is forgiven) are
/// grouped under [`OfficeId::UNASSIGNED`].
fn resolve_office(registry: &dyn Registry, center: &Center) -> Result<Office> {
    if let Some(office_id) = center.office_id {
        if let Some(office) = registry.office(office_id)? {
            return Ok(office);
        }
    }
    Ok(Office::new(OfficeId::UNASSIGNED, "No office"))
}

fn copies_by_original(registry: &dyn Registry) -> Result<HashMap<CenterId, Vec<CenterId>>> {
    let mut copies: HashMap<CenterId, Vec<CenterId>> = HashMap::new();
    for center in registry.centers()? {
        if let Some(original) = center.copy_of {
            copies.entry(original).or_default().push(center.center_id);
        }
    }
    for ids in copies.values_mut() {
        ids.sort();
    }
    Ok(copies)
}

/// Station genders present, in station order
fn genders_present(stations: &[Station]) -> Vec<StationGender> {
    let mut genders = Vec::new();
    for station in stations {
        if !genders.contains(&station.gender) {
            genders.push(station.gender);
        }
    }
    genders
}
