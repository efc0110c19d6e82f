//! Core business logic for Rollforge.
//!
//! # Modules
//!
//! - [`distribution`] - Partitioning a center's roster into polling stations
//! - [`job`] - Running a phase over a list of centers and packaging the output
//! - [`selection`] - Picking the centers a job covers
//! - [`naming`] - Job directory names
//! - [`overview`] - Reading a job directory back
//! - [`stations_report`] - Station summary CSV
//! - [`verification`] - Checksums and auditing finished jobs
//!
//! # Job Workflow
//!
//! 1. **Select**: resolve the requested centers against the registry
//! 2. **Create**: make the job directory and its marker file
//! 3. **Validate**: check offices, registrants and (for polling) the election
//! 4. **Generate**: per center, distribute stations if polling and render
//!    every document, tracking each file
//! 5. **Package**: write the polling exports, the manifest and one zip per
//!    office
//!
//! # Example
//!
//! ```rust,no_run
//! use rollforge::adapters::registry::{MemoryStationStore, SnapshotRegistry};
//! use rollforge::adapters::renderer::TextRenderer;
//! use rollforge::core::distribution::StationDistributor;
//! use rollforge::core::job::{Job, JobContext};
//! use rollforge::core::selection::CenterSelection;
//! use rollforge::domain::Phase;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SnapshotRegistry::from_file("registry.json")?;
//! let store = MemoryStationStore::new();
//! let renderer = TextRenderer::default();
//!
//! let selection = CenterSelection::All;
//! let centers = selection.resolve(&registry)?;
//! let job = Job::new(
//!     Phase::Polling,
//!     centers,
//!     selection.input_arguments(Phase::Polling),
//!     "amal",
//!     "output/job-1",
//! )?;
//!
//! let manifest = job.run(&JobContext {
//!     registry: &registry,
//!     station_store: &store,
//!     renderer: &renderer,
//!     distributor: StationDistributor::default(),
//! })?;
//! println!("Generated {} files", manifest.total_pdf_file_count);
//! # Ok(())
//! # }
//! ```

pub mod distribution;
pub mod job;
pub mod naming;
pub mod overview;
pub mod selection;
pub mod stations_report;
pub mod verification;
