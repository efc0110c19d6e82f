//! External collaborators of a job.
//!
//! - [`registry`] - centers, offices, rosters and station persistence
//! - [`renderer`] - document rendering
//!
//! # Design Pattern
//!
//! Adapters isolate the job from where reference data lives and how documents
//! are typeset. Each seam is a trait so tests can substitute in-memory
//! implementations:
//!
//! ```rust,no_run
//! use rollforge::adapters::registry::{FileStationStore, Registry, SnapshotRegistry};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SnapshotRegistry::from_file("registry.json")?;
//! let store = FileStationStore::new("stations.json");
//! println!("{} centers", registry.centers()?.len());
//! # Ok(())
//! # }
//! ```

pub mod registry;
pub mod renderer;
