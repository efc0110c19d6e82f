//! Registry access
//!
//! This module defines the read interface to the registry and the station
//! store, plus the file-backed implementations used by the CLI.

pub mod snapshot;
pub mod station_store;
pub mod traits;

pub use snapshot::{Registration, RegistrySnapshot, SnapshotRegistry};
pub use station_store::{FileStationStore, MemoryStationStore};
pub use traits::{Registry, StationStore};
