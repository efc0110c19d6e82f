//! File-backed registry snapshot
//!
//! A [`RegistrySnapshot`] is a JSON export of the registry tables a job needs:
//!
//! ```json
//! {
//!   "current_election": 3,
//!   "offices": [{ "id": 4, "name_english": "Tripoli" }],
//!   "centers": [{ "center_id": 11001, "name": "School", "office_id": 4 }],
//!   "registrations": [
//!     { "center_id": 11001, "national_id": 119012345678,
//!       "first_name": "Amal", "father_name": "Omar", "gender": "female" }
//!   ]
//! }
//! ```
//!
//! [`SnapshotRegistry`] indexes it once and serves the [`Registry`] trait.

use super::traits::Registry;
use crate::domain::{
    Center, CenterId, ElectionId, Individual, Office, OfficeId, Result, RollError,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// One individual's registration at a center
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Center the individual is registered at
    pub center_id: CenterId,

    /// The individual
    #[serde(flatten)]
    pub individual: Individual,
}

/// Serialized registry tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Election currently being prepared
    #[serde(default)]
    pub current_election: Option<ElectionId>,

    /// Offices
    #[serde(default)]
    pub offices: Vec<Office>,

    /// Centers
    #[serde(default)]
    pub centers: Vec<Center>,

    /// Registrations
    #[serde(default)]
    pub registrations: Vec<Registration>,
}

impl RegistrySnapshot {
    /// Load a snapshot from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid snapshot.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            RollError::Registry(format!(
                "Failed to read registry snapshot {}: {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&contents).map_err(|e| {
            RollError::Registry(format!(
                "Invalid registry snapshot {}: {}",
                path.display(),
                e
            ))
        })
    }
}

/// In-memory [`Registry`] built from a [`RegistrySnapshot`]
#[derive(Debug, Clone, Default)]
pub struct SnapshotRegistry {
    current_election: Option<ElectionId>,
    centers: BTreeMap<CenterId, Center>,
    offices: BTreeMap<OfficeId, Office>,
    rosters: HashMap<CenterId, Vec<Individual>>,
}

impl SnapshotRegistry {
    /// Index a snapshot
    ///
    /// Rosters are sorted by name once, here. Ties keep snapshot order.
    pub fn new(snapshot: RegistrySnapshot) -> Self {
        let centers = snapshot
            .centers
            .into_iter()
            .map(|center| (center.center_id, center))
            .collect();
        let offices = snapshot
            .offices
            .into_iter()
            .map(|office| (office.id, office))
            .collect();

        let mut rosters: HashMap<CenterId, Vec<Individual>> = HashMap::new();
        for registration in snapshot.registrations {
            rosters
                .entry(registration.center_id)
                .or_default()
                .push(registration.individual);
        }
        for roster in rosters.values_mut() {
            roster.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        }

        Self {
            current_election: snapshot.current_election,
            centers,
            offices,
            rosters,
        }
    }

    /// Load and index a snapshot file
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be loaded.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let snapshot = RegistrySnapshot::from_file(path)?;
        let registry = Self::new(snapshot);
        tracing::debug!(
            n_centers = registry.centers.len(),
            n_offices = registry.offices.len(),
            "Loaded registry snapshot"
        );
        Ok(registry)
    }
}

impl Registry for SnapshotRegistry {
    fn centers(&self) -> Result<Vec<Center>> {
        Ok(self.centers.values().cloned().collect())
    }

    fn center(&self, center_id: CenterId) -> Result<Option<Center>> {
        Ok(self.centers.get(&center_id).cloned())
    }

    fn office(&self, office_id: OfficeId) -> Result<Option<Office>> {
        Ok(self.offices.get(&office_id).cloned())
    }

    fn roster(&self, center_id: CenterId) -> Result<Vec<Individual>> {
        Ok(self.rosters.get(&center_id).cloned().unwrap_or_default())
    }

    fn has_registrants(&self, center_id: CenterId) -> Result<bool> {
        Ok(self
            .rosters
            .get(&center_id)
            .is_some_and(|roster| !roster.is_empty()))
    }

    fn current_election(&self) -> Result<Option<ElectionId>> {
        Ok(self.current_election)
    }
}
