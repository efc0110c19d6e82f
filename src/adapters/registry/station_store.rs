//! Station summary persistence

use super::traits::StationStore;
use crate::domain::{
    CenterId, ElectionId, Result, RollError, StationRecord, StorageResultExt,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

type StationKey = (ElectionId, CenterId);

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| RollError::Registry("Station store lock poisoned".to_string()))
}

fn sorted(mut stations: Vec<StationRecord>) -> Vec<StationRecord> {
    stations.sort_by_key(|s| s.number);
    stations
}

/// Station store held in memory, for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStationStore {
    stations: Mutex<BTreeMap<StationKey, Vec<StationRecord>>>,
}

impl MemoryStationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl StationStore for MemoryStationStore {
    fn replace_stations(
        &self,
        election_id: ElectionId,
        center_id: CenterId,
        stations: &[StationRecord],
    ) -> Result<()> {
        let mut map = lock(&self.stations)?;
        map.insert((election_id, center_id), sorted(stations.to_vec()));
        Ok(())
    }

    fn stations(
        &self,
        election_id: ElectionId,
        center_id: CenterId,
    ) -> Result<Vec<StationRecord>> {
        let map = lock(&self.stations)?;
        Ok(map
            .get(&(election_id, center_id))
            .cloned()
            .unwrap_or_default())
    }

    fn all_stations(&self, election_id: ElectionId) -> Result<Vec<StationRecord>> {
        let map = lock(&self.stations)?;
        Ok(map
            .iter()
            .filter(|((election, _), _)| *election == election_id)
            .flat_map(|(_, stations)| stations.iter().cloned())
            .collect())
    }
}

/// Station store kept in a JSON file
///
/// The whole file is rewritten on every replace, through a temporary file
/// that is renamed over the original.
#[derive(Debug)]
pub struct FileStationStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileStationStore {
    /// Use the store at `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<StationRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            RollError::Registry(format!(
                "Failed to read station store {}: {}",
                self.path.display(),
                e
            ))
        })?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&contents).map_err(|e| {
            RollError::Registry(format!(
                "Invalid station store {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn save(&self, stations: &[StationRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .check_storage(|| format!("creating {}", parent.display()))?;
        }

        let json = serde_json::to_vec_pretty(stations)?;
        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        std::fs::write(&tmp_path, json)
            .check_storage(|| format!("writing {}", tmp_path.display()))?;
        std::fs::rename(&tmp_path, &self.path)
            .check_storage(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}

impl StationStore for FileStationStore {
    fn replace_stations(
        &self,
        election_id: ElectionId,
        center_id: CenterId,
        stations: &[StationRecord],
    ) -> Result<()> {
        let _guard = lock(&self.guard)?;

        let mut all = self.load()?;
        all.retain(|s| !(s.election_id == election_id && s.center_id == center_id));
        all.extend(stations.iter().cloned());
        all.sort_by_key(|s| (s.election_id, s.center_id, s.number));

        self.save(&all)?;
        tracing::debug!(
            %center_id,
            %election_id,
            n_stations = stations.len(),
            "Replaced stored stations"
        );
        Ok(())
    }

    fn stations(
        &self,
        election_id: ElectionId,
        center_id: CenterId,
    ) -> Result<Vec<StationRecord>> {
        let _guard = lock(&self.guard)?;
        let stations = self
            .load()?
            .into_iter()
            .filter(|s| s.election_id == election_id && s.center_id == center_id)
            .collect();
        Ok(sorted(stations))
    }

    fn all_stations(&self, election_id: ElectionId) -> Result<Vec<StationRecord>> {
        let _guard = lock(&self.guard)?;
        Ok(self
            .load()?
            .into_iter()
            .filter(|s| s.election_id == election_id)
            .collect())
    }
}
