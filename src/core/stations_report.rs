//! Station summary CSV
//!
//! One row per persisted station of the current election, joined with the
//! center's registry data.

use crate::adapters::registry::{Registry, StationStore};
use crate::domain::{Result, RollError, StorageResultExt};
use std::collections::HashMap;
use std::path::Path;

/// Column headings
pub const STATION_REPORT_HEADER: [&str; 12] = [
    "Centre #",
    "Centre Name",
    "Office #",
    "Constituency #",
    "Station number",
    "Station Gender",
    "Number of Registrants",
    "First Name",
    "First Name Number",
    "Last Name",
    "Last Name Number",
    "When Generated",
];

/// Build the station summary CSV for the current election
///
/// Stations are listed by center, then station number. Centers missing from
/// the registry get blank center columns.
///
/// # Errors
///
/// Returns [`RollError::NoElection`] if there is no current election.
pub fn station_report_csv(registry: &dyn Registry, store: &dyn StationStore) -> Result<Vec<u8>> {
    let election_id = registry.current_election()?.ok_or(RollError::NoElection)?;

    let mut stations = store.all_stations(election_id)?;
    stations.sort_by_key(|s| (s.center_id, s.number));

    let centers: HashMap<_, _> = registry
        .centers()?
        .into_iter()
        .map(|center| (center.center_id, center))
        .collect();

    let to_csv_error = |e: csv::Error| RollError::Serialization(e.to_string());
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(STATION_REPORT_HEADER).map_err(to_csv_error)?;

    for station in &stations {
        let center = centers.get(&station.center_id);
        let optional = |value: Option<String>| value.unwrap_or_default();
        writer
            .write_record([
                station.center_id.to_string(),
                optional(center.map(|c| c.name.clone())),
                optional(center.and_then(|c| c.office_id).map(|id| id.to_string())),
                optional(center.and_then(|c| c.constituency_id).map(|id| id.to_string())),
                station.number.to_string(),
                station.gender.name().to_string(),
                station.n_registrants.to_string(),
                station.first_voter_name.clone(),
                station.first_voter_number.to_string(),
                station.last_voter_name.clone(),
                station.last_voter_number.to_string(),
                station.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            ])
            .map_err(to_csv_error)?;
    }

    tracing::info!(%election_id, n_stations = stations.len(), "Built station report");
    writer
        .into_inner()
        .map_err(|e| RollError::Serialization(e.to_string()))
}

/// Write the station summary CSV to `path`
///
/// # Errors
///
/// As [`station_report_csv`], plus [`RollError::OutOfStorage`] if the disk is
/// full.
pub fn write_station_report(
    registry: &dyn Registry,
    store: &dyn StationStore,
    path: &Path,
) -> Result<()> {
    let bytes = station_report_csv(registry, store)?;
    std::fs::write(path, bytes).check_storage(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::registry::{MemoryStationStore, RegistrySnapshot, SnapshotRegistry};
    use crate::domain::{
        Center, CenterId, ConstituencyId, ElectionId, OfficeId, StationGender, StationRecord,
    };
    use chrono::{TimeZone, Utc};

    fn record(center: u32, number: u32, gender: StationGender) -> StationRecord {
        StationRecord {
            election_id: ElectionId::new(3),
            center_id: CenterId::new(center).unwrap(),
            number,
            gender,
            n_registrants: 2,
            first_voter_name: "Amal Omar Ali Said".to_string(),
            first_voter_number: 1,
            last_voter_name: "Huda Omar Ali Said".to_string(),
            last_voter_number: 2,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 20, 30).unwrap(),
        }
    }

    fn registry(current_election: Option<ElectionId>) -> SnapshotRegistry {
        SnapshotRegistry::new(RegistrySnapshot {
            current_election,
            offices: vec![],
            centers: vec![Center::new(CenterId::new(11001).unwrap(), "School", Some(OfficeId::new(4)))
                .with_constituency(ConstituencyId::new(7))],
            registrations: vec![],
        })
    }

    #[test]
    fn test_rows_sorted_and_joined() {
        let store = MemoryStationStore::new();
        let center = CenterId::new(11001).unwrap();
        store
            .replace_stations(
                ElectionId::new(3),
                center,
                &[record(11001, 2, StationGender::Female), record(11001, 1, StationGender::Male)],
            )
            .unwrap();

        let csv = String::from_utf8(
            station_report_csv(&registry(Some(ElectionId::new(3))), &store).unwrap(),
        )
        .unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Centre #,Centre Name,Office #"));
        assert_eq!(
            lines[1],
            "11001,School,4,7,1,male,2,Amal Omar Ali Said,1,Huda Omar Ali Said,2,2024-03-01 10:20:30"
        );
        assert!(lines[2].contains(",2,female,"));
    }

    #[test]
    fn test_unknown_center_has_blank_columns() {
        let store = MemoryStationStore::new();
        store
            .replace_stations(
                ElectionId::new(3),
                CenterId::new(22002).unwrap(),
                &[record(22002, 1, StationGender::Unisex)],
            )
            .unwrap();
        let csv = String::from_utf8(
            station_report_csv(&registry(Some(ElectionId::new(3))), &store).unwrap(),
        )
        .unwrap();
        assert!(csv.lines().nth(1).unwrap().starts_with("22002,,,,1,unisex,"));
    }

    #[test]
    fn test_requires_election() {
        let store = MemoryStationStore::new();
        assert!(matches!(
            station_report_csv(&registry(None), &store),
            Err(RollError::NoElection)
        ));
    }
}
