//! Registry abstraction traits
//!
//! The registry owns centers, offices, elections and individual records. Jobs
//! only read from it; the one thing a job writes back is the station summary
//! of each center it distributes.

use crate::domain::{
    Center, CenterId, ElectionId, Individual, Office, OfficeId, Result, StationRecord,
};

/// Read access to the registry's reference data and rosters
pub trait Registry: Send + Sync {
    /// All centers, ordered by center id
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be read.
    fn centers(&self) -> Result<Vec<Center>>;

    /// Look up one center
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be read.
    fn center(&self, center_id: CenterId) -> Result<Option<Center>>;

    /// Look up one office
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be read.
    fn office(&self, office_id: OfficeId) -> Result<Option<Office>>;

    /// Individuals registered at `center_id`, ordered by name
    ///
    /// Names compare on first, father, grandfather and family name in that
    /// order. Copy centers are not redirected here; callers ask for the
    /// roster of [`Center::roster_source`].
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be read.
    fn roster(&self, center_id: CenterId) -> Result<Vec<Individual>>;

    /// Whether at least one individual is registered at `center_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be read.
    fn has_registrants(&self, center_id: CenterId) -> Result<bool> {
        Ok(!self.roster(center_id)?.is_empty())
    }

    /// The election currently being prepared, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be read.
    fn current_election(&self) -> Result<Option<ElectionId>>;
}

/// Persistence for station summaries
///
/// Stations are recomputed on every polling run; storing them replaces
/// whatever was stored for that center before.
pub trait StationStore: Send + Sync {
    /// Replace the stored stations of one center
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn replace_stations(
        &self,
        election_id: ElectionId,
        center_id: CenterId,
        stations: &[StationRecord],
    ) -> Result<()>;

    /// Stored stations of one center, ordered by station number
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn stations(&self, election_id: ElectionId, center_id: CenterId)
        -> Result<Vec<StationRecord>>;

    /// All stored stations of an election, ordered by center then number
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn all_stations(&self, election_id: ElectionId) -> Result<Vec<StationRecord>>;
}
