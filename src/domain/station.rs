//! Polling stations
//!
//! A [`Station`] is a gender-scoped slice of one center's roster. Stations are
//! produced by the station distributor; each one owns its roll.
//! [`StationRecord`] is the summary that gets persisted once a polling job has
//! run.

use crate::domain::ids::{CenterId, ElectionId};
use crate::domain::individual::{Gender, Individual};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gender served by a station
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationGender {
    /// Men only
    Male,
    /// Women only
    Female,
    /// Men and women (at most one per center)
    Unisex,
}

impl StationGender {
    /// One-letter abbreviation used in output filenames
    pub fn abbreviation(&self) -> &'static str {
        match self {
            StationGender::Male => "m",
            StationGender::Female => "f",
            StationGender::Unisex => "u",
        }
    }

    /// Lowercase display name
    pub fn name(&self) -> &'static str {
        match self {
            StationGender::Male => "male",
            StationGender::Female => "female",
            StationGender::Unisex => "unisex",
        }
    }
}

impl From<Gender> for StationGender {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Male => StationGender::Male,
            Gender::Female => StationGender::Female,
        }
    }
}

impl fmt::Display for StationGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A polling station and the individuals assigned to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    /// Gender served
    pub gender: StationGender,

    /// Station number, unique within the center and counting from 1
    pub number: u32,

    roll: Vec<Individual>,
}

impl Station {
    /// Create a station that takes ownership of `roll`
    ///
    /// The number is 0 until the distributor assigns final numbers.
    pub fn new(gender: StationGender, roll: Vec<Individual>) -> Self {
        Self {
            gender,
            number: 0,
            roll,
        }
    }

    /// Individuals assigned to this station, in roll order
    pub fn roll(&self) -> &[Individual] {
        &self.roll
    }

    /// Consume the station and return its roll
    pub fn into_roll(self) -> Vec<Individual> {
        self.roll
    }

    /// Number of individuals assigned
    pub fn n_registrants(&self) -> usize {
        self.roll.len()
    }

    /// First individual on the roll
    pub fn first_voter(&self) -> Option<&Individual> {
        self.roll.first()
    }

    /// Last individual on the roll
    pub fn last_voter(&self) -> Option<&Individual> {
        self.roll.last()
    }

    /// Build the persisted summary of this station
    pub fn to_record(
        &self,
        election_id: ElectionId,
        center_id: CenterId,
        created_at: DateTime<Utc>,
    ) -> StationRecord {
        let name_and_number = |voter: Option<&Individual>| {
            voter
                .map(|v| (v.full_name(), v.registrant_number.unwrap_or_default()))
                .unwrap_or_default()
        };
        let (first_voter_name, first_voter_number) = name_and_number(self.first_voter());
        let (last_voter_name, last_voter_number) = name_and_number(self.last_voter());

        StationRecord {
            election_id,
            center_id,
            number: self.number,
            gender: self.gender,
            n_registrants: self.n_registrants(),
            first_voter_name,
            first_voter_number,
            last_voter_name,
            last_voter_number,
            created_at,
        }
    }
}

/// Persisted summary of a station
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationRecord {
    /// Election the station was generated for
    pub election_id: ElectionId,

    /// Center the station belongs to
    pub center_id: CenterId,

    /// Station number within the center
    pub number: u32,

    /// Gender served
    pub gender: StationGender,

    /// Number of individuals assigned
    pub n_registrants: usize,

    /// Printed name of the first individual
    pub first_voter_name: String,

    /// Registrant number of the first individual
    pub first_voter_number: u32,

    /// Printed name of the last individual
    pub last_voter_name: String,

    /// Registrant number of the last individual
    pub last_voter_number: u32,

    /// When the station was generated
    pub created_at: DateTime<Utc>,
}
