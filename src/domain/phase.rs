//! Roll generation phases

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which stage of the process a job serves
///
/// The phase decides which documents are produced and whether stations are
/// computed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Registration books, one per center and gender
    #[serde(rename = "in-person")]
    InPerson,
    /// Exhibition lists, one per center and gender
    #[serde(rename = "exhibitions")]
    Exhibitions,
    /// Station distribution plus center lists, station books and signs
    #[serde(rename = "polling")]
    Polling,
}

impl Phase {
    /// All phases, in process order
    pub const ALL: [Phase; 3] = [Phase::InPerson, Phase::Exhibitions, Phase::Polling];

    /// Identifier used on the command line and in manifests
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::InPerson => "in-person",
            Phase::Exhibitions => "exhibitions",
            Phase::Polling => "polling",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Phase::InPerson => "In Person",
            Phase::Exhibitions => "Exhibitions",
            Phase::Polling => "Polling",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Phase::ALL
            .into_iter()
            .find(|phase| phase.as_str() == lowered)
            .ok_or_else(|| {
                let valid: Vec<&str> = Phase::ALL.iter().map(|p| p.as_str()).collect();
                format!("Phase must be one of {}, got '{}'", valid.join(", "), s)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_round_trip_strings() {
        for phase in Phase::ALL {
            assert_eq!(Phase::from_str(phase.as_str()).unwrap(), phase);
        }
    }

    #[test]
    fn test_phase_case_insensitive() {
        assert_eq!(Phase::from_str("POLLING").unwrap(), Phase::Polling);
        assert_eq!(Phase::from_str("In-Person").unwrap(), Phase::InPerson);
    }

    #[test]
    fn test_phase_invalid() {
        let err = Phase::from_str("counting").unwrap_err();
        assert!(err.contains("in-person, exhibitions, polling"));
    }

    #[test]
    fn test_phase_serde() {
        assert_eq!(serde_json::to_string(&Phase::InPerson).unwrap(), "\"in-person\"");
        let phase: Phase = serde_json::from_str("\"exhibitions\"").unwrap();
        assert_eq!(phase, Phase::Exhibitions);
    }
}
