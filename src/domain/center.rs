//! Registration centers and offices

use crate::domain::ids::{CenterId, ConstituencyId, OfficeId};
use serde::{Deserialize, Serialize};

/// An administrative office grouping centers
///
/// Offices are copied verbatim into each job manifest so that a finished job
/// still describes the offices as they were when it ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Office {
    /// Office id
    pub id: OfficeId,

    /// English name
    #[serde(default)]
    pub name_english: String,

    /// Arabic name
    #[serde(default)]
    pub name_arabic: String,

    /// Region the office belongs to
    #[serde(default)]
    pub region: String,
}

impl Office {
    /// Create an office with only an English name
    pub fn new(id: OfficeId, name_english: impl Into<String>) -> Self {
        Self {
            id,
            name_english: name_english.into(),
            name_arabic: String::new(),
            region: String::new(),
        }
    }
}

/// A physical registration/voting location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Center {
    /// Five-digit center id
    pub center_id: CenterId,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Owning office; `None` when the registry has no valid office for it
    #[serde(default)]
    pub office_id: Option<OfficeId>,

    /// Constituency the center belongs to
    #[serde(default)]
    pub constituency_id: Option<ConstituencyId>,

    /// For copy centers, the center whose roster this one reuses
    #[serde(default)]
    pub copy_of: Option<CenterId>,

    /// Whether registration is open at this center
    #[serde(default = "default_true")]
    pub reg_open: bool,
}

impl Center {
    /// Create an open, non-copy center
    pub fn new(center_id: CenterId, name: impl Into<String>, office_id: Option<OfficeId>) -> Self {
        Self {
            center_id,
            name: name.into(),
            office_id,
            constituency_id: None,
            copy_of: None,
            reg_open: true,
        }
    }

    /// Mark this center as a copy of `original`
    pub fn with_copy_of(mut self, original: CenterId) -> Self {
        self.copy_of = Some(original);
        self
    }

    /// Set the constituency
    pub fn with_constituency(mut self, constituency_id: ConstituencyId) -> Self {
        self.constituency_id = Some(constituency_id);
        self
    }

    /// Whether this center inherits another center's roster
    pub fn is_copy(&self) -> bool {
        self.copy_of.is_some()
    }

    /// The center whose roster should be read for this center
    ///
    /// Copy centers have no roster of their own. Output is still grouped and
    /// named under this center's own id.
    pub fn roster_source(&self) -> CenterId {
        self.copy_of.unwrap_or(self.center_id)
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_source_for_regular_center() {
        let center = Center::new(CenterId::new(11001).unwrap(), "School", Some(OfficeId::new(1)));
        assert!(!center.is_copy());
        assert_eq!(center.roster_source(), center.center_id);
    }

    #[test]
    fn test_roster_source_for_copy_center() {
        let original = CenterId::new(11001).unwrap();
        let copy = Center::new(CenterId::new(11002).unwrap(), "Annex", Some(OfficeId::new(1)))
            .with_copy_of(original);
        assert!(copy.is_copy());
        assert_eq!(copy.roster_source(), original);
        assert_eq!(copy.center_id.get(), 11002);
    }

    #[test]
    fn test_center_deserialize_defaults() {
        let center: Center = serde_json::from_str(r#"{"center_id": 11001}"#).unwrap();
        assert!(center.reg_open);
        assert!(center.office_id.is_none());
        assert!(center.copy_of.is_none());
    }
}
