//! Registered individuals

use crate::domain::ids::NationalId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gender of a registered individual
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
}

impl Gender {
    /// One-letter abbreviation used in output filenames
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Gender::Male => "m",
            Gender::Female => "f",
        }
    }

    /// Lowercase display name
    pub fn name(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A registered individual as supplied by the registry
///
/// `registrant_number` is empty until the individual has been distributed into
/// a station; it is then unique within the center and counts from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Individual {
    /// National identity number
    pub national_id: NationalId,

    /// Given name
    pub first_name: String,

    /// Father's name
    #[serde(default)]
    pub father_name: String,

    /// Grandfather's name
    #[serde(default)]
    pub grandfather_name: String,

    /// Family name
    #[serde(default)]
    pub family_name: String,

    /// Gender
    pub gender: Gender,

    /// Per-center sequence number assigned during distribution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registrant_number: Option<u32>,
}

impl Individual {
    /// Create an individual with no registrant number
    pub fn new(
        national_id: NationalId,
        first_name: impl Into<String>,
        father_name: impl Into<String>,
        grandfather_name: impl Into<String>,
        family_name: impl Into<String>,
        gender: Gender,
    ) -> Self {
        Self {
            national_id,
            first_name: first_name.into(),
            father_name: father_name.into(),
            grandfather_name: grandfather_name.into(),
            family_name: family_name.into(),
            gender,
            registrant_number: None,
        }
    }

    /// Name as printed on documents: the four name parts joined by spaces
    pub fn full_name(&self) -> String {
        [
            self.first_name.as_str(),
            self.father_name.as_str(),
            self.grandfather_name.as_str(),
            self.family_name.as_str(),
        ]
        .join(" ")
    }

    /// Key used to order a roster by name
    pub fn sort_key(&self) -> (&str, &str, &str, &str) {
        (
            &self.first_name,
            &self.father_name,
            &self.grandfather_name,
            &self.family_name,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let person = Individual::new(
            NationalId::new(100_000_000_001),
            "Ali",
            "Omar",
            "Salem",
            "Haddad",
            Gender::Male,
        );
        assert_eq!(person.full_name(), "Ali Omar Salem Haddad");
        assert!(person.registrant_number.is_none());
    }

    #[test]
    fn test_gender_abbreviations() {
        assert_eq!(Gender::Male.abbreviation(), "m");
        assert_eq!(Gender::Female.abbreviation(), "f");
        assert_eq!(Gender::Female.to_string(), "female");
    }

    #[test]
    fn test_deserialize_without_optional_fields() {
        let json = r#"{"national_id": 200000000002, "first_name": "Mona", "gender": "female"}"#;
        let person: Individual = serde_json::from_str(json).unwrap();
        assert_eq!(person.gender, Gender::Female);
        assert_eq!(person.father_name, "");
        assert!(person.registrant_number.is_none());
    }
}
