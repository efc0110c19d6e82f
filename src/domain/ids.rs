//! Domain identifier types with validation
//!
//! Newtype wrappers for the registry's keys. Cross-references between centers,
//! offices and individuals are expressed with these ids and resolved against
//! the registry, never by embedding one record inside another.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of digits in a center id
pub const CENTER_ID_LENGTH: usize = 5;

const CENTER_ID_MIN: u32 = 10_000;
const CENTER_ID_MAX: u32 = 99_999;

/// Registration center identifier
///
/// Always exactly five digits.
///
/// # Examples
///
/// ```
/// use rollforge::domain::ids::CenterId;
/// use std::str::FromStr;
///
/// let center_id = CenterId::from_str("11001").unwrap();
/// assert_eq!(center_id.get(), 11001);
/// assert!(CenterId::from_str("123").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CenterId(u32);

impl CenterId {
    /// Creates a new CenterId, rejecting values that are not five digits long
    pub fn new(id: u32) -> Result<Self, String> {
        if !(CENTER_ID_MIN..=CENTER_ID_MAX).contains(&id) {
            return Err(format!(
                "Center id must be exactly {CENTER_ID_LENGTH} digits, got {id}"
            ));
        }
        Ok(Self(id))
    }

    /// Returns the numeric value
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for CenterId {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CenterId> for u32 {
    fn from(id: CenterId) -> Self {
        id.0
    }
}

impl fmt::Display for CenterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CenterId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != CENTER_ID_LENGTH {
            return Err(format!(
                "Center id must be exactly {CENTER_ID_LENGTH} digits, got '{s}'"
            ));
        }
        let value: u32 = s
            .parse()
            .map_err(|_| format!("Center id is not a number: '{s}'"))?;
        Self::new(value)
    }
}

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $inner:ty, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name($inner);

        impl $name {
            /// Creates a new id
            pub fn new(id: $inner) -> Self {
                Self(id)
            }

            /// Returns the numeric value
            pub fn get(&self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<$inner>()
                    .map(Self)
                    .map_err(|_| format!("{} is not a number: '{}'", $label, s.trim()))
            }
        }
    };
}

numeric_id!(
    /// National identity number of an individual (12 digits in practice)
    NationalId,
    u64,
    "National id"
);

numeric_id!(
    /// Administrative office identifier; the unit of archive packaging
    OfficeId,
    u32,
    "Office id"
);

impl OfficeId {
    /// Placeholder office for centers the registry has no valid office for
    pub const UNASSIGNED: OfficeId = OfficeId(999);
}

numeric_id!(
    /// Constituency identifier, used only for center selection
    ConstituencyId,
    u32,
    "Constituency id"
);

numeric_id!(
    /// Election identifier; persisted stations are scoped to an election
    ElectionId,
    u32,
    "Election id"
);
