//! Domain models and types for Rollforge.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`CenterId`], [`OfficeId`], [`NationalId`], ...)
//! - **Registry models** ([`Center`], [`Office`], [`Individual`])
//! - **Station models** ([`Station`], [`StationRecord`])
//! - **Error types** ([`RollError`]) and the [`Result`] alias
//! - **Write error classification** ([`StorageResultExt`])
//!
//! # Type Safety
//!
//! Identifiers are newtypes, so a center id cannot be passed where an office id
//! is expected:
//!
//! ```rust
//! use rollforge::domain::{CenterId, OfficeId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let center_id = CenterId::new(11001)?;
//! let office_id = OfficeId::new(4);
//!
//! // let wrong: OfficeId = center_id;  // Compile error!
//! # Ok(())
//! # }
//! ```

pub mod center;
pub mod errors;
pub mod ids;
pub mod individual;
pub mod phase;
pub mod result;
pub mod station;
pub mod storage;

// Re-export commonly used types for convenience
pub use center::{Center, Office};
pub use errors::RollError;
pub use ids::{CenterId, ConstituencyId, ElectionId, NationalId, OfficeId};
pub use individual::{Gender, Individual};
pub use phase::Phase;
pub use result::Result;
pub use station::{Station, StationGender, StationRecord};
pub use storage::StorageResultExt;
