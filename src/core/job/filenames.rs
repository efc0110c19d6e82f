//! Output file names
//!
//! Every document name starts with the center id followed by `_`; the job
//! overview relies on that to map files back to centers.

use crate::domain::{CenterId, Gender, StationGender};

/// A document file produced by a job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFile {
    /// In-person registration book: `{center}_book_{g}`
    RegistrationBook {
        /// Center
        center_id: CenterId,
        /// Gender
        gender: Gender,
    },
    /// Exhibition list: `{center}_{g}`
    RegistrationList {
        /// Center
        center_id: CenterId,
        /// Gender
        gender: Gender,
    },
    /// Polling center list: `{center}_{g}_list`
    PollingList {
        /// Center
        center_id: CenterId,
        /// Station gender
        gender: StationGender,
    },
    /// Polling station book: `{center}_{n}_book`
    StationBook {
        /// Center
        center_id: CenterId,
        /// Station number
        station_number: u32,
    },
    /// Polling station sign: `{center}_{n}_sign`
    StationSign {
        /// Center
        center_id: CenterId,
        /// Station number
        station_number: u32,
    },
}

impl OutputFile {
    /// File name with the renderer's `extension`
    pub fn file_name(&self, extension: &str) -> String {
        let stem = match self {
            OutputFile::RegistrationBook { center_id, gender } => {
                format!("{center_id}_book_{}", gender.abbreviation())
            }
            OutputFile::RegistrationList { center_id, gender } => {
                format!("{center_id}_{}", gender.abbreviation())
            }
            OutputFile::PollingList { center_id, gender } => {
                format!("{center_id}_{}_list", gender.abbreviation())
            }
            OutputFile::StationBook {
                center_id,
                station_number,
            } => format!("{center_id}_{station_number}_book"),
            OutputFile::StationSign {
                center_id,
                station_number,
            } => format!("{center_id}_{station_number}_sign"),
        };
        format!("{stem}.{extension}")
    }
}

/// Center id encoded in a document file name, if any
pub fn center_id_from_filename(file_name: &str) -> Option<CenterId> {
    let (prefix, _) = file_name.split_once('_')?;
    prefix.parse().ok()
}
