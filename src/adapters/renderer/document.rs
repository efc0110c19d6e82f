//! Documents handed to a renderer

use crate::domain::{Center, CenterId, Gender, Individual, Station, StationGender};

/// The center a document is printed for
///
/// Carries the copy relationship in both directions so cover pages can say
/// which center a copy reuses, or which copies reuse this one.
#[derive(Debug, Clone, Copy)]
pub struct DocumentCenter<'a> {
    /// The center itself; output is always named after this id
    pub center: &'a Center,

    /// Centers that are copies of this one
    pub copied_by: &'a [CenterId],
}

impl DocumentCenter<'_> {
    /// Cover page line describing the copy relationship; empty for most centers
    pub fn copy_info(&self) -> String {
        if let Some(original) = self.center.copy_of {
            return format!("Copy of: {original}");
        }
        match self.copied_by {
            [] => String::new(),
            [single] => format!("Copied by center: {single}"),
            many => {
                let ids: Vec<String> = many.iter().map(|id| id.to_string()).collect();
                format!("Copied by centers: {}", ids.join(", "))
            }
        }
    }
}

/// One document to render
#[derive(Debug, Clone, Copy)]
pub enum Document<'a> {
    /// In-person registration book for one gender
    RegistrationBook {
        /// Center
        center: DocumentCenter<'a>,
        /// Gender printed
        gender: Gender,
        /// The center's full roster; the renderer keeps only `gender`
        roster: &'a [Individual],
    },

    /// Exhibition list for one gender
    RegistrationList {
        /// Center
        center: DocumentCenter<'a>,
        /// Gender printed
        gender: Gender,
        /// The center's full roster; the renderer keeps only `gender`
        roster: &'a [Individual],
    },

    /// Polling center list: the stations of one gender and who votes where
    PollingCenterList {
        /// Center
        center: DocumentCenter<'a>,
        /// Station gender printed
        gender: StationGender,
        /// All stations of the center; the renderer keeps only `gender`
        stations: &'a [Station],
    },

    /// Polling station book listing the station's roll
    StationBook {
        /// Center
        center: DocumentCenter<'a>,
        /// Station
        station: &'a Station,
    },

    /// Sign posted at the station entrance
    StationSign {
        /// Center
        center: DocumentCenter<'a>,
        /// Station
        station: &'a Station,
    },
}

impl<'a> Document<'a> {
    /// Center the document belongs to
    pub fn center(&self) -> DocumentCenter<'a> {
        match self {
            Document::RegistrationBook { center, .. }
            | Document::RegistrationList { center, .. }
            | Document::PollingCenterList { center, .. }
            | Document::StationBook { center, .. }
            | Document::StationSign { center, .. } => *center,
        }
    }

    /// Short document kind, used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Document::RegistrationBook { .. } => "registration_book",
            Document::RegistrationList { .. } => "registration_list",
            Document::PollingCenterList { .. } => "polling_center_list",
            Document::StationBook { .. } => "station_book",
            Document::StationSign { .. } => "station_sign",
        }
    }
}

/// Rendered document bytes and page count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// File contents
    pub bytes: Vec<u8>,

    /// Number of pages
    pub n_pages: u32,
}
