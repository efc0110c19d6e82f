//! Plain-text document renderer
//!
//! Produces deterministic UTF-8 documents: a cover page followed by the roll,
//! paginated at a fixed number of lines per page. Pages are separated by a form
//! feed so the output prints as-is on line printers.

use super::document::{Document, DocumentCenter, RenderedDocument};
use super::DocumentRenderer;
use crate::config::RendererConfig;
use crate::domain::{Gender, Individual, Result, Station, StationGender};

const PAGE_BREAK: &str = "\u{c}\n";

/// Deterministic text renderer
#[derive(Debug, Clone)]
pub struct TextRenderer {
    lines_per_page_registration: usize,
    lines_per_page_polling: usize,
    center_name_truncate_after: usize,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::from_config(&RendererConfig::default())
    }
}

impl TextRenderer {
    /// Create a renderer from the `[renderer]` configuration section
    pub fn from_config(config: &RendererConfig) -> Self {
        Self {
            lines_per_page_registration: config.lines_per_page_registration.max(1),
            lines_per_page_polling: config.lines_per_page_polling.max(1),
            center_name_truncate_after: config.center_name_truncate_after,
        }
    }

    /// Shorten a center name for the cover page, marking the cut with `...`
    pub fn truncate_center_name(&self, name: &str) -> String {
        if name.chars().count() > self.center_name_truncate_after {
            let truncated: String = name.chars().take(self.center_name_truncate_after).collect();
            format!("{truncated}...")
        } else {
            name.to_string()
        }
    }

    fn cover(&self, center: DocumentCenter<'_>, title: &str) -> String {
        let mut page = format!(
            "{}\nCenter {}\n{}\n",
            title,
            center.center.center_id,
            self.truncate_center_name(&center.center.name)
        );
        let copy_info = center.copy_info();
        if !copy_info.is_empty() {
            page.push_str(&copy_info);
            page.push('\n');
        }
        page
    }

    fn paginate(cover: String, lines: &[String], lines_per_page: usize) -> RenderedDocument {
        let mut pages = vec![cover];
        for chunk in lines.chunks(lines_per_page) {
            let mut page = chunk.join("\n");
            page.push('\n');
            pages.push(page);
        }

        RenderedDocument {
            n_pages: pages.len() as u32,
            bytes: pages.join(PAGE_BREAK).into_bytes(),
        }
    }

    fn roll_lines<'a>(roll: impl Iterator<Item = &'a Individual>) -> Vec<String> {
        roll.enumerate()
            .map(|(index, individual)| {
                let number = individual
                    .registrant_number
                    .unwrap_or(index as u32 + 1);
                format!("{:>5}  {}  {}", number, individual.national_id, individual.full_name())
            })
            .collect()
    }

    fn registration(
        &self,
        center: DocumentCenter<'_>,
        title: &str,
        gender: Gender,
        roster: &[Individual],
    ) -> RenderedDocument {
        let cover = self.cover(center, &format!("{} ({})", title, gender.name()));
        let lines = Self::roll_lines(roster.iter().filter(|i| i.gender == gender));
        Self::paginate(cover, &lines, self.lines_per_page_registration)
    }

    fn center_list(
        &self,
        center: DocumentCenter<'_>,
        gender: StationGender,
        stations: &[Station],
    ) -> RenderedDocument {
        let cover = self.cover(center, &format!("Polling center list ({})", gender.name()));
        let mut lines = Vec::new();
        for station in stations.iter().filter(|s| s.gender == gender) {
            lines.push(format!(
                "Station {} ({}, {} registrants)",
                station.number,
                station.gender.name(),
                station.n_registrants()
            ));
            lines.extend(Self::roll_lines(station.roll().iter()));
        }
        Self::paginate(cover, &lines, self.lines_per_page_polling)
    }

    fn station_book(&self, center: DocumentCenter<'_>, station: &Station) -> RenderedDocument {
        let cover = self.cover(
            center,
            &format!("Station book {} ({})", station.number, station.gender.name()),
        );
        let lines = Self::roll_lines(station.roll().iter());
        Self::paginate(cover, &lines, self.lines_per_page_polling)
    }

    fn station_sign(&self, center: DocumentCenter<'_>, station: &Station) -> RenderedDocument {
        let range = |voter: Option<&Individual>| {
            voter
                .and_then(|v| v.registrant_number)
                .map(|n| n.to_string())
                .unwrap_or_default()
        };
        let text = format!(
            "Center {}\n{}\nStation {}\n{}\n{} - {}\n",
            center.center.center_id,
            self.truncate_center_name(&center.center.name),
            station.number,
            station.gender.name(),
            range(station.first_voter()),
            range(station.last_voter()),
        );
        RenderedDocument {
            bytes: text.into_bytes(),
            n_pages: 1,
        }
    }
}

impl DocumentRenderer for TextRenderer {
    fn render(&self, document: &Document<'_>) -> Result<RenderedDocument> {
        let rendered = match *document {
            Document::RegistrationBook {
                center,
                gender,
                roster,
            } => self.registration(center, "Registration book", gender, roster),
            Document::RegistrationList {
                center,
                gender,
                roster,
            } => self.registration(center, "Exhibition list", gender, roster),
            Document::PollingCenterList {
                center,
                gender,
                stations,
            } => self.center_list(center, gender, stations),
            Document::StationBook { center, station } => self.station_book(center, station),
            Document::StationSign { center, station } => self.station_sign(center, station),
        };
        Ok(rendered)
    }

    fn extension(&self) -> &str {
        "txt"
    }
}
