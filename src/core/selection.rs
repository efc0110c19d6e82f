//! Choosing the centers a job runs over
//!
//! Centers can be picked by center, office or constituency id, or not at all
//! (every center). Only centers open for registration are ever selected.
//! Ids come from comma-separated lists or from files with one id per line.

use crate::adapters::registry::Registry;
use crate::core::job::InputArguments;
use crate::domain::{Center, CenterId, ConstituencyId, OfficeId, Phase, Result, RollError};
use std::collections::HashSet;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

/// Which centers a job covers
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CenterSelection {
    /// Every open center
    #[default]
    All,
    /// Specific centers
    Centers(Vec<CenterId>),
    /// Every open center of these offices
    Offices(Vec<OfficeId>),
    /// Every open center of these constituencies
    Constituencies(Vec<ConstituencyId>),
}

impl CenterSelection {
    /// Resolve the selection against the registry, ordered by center id
    ///
    /// # Errors
    ///
    /// Returns [`RollError::Selection`] if any id is unknown to the registry or
    /// if no open center matches.
    pub fn resolve(&self, registry: &dyn Registry) -> Result<Vec<Center>> {
        let all = registry.centers()?;

        let mut centers: Vec<Center> = match self {
            CenterSelection::All => all,
            CenterSelection::Centers(ids) => {
                let known: HashSet<CenterId> = all.iter().map(|c| c.center_id).collect();
                reject_unknown("centers", ids, |id| known.contains(id))?;
                all.into_iter()
                    .filter(|c| ids.contains(&c.center_id))
                    .collect()
            }
            CenterSelection::Offices(ids) => {
                let mut unknown = Vec::new();
                for id in ids {
                    if registry.office(*id)?.is_none() {
                        unknown.push(*id);
                    }
                }
                reject_unknown("offices", &unknown, |_| false)?;
                all.into_iter()
                    .filter(|c| c.office_id.is_some_and(|id| ids.contains(&id)))
                    .collect()
            }
            CenterSelection::Constituencies(ids) => {
                let known: HashSet<ConstituencyId> =
                    all.iter().filter_map(|c| c.constituency_id).collect();
                reject_unknown("constituencies", ids, |id| known.contains(id))?;
                all.into_iter()
                    .filter(|c| c.constituency_id.is_some_and(|id| ids.contains(&id)))
                    .collect()
            }
        };

        centers.retain(|c| c.reg_open);
        centers.sort_by_key(|c| c.center_id);

        if centers.is_empty() {
            return Err(RollError::Selection(
                "There are no open centers matching the selection.".to_string(),
            ));
        }
        tracing::debug!(n_centers = centers.len(), "Resolved center selection");
        Ok(centers)
    }

    /// Input-argument record for a job over this selection
    pub fn input_arguments(&self, phase: Phase) -> InputArguments {
        let mut arguments = InputArguments::new(phase);
        match self {
            CenterSelection::All => {}
            CenterSelection::Centers(ids) => arguments.center_ids = ids.clone(),
            CenterSelection::Offices(ids) => arguments.office_ids = ids.clone(),
            CenterSelection::Constituencies(ids) => arguments.constituency_ids = ids.clone(),
        }
        arguments
    }
}

fn reject_unknown<T: Display>(
    kind: &str,
    ids: &[T],
    is_known: impl Fn(&T) -> bool,
) -> Result<()> {
    let unknown: Vec<String> = ids
        .iter()
        .filter(|id| !is_known(id))
        .map(ToString::to_string)
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }
    Err(RollError::Selection(format!(
        "The following {kind} are not in the registry: [{}].",
        unknown.join(", ")
    )))
}

/// Split a comma-separated id list
pub fn split_id_list(list: &str) -> Vec<String> {
    list.split(',').map(|id| id.trim().to_string()).collect()
}

/// Read ids from a file, one per line
///
/// Blank lines are ignored; every other line must be an integer.
///
/// # Errors
///
/// Returns [`RollError::Selection`] if the file cannot be read or holds a
/// line that is not an integer.
pub fn read_ids(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path).map_err(|_| {
        RollError::Selection(format!("I can't read the file \"{}\".", path.display()))
    })?;

    let ids: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if ids.iter().any(|id| id.parse::<i64>().is_err()) {
        return Err(RollError::Selection(format!(
            "At least one of the ids in \"{}\" is not valid.",
            path.display()
        )));
    }
    Ok(ids)
}

/// Parse ids, naming every value that does not parse
///
/// Center ids must also be exactly five digits; [`CenterId`]'s parser checks
/// that.
///
/// # Errors
///
/// Returns [`RollError::Selection`] listing the invalid values.
pub fn parse_ids<T: FromStr>(values: &[String]) -> Result<Vec<T>> {
    let mut ids = Vec::with_capacity(values.len());
    let mut invalid = Vec::new();
    for value in values {
        match value.trim().parse::<T>() {
            Ok(id) => ids.push(id),
            Err(_) => invalid.push(value.trim()),
        }
    }
    if !invalid.is_empty() {
        return Err(RollError::Selection(format!(
            "These ids are invalid: {}",
            invalid.join(", ")
        )));
    }
    Ok(ids)
}
