//! Integration tests for station distribution
//!
//! Rosters are built with random names; none of the properties checked here
//! depend on them.

use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rollforge::core::distribution::StationDistributor;
use rollforge::domain::{Gender, Individual, NationalId, Station, StationGender};
use std::collections::BTreeSet;
use test_case::test_case;

fn person(national_id: u64, gender: Gender) -> Individual {
    Individual::new(
        NationalId::new(national_id),
        FirstName().fake::<String>(),
        FirstName().fake::<String>(),
        FirstName().fake::<String>(),
        LastName().fake::<String>(),
        gender,
    )
}

/// Men first, then women, as a registry roster would hand them over
fn roster(n_males: usize, n_females: usize) -> Vec<Individual> {
    let males = (0..n_males).map(|i| person(100_000_000_000 + i as u64, Gender::Male));
    let females = (0..n_females).map(|i| person(200_000_000_000 + i as u64, Gender::Female));
    males.chain(females).collect()
}

fn sizes(stations: &[Station]) -> Vec<usize> {
    stations.iter().map(Station::n_registrants).collect()
}

fn genders(stations: &[Station]) -> Vec<StationGender> {
    stations.iter().map(|s| s.gender).collect()
}

#[test_case(0, 0 ; "empty")]
#[test_case(1, 0 ; "one man")]
#[test_case(0, 10 ; "women only")]
#[test_case(10, 10 ; "small unisex")]
#[test_case(24, 600 ; "few men many women")]
#[test_case(600, 3 ; "many men few women")]
#[test_case(25, 25 ; "at trigger")]
#[test_case(551, 1099 ; "just over capacity")]
#[test_case(1234, 987 ; "large center")]
fn test_distribution_invariants(n_males: usize, n_females: usize) {
    let roster = roster(n_males, n_females);
    let stations = StationDistributor::default().distribute(&roster);

    // Every individual exactly once
    let mut expected: Vec<NationalId> = roster.iter().map(|i| i.national_id).collect();
    let mut actual: Vec<NationalId> = stations
        .iter()
        .flat_map(|s| s.roll().iter().map(|i| i.national_id))
        .collect();
    expected.sort();
    actual.sort();
    assert_eq!(actual, expected);

    // Registrant numbers are exactly 1..=N
    let numbers: BTreeSet<u32> = stations
        .iter()
        .flat_map(|s| s.roll().iter().filter_map(|i| i.registrant_number))
        .collect();
    assert_eq!(numbers.len(), roster.len());
    assert_eq!(numbers, (1..=roster.len() as u32).collect::<BTreeSet<_>>());

    // Station numbers are exactly 1..=M, in order
    let station_numbers: Vec<u32> = stations.iter().map(|s| s.number).collect();
    assert_eq!(station_numbers, (1..=stations.len() as u32).collect::<Vec<_>>());

    // At most one unisex station, and only ever last
    let n_unisex = stations
        .iter()
        .filter(|s| s.gender == StationGender::Unisex)
        .count();
    assert!(n_unisex <= 1);
    if n_unisex == 1 {
        assert_eq!(stations.last().map(|s| s.gender), Some(StationGender::Unisex));
    }

    // Male stations come before female stations
    let first_female = stations.iter().position(|s| s.gender == StationGender::Female);
    let last_male = stations.iter().rposition(|s| s.gender == StationGender::Male);
    if let (Some(first_female), Some(last_male)) = (first_female, last_male) {
        assert!(last_male < first_female);
    }
}

#[test]
fn test_both_groups_above_trigger() {
    let stations = StationDistributor::default().distribute(&roster(600, 600));
    assert_eq!(sizes(&stations), vec![300, 300, 300, 300]);
    assert_eq!(
        genders(&stations),
        vec![
            StationGender::Male,
            StationGender::Male,
            StationGender::Female,
            StationGender::Female,
        ]
    );
}

#[test]
fn test_small_center_single_unisex_station() {
    let stations = StationDistributor::default().distribute(&roster(10, 10));
    assert_eq!(stations.len(), 1);
    assert_eq!(stations[0].gender, StationGender::Unisex);
    assert_eq!(stations[0].n_registrants(), 20);

    let roll_genders: Vec<Gender> = stations[0].roll().iter().map(|i| i.gender).collect();
    assert!(roll_genders[..10].iter().all(|g| *g == Gender::Male));
    assert!(roll_genders[10..].iter().all(|g| *g == Gender::Female));
}

#[test]
fn test_single_gender_never_unisex() {
    let stations = StationDistributor::default().distribute(&roster(0, 10));
    assert_eq!(sizes(&stations), vec![10]);
    assert_eq!(genders(&stations), vec![StationGender::Female]);
}

#[test]
fn test_unisex_merges_last_station_of_larger_group() {
    // 1100 women split into [550, 550]; the last one absorbs the 5 men.
    let stations = StationDistributor::default().distribute(&roster(5, 1100));
    assert_eq!(sizes(&stations), vec![550, 555]);
    assert_eq!(
        genders(&stations),
        vec![StationGender::Female, StationGender::Unisex]
    );

    // The larger group is listed first in the unisex roll
    let unisex = &stations[1];
    assert!(unisex.roll()[..550].iter().all(|i| i.gender == Gender::Female));
    assert!(unisex.roll()[550..].iter().all(|i| i.gender == Gender::Male));
}

#[test]
fn test_unisex_lists_men_first_when_larger() {
    let stations = StationDistributor::default().distribute(&roster(40, 12));
    assert_eq!(sizes(&stations), vec![52]);
    let roll = stations[0].roll();
    assert!(roll[..40].iter().all(|i| i.gender == Gender::Male));
    assert!(roll[40..].iter().all(|i| i.gender == Gender::Female));
}

#[test]
fn test_registrant_numbers_follow_roster_within_gender() {
    let stations = StationDistributor::new(10, 3).distribute(&roster(25, 25));
    let men: Vec<u32> = stations
        .iter()
        .filter(|s| s.gender == StationGender::Male)
        .flat_map(|s| s.roll().iter().filter_map(|i| i.registrant_number))
        .collect();
    assert_eq!(men, (1..=25).collect::<Vec<_>>());
    assert_eq!(sizes(&stations), vec![8, 8, 9, 8, 8, 9]);
}

#[test]
fn test_deterministic() {
    let roster = roster(40, 700);
    let distributor = StationDistributor::default();
    assert_eq!(distributor.distribute(&roster), distributor.distribute(&roster));
}
