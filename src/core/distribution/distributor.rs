//! Station distributor
//!
//! Partitions one center's name-ordered roster into polling stations.
//!
//! The rules, in order:
//! 1. Split the roster by gender, keeping name order.
//! 2. A gender group larger than the station capacity is split into
//!    `ceil(size / capacity)` evenly sized stations; otherwise it fills one.
//! 3. Registrant numbers run 1..=N across the whole center, men first.
//! 4. When both genders are present and at least one of them is below the
//!    unisex trigger, the last station of the larger group and the station of
//!    the smaller group are combined into a single unisex station, larger
//!    group listed first (men on a tie). The combined station may exceed the
//!    capacity.
//! 5. Stations are numbered 1..=K: men, then women, then the unisex station.

use super::chunk::even_chunks;
use crate::config::DistributionConfig;
use crate::domain::{Gender, Individual, Station, StationGender};

/// Default maximum number of registrants per station
pub const DEFAULT_REGISTRANTS_PER_STATION_MAX: usize = 550;

/// Default group size below which a unisex station is formed
pub const DEFAULT_UNISEX_TRIGGER: usize = 25;

/// Pure, deterministic station partitioning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationDistributor {
    registrants_per_station_max: usize,
    unisex_trigger: usize,
}

impl Default for StationDistributor {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRANTS_PER_STATION_MAX, DEFAULT_UNISEX_TRIGGER)
    }
}

impl StationDistributor {
    /// Create a distributor
    ///
    /// A capacity of 0 is treated as 1.
    pub fn new(registrants_per_station_max: usize, unisex_trigger: usize) -> Self {
        Self {
            registrants_per_station_max: registrants_per_station_max.max(1),
            unisex_trigger,
        }
    }

    /// Create a distributor from the `[distribution]` configuration section
    pub fn from_config(config: &DistributionConfig) -> Self {
        Self::new(config.registrants_per_station_max, config.unisex_trigger)
    }

    /// Station capacity
    pub fn registrants_per_station_max(&self) -> usize {
        self.registrants_per_station_max
    }

    /// Unisex trigger threshold
    pub fn unisex_trigger(&self) -> usize {
        self.unisex_trigger
    }

    /// Partition `roster` into stations
    ///
    /// Every individual appears in exactly one returned station, with a
    /// registrant number assigned. An empty roster yields no stations.
    pub fn distribute(&self, roster: &[Individual]) -> Vec<Station> {
        let (males, females): (Vec<Individual>, Vec<Individual>) = roster
            .iter()
            .cloned()
            .partition(|individual| individual.gender == Gender::Male);
        let n_males = males.len();
        let n_females = females.len();

        let mut next_registrant_number = 1;
        let mut male_stations =
            self.chunk_group(males, StationGender::Male, &mut next_registrant_number);
        let mut female_stations =
            self.chunk_group(females, StationGender::Female, &mut next_registrant_number);

        let unisex_station =
            self.merge_unisex(n_males, n_females, &mut male_stations, &mut female_stations);

        let mut stations: Vec<Station> = male_stations
            .into_iter()
            .chain(female_stations)
            .chain(unisex_station)
            .collect();

        for (index, station) in stations.iter_mut().enumerate() {
            station.number = index as u32 + 1;
        }

        tracing::debug!(
            n_males,
            n_females,
            n_stations = stations.len(),
            "Distributed roster into stations"
        );

        stations
    }

    fn chunk_group(
        &self,
        group: Vec<Individual>,
        gender: StationGender,
        next_registrant_number: &mut u32,
    ) -> Vec<Station> {
        if group.is_empty() {
            return Vec::new();
        }

        let n_stations = group.len().div_ceil(self.registrants_per_station_max);
        even_chunks(group, n_stations)
            .into_iter()
            .map(|mut roll| {
                for individual in &mut roll {
                    individual.registrant_number = Some(*next_registrant_number);
                    *next_registrant_number += 1;
                }
                Station::new(gender, roll)
            })
            .collect()
    }

    fn merge_unisex(
        &self,
        n_males: usize,
        n_females: usize,
        male_stations: &mut Vec<Station>,
        female_stations: &mut Vec<Station>,
    ) -> Option<Station> {
        // Merging only consolidates anything when both genders are present.
        if male_stations.is_empty() || female_stations.is_empty() {
            return None;
        }
        if n_males >= self.unisex_trigger && n_females >= self.unisex_trigger {
            return None;
        }

        let last_male = male_stations.pop()?;
        let last_female = female_stations.pop()?;

        let (mut roll, rest) = if n_females > n_males {
            (last_female.into_roll(), last_male.into_roll())
        } else {
            (last_male.into_roll(), last_female.into_roll())
        };
        roll.extend(rest);

        Some(Station::new(StationGender::Unisex, roll))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NationalId;

    fn roster(n_males: usize, n_females: usize) -> Vec<Individual> {
        let males = (0..n_males).map(|i| {
            Individual::new(
                NationalId::new(100_000_000_000 + i as u64),
                format!("M{i:04}"),
                "",
                "",
                "",
                Gender::Male,
            )
        });
        let females = (0..n_females).map(|i| {
            Individual::new(
                NationalId::new(200_000_000_000 + i as u64),
                format!("F{i:04}"),
                "",
                "",
                "",
                Gender::Female,
            )
        });
        males.chain(females).collect()
    }

    fn shape(stations: &[Station]) -> Vec<(u32, StationGender, usize)> {
        stations
            .iter()
            .map(|s| (s.number, s.gender, s.n_registrants()))
            .collect()
    }

    #[test]
    fn test_empty_roster() {
        assert!(StationDistributor::default().distribute(&[]).is_empty());
    }

    #[test]
    fn test_simple_one_station_each() {
        let stations = StationDistributor::default().distribute(&roster(26, 26));
        assert_eq!(
            shape(&stations),
            vec![(1, StationGender::Male, 26), (2, StationGender::Female, 26)]
        );
    }

    #[test]
    fn test_capacity_respected_at_boundary() {
        let distributor = StationDistributor::default();

        let stations = distributor.distribute(&roster(550, 25));
        assert_eq!(
            shape(&stations),
            vec![(1, StationGender::Male, 550), (2, StationGender::Female, 25)]
        );

        let stations = distributor.distribute(&roster(551, 25));
        assert_eq!(
            shape(&stations),
            vec![
                (1, StationGender::Male, 275),
                (2, StationGender::Male, 276),
                (3, StationGender::Female, 25)
            ]
        );
    }

    #[test]
    fn test_unisex_when_both_small() {
        let stations = StationDistributor::default().distribute(&roster(10, 10));
        assert_eq!(shape(&stations), vec![(1, StationGender::Unisex, 20)]);
        let roll = stations[0].roll();
        assert!(roll[..10].iter().all(|p| p.gender == Gender::Male));
        assert!(roll[10..].iter().all(|p| p.gender == Gender::Female));
    }

    #[test]
    fn test_unisex_takes_last_station_of_larger_group() {
        // 600 women split into two stations of 300; 10 men join the last one.
        let stations = StationDistributor::default().distribute(&roster(10, 600));
        assert_eq!(
            shape(&stations),
            vec![(1, StationGender::Female, 300), (2, StationGender::Unisex, 310)]
        );
        let unisex = &stations[1];
        assert_eq!(unisex.roll()[0].gender, Gender::Female);
        assert_eq!(unisex.roll()[300].gender, Gender::Male);

        // Registrant numbers were assigned before the merge, men first
        assert_eq!(unisex.roll()[300].registrant_number, Some(1));
        assert_eq!(unisex.first_voter().unwrap().registrant_number, Some(311));
    }

    #[test]
    fn test_registrant_numbers_men_first() {
        let stations = StationDistributor::default().distribute(&roster(30, 40));
        let male_numbers: Vec<u32> = stations[0]
            .roll()
            .iter()
            .filter_map(|p| p.registrant_number)
            .collect();
        assert_eq!(male_numbers, (1..=30).collect::<Vec<_>>());
        assert_eq!(stations[1].first_voter().unwrap().registrant_number, Some(31));
        assert_eq!(stations[1].last_voter().unwrap().registrant_number, Some(70));
    }

    #[test]
    fn test_custom_capacity() {
        let distributor = StationDistributor::new(10, 3);
        let stations = distributor.distribute(&roster(25, 4));
        assert_eq!(
            shape(&stations),
            vec![
                (1, StationGender::Male, 8),
                (2, StationGender::Male, 8),
                (3, StationGender::Male, 9),
                (4, StationGender::Female, 4)
            ]
        );
    }
}
