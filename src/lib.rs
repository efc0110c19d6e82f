//! # Rollforge - polling station distribution and voter roll generation
//!
//! Rollforge partitions the registered individuals of each registration
//! center into polling stations and generates the printed documents for each
//! phase of an election: registration books, exhibition lists, polling center
//! lists, station books and station signs.
//!
//! ## Overview
//!
//! A job runs one phase over a list of centers and writes everything into one
//! directory:
//! - documents grouped into one subdirectory per office
//! - one zip archive per office
//! - a manifest recording the size, page count and SHA-256 of every document,
//!   plus a hash of the manifest itself
//! - for the polling phase, two CSV exports mapping individuals to stations
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Station distribution, jobs, selection, overview, verification
//! - [`adapters`] - Registry, station store and document renderer
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Station Distribution
//!
//! ```rust
//! use rollforge::core::distribution::StationDistributor;
//! use rollforge::domain::{Gender, Individual, NationalId, StationGender};
//!
//! let roster: Vec<Individual> = (0..20u64)
//!     .map(|i| {
//!         let gender = if i < 10 { Gender::Male } else { Gender::Female };
//!         Individual::new(NationalId::new(i), format!("N{i:02}"), "", "", "", gender)
//!     })
//!     .collect();
//!
//! let stations = StationDistributor::default().distribute(&roster);
//! assert_eq!(stations.len(), 1);
//! assert_eq!(stations[0].gender, StationGender::Unisex);
//! assert_eq!(stations[0].n_registrants(), 20);
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::Result`] with a
//! [`domain::RollError`]. Missing prerequisites and storage exhaustion are
//! anticipated conditions; everything else is treated as a defect.
//!
//! ```rust,no_run
//! use rollforge::domain::RollError;
//!
//! fn example() -> Result<(), RollError> {
//!     let config = rollforge::config::load_config("rollforge.toml")?;
//!     println!("{}", config.output.root);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
