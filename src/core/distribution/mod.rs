//! Station distribution
//!
//! Splits a center's roster into gender-scoped polling stations.

pub mod chunk;
pub mod distributor;

pub use chunk::even_chunks;
pub use distributor::{
    StationDistributor, DEFAULT_REGISTRANTS_PER_STATION_MAX, DEFAULT_UNISEX_TRIGGER,
};
