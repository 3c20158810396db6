//! Facebook Ads analytics toolkit: normalize campaign data from UTM
//! links, CSV exports, and API payloads into one record shape, then
//! score it against industry benchmarks and surface recommendations.

pub mod advisor;
pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod store;
