//! This module is responsible for loading data from its sources (OSM XML,
//! bus CSV files) and assembling a transportation planner.

mod builder;
pub mod bus;
mod config;
pub mod osm;

pub use builder::{create_planner, load_model};
pub use config::{LoadConfig, PlannerTunables};
