use std::sync::Arc;

use log::info;

use super::config::{LoadConfig, PlannerTunables};
use super::{bus, osm};
use crate::model::{BusSystem, StreetMap};
use crate::routing::TransportationPlanner;
use crate::{Error, PlannerConfig};

/// Loads the street map and bus system named by the configuration.
///
/// # Errors
///
/// Returns an error if there are problems reading or processing data.
pub fn load_model(config: &LoadConfig) -> Result<(Arc<StreetMap>, Arc<BusSystem>), Error> {
    info!(
        "Processing street data (OSM): {}",
        config.osm_path.display()
    );
    let street_map = osm::load_street_map(&config.osm_path)?;
    info!(
        "Loaded {} nodes and {} ways",
        street_map.node_count(),
        street_map.way_count()
    );

    info!(
        "Processing bus system data: {} / {}",
        config.stops_path.display(),
        config.routes_path.display()
    );
    let bus_system = bus::load_bus_system(&config.stops_path, &config.routes_path)?;
    info!(
        "Loaded {} stops and {} routes",
        bus_system.stop_count(),
        bus_system.route_count()
    );

    Ok((Arc::new(street_map), Arc::new(bus_system)))
}

/// Loads both data sources and assembles a planner, applying any tunable
/// overrides on top of the defaults.
///
/// # Errors
///
/// Returns an error if either source cannot be read or the resulting
/// configuration is invalid.
pub fn create_planner(
    config: &LoadConfig,
    tunables: &PlannerTunables,
) -> Result<TransportationPlanner, Error> {
    let (street_map, bus_system) = load_model(config)?;
    let mut planner_config = PlannerConfig::new(street_map, bus_system);
    tunables.apply(&mut planner_config);
    let planner = TransportationPlanner::new(planner_config)?;
    info!("Transportation planner created successfully");
    Ok(planner)
}
