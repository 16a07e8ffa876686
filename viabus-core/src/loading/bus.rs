//! Bus system CSV processing
//!
//! Two delimited files: stops (`StopID,NodeID`) and routes
//! (`RouteName,StopID`). Rows sharing a route name aggregate into one route
//! in file order. Malformed rows, including an optional header row, are
//! skipped with a diagnostic.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use hashbrown::HashMap;
use log::warn;
use serde::Deserialize;

use crate::model::{BusRoute, BusStop, BusSystem};
use crate::{Error, NodeId, StopId};

#[derive(Debug, Deserialize)]
struct StopRecord {
    stop_id: StopId,
    node_id: NodeId,
}

#[derive(Debug, Deserialize)]
struct RouteRecord {
    route: String,
    stop_id: StopId,
}

/// Reads a bus system from the stops and routes CSV files.
///
/// # Errors
///
/// Returns an error when either file cannot be opened.
pub fn load_bus_system(stops_path: &Path, routes_path: &Path) -> Result<BusSystem, Error> {
    let stops = File::open(stops_path)?;
    let routes = File::open(routes_path)?;
    bus_system_from_readers(stops, routes)
}

/// Reads a bus system from any pair of CSV sources.
pub fn bus_system_from_readers<S: Read, R: Read>(
    stops_src: S,
    routes_src: R,
) -> Result<BusSystem, Error> {
    let stops = deserialize_rows::<StopRecord, _>(stops_src, "stop")
        .into_iter()
        .map(|record| BusStop {
            id: record.stop_id,
            node_id: record.node_id,
        })
        .collect();

    // Aggregate route rows by name, preserving both the order of first
    // appearance of each route and the stop order within it.
    let mut routes: Vec<BusRoute> = Vec::new();
    let mut route_indices: HashMap<String, usize> = HashMap::new();
    for record in deserialize_rows::<RouteRecord, _>(routes_src, "route") {
        let index = *route_indices.entry(record.route.clone()).or_insert_with(|| {
            routes.push(BusRoute {
                name: record.route,
                stops: Vec::new(),
            });
            routes.len() - 1
        });
        routes[index].stops.push(record.stop_id);
    }

    Ok(BusSystem::new(stops, routes))
}

/// Deserializes every well-formed row, skipping the rest with a
/// diagnostic. Files carry no mandatory header; a header row simply fails
/// to parse and is skipped like any other malformed row.
fn deserialize_rows<T, R>(source: R, kind: &str) -> Vec<T>
where
    T: for<'de> Deserialize<'de>,
    R: Read,
{
    csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(source)
        .into_deserialize()
        .filter_map(|row| match row {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("Skipping malformed {kind} row: {err}");
                None
            }
        })
        .collect()
}
