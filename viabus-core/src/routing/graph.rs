//! Construction of the distance- and time-weighted multimodal graphs

use std::time::Instant;

use geo::{Distance, Haversine, Point};
use hashbrown::HashMap;
use log::info;
use petgraph::graph::{DiGraph, NodeIndex};

use super::itinerary::Mode;
use super::path_router::PathRouter;
use crate::config::PlannerConfig;
use crate::{NodeId, VertexId};

const METERS_PER_MILE: f64 = 1609.344;
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Great-circle distance between two street locations in miles.
pub(crate) fn haversine_miles(a: Point<f64>, b: Point<f64>) -> f64 {
    Haversine.distance(a, b) / METERS_PER_MILE
}

/// One adjacency entry of the time graph: travel time in hours plus the
/// mode used on the edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeEdge {
    pub hours: f64,
    pub mode: Mode,
}

/// The two adjacency structures the planner owns: one distance-weighted
/// undirected street graph, one mode-annotated time-weighted graph.
#[derive(Debug)]
pub(crate) struct MultimodalGraphs {
    pub(crate) distance: PathRouter<NodeId>,
    pub(crate) distance_vertices: HashMap<NodeId, VertexId>,
    pub(crate) time: DiGraph<NodeId, TimeEdge>,
    pub(crate) time_vertices: HashMap<NodeId, NodeIndex>,
}

/// Fuses the street map and bus system of `config` into the planner's two
/// graphs. Way pairs or route segments referencing unknown IDs are skipped.
pub(crate) fn build_graphs(config: &PlannerConfig) -> MultimodalGraphs {
    let street_map = &config.street_map;
    let bus_system = &config.bus_system;

    let mut distance = PathRouter::new();
    let mut time = DiGraph::new();
    let mut distance_vertices = HashMap::with_capacity(street_map.node_count());
    let mut time_vertices = HashMap::with_capacity(street_map.node_count());

    for node in street_map.nodes() {
        distance_vertices.insert(node.id, distance.add_vertex(node.id));
        time_vertices.insert(node.id, time.add_node(node.id));
    }

    // Posted speed per directed consecutive node pair, for bus hops that
    // ride along a signed way
    let mut posted_speeds: HashMap<(NodeId, NodeId), f64> = HashMap::new();

    for way in street_map.ways() {
        let max_speed = way.max_speed_mph();
        for pair in way.nodes.windows(2) {
            let (u, v) = (pair[0], pair[1]);
            let (Some(from), Some(to)) = (street_map.node_by_id(u), street_map.node_by_id(v))
            else {
                continue;
            };
            let miles = haversine_miles(from.geometry, to.geometry);

            distance.add_edge(distance_vertices[&u], distance_vertices[&v], miles, true);

            if miles > 0.0 {
                let (tu, tv) = (time_vertices[&u], time_vertices[&v]);
                let walk = TimeEdge {
                    hours: miles / config.walk_speed_mph,
                    mode: Mode::Walk,
                };
                let bike = TimeEdge {
                    hours: miles / config.bike_speed_mph,
                    mode: Mode::Bike,
                };
                time.add_edge(tu, tv, walk);
                time.add_edge(tv, tu, walk);
                time.add_edge(tu, tv, bike);
                time.add_edge(tv, tu, bike);
            }

            if let Some(speed) = max_speed {
                posted_speeds.insert((u, v), speed);
                posted_speeds.insert((v, u), speed);
            }
        }
    }

    let dwell_hours = config.bus_stop_time_s / SECONDS_PER_HOUR;
    for route in bus_system.routes() {
        for pair in route.stops.windows(2) {
            let (Some(a), Some(b)) = (bus_system.stop_by_id(pair[0]), bus_system.stop_by_id(pair[1]))
            else {
                continue;
            };
            let (Some(from), Some(to)) = (
                street_map.node_by_id(a.node_id),
                street_map.node_by_id(b.node_id),
            ) else {
                continue;
            };
            let miles = haversine_miles(from.geometry, to.geometry);
            let speed = posted_speeds
                .get(&(a.node_id, b.node_id))
                .copied()
                .unwrap_or(config.default_speed_limit_mph);
            let hours = miles / speed + dwell_hours;
            if hours > 0.0 {
                time.add_edge(
                    time_vertices[&a.node_id],
                    time_vertices[&b.node_id],
                    TimeEdge {
                        hours,
                        mode: Mode::Bus,
                    },
                );
            }
        }
    }

    if let Some(budget) = config.precompute_time {
        distance.precompute(Instant::now() + budget);
    }

    info!(
        "Built multimodal graphs: {} vertices, {} time edges",
        distance.vertex_count(),
        time.edge_count()
    );

    MultimodalGraphs {
        distance,
        distance_vertices,
        time,
        time_vertices,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use approx::assert_relative_eq;
    use geo::Point;
    use petgraph::visit::EdgeRef;

    use super::*;
    use crate::model::{BusRoute, BusStop, BusSystem, StreetMap, StreetNode, StreetWay};

    fn node(id: NodeId, lat: f64, lon: f64) -> StreetNode {
        StreetNode {
            id,
            geometry: Point::new(lon, lat),
            attributes: vec![],
        }
    }

    fn config(map: StreetMap, buses: BusSystem) -> PlannerConfig {
        PlannerConfig::new(Arc::new(map), Arc::new(buses))
    }

    #[test]
    fn one_degree_of_longitude_is_about_69_miles() {
        let miles = haversine_miles(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        assert_relative_eq!(miles, 69.09, epsilon = 0.01);
    }

    #[test]
    fn street_pairs_produce_walk_and_bike_edges_both_ways() {
        let map = StreetMap::new(
            vec![node(1, 0.0, 0.0), node(2, 0.0, 1.0)],
            vec![StreetWay {
                id: 10,
                nodes: vec![1, 2],
                attributes: vec![],
            }],
        );
        let graphs = build_graphs(&config(map, BusSystem::new(vec![], vec![])));

        // Two directed distance edges, four directed time edges.
        let mut path = Vec::new();
        let miles = graphs.distance.find_shortest_path(
            graphs.distance_vertices[&1],
            graphs.distance_vertices[&2],
            &mut path,
        );
        assert_relative_eq!(miles, 69.09, epsilon = 0.01);
        assert_eq!(graphs.time.edge_count(), 4);

        let from = graphs.time_vertices[&1];
        let modes: Vec<Mode> = graphs.time.edges(from).map(|e| e.weight().mode).collect();
        assert!(modes.contains(&Mode::Walk));
        assert!(modes.contains(&Mode::Bike));
    }

    #[test]
    fn bus_segments_are_directed_and_pay_dwell_time() {
        let map = StreetMap::new(
            vec![node(1, 0.0, 0.0), node(2, 0.0, 1.0)],
            vec![StreetWay {
                id: 10,
                nodes: vec![1, 2],
                attributes: vec![],
            }],
        );
        let buses = BusSystem::new(
            vec![
                BusStop { id: 100, node_id: 1 },
                BusStop { id: 101, node_id: 2 },
            ],
            vec![BusRoute {
                name: "A".to_string(),
                stops: vec![100, 101],
            }],
        );
        let graphs = build_graphs(&config(map, buses));

        let from = graphs.time_vertices[&1];
        let to = graphs.time_vertices[&2];
        let bus_edges: Vec<&TimeEdge> = graphs
            .time
            .edges(from)
            .filter(|e| e.target() == to && e.weight().mode == Mode::Bus)
            .map(|e| e.weight())
            .collect();
        assert_eq!(bus_edges.len(), 1);
        // 69.09 mi at the 25 mph default plus 30 s of dwell
        assert_relative_eq!(bus_edges[0].hours, 69.09 / 25.0 + 30.0 / 3600.0, epsilon = 1e-3);

        // No reverse bus edge: the route only travels 1 -> 2.
        let reverse: usize = graphs
            .time
            .edges(to)
            .filter(|e| e.target() == from && e.weight().mode == Mode::Bus)
            .count();
        assert_eq!(reverse, 0);
    }

    #[test]
    fn bus_segment_prefers_posted_maxspeed() {
        let map = StreetMap::new(
            vec![node(1, 0.0, 0.0), node(2, 0.0, 1.0)],
            vec![StreetWay {
                id: 10,
                nodes: vec![1, 2],
                attributes: vec![("maxspeed".to_string(), "50 mph".to_string())],
            }],
        );
        let buses = BusSystem::new(
            vec![
                BusStop { id: 100, node_id: 1 },
                BusStop { id: 101, node_id: 2 },
            ],
            vec![BusRoute {
                name: "A".to_string(),
                stops: vec![100, 101],
            }],
        );
        let graphs = build_graphs(&config(map, buses));

        let from = graphs.time_vertices[&1];
        let bus_edge = graphs
            .time
            .edges(from)
            .find(|e| e.weight().mode == Mode::Bus)
            .map(|e| *e.weight())
            .unwrap();
        assert_relative_eq!(bus_edge.hours, 69.09 / 50.0 + 30.0 / 3600.0, epsilon = 1e-3);
    }

    #[test]
    fn dangling_references_are_skipped() {
        let map = StreetMap::new(
            vec![node(1, 0.0, 0.0), node(2, 0.0, 1.0)],
            vec![StreetWay {
                id: 10,
                // Node 99 does not exist; both pairs touching it are dropped.
                nodes: vec![1, 99, 2],
                attributes: vec![],
            }],
        );
        let buses = BusSystem::new(
            vec![
                BusStop { id: 100, node_id: 1 },
                BusStop { id: 101, node_id: 77 },
            ],
            vec![BusRoute {
                name: "A".to_string(),
                stops: vec![100, 101, 555],
            }],
        );
        let graphs = build_graphs(&config(map, buses));
        assert_eq!(graphs.time.edge_count(), 0);

        let mut path = Vec::new();
        let miles = graphs.distance.find_shortest_path(
            graphs.distance_vertices[&1],
            graphs.distance_vertices[&2],
            &mut path,
        );
        assert_eq!(miles, crate::NO_PATH_EXISTS);
    }
}
