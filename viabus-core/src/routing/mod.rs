//! Shortest- and fastest-path routing over the fused street and bus graphs

mod dijkstra;
pub mod graph;
pub mod itinerary;
pub mod path_router;
pub mod planner;

pub use graph::TimeEdge;
pub use itinerary::{Mode, TripStep};
pub use path_router::PathRouter;
pub use planner::TransportationPlanner;
