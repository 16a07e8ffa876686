//! Multimodal route planning over an OpenStreetMap street network with an
//! overlaid bus system.
//!
//! The crate answers two queries between any pair of street nodes: the
//! shortest path by distance (walking the street graph) and the fastest path
//! by time (choosing among walking, biking and bus hops edge-by-edge), the
//! latter with a human-readable itinerary.

pub mod config;
pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use config::PlannerConfig;
pub use error::Error;

/// OSM node identifier.
pub type NodeId = u64;

/// OSM way identifier.
pub type WayId = u64;

/// Bus stop identifier.
pub type StopId = u64;

/// Dense vertex index assigned sequentially by the path router.
pub type VertexId = usize;

/// Sentinel for "no such node".
pub const INVALID_NODE_ID: NodeId = NodeId::MAX;

/// Sentinel for "no such stop".
pub const INVALID_STOP_ID: StopId = StopId::MAX;

/// Returned by path queries when no route connects the endpoints.
pub const NO_PATH_EXISTS: f64 = f64::INFINITY;
