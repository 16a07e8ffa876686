// Re-export key components
pub use crate::config::PlannerConfig;
pub use crate::error::Error;
pub use crate::loading::{create_planner, load_model, LoadConfig, PlannerTunables};
pub use crate::model::{BusRoute, BusStop, BusSystem, BusSystemIndexer};
pub use crate::model::{StreetMap, StreetNode, StreetWay};
pub use crate::routing::{Mode, PathRouter, TransportationPlanner, TripStep};

// Core identifier types and sentinels
pub use crate::{NodeId, StopId, VertexId, WayId};
pub use crate::{INVALID_NODE_ID, INVALID_STOP_ID, NO_PATH_EXISTS};
