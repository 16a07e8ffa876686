//! Data model for multimodal route planning
//!
//! Contains the street network and the bus system overlaid on it.

pub mod streets;
pub mod transit;

pub use streets::{StreetMap, StreetNode, StreetWay};
pub use transit::{BusRoute, BusStop, BusSystem, BusSystemIndexer};
