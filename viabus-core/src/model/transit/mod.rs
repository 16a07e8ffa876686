//! Bus system model and indexing

pub mod indexer;
pub mod system;
pub mod types;

pub use indexer::BusSystemIndexer;
pub use system::BusSystem;
pub use types::{BusRoute, BusStop};
