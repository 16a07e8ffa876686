//! Street network model

pub mod components;
pub mod map;

pub use components::{StreetNode, StreetWay};
pub use map::StreetMap;
