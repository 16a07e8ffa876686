use crate::{NodeId, StopId};

/// Bus stop anchored to exactly one street map node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusStop {
    pub id: StopId,
    pub node_id: NodeId,
}

/// Bus route, an ordered sequence of stops served by one line
///
/// Consecutive stops define directed travel segments; segments are never
/// implicitly reversed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusRoute {
    pub name: String,
    pub stops: Vec<StopId>,
}

impl BusRoute {
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn stop_id(&self, index: usize) -> Option<StopId> {
        self.stops.get(index).copied()
    }
}
