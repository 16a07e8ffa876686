//! Bus system collection with index-, ID- and name-based access

use hashbrown::HashMap;

use super::types::{BusRoute, BusStop};
use crate::StopId;

/// Collection of bus stops and routes, frozen after load.
#[derive(Debug, Default)]
pub struct BusSystem {
    stops: Vec<BusStop>,
    routes: Vec<BusRoute>,
    stop_ids: HashMap<StopId, usize>,
    route_names: HashMap<String, usize>,
}

impl BusSystem {
    pub fn new(stops: Vec<BusStop>, routes: Vec<BusRoute>) -> Self {
        // On a duplicate ID or name the lookup map keeps the last
        // occurrence; the index lists keep every occurrence.
        let stop_ids = stops
            .iter()
            .enumerate()
            .map(|(idx, stop)| (stop.id, idx))
            .collect();
        let route_names = routes
            .iter()
            .enumerate()
            .map(|(idx, route)| (route.name.clone(), idx))
            .collect();
        Self {
            stops,
            routes,
            stop_ids,
            route_names,
        }
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn stop_by_index(&self, index: usize) -> Option<&BusStop> {
        self.stops.get(index)
    }

    pub fn stop_by_id(&self, id: StopId) -> Option<&BusStop> {
        self.stop_ids.get(&id).map(|&idx| &self.stops[idx])
    }

    pub fn route_by_index(&self, index: usize) -> Option<&BusRoute> {
        self.routes.get(index)
    }

    pub fn route_by_name(&self, name: &str) -> Option<&BusRoute> {
        self.route_names.get(name).map(|&idx| &self.routes[idx])
    }

    pub fn stops(&self) -> &[BusStop] {
        &self.stops
    }

    pub fn routes(&self) -> &[BusRoute] {
        &self.routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_index_id_and_name() {
        let system = BusSystem::new(
            vec![
                BusStop { id: 5, node_id: 100 },
                BusStop { id: 2, node_id: 200 },
            ],
            vec![BusRoute {
                name: "A".to_string(),
                stops: vec![5, 2],
            }],
        );
        assert_eq!(system.stop_count(), 2);
        assert_eq!(system.route_count(), 1);
        assert_eq!(system.stop_by_index(0).map(|s| s.id), Some(5));
        assert_eq!(system.stop_by_id(2).map(|s| s.node_id), Some(200));
        assert!(system.stop_by_id(9).is_none());
        assert_eq!(system.route_by_name("A").map(|r| r.stop_count()), Some(2));
        assert!(system.route_by_name("B").is_none());
    }
}
