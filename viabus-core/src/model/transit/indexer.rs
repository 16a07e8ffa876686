//! Auxiliary indices over a bus system
//!
//! The wrapped system is immutable, so every cache here is a deterministic
//! function of it and is built at most once, on first use. Queries are
//! single-threaded; the caches use plain `OnceCell` initialisation.

use std::cell::OnceCell;
use std::sync::Arc;

use hashbrown::{HashMap, HashSet};

use super::system::BusSystem;
use super::types::{BusRoute, BusStop};
use crate::NodeId;

/// Sorted listings, stop-by-node and route-cover lookups the raw bus system
/// does not provide.
#[derive(Debug)]
pub struct BusSystemIndexer {
    system: Arc<BusSystem>,
    sorted_stops: OnceCell<Vec<usize>>,
    sorted_routes: OnceCell<Vec<usize>>,
    stop_by_node: OnceCell<HashMap<NodeId, usize>>,
}

impl BusSystemIndexer {
    pub fn new(system: Arc<BusSystem>) -> Self {
        Self {
            system,
            sorted_stops: OnceCell::new(),
            sorted_routes: OnceCell::new(),
            stop_by_node: OnceCell::new(),
        }
    }

    pub fn stop_count(&self) -> usize {
        self.system.stop_count()
    }

    pub fn route_count(&self) -> usize {
        self.system.route_count()
    }

    /// Stops enumerated in ascending stop-ID order.
    pub fn sorted_stop_by_index(&self, index: usize) -> Option<&BusStop> {
        let order = self.sorted_stops.get_or_init(|| {
            let mut indices: Vec<usize> = (0..self.system.stop_count()).collect();
            indices.sort_by_key(|&idx| self.system.stops()[idx].id);
            indices
        });
        order.get(index).map(|&idx| &self.system.stops()[idx])
    }

    /// Routes enumerated in ascending name order.
    pub fn sorted_route_by_index(&self, index: usize) -> Option<&BusRoute> {
        let order = self.sorted_routes.get_or_init(|| {
            let mut indices: Vec<usize> = (0..self.system.route_count()).collect();
            indices.sort_by(|&a, &b| {
                self.system.routes()[a]
                    .name
                    .cmp(&self.system.routes()[b].name)
            });
            indices
        });
        order.get(index).map(|&idx| &self.system.routes()[idx])
    }

    /// The unique stop anchored at the given street node.
    pub fn stop_by_node_id(&self, node_id: NodeId) -> Option<&BusStop> {
        let by_node = self.stop_by_node.get_or_init(|| {
            self.system
                .stops()
                .iter()
                .enumerate()
                .map(|(idx, stop)| (stop.node_id, idx))
                .collect()
        });
        by_node.get(&node_id).map(|&idx| &self.system.stops()[idx])
    }

    /// Fills `routes` with the index of every route whose stop sequence
    /// contains the stop at `src` strictly before the stop at `dest`, not
    /// necessarily adjacent. Returns false when either node has no stop or
    /// no route covers the pair.
    pub fn routes_by_node_ids(
        &self,
        src: NodeId,
        dest: NodeId,
        routes: &mut HashSet<usize>,
    ) -> bool {
        routes.clear();
        let Some(src_stop) = self.stop_by_node_id(src).map(|stop| stop.id) else {
            return false;
        };
        let Some(dest_stop) = self.stop_by_node_id(dest).map(|stop| stop.id) else {
            return false;
        };

        for (idx, route) in self.system.routes().iter().enumerate() {
            let mut src_seen = false;
            for &stop in &route.stops {
                if src_seen && stop == dest_stop {
                    routes.insert(idx);
                    break;
                }
                if stop == src_stop {
                    src_seen = true;
                }
            }
        }
        !routes.is_empty()
    }

    /// Whether at least one route covers the (src, dest) pair in order.
    pub fn route_between_node_ids(&self, src: NodeId, dest: NodeId) -> bool {
        let mut routes = HashSet::new();
        self.routes_by_node_ids(src, dest, &mut routes)
    }

    pub fn system(&self) -> &BusSystem {
        &self.system
    }
}
