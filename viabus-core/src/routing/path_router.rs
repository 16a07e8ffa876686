//! Generic weighted directed graph with Dijkstra shortest-path search

use std::collections::BinaryHeap;
use std::time::Instant;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::dijkstra::State;
use crate::{VertexId, NO_PATH_EXISTS};

/// Weighted directed graph over dense vertex IDs, each vertex carrying a
/// caller-supplied tag.
///
/// Edge weights are doubles and must be strictly positive and finite;
/// `add_edge` rejects anything else so that Dijkstra terminates with an
/// optimal answer.
#[derive(Debug, Default)]
pub struct PathRouter<T> {
    graph: DiGraph<T, f64>,
}

impl<T> PathRouter<T> {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Appends a vertex and assigns it the next dense ID.
    pub fn add_vertex(&mut self, tag: T) -> VertexId {
        self.graph.add_node(tag).index()
    }

    pub fn vertex_tag(&self, id: VertexId) -> Option<&T> {
        self.graph.node_weight(NodeIndex::new(id))
    }

    /// Adds an edge from `src` to `dest`, and the reverse edge as well when
    /// `bidirectional` is set. Returns false without modifying the graph
    /// when either endpoint is out of range or the weight is not strictly
    /// positive and finite.
    pub fn add_edge(
        &mut self,
        src: VertexId,
        dest: VertexId,
        weight: f64,
        bidirectional: bool,
    ) -> bool {
        let count = self.vertex_count();
        if src >= count || dest >= count || !weight.is_finite() || weight <= 0.0 {
            return false;
        }
        let src = NodeIndex::new(src);
        let dest = NodeIndex::new(dest);
        self.graph.add_edge(src, dest, weight);
        if bidirectional {
            self.graph.add_edge(dest, src, weight);
        }
        true
    }

    /// Hook for precomputation up to `deadline`. The plain Dijkstra router
    /// has nothing to precompute.
    pub fn precompute(&mut self, _deadline: Instant) -> bool {
        true
    }

    /// Shortest-path distance from `src` to `dest`; `path` receives the
    /// vertex sequence from `src` to `dest` inclusive.
    ///
    /// Returns `NO_PATH_EXISTS` (and empties `path`) when either endpoint is
    /// out of range or no path exists.
    pub fn find_shortest_path(
        &self,
        src: VertexId,
        dest: VertexId,
        path: &mut Vec<VertexId>,
    ) -> f64 {
        path.clear();
        let count = self.vertex_count();
        if src >= count || dest >= count {
            return NO_PATH_EXISTS;
        }
        if src == dest {
            path.push(src);
            return 0.0;
        }

        let start = NodeIndex::new(src);
        let target = NodeIndex::new(dest);

        // Lazy-deletion Dijkstra over dense distance and predecessor arrays
        let mut distances = vec![f64::INFINITY; count];
        let mut predecessors: Vec<Option<NodeIndex>> = vec![None; count];
        let mut heap = BinaryHeap::new();

        distances[src] = 0.0;
        heap.push(State {
            cost: 0.0,
            node: start,
        });

        while let Some(State { cost, node }) = heap.pop() {
            if node == target {
                break;
            }
            // Stale heap entry, a better path was already settled
            if cost > distances[node.index()] {
                continue;
            }

            for edge in self.graph.edges(node) {
                let next = edge.target();
                let next_cost = cost + edge.weight();
                if next_cost < distances[next.index()] {
                    distances[next.index()] = next_cost;
                    predecessors[next.index()] = Some(node);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
            }
        }

        if predecessors[dest].is_none() {
            return NO_PATH_EXISTS;
        }

        // Walk predecessors backward from dest, then reverse
        let mut current = target;
        while current != start {
            path.push(current.index());
            match predecessors[current.index()] {
                Some(prev) => current = prev,
                None => {
                    path.clear();
                    return NO_PATH_EXISTS;
                }
            }
        }
        path.push(src);
        path.reverse();

        distances[dest]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertices_get_dense_ids_and_tags() {
        let mut router = PathRouter::new();
        assert_eq!(router.add_vertex("a"), 0);
        assert_eq!(router.add_vertex("b"), 1);
        assert_eq!(router.vertex_count(), 2);
        assert_eq!(router.vertex_tag(1), Some(&"b"));
        assert_eq!(router.vertex_tag(2), None);
    }

    #[test]
    fn add_edge_rejects_bad_input() {
        let mut router = PathRouter::new();
        let a = router.add_vertex(());
        let b = router.add_vertex(());
        assert!(router.add_edge(a, b, 1.0, false));
        assert!(!router.add_edge(a, 5, 1.0, false));
        assert!(!router.add_edge(5, b, 1.0, false));
        assert!(!router.add_edge(a, b, 0.0, false));
        assert!(!router.add_edge(a, b, -2.5, false));
        assert!(!router.add_edge(a, b, f64::NAN, false));
        assert!(!router.add_edge(a, b, f64::INFINITY, false));
    }

    #[test]
    fn shortest_path_prefers_lighter_detour() {
        // Triangle: direct edge 0-2 weighs 20, the detour through 1 weighs 10.
        let mut router = PathRouter::new();
        let a = router.add_vertex(1u64);
        let b = router.add_vertex(2u64);
        let c = router.add_vertex(3u64);
        assert!(router.add_edge(a, b, 5.0, true));
        assert!(router.add_edge(b, c, 5.0, true));
        assert!(router.add_edge(a, c, 20.0, true));

        let mut path = Vec::new();
        let dist = router.find_shortest_path(a, c, &mut path);
        assert_eq!(dist, 10.0);
        assert_eq!(path, vec![a, b, c]);
    }

    #[test]
    fn precompute_is_a_noop() {
        let mut router = PathRouter::<()>::new();
        assert!(router.precompute(Instant::now()));
    }

    #[test]
    fn identity_path() {
        let mut router = PathRouter::new();
        let a = router.add_vertex(());
        let mut path = vec![99];
        assert_eq!(router.find_shortest_path(a, a, &mut path), 0.0);
        assert_eq!(path, vec![a]);
    }

    #[test]
    fn unreachable_and_out_of_range() {
        let mut router = PathRouter::new();
        let a = router.add_vertex(());
        let b = router.add_vertex(());

        let mut path = vec![1, 2, 3];
        assert_eq!(router.find_shortest_path(a, b, &mut path), NO_PATH_EXISTS);
        assert!(path.is_empty());

        let mut path = vec![1];
        assert_eq!(router.find_shortest_path(a, 7, &mut path), NO_PATH_EXISTS);
        assert!(path.is_empty());
    }

    #[test]
    fn directed_edges_are_one_way() {
        let mut router = PathRouter::new();
        let a = router.add_vertex(());
        let b = router.add_vertex(());
        assert!(router.add_edge(a, b, 1.0, false));

        let mut path = Vec::new();
        assert_eq!(router.find_shortest_path(a, b, &mut path), 1.0);
        assert_eq!(router.find_shortest_path(b, a, &mut path), NO_PATH_EXISTS);
    }

    #[test]
    fn path_weights_sum_to_distance() {
        let mut router = PathRouter::new();
        let ids: Vec<_> = (0..5).map(|i| router.add_vertex(i)).collect();
        router.add_edge(ids[0], ids[1], 1.5, true);
        router.add_edge(ids[1], ids[2], 2.5, true);
        router.add_edge(ids[2], ids[3], 3.5, true);
        router.add_edge(ids[0], ids[3], 8.0, true);
        router.add_edge(ids[3], ids[4], 1.0, true);

        let mut path = Vec::new();
        let dist = router.find_shortest_path(ids[0], ids[4], &mut path);
        assert_eq!(path, vec![ids[0], ids[1], ids[2], ids[3], ids[4]]);
        assert!((dist - 8.5).abs() < 1e-12);
    }
}
