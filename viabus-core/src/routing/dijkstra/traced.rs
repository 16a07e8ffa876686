use std::collections::BinaryHeap;

use hashbrown::HashMap;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::State;
use crate::routing::graph::TimeEdge;
use crate::routing::itinerary::{Mode, TripStep};
use crate::NodeId;

/// Dijkstra over the time-weighted multimodal graph, tracing the mode used
/// on the edge arriving at every settled node.
///
/// Returns the total travel time in hours and the trip steps from `start`
/// to `target` inclusive, the first step being `(Walk, start)`. `None` when
/// `target` is unreachable.
pub(crate) fn fastest_path(
    graph: &DiGraph<NodeId, TimeEdge>,
    start: NodeIndex,
    target: NodeIndex,
) -> Option<(f64, Vec<TripStep>)> {
    let mut distances: HashMap<NodeIndex, f64> = HashMap::new();
    let mut predecessors: HashMap<NodeIndex, (NodeIndex, Mode)> = HashMap::new();
    let mut heap = BinaryHeap::new();

    heap.push(State {
        cost: 0.0,
        node: start,
    });
    distances.insert(start, 0.0);

    while let Some(State { cost, node }) = heap.pop() {
        if node == target {
            break;
        }

        // Skip if we've found a better path
        if let Some(&best) = distances.get(&node) {
            if cost > best {
                continue;
            }
        }

        for edge in graph.edges(node) {
            let next = edge.target();
            let next_cost = cost + edge.weight().hours;

            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                    predecessors.insert(next, (node, edge.weight().mode));
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                        predecessors.insert(next, (node, edge.weight().mode));
                    }
                }
            }
        }
    }

    if target != start && !predecessors.contains_key(&target) {
        return None;
    }
    let total = *distances.get(&target)?;

    // Follow predecessors backward from target to start, then reverse
    let mut steps = Vec::new();
    let mut current = target;
    while current != start {
        let &(prev, mode) = predecessors.get(&current)?;
        steps.push(TripStep {
            mode,
            node_id: *graph.node_weight(current)?,
        });
        current = prev;
    }
    steps.push(TripStep {
        mode: Mode::Walk,
        node_id: *graph.node_weight(start)?,
    });
    steps.reverse();

    Some((total, steps))
}
