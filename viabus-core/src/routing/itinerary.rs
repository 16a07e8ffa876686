//! Trip steps and their human-readable rendering

use hashbrown::HashSet;

use crate::model::BusSystemIndexer;
use crate::NodeId;

/// Means of travel on a single edge of the time graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Walk,
    Bike,
    Bus,
}

/// One unit of an itinerary: the mode used to arrive at a node and that
/// node's ID. The first step of any trip is `(Walk, origin)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripStep {
    pub mode: Mode,
    pub node_id: NodeId,
}

/// Renders one line per trip step.
///
/// A bus step names a route covering the hop when the indexer knows one
/// ("Take bus A to node 3"); otherwise the plain "Take bus to node 3" form
/// is used. Returns false when `steps` is empty.
pub(crate) fn describe_steps(
    steps: &[TripStep],
    indexer: &BusSystemIndexer,
    lines: &mut Vec<String>,
) -> bool {
    lines.clear();
    if steps.is_empty() {
        return false;
    }

    let mut covering = HashSet::new();
    for (index, step) in steps.iter().enumerate() {
        let line = match step.mode {
            Mode::Walk => format!("Walk to node {}", step.node_id),
            Mode::Bike => format!("Bike to node {}", step.node_id),
            Mode::Bus => {
                let route_name = index.checked_sub(1).and_then(|prev| {
                    let boarded_at = steps[prev].node_id;
                    indexer.routes_by_node_ids(boarded_at, step.node_id, &mut covering);
                    covering
                        .iter()
                        .filter_map(|&idx| indexer.system().route_by_index(idx))
                        .map(|route| route.name.as_str())
                        .min()
                });
                match route_name {
                    Some(name) => format!("Take bus {} to node {}", name, step.node_id),
                    None => format!("Take bus to node {}", step.node_id),
                }
            }
        };
        lines.push(line);
    }
    true
}
