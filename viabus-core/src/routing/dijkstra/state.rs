use std::cmp::Ordering;

use petgraph::graph::NodeIndex;

#[derive(Copy, Clone, PartialEq)]
pub(crate) struct State {
    pub(crate) cost: f64,
    pub(crate) node: NodeIndex,
}

impl Eq for State {}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap);
        // total_cmp because costs are doubles
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.index().cmp(&self.node.index()))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
