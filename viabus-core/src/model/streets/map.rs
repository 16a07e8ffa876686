//! Immutable street map with index- and ID-based access

use hashbrown::HashMap;

use super::{StreetNode, StreetWay};
use crate::{NodeId, WayId};

/// Collection of street nodes and ways, frozen after load.
#[derive(Debug, Default)]
pub struct StreetMap {
    nodes: Vec<StreetNode>,
    ways: Vec<StreetWay>,
    node_ids: HashMap<NodeId, usize>,
    way_ids: HashMap<WayId, usize>,
}

impl StreetMap {
    pub fn new(nodes: Vec<StreetNode>, ways: Vec<StreetWay>) -> Self {
        let node_ids = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.id, idx))
            .collect();
        let way_ids = ways
            .iter()
            .enumerate()
            .map(|(idx, way)| (way.id, idx))
            .collect();
        Self {
            nodes,
            ways,
            node_ids,
            way_ids,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn way_count(&self) -> usize {
        self.ways.len()
    }

    pub fn node_by_index(&self, index: usize) -> Option<&StreetNode> {
        self.nodes.get(index)
    }

    pub fn node_by_id(&self, id: NodeId) -> Option<&StreetNode> {
        self.node_ids.get(&id).map(|&idx| &self.nodes[idx])
    }

    pub fn way_by_index(&self, index: usize) -> Option<&StreetWay> {
        self.ways.get(index)
    }

    pub fn way_by_id(&self, id: WayId) -> Option<&StreetWay> {
        self.way_ids.get(&id).map(|&idx| &self.ways[idx])
    }

    pub fn nodes(&self) -> &[StreetNode] {
        &self.nodes
    }

    pub fn ways(&self) -> &[StreetWay] {
        &self.ways
    }
}

#[cfg(test)]
mod tests {
    use geo::Point;

    use super::*;

    fn node(id: NodeId) -> StreetNode {
        StreetNode {
            id,
            geometry: Point::new(0.0, 0.0),
            attributes: vec![],
        }
    }

    #[test]
    fn lookup_by_index_and_id() {
        let map = StreetMap::new(
            vec![node(10), node(4)],
            vec![StreetWay {
                id: 1,
                nodes: vec![10, 4],
                attributes: vec![],
            }],
        );
        assert_eq!(map.node_count(), 2);
        assert_eq!(map.way_count(), 1);
        assert_eq!(map.node_by_index(0).map(|n| n.id), Some(10));
        assert_eq!(map.node_by_id(4).map(|n| n.id), Some(4));
        assert!(map.node_by_id(99).is_none());
        assert_eq!(map.way_by_id(1).map(|w| w.node_count()), Some(2));
        assert!(map.way_by_index(1).is_none());
    }
}
