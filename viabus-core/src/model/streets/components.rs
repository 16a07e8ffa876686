//! Street network components - nodes and ways

use geo::Point;

use crate::NodeId;
use crate::WayId;

/// Street map node
#[derive(Debug, Clone)]
pub struct StreetNode {
    /// OSM ID of the node
    pub id: NodeId,
    /// Node coordinates (x = longitude, y = latitude)
    pub geometry: Point<f64>,
    /// Key/value attributes in file order
    pub attributes: Vec<(String, String)>,
}

impl StreetNode {
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    pub fn attribute_key(&self, index: usize) -> Option<&str> {
        self.attributes.get(index).map(|(k, _)| k.as_str())
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attribute(&self, key: &str) -> bool {
        self.attribute(key).is_some()
    }
}

/// Street map way, an ordered polyline of node IDs
#[derive(Debug, Clone)]
pub struct StreetWay {
    /// OSM ID of the way
    pub id: WayId,
    /// Node IDs in polyline order
    pub nodes: Vec<NodeId>,
    /// Key/value attributes in file order
    pub attributes: Vec<(String, String)>,
}

impl StreetWay {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_id(&self, index: usize) -> Option<NodeId> {
        self.nodes.get(index).copied()
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    pub fn attribute_key(&self, index: usize) -> Option<&str> {
        self.attributes.get(index).map(|(k, _)| k.as_str())
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attribute(&self, key: &str) -> bool {
        self.attribute(key).is_some()
    }

    /// Posted speed limit in miles per hour, parsed from the `maxspeed`
    /// attribute. Accepts the "<n> mph" form and a bare number.
    pub fn max_speed_mph(&self) -> Option<f64> {
        let raw = self.attribute("maxspeed")?;
        let value: f64 = raw.split_whitespace().next()?.parse().ok()?;
        if value.is_finite() && value > 0.0 {
            Some(value)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn way_with_maxspeed(value: &str) -> StreetWay {
        StreetWay {
            id: 7,
            nodes: vec![1, 2],
            attributes: vec![("maxspeed".to_string(), value.to_string())],
        }
    }

    #[test]
    fn parses_mph_maxspeed() {
        assert_eq!(way_with_maxspeed("45 mph").max_speed_mph(), Some(45.0));
    }

    #[test]
    fn parses_bare_maxspeed() {
        assert_eq!(way_with_maxspeed("30").max_speed_mph(), Some(30.0));
    }

    #[test]
    fn rejects_unparsable_maxspeed() {
        assert_eq!(way_with_maxspeed("fast").max_speed_mph(), None);
        assert_eq!(way_with_maxspeed("0").max_speed_mph(), None);
    }

    #[test]
    fn missing_maxspeed() {
        let way = StreetWay {
            id: 7,
            nodes: vec![1, 2],
            attributes: vec![],
        };
        assert_eq!(way.max_speed_mph(), None);
        assert!(!way.has_attribute("maxspeed"));
    }

    #[test]
    fn attribute_access_by_index_and_key() {
        let node = StreetNode {
            id: 3,
            geometry: Point::new(-121.74, 38.54),
            attributes: vec![
                ("highway".to_string(), "crossing".to_string()),
                ("name".to_string(), "A St".to_string()),
            ],
        };
        assert_eq!(node.attribute_count(), 2);
        assert_eq!(node.attribute_key(0), Some("highway"));
        assert_eq!(node.attribute("name"), Some("A St"));
        assert_eq!(node.attribute_key(2), None);
    }
}
