//! OSM XML processing
//!
//! Event-driven parse of the `<node>`, `<way>`, `<nd>` and `<tag>` elements
//! of an OSM extract. Elements with unparsable identifiers or coordinates
//! are skipped with a diagnostic; unknown attributes are retained as
//! key/value pairs on the enclosing node or way.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use geo::Point;
use log::warn;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::model::{StreetMap, StreetNode, StreetWay};
use crate::Error;

/// Reads a street map from an OSM XML file.
///
/// # Errors
///
/// Returns an error when the file cannot be opened or the XML stream is
/// unreadable.
pub fn load_street_map(path: &Path) -> Result<StreetMap, Error> {
    let file = File::open(path)?;
    street_map_from_reader(BufReader::new(file))
}

/// Reads a street map from any OSM XML source.
///
/// # Errors
///
/// Returns an error when the XML stream itself is malformed; individual
/// bad elements are skipped, not fatal.
pub fn street_map_from_reader<R: BufRead>(source: R) -> Result<StreetMap, Error> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();

    let mut nodes: Vec<StreetNode> = Vec::new();
    let mut ways: Vec<StreetWay> = Vec::new();
    let mut current_node: Option<StreetNode> = None;
    let mut current_way: Option<StreetWay> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(element) => {
                open_element(&element, &mut current_node, &mut current_way);
            }
            Event::Empty(element) => {
                // Self-closing form: open and immediately close.
                open_element(&element, &mut current_node, &mut current_way);
                close_element(
                    element.name().as_ref(),
                    &mut nodes,
                    &mut ways,
                    &mut current_node,
                    &mut current_way,
                );
            }
            Event::End(element) => {
                close_element(
                    element.name().as_ref(),
                    &mut nodes,
                    &mut ways,
                    &mut current_node,
                    &mut current_way,
                );
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(StreetMap::new(nodes, ways))
}

fn open_element(
    element: &BytesStart,
    current_node: &mut Option<StreetNode>,
    current_way: &mut Option<StreetWay>,
) {
    match element.name().as_ref() {
        b"node" => {
            *current_way = None;
            *current_node = parse_node(element);
        }
        b"way" => {
            *current_node = None;
            *current_way = parse_way(element);
        }
        b"nd" => {
            if let Some(way) = current_way.as_mut() {
                let attributes = element_attributes(element);
                match attribute_value(&attributes, "ref").and_then(|v| v.parse().ok()) {
                    Some(node_id) => way.nodes.push(node_id),
                    None => warn!("Skipping <nd> with missing or unparsable ref"),
                }
            }
        }
        b"tag" => {
            let attributes = element_attributes(element);
            let key = attribute_value(&attributes, "k").filter(|k| !k.is_empty());
            if let Some(key) = key {
                let value = attribute_value(&attributes, "v").unwrap_or_default();
                let entry = (key.to_string(), value.to_string());
                if let Some(node) = current_node.as_mut() {
                    node.attributes.push(entry);
                } else if let Some(way) = current_way.as_mut() {
                    way.attributes.push(entry);
                }
            }
        }
        _ => {}
    }
}

fn close_element(
    name: &[u8],
    nodes: &mut Vec<StreetNode>,
    ways: &mut Vec<StreetWay>,
    current_node: &mut Option<StreetNode>,
    current_way: &mut Option<StreetWay>,
) {
    match name {
        b"node" => {
            if let Some(node) = current_node.take() {
                nodes.push(node);
            }
        }
        b"way" => {
            if let Some(way) = current_way.take() {
                ways.push(way);
            }
        }
        _ => {}
    }
}

fn parse_node(element: &BytesStart) -> Option<StreetNode> {
    let mut id = None;
    let mut lat = None;
    let mut lon = None;
    let mut attributes = Vec::new();

    for (key, value) in element_attributes(element) {
        match key.as_str() {
            "id" => id = value.parse::<u64>().ok(),
            "lat" => lat = value.parse::<f64>().ok(),
            "lon" => lon = value.parse::<f64>().ok(),
            _ => attributes.push((key, value)),
        }
    }

    let (Some(id), Some(lat), Some(lon)) = (id, lat, lon) else {
        warn!("Skipping <node> with missing or unparsable id/lat/lon");
        return None;
    };
    Some(StreetNode {
        id,
        geometry: Point::new(lon, lat),
        attributes,
    })
}

fn parse_way(element: &BytesStart) -> Option<StreetWay> {
    let mut id = None;
    let mut attributes = Vec::new();

    for (key, value) in element_attributes(element) {
        if key == "id" {
            id = value.parse::<u64>().ok();
        } else {
            attributes.push((key, value));
        }
    }

    let Some(id) = id else {
        warn!("Skipping <way> with missing or unparsable id");
        return None;
    };
    Some(StreetWay {
        id,
        nodes: Vec::new(),
        attributes,
    })
}

/// XML attributes as owned key/value strings, skipping malformed entries
/// with a diagnostic.
fn element_attributes(element: &BytesStart) -> Vec<(String, String)> {
    element
        .attributes()
        .filter_map(|attr| match attr {
            Ok(attr) => {
                let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                match attr.unescape_value() {
                    Ok(value) => Some((key, value.into_owned())),
                    Err(err) => {
                        warn!("Skipping malformed XML attribute {key}: {err}");
                        None
                    }
                }
            }
            Err(err) => {
                warn!("Skipping malformed XML attribute: {err}");
                None
            }
        })
        .collect()
}

fn attribute_value<'a>(attributes: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<osm version="0.6" generator="osmosis">
  <node id="1" lat="38.5" lon="-121.7" version="3">
    <tag k="highway" v="crossing"/>
  </node>
  <node id="2" lat="38.6" lon="-121.8"/>
  <node id="bogus" lat="0" lon="0"/>
  <way id="10">
    <nd ref="1"/>
    <nd ref="2"/>
    <nd ref="oops"/>
    <tag k="maxspeed" v="25 mph"/>
  </way>
</osm>"#;

    #[test]
    fn parses_nodes_ways_and_tags() {
        let map = street_map_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(map.node_count(), 2);
        assert_eq!(map.way_count(), 1);

        let node = map.node_by_id(1).unwrap();
        assert_eq!(node.geometry.y(), 38.5);
        assert_eq!(node.geometry.x(), -121.7);
        assert_eq!(node.attribute("highway"), Some("crossing"));
        // The version attribute is unknown but retained.
        assert_eq!(node.attribute("version"), Some("3"));

        let way = map.way_by_id(10).unwrap();
        assert_eq!(way.nodes, vec![1, 2]);
        assert_eq!(way.max_speed_mph(), Some(25.0));
    }

    #[test]
    fn malformed_node_is_skipped() {
        let map = street_map_from_reader(SAMPLE.as_bytes()).unwrap();
        assert!(map.node_by_id(0).is_none());
        assert_eq!(map.node_count(), 2);
    }

    #[test]
    fn empty_document() {
        let map = street_map_from_reader("<osm/>".as_bytes()).unwrap();
        assert_eq!(map.node_count(), 0);
        assert_eq!(map.way_count(), 0);
    }

    #[test]
    fn tags_attach_to_the_enclosing_element_only() {
        let xml = r#"<osm>
  <way id="1"><tag k="name" v="A St"/></way>
  <node id="5" lat="1" lon="2"><tag k="name" v="corner"/></node>
</osm>"#;
        let map = street_map_from_reader(xml.as_bytes()).unwrap();
        assert_eq!(map.way_by_id(1).unwrap().attribute("name"), Some("A St"));
        assert_eq!(map.node_by_id(5).unwrap().attribute("name"), Some("corner"));
    }
}
