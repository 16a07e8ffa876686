//! The transportation planner: shortest- and fastest-path queries

use std::cell::OnceCell;
use std::sync::Arc;

use crate::config::PlannerConfig;
use crate::model::{BusSystemIndexer, StreetNode};
use crate::{Error, NodeId, NO_PATH_EXISTS};

use super::dijkstra;
use super::graph::{build_graphs, MultimodalGraphs};
use super::itinerary::{self, Mode, TripStep};

/// Answers shortest-distance and fastest-time queries between street nodes.
///
/// The planner starts unbuilt; the first path query materialises both
/// graphs and later queries reuse them. The lazy caches are not
/// synchronised, so share a planner across threads only after its first
/// query has completed, or give each worker its own.
pub struct TransportationPlanner {
    config: PlannerConfig,
    indexer: BusSystemIndexer,
    sorted_nodes: OnceCell<Vec<usize>>,
    graphs: OnceCell<MultimodalGraphs>,
}

impl TransportationPlanner {
    /// Creates a planner around a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` when a tunable is rejected by
    /// [`PlannerConfig::validate`].
    pub fn new(config: PlannerConfig) -> Result<Self, Error> {
        config.validate()?;
        let indexer = BusSystemIndexer::new(Arc::clone(&config.bus_system));
        Ok(Self {
            config,
            indexer,
            sorted_nodes: OnceCell::new(),
            graphs: OnceCell::new(),
        })
    }

    fn graphs(&self) -> &MultimodalGraphs {
        self.graphs.get_or_init(|| build_graphs(&self.config))
    }

    /// Number of nodes in the street map.
    pub fn node_count(&self) -> usize {
        self.config.street_map.node_count()
    }

    /// The i-th street node in ascending node-ID order.
    pub fn sorted_node_by_index(&self, index: usize) -> Option<&StreetNode> {
        let street_map = &self.config.street_map;
        let order = self.sorted_nodes.get_or_init(|| {
            let mut indices: Vec<usize> = (0..street_map.node_count()).collect();
            indices.sort_by_key(|&idx| street_map.nodes()[idx].id);
            indices
        });
        order
            .get(index)
            .and_then(|&idx| street_map.node_by_index(idx))
    }

    /// Distance in miles of the shortest street path from `src` to `dest`;
    /// `path` receives the node IDs from `src` to `dest` inclusive.
    ///
    /// Returns `NO_PATH_EXISTS` (and empties `path`) for unknown or
    /// unreachable endpoints.
    pub fn find_shortest_path(&self, src: NodeId, dest: NodeId, path: &mut Vec<NodeId>) -> f64 {
        path.clear();
        let graphs = self.graphs();
        let (Some(&from), Some(&to)) = (
            graphs.distance_vertices.get(&src),
            graphs.distance_vertices.get(&dest),
        ) else {
            return NO_PATH_EXISTS;
        };

        let mut vertices = Vec::new();
        let miles = graphs.distance.find_shortest_path(from, to, &mut vertices);
        if miles == NO_PATH_EXISTS {
            return NO_PATH_EXISTS;
        }
        path.extend(
            vertices
                .iter()
                .filter_map(|&vertex| graphs.distance.vertex_tag(vertex).copied()),
        );
        miles
    }

    /// Time in hours of the fastest multimodal path from `src` to `dest`;
    /// `steps` receives the mode-annotated trip starting with
    /// `(Walk, src)`.
    ///
    /// Returns `NO_PATH_EXISTS` (and empties `steps`) for unknown or
    /// unreachable endpoints.
    pub fn find_fastest_path(&self, src: NodeId, dest: NodeId, steps: &mut Vec<TripStep>) -> f64 {
        steps.clear();
        let graphs = self.graphs();
        let (Some(&from), Some(&to)) = (
            graphs.time_vertices.get(&src),
            graphs.time_vertices.get(&dest),
        ) else {
            return NO_PATH_EXISTS;
        };

        if from == to {
            steps.push(TripStep {
                mode: Mode::Walk,
                node_id: src,
            });
            return 0.0;
        }

        match dijkstra::fastest_path(&graphs.time, from, to) {
            Some((hours, trip)) => {
                *steps = trip;
                hours
            }
            None => NO_PATH_EXISTS,
        }
    }

    /// Renders `steps` into one human-readable line per step.
    ///
    /// Returns false (with `lines` emptied) when there is nothing to
    /// describe.
    pub fn path_description(&self, steps: &[TripStep], lines: &mut Vec<String>) -> bool {
        itinerary::describe_steps(steps, &self.indexer, lines)
    }

    /// The indexer over the planner's bus system.
    pub fn bus_indexer(&self) -> &BusSystemIndexer {
        &self.indexer
    }

    /// The configuration the planner was built around.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }
}
