use std::collections::BTreeMap;

use platnav_core::{Aabb, FlightConfig, NavPath, Navigator, Occupancy, Vec2, WaypointConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{astar, flight_layout, SearchScratch};

/// Stable index of a node within one [`WaypointGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WaypointNode {
    pub position: Vec2,
    connections: Vec<NodeId>,
}

impl WaypointNode {
    pub fn connections(&self) -> &[NodeId] {
        &self.connections
    }
}

/// Placed nodes with directed adjacency lists.
///
/// Nodes are only removed by [`WaypointGraph::clear`], so a `NodeId` stays valid until then.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WaypointGraph {
    nodes: Vec<WaypointNode>,
    search_budget: usize,
}

impl Default for WaypointGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl WaypointGraph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            search_budget: WaypointConfig::default().max_visits,
        }
    }

    pub fn from_positions(positions: impl IntoIterator<Item = Vec2>) -> Self {
        let mut graph = Self::new();
        for p in positions {
            graph.add_node(p);
        }
        graph
    }

    /// Lay out flight nodes over `bounds` and connect them.
    pub fn flight(
        oracle: &dyn Occupancy,
        bounds: Aabb,
        flight: &FlightConfig,
        waypoint: &WaypointConfig,
    ) -> Self {
        let positions = flight_layout(oracle, bounds, flight);
        let mut graph = Self::from_positions(positions).with_search_budget(waypoint.max_visits);
        graph.synthesize_connections(oracle, waypoint);
        graph
    }

    /// Node expansion limit used by [`Navigator::find_path`].
    pub fn with_search_budget(mut self, max_visits: usize) -> Self {
        self.search_budget = max_visits;
        self
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn add_node(&mut self, position: Vec2) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(WaypointNode {
            position,
            connections: Vec::new(),
        });
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&WaypointNode> {
        self.nodes.get(id.index())
    }

    pub fn position(&self, id: NodeId) -> Option<Vec2> {
        self.node(id).map(|n| n.position)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &WaypointNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    /// Add a directed edge `a -> b`. Duplicate edges are ignored.
    ///
    /// # Panics
    /// If either id is not in the graph.
    pub fn connect(&mut self, a: NodeId, b: NodeId) {
        assert!(self.contains(a), "unknown node {a:?}");
        assert!(self.contains(b), "unknown node {b:?}");
        let connections = &mut self.nodes[a.index()].connections;
        if a != b && !connections.contains(&b) {
            connections.push(b);
        }
    }

    /// Add edges in both directions.
    pub fn connect_bidirectional(&mut self, a: NodeId, b: NodeId) {
        self.connect(a, b);
        self.connect(b, a);
    }

    /// Outgoing neighbors of `id` (empty for unknown ids).
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.node(id)
            .map(|n| n.connections.as_slice())
            .unwrap_or_default()
    }

    /// All directed edges, ordered by source id.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes()
            .flat_map(|(id, n)| n.connections.iter().map(move |&to| (id, to)))
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.connections.len()).sum()
    }

    /// Closest node to `pos`; the lowest id wins ties.
    pub fn nearest_node(&self, pos: Vec2) -> Option<NodeId> {
        let mut best: Option<(NodeId, f32)> = None;
        for (id, node) in self.nodes() {
            let d = node.position.distance_squared(pos);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((id, d));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Farthest node from `pos`; the lowest id wins ties.
    pub fn furthest_node(&self, pos: Vec2) -> Option<NodeId> {
        let mut best: Option<(NodeId, f32)> = None;
        for (id, node) in self.nodes() {
            let d = node.position.distance_squared(pos);
            if best.map_or(true, |(_, bd)| d > bd) {
                best = Some((id, d));
            }
        }
        best.map(|(id, _)| id)
    }

    pub fn clear_connections(&mut self) {
        for node in &mut self.nodes {
            node.connections.clear();
        }
    }

    /// Remove every node. Previously issued ids become invalid.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Replace all adjacency with scored connections. Returns the number of directed edges.
    ///
    /// A pair qualifies when it is within `max_connection_distance`, its height gap is within
    /// `max_height_difference`, and the oracle reports line of sight. Each node then keeps its
    /// best `max_connections_per_node` candidates by
    /// `(1 - d / max_d) + horizontal_preference * (1 - |dy| / d)`, plus `same_layer_bonus` when
    /// `|dy| <= same_layer_tolerance`. Equal scores keep the lower id.
    pub fn synthesize_connections(&mut self, oracle: &dyn Occupancy, config: &WaypointConfig) -> usize {
        let max_d = config.max_connection_distance;
        if max_d <= 0.0 || self.nodes.is_empty() {
            self.clear_connections();
            return 0;
        }

        let buckets = self.buckets(max_d);
        let max_d2 = max_d * max_d;
        let mut adjacency = Vec::with_capacity(self.nodes.len());
        let mut candidates: Vec<(f32, NodeId)> = Vec::new();

        for (id, node) in self.nodes() {
            candidates.clear();
            let p = node.position;
            let (cx, cy) = bucket_for(p, max_d);

            for dy in -1..=1 {
                for dx in -1..=1 {
                    let Some(bucket) = buckets.get(&(cx + dx, cy + dy)) else {
                        continue;
                    };
                    for &other in bucket {
                        if other == id {
                            continue;
                        }
                        let q = self.nodes[other.index()].position;
                        let d2 = p.distance_squared(q);
                        let height = (q.y - p.y).abs();
                        if d2 > max_d2 || height > config.max_height_difference {
                            continue;
                        }
                        if !oracle.has_line_of_sight(p, q) {
                            continue;
                        }
                        candidates.push((connection_score(d2.sqrt(), height, config), other));
                    }
                }
            }

            candidates.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
            candidates.truncate(config.max_connections_per_node);
            adjacency.push(candidates.iter().map(|&(_, other)| other).collect::<Vec<_>>());
        }

        let mut edges = 0;
        for (node, connections) in self.nodes.iter_mut().zip(adjacency) {
            edges += connections.len();
            node.connections = connections;
        }

        tracing::debug!(nodes = self.nodes.len(), edges, "Synthesized waypoint connections");
        edges
    }

    fn buckets(&self, cell_size: f32) -> BTreeMap<(i32, i32), Vec<NodeId>> {
        let mut buckets: BTreeMap<(i32, i32), Vec<NodeId>> = BTreeMap::new();
        for (id, node) in self.nodes() {
            buckets
                .entry(bucket_for(node.position, cell_size))
                .or_default()
                .push(id);
        }
        buckets
    }
}

fn bucket_for(p: Vec2, cell_size: f32) -> (i32, i32) {
    let cs = cell_size.max(1e-6);
    ((p.x / cs).floor() as i32, (p.y / cs).floor() as i32)
}

fn connection_score(distance: f32, height: f32, config: &WaypointConfig) -> f32 {
    let closeness = 1.0 - distance / config.max_connection_distance;
    let horizontal = if distance <= f32::EPSILON {
        1.0
    } else {
        1.0 - height / distance
    };
    let mut score = closeness + config.horizontal_preference * horizontal;
    if height <= config.same_layer_tolerance {
        score += config.same_layer_bonus;
    }
    score
}

impl Navigator for WaypointGraph {
    fn find_path(&self, start: Vec2, goal: Vec2) -> Option<NavPath> {
        let from = self.nearest_node(start)?;
        let to = self.nearest_node(goal)?;
        let mut scratch = SearchScratch::default();
        let path = astar(self, &mut scratch, from, to, self.search_budget)?;
        Some(path.to_nav_path())
    }

    fn nearest_point(&self, point: Vec2) -> Option<Vec2> {
        self.nearest_node(point).and_then(|id| self.position(id))
    }
}
