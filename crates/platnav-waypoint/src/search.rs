use core::cmp::Ordering;
use std::collections::BinaryHeap;

use platnav_core::{NavPath, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{NodeId, WaypointGraph};

#[derive(Debug, Clone, Copy)]
struct OpenNode {
    f: f32,
    g: f32,
    node: NodeId,
    tie: u64,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.tie.cmp(&self.tie))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of one successful search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WaypointPath {
    pub nodes: Vec<NodeId>,
    pub points: Vec<Vec2>,
    /// Sum of Euclidean edge lengths.
    pub cost: f32,
}

impl WaypointPath {
    pub fn to_nav_path(&self) -> NavPath {
        NavPath::new(self.points.clone())
    }
}

/// Reusable per-search working table.
///
/// Every buffer is reset for the whole node set at the start of each search, so one scratch
/// can serve any number of graphs and queries.
#[derive(Debug, Default)]
pub struct SearchScratch {
    open: BinaryHeap<OpenNode>,
    g_score: Vec<f32>,
    came_from: Vec<Option<NodeId>>,
    closed: Vec<bool>,
    expanded: usize,
    last_path: Option<WaypointPath>,
}

impl SearchScratch {
    /// Path produced by the most recent successful search; `None` after a failed one.
    pub fn last_path(&self) -> Option<&WaypointPath> {
        self.last_path.as_ref()
    }

    /// Nodes expanded by the most recent search.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    fn reset(&mut self, n: usize) {
        self.open.clear();
        self.g_score.clear();
        self.g_score.resize(n, f32::INFINITY);
        self.came_from.clear();
        self.came_from.resize(n, None);
        self.closed.clear();
        self.closed.resize(n, false);
        self.expanded = 0;
        self.last_path = None;
    }

    fn reconstruct(&self, graph: &WaypointGraph, goal: NodeId) -> WaypointPath {
        let mut nodes = vec![goal];
        let mut current = goal;
        while let Some(prev) = self.came_from[current.index()] {
            current = prev;
            nodes.push(current);
        }
        nodes.reverse();

        let points: Vec<Vec2> = nodes
            .iter()
            .filter_map(|&id| graph.position(id))
            .collect();
        WaypointPath {
            nodes,
            points,
            cost: self.g_score[goal.index()],
        }
    }
}

/// A* from `start` to `goal` over the graph's directed edges.
///
/// Returns `None` when the goal is unreachable or more than `max_visits` nodes would have to
/// be expanded.
///
/// # Panics
/// If `start` or `goal` is not a node of `graph`.
pub fn astar(
    graph: &WaypointGraph,
    scratch: &mut SearchScratch,
    start: NodeId,
    goal: NodeId,
    max_visits: usize,
) -> Option<WaypointPath> {
    assert!(graph.contains(start), "unknown start node {start:?}");
    assert!(graph.contains(goal), "unknown goal node {goal:?}");

    scratch.reset(graph.len());
    let position = |id: NodeId| graph.position(id).unwrap_or_default();
    let goal_pos = position(goal);

    scratch.g_score[start.index()] = 0.0;
    scratch.open.push(OpenNode {
        f: position(start).distance(goal_pos),
        g: 0.0,
        node: start,
        tie: 0,
    });
    let mut tie: u64 = 1;

    while let Some(open) = scratch.open.pop() {
        let current = open.node;
        if scratch.closed[current.index()] || open.g > scratch.g_score[current.index()] {
            // Stale heap entry.
            continue;
        }

        if current == goal {
            let path = scratch.reconstruct(graph, goal);
            tracing::debug!(
                nodes = path.nodes.len(),
                cost = path.cost,
                expanded = scratch.expanded,
                "A* found path"
            );
            scratch.last_path = Some(path.clone());
            return Some(path);
        }

        if scratch.expanded >= max_visits {
            tracing::debug!(max_visits, "A* visit budget exhausted");
            return None;
        }
        scratch.expanded += 1;
        scratch.closed[current.index()] = true;

        let current_pos = position(current);
        for &next in graph.neighbors(current) {
            if scratch.closed[next.index()] {
                continue;
            }
            let next_pos = position(next);
            let tentative = open.g + current_pos.distance(next_pos);
            if tentative >= scratch.g_score[next.index()] {
                continue;
            }

            scratch.came_from[next.index()] = Some(current);
            scratch.g_score[next.index()] = tentative;
            scratch.open.push(OpenNode {
                f: tentative + next_pos.distance(goal_pos),
                g: tentative,
                node: next,
                tie,
            });
            tie += 1;
        }
    }

    tracing::debug!(expanded = scratch.expanded, "A* found no path");
    None
}
