use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::Serialize;

use crate::algorithms::{AlgorithmParams, GraphAlgorithm};
use crate::error::{GraphError, Result};
use crate::graph::{Direction, MailGraph, UndirectedView};

/// Heap entry for Dijkstra. Ordering is reversed for min-heap behavior;
/// equal costs fall back to the monotone insertion sequence so traversal
/// order is reproducible run to run.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct HeapEntry {
    pub cost: f64,
    pub sequence: u64,
    pub node: usize,
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Single-source Dijkstra over directed out-edges with the 1/weight cost
/// transform. Returns per-node cost and predecessor; unreachable nodes
/// keep `f64::INFINITY`.
pub(crate) fn dijkstra_directed(graph: &MailGraph, source: usize) -> (Vec<f64>, Vec<Option<usize>>) {
    let n = graph.node_count();
    let mut costs = vec![f64::INFINITY; n];
    let mut previous: Vec<Option<usize>> = vec![None; n];
    let mut heap = BinaryHeap::new();
    let mut sequence = 0u64;

    costs[source] = 0.0;
    heap.push(HeapEntry {
        cost: 0.0,
        sequence,
        node: source,
    });

    while let Some(entry) = heap.pop() {
        if entry.cost > costs[entry.node] {
            continue;
        }
        for edge in graph.adjacent_edges(entry.node, Direction::Out) {
            let next_cost = entry.cost + edge.cost();
            if next_cost < costs[edge.target] {
                costs[edge.target] = next_cost;
                previous[edge.target] = Some(entry.node);
                sequence += 1;
                heap.push(HeapEntry {
                    cost: next_cost,
                    sequence,
                    node: edge.target,
                });
            }
        }
    }

    (costs, previous)
}

/// Single-source Dijkstra over the undirected projection with an
/// arbitrary weight-to-cost mapping. Shared by the centrality and metrics
/// engines (hop counting uses a constant cost).
pub(crate) fn dijkstra_undirected<F>(view: &UndirectedView, source: usize, edge_cost: F) -> Vec<f64>
where
    F: Fn(u64) -> f64,
{
    let n = view.node_count();
    let mut costs = vec![f64::INFINITY; n];
    let mut heap = BinaryHeap::new();
    let mut sequence = 0u64;

    costs[source] = 0.0;
    heap.push(HeapEntry {
        cost: 0.0,
        sequence,
        node: source,
    });

    while let Some(entry) = heap.pop() {
        if entry.cost > costs[entry.node] {
            continue;
        }
        for &(neighbor, weight) in view.neighbors(entry.node) {
            let next_cost = entry.cost + edge_cost(weight);
            if next_cost < costs[neighbor] {
                costs[neighbor] = next_cost;
                sequence += 1;
                heap.push(HeapEntry {
                    cost: next_cost,
                    sequence,
                    node: neighbor,
                });
            }
        }
    }

    costs
}

/// One shortest-path answer. An unreachable target is a valid outcome
/// (disconnected senders are common and diagnostic), reported as `None`
/// rather than an error.
#[derive(Debug, Clone, Serialize)]
pub struct PathResult {
    pub source: String,
    pub target: String,
    pub path: Option<Vec<String>>,
    pub cost: Option<f64>,
    pub hops: usize,
}

impl PathResult {
    pub fn is_reachable(&self) -> bool {
        self.path.is_some()
    }
}

/// Per-edge detail of a concrete path through the graph.
#[derive(Debug, Clone, Serialize)]
pub struct PathMetadata {
    pub hop_count: usize,
    pub edge_weights: Vec<u64>,
    pub total_weight: u64,
    pub average_weight: f64,
}

pub struct ShortestPath;

impl ShortestPath {
    /// Cheapest relay path from `source` to `target` under the 1/weight
    /// cost transform: heavily-used links are preferred. `source ==
    /// target` yields the zero-length path at cost 0.
    pub fn shortest_path(
        &self,
        graph: &MailGraph,
        source: &str,
        target: &str,
    ) -> Result<PathResult> {
        let src = graph.index_of(source)?;
        let dst = graph.index_of(target)?;

        if src == dst {
            return Ok(PathResult {
                source: source.to_string(),
                target: target.to_string(),
                path: Some(vec![source.to_string()]),
                cost: Some(0.0),
                hops: 0,
            });
        }

        let (costs, previous) = dijkstra_directed(graph, src);
        if costs[dst].is_infinite() {
            return Ok(PathResult {
                source: source.to_string(),
                target: target.to_string(),
                path: None,
                cost: None,
                hops: 0,
            });
        }

        let path = reconstruct_path(graph, &previous, dst);
        Ok(PathResult {
            source: source.to_string(),
            target: target.to_string(),
            hops: path.len() - 1,
            path: Some(path),
            cost: Some(costs[dst]),
        })
    }

    /// Shortest paths from `source` to every reachable node, in node
    /// insertion order. The source itself is not listed.
    pub fn paths_from(&self, graph: &MailGraph, source: &str) -> Result<Vec<PathResult>> {
        let src = graph.index_of(source)?;
        let (costs, previous) = dijkstra_directed(graph, src);

        let mut results = Vec::new();
        for (index, cost) in costs.iter().enumerate() {
            if index == src || cost.is_infinite() {
                continue;
            }
            let path = reconstruct_path(graph, &previous, index);
            results.push(PathResult {
                source: source.to_string(),
                target: graph.node_id(index).to_string(),
                hops: path.len() - 1,
                path: Some(path),
                cost: Some(*cost),
            });
        }
        Ok(results)
    }

    /// Raw-weight detail for a path previously returned by this engine.
    pub fn path_metadata(&self, graph: &MailGraph, path: &[String]) -> Result<PathMetadata> {
        if path.len() < 2 {
            return Ok(PathMetadata {
                hop_count: 0,
                edge_weights: Vec::new(),
                total_weight: 0,
                average_weight: 0.0,
            });
        }

        let mut edge_weights = Vec::with_capacity(path.len() - 1);
        let mut total_weight = 0u64;
        for pair in path.windows(2) {
            let edge = graph.edge_between(&pair[0], &pair[1])?.ok_or_else(|| {
                GraphError::invalid_parameter(format!(
                    "no edge between {} and {} on supplied path",
                    pair[0], pair[1]
                ))
            })?;
            edge_weights.push(edge.weight);
            total_weight += edge.weight;
        }

        let hop_count = path.len() - 1;
        Ok(PathMetadata {
            hop_count,
            average_weight: total_weight as f64 / hop_count as f64,
            edge_weights,
            total_weight,
        })
    }
}

fn reconstruct_path(graph: &MailGraph, previous: &[Option<usize>], target: usize) -> Vec<String> {
    let mut path = Vec::new();
    let mut current = Some(target);
    while let Some(node) = current {
        path.push(graph.node_id(node).to_string());
        current = previous[node];
    }
    path.reverse();
    path
}

impl GraphAlgorithm for ShortestPath {
    fn execute(&self, graph: &MailGraph, params: &AlgorithmParams) -> Result<serde_json::Value> {
        let source: String = params
            .get("source")
            .ok_or_else(|| GraphError::invalid_parameter("source parameter required"))?;

        match params.get::<String>("target") {
            Some(target) => {
                let result = self.shortest_path(graph, &source, &target)?;
                serde_json::to_value(result).map_err(GraphError::from)
            }
            None => {
                let results = self.paths_from(graph, &source)?;
                serde_json::to_value(results).map_err(GraphError::from)
            }
        }
    }

    fn name(&self) -> &'static str {
        "shortest_path"
    }

    fn description(&self) -> &'static str {
        "Find the cheapest relay path between senders using Dijkstra's algorithm"
    }
}
