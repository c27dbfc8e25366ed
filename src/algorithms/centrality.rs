use std::collections::BinaryHeap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::algorithms::pathfinding::{dijkstra_undirected, HeapEntry};
use crate::algorithms::{AlgorithmParams, GraphAlgorithm};
use crate::error::{GraphError, Result};
use crate::graph::{MailGraph, UndirectedView};

/// Tolerance for "same shortest-path cost" when counting path
/// multiplicities over floating-point edge costs.
const COST_EPSILON: f64 = 1e-12;

/// Which centrality measure the scorer consumes. Strategy selection is a
/// tagged enum, settable from configuration without recompilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CentralityKind {
    Betweenness,
    #[default]
    Closeness,
}

#[derive(Debug, Clone, Serialize)]
pub struct CentralityScore {
    pub node: String,
    pub score: f64,
}

/// Dispatches to the configured measure. Both run over the weighted
/// undirected projection with 1/weight distances, so relay structure is
/// judged by traffic strength regardless of direction.
pub struct CentralityEngine {
    kind: CentralityKind,
}

impl CentralityEngine {
    pub fn new(kind: CentralityKind) -> Self {
        Self { kind }
    }

    pub fn compute(&self, graph: &MailGraph) -> Result<Vec<CentralityScore>> {
        match self.kind {
            CentralityKind::Betweenness => BetweennessCentrality.compute(graph),
            CentralityKind::Closeness => ClosenessCentrality.compute(graph),
        }
    }
}

pub struct BetweennessCentrality;

impl BetweennessCentrality {
    /// Brandes' algorithm with per-source weighted Dijkstra. Sources fan
    /// out across the rayon pool and partial dependency sums reduce into
    /// one vector. Scores are normalized by the undirected pair count
    /// (n-1)(n-2)/2, so a node on every shortest path scores 1.
    pub fn compute(&self, graph: &MailGraph) -> Result<Vec<CentralityScore>> {
        if graph.is_empty() {
            return Err(GraphError::EmptyGraph);
        }

        let n = graph.node_count();
        let view = UndirectedView::build(graph);

        let mut centrality = (0..n)
            .into_par_iter()
            .map(|source| brandes_from_source(&view, source))
            .reduce(
                || vec![0.0; n],
                |mut total, partial| {
                    for (slot, value) in total.iter_mut().zip(partial) {
                        *slot += value;
                    }
                    total
                },
            );

        // Each unordered pair was counted from both endpoints.
        for value in &mut centrality {
            *value /= 2.0;
        }

        if n > 2 {
            let normalization = 2.0 / ((n - 1) as f64 * (n - 2) as f64);
            for value in &mut centrality {
                *value *= normalization;
            }
        }
        log::debug!("betweenness centrality accumulated over {} sources", n);

        Ok(attach_names(graph, centrality))
    }
}

/// One source iteration of Brandes: weighted Dijkstra tracking path
/// counts and predecessor lists, then dependency accumulation in reverse
/// settlement order.
fn brandes_from_source(view: &UndirectedView, source: usize) -> Vec<f64> {
    let n = view.node_count();
    let mut costs = vec![f64::INFINITY; n];
    let mut sigma = vec![0.0f64; n];
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut settled: Vec<usize> = Vec::new();
    let mut done = vec![false; n];
    let mut heap = BinaryHeap::new();
    let mut sequence = 0u64;

    costs[source] = 0.0;
    sigma[source] = 1.0;
    heap.push(HeapEntry {
        cost: 0.0,
        sequence,
        node: source,
    });

    while let Some(entry) = heap.pop() {
        if done[entry.node] {
            continue;
        }
        done[entry.node] = true;
        settled.push(entry.node);

        for &(neighbor, weight) in view.neighbors(entry.node) {
            let next_cost = costs[entry.node] + 1.0 / weight as f64;
            if next_cost + COST_EPSILON < costs[neighbor] {
                costs[neighbor] = next_cost;
                sigma[neighbor] = sigma[entry.node];
                predecessors[neighbor].clear();
                predecessors[neighbor].push(entry.node);
                sequence += 1;
                heap.push(HeapEntry {
                    cost: next_cost,
                    sequence,
                    node: neighbor,
                });
            } else if !done[neighbor] && (next_cost - costs[neighbor]).abs() <= COST_EPSILON {
                sigma[neighbor] += sigma[entry.node];
                predecessors[neighbor].push(entry.node);
            }
        }
    }

    let mut delta = vec![0.0f64; n];
    let mut dependency = vec![0.0f64; n];
    for &node in settled.iter().rev() {
        for &predecessor in &predecessors[node] {
            delta[predecessor] += sigma[predecessor] / sigma[node] * (1.0 + delta[node]);
        }
        if node != source {
            dependency[node] = delta[node];
        }
    }
    dependency
}

pub struct ClosenessCentrality;

impl ClosenessCentrality {
    /// Closeness in the Wasserman-Faust form: the inverse mean cost to
    /// reachable nodes, scaled by the fraction of nodes reachable, so a
    /// node in a small fragment cannot outrank a hub of the main
    /// component. An isolated node scores 0.
    pub fn compute(&self, graph: &MailGraph) -> Result<Vec<CentralityScore>> {
        if graph.is_empty() {
            return Err(GraphError::EmptyGraph);
        }

        let n = graph.node_count();
        if n <= 1 {
            return Ok(attach_names(graph, vec![0.0; n]));
        }

        let view = UndirectedView::build(graph);
        let mut centrality = Vec::with_capacity(n);
        for source in 0..n {
            let costs = dijkstra_undirected(&view, source, |weight| 1.0 / weight as f64);

            let mut total_cost = 0.0;
            let mut reachable = 0usize;
            for (target, cost) in costs.iter().enumerate() {
                if target != source && cost.is_finite() {
                    total_cost += cost;
                    reachable += 1;
                }
            }

            let closeness = if reachable > 0 && total_cost > 0.0 {
                let connectivity = reachable as f64 / (n - 1) as f64;
                connectivity * (reachable as f64 / total_cost)
            } else {
                0.0
            };
            centrality.push(closeness);
        }

        Ok(attach_names(graph, centrality))
    }
}

fn attach_names(graph: &MailGraph, scores: Vec<f64>) -> Vec<CentralityScore> {
    graph
        .node_ids()
        .zip(scores)
        .map(|(node, score)| CentralityScore {
            node: node.to_string(),
            score,
        })
        .collect()
}

/// Descending by score, ties by identifier, for stable reporting.
fn ranked(mut scores: Vec<CentralityScore>) -> Vec<CentralityScore> {
    scores.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.node.cmp(&b.node))
    });
    scores
}

impl GraphAlgorithm for BetweennessCentrality {
    fn execute(&self, graph: &MailGraph, _params: &AlgorithmParams) -> Result<serde_json::Value> {
        let scores = ranked(self.compute(graph)?);
        serde_json::to_value(scores).map_err(GraphError::from)
    }

    fn name(&self) -> &'static str {
        "betweenness_centrality"
    }

    fn description(&self) -> &'static str {
        "Calculate betweenness centrality using Brandes' algorithm over weighted paths"
    }
}

impl GraphAlgorithm for ClosenessCentrality {
    fn execute(&self, graph: &MailGraph, _params: &AlgorithmParams) -> Result<serde_json::Value> {
        let scores = ranked(self.compute(graph)?);
        serde_json::to_value(scores).map_err(GraphError::from)
    }

    fn name(&self) -> &'static str {
        "closeness_centrality"
    }

    fn description(&self) -> &'static str {
        "Calculate closeness centrality over the weighted undirected projection"
    }
}
