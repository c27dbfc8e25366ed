use std::cmp::Ordering;

use serde::Serialize;

use crate::algorithms::{AlgorithmParams, GraphAlgorithm};
use crate::error::{GraphError, Result};
use crate::graph::{MailGraph, UndirectedView};

/// Disjoint-set forest over dense node indices, with path compression and
/// union by rank.
#[derive(Debug)]
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = node;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        match self.rank[root_a].cmp(&self.rank[root_b]) {
            Ordering::Less => self.parent[root_a] = root_b,
            Ordering::Greater => self.parent[root_b] = root_a,
            Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        true
    }
}

/// One backbone edge selected by Kruskal's algorithm.
#[derive(Debug, Clone, Serialize)]
pub struct ForestEdge {
    pub source: String,
    pub target: String,
    /// Combined traffic volume of both directions.
    pub weight: u64,
    pub cost: f64,
}

/// The minimum spanning forest over the cost transform: exactly `V - C`
/// edges for `C` connected components, favoring high-traffic links.
#[derive(Debug, Clone, Serialize)]
pub struct ForestResult {
    pub edges: Vec<ForestEdge>,
    pub total_cost: f64,
    pub total_weight: u64,
    pub average_edge_weight: f64,
    pub component_count: usize,
}

pub struct MinimumSpanningForest;

impl MinimumSpanningForest {
    /// Kruskal over the undirected weight projection. Candidate edges are
    /// sorted by cost (1/weight) ascending, so heavily-used links form
    /// the communication backbone; ties break by first-insertion order.
    pub fn compute(&self, graph: &MailGraph) -> Result<ForestResult> {
        if graph.is_empty() {
            return Err(GraphError::EmptyGraph);
        }

        let view = UndirectedView::build(graph);
        let mut order: Vec<usize> = (0..view.edges().len()).collect();
        order.sort_by(|&a, &b| {
            view.edges()[a]
                .cost()
                .partial_cmp(&view.edges()[b].cost())
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.cmp(&b))
        });

        let mut union_find = UnionFind::new(graph.node_count());
        let mut edges = Vec::new();
        let mut total_cost = 0.0;
        let mut total_weight = 0u64;

        for index in order {
            let candidate = view.edges()[index];
            if candidate.a == candidate.b {
                continue;
            }
            if union_find.union(candidate.a, candidate.b) {
                total_cost += candidate.cost();
                total_weight += candidate.weight;
                edges.push(ForestEdge {
                    source: graph.node_id(candidate.a).to_string(),
                    target: graph.node_id(candidate.b).to_string(),
                    weight: candidate.weight,
                    cost: candidate.cost(),
                });
            }
        }

        let component_count = graph.node_count() - edges.len();
        log::debug!(
            "spanning forest selected {} of {} candidate edges ({} components)",
            edges.len(),
            view.edges().len(),
            component_count
        );

        let average_edge_weight = if edges.is_empty() {
            0.0
        } else {
            total_weight as f64 / edges.len() as f64
        };

        Ok(ForestResult {
            edges,
            total_cost,
            total_weight,
            average_edge_weight,
            component_count,
        })
    }
}

impl GraphAlgorithm for MinimumSpanningForest {
    fn execute(&self, graph: &MailGraph, _params: &AlgorithmParams) -> Result<serde_json::Value> {
        let result = self.compute(graph)?;
        serde_json::to_value(result).map_err(GraphError::from)
    }

    fn name(&self) -> &'static str {
        "minimum_spanning_forest"
    }

    fn description(&self) -> &'static str {
        "Extract the high-traffic communication backbone using Kruskal's algorithm"
    }
}
