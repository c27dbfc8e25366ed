use std::collections::BTreeMap;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::algorithms::pathfinding::dijkstra_undirected;
use crate::algorithms::{AlgorithmParams, GraphAlgorithm};
use crate::error::{GraphError, Result};
use crate::graph::{Direction, MailGraph, UndirectedView};

/// Whether the diameter measures hop count or the 1/weight cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DiameterMode {
    #[default]
    Hops,
    Cost,
}

/// Diameter of the undirected projection. A disconnected graph is
/// reported as such, never conflated with a finite value; a graph with
/// fewer than two nodes has no defined diameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Diameter {
    Finite(f64),
    Disconnected,
    Undefined,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClusteringScore {
    pub node: String,
    pub coefficient: f64,
}

/// Histograms of degree across all nodes: value -> node count.
#[derive(Debug, Clone, Serialize)]
pub struct DegreeDistribution {
    pub out_unweighted: BTreeMap<usize, usize>,
    pub in_unweighted: BTreeMap<usize, usize>,
    pub out_weighted: BTreeMap<u64, usize>,
    pub in_weighted: BTreeMap<u64, usize>,
}

/// All scalar metrics in one record, for one-shot reporting.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub average_degree: f64,
    pub diameter: Diameter,
    pub average_path_length: Option<f64>,
    pub average_clustering: f64,
    pub triangle_count: u64,
}

pub struct NetworkMetrics;

impl NetworkMetrics {
    /// Edge count over the maximum for a directed simple graph,
    /// V * (V - 1). Defined as 0 when V <= 1.
    pub fn density(&self, graph: &MailGraph) -> f64 {
        let n = graph.node_count() as f64;
        let m = graph.edge_count() as f64;
        if n <= 1.0 {
            0.0
        } else {
            m / (n * (n - 1.0))
        }
    }

    /// Maximum shortest-path distance over all node pairs of the
    /// undirected projection. All-pairs via repeated Dijkstra.
    pub fn diameter(&self, graph: &MailGraph, mode: DiameterMode) -> Diameter {
        let n = graph.node_count();
        if n <= 1 {
            return Diameter::Undefined;
        }

        let view = UndirectedView::build(graph);
        let mut maximum = 0.0f64;
        for source in 0..n {
            let costs = match mode {
                DiameterMode::Hops => dijkstra_undirected(&view, source, |_| 1.0),
                DiameterMode::Cost => {
                    dijkstra_undirected(&view, source, |weight| 1.0 / weight as f64)
                }
            };
            for (target, cost) in costs.iter().enumerate() {
                if target == source {
                    continue;
                }
                if cost.is_infinite() {
                    return Diameter::Disconnected;
                }
                maximum = maximum.max(*cost);
            }
        }
        Diameter::Finite(maximum)
    }

    /// Per-node local clustering: the fraction of a node's neighbor pairs
    /// that are themselves connected. Nodes with fewer than two neighbors
    /// score 0.
    pub fn local_clustering(&self, graph: &MailGraph) -> Vec<ClusteringScore> {
        let view = UndirectedView::build(graph);
        let neighbor_sets = neighbor_sets(&view);

        (0..graph.node_count())
            .map(|node| {
                let neighbors = view.neighbors(node);
                let k = neighbors.len();
                let coefficient = if k < 2 {
                    0.0
                } else {
                    let mut links = 0usize;
                    for (i, &(a, _)) in neighbors.iter().enumerate() {
                        for &(b, _) in &neighbors[i + 1..] {
                            if neighbor_sets[a].contains(&b) {
                                links += 1;
                            }
                        }
                    }
                    2.0 * links as f64 / (k * (k - 1)) as f64
                };
                ClusteringScore {
                    node: graph.node_id(node).to_string(),
                    coefficient,
                }
            })
            .collect()
    }

    /// Mean local clustering over all nodes; 0 for an empty graph.
    pub fn average_clustering(&self, graph: &MailGraph) -> f64 {
        let scores = self.local_clustering(graph);
        if scores.is_empty() {
            return 0.0;
        }
        scores.iter().map(|score| score.coefficient).sum::<f64>() / scores.len() as f64
    }

    pub fn degree_distribution(&self, graph: &MailGraph) -> DegreeDistribution {
        let mut distribution = DegreeDistribution {
            out_unweighted: BTreeMap::new(),
            in_unweighted: BTreeMap::new(),
            out_weighted: BTreeMap::new(),
            in_weighted: BTreeMap::new(),
        };
        for node in 0..graph.node_count() {
            let out = graph.degree_at(node, Direction::Out);
            let incoming = graph.degree_at(node, Direction::In);
            *distribution.out_unweighted.entry(out.distinct).or_insert(0) += 1;
            *distribution.in_unweighted.entry(incoming.distinct).or_insert(0) += 1;
            *distribution.out_weighted.entry(out.weighted).or_insert(0) += 1;
            *distribution.in_weighted.entry(incoming.weighted).or_insert(0) += 1;
        }
        distribution
    }

    /// Mean undirected degree, 2E / V. 0 for an empty graph.
    pub fn average_degree(&self, graph: &MailGraph) -> f64 {
        let n = graph.node_count();
        if n == 0 {
            return 0.0;
        }
        2.0 * graph.edge_count() as f64 / n as f64
    }

    /// Mean shortest-path hop count within the largest weak component
    /// (the graph-wide mean is undefined for disconnected graphs, so the
    /// largest-component convention is made explicit here). `None` for an
    /// empty graph; 0 when the largest component is a single node.
    pub fn average_path_length(&self, graph: &MailGraph) -> Option<f64> {
        let n = graph.node_count();
        if n == 0 {
            return None;
        }

        let view = UndirectedView::build(graph);
        let members = largest_component(&view);
        if members.len() <= 1 {
            return Some(0.0);
        }

        let mut total = 0.0;
        let mut pairs = 0usize;
        for &source in &members {
            let costs = dijkstra_undirected(&view, source, |_| 1.0);
            for &target in &members {
                if target != source && costs[target].is_finite() {
                    total += costs[target];
                    pairs += 1;
                }
            }
        }
        Some(total / pairs as f64)
    }

    /// Count of undirected triangles, via common-neighbor intersection
    /// per edge. Each triangle is seen once per edge, hence the final
    /// division by three.
    pub fn triangle_count(&self, graph: &MailGraph) -> u64 {
        let view = UndirectedView::build(graph);
        let neighbor_sets = neighbor_sets(&view);

        let mut incidences = 0u64;
        for edge in view.edges() {
            if edge.a == edge.b {
                continue;
            }
            let (small, large) = if neighbor_sets[edge.a].len() <= neighbor_sets[edge.b].len() {
                (&neighbor_sets[edge.a], &neighbor_sets[edge.b])
            } else {
                (&neighbor_sets[edge.b], &neighbor_sets[edge.a])
            };
            incidences += small.iter().filter(|node| large.contains(*node)).count() as u64;
        }
        incidences / 3
    }

    /// Unweighted out-degrees, descending. Characterizes broadcast
    /// structure at a glance.
    pub fn degree_sequence(&self, graph: &MailGraph) -> Vec<usize> {
        let mut sequence: Vec<usize> = (0..graph.node_count())
            .map(|node| graph.degree_at(node, Direction::Out).distinct)
            .collect();
        sequence.sort_unstable_by(|a, b| b.cmp(a));
        sequence
    }

    /// The busiest broadcaster: node with the most distinct recipients.
    /// First-inserted wins ties.
    pub fn max_out_degree_node(&self, graph: &MailGraph) -> Option<(String, usize)> {
        self.max_degree_node(graph, Direction::Out)
    }

    /// The most-targeted recipient: node with the most distinct senders.
    pub fn max_in_degree_node(&self, graph: &MailGraph) -> Option<(String, usize)> {
        self.max_degree_node(graph, Direction::In)
    }

    fn max_degree_node(&self, graph: &MailGraph, direction: Direction) -> Option<(String, usize)> {
        (0..graph.node_count())
            .map(|node| (node, graph.degree_at(node, direction).distinct))
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
            .map(|(node, degree)| (graph.node_id(node).to_string(), degree))
    }

    pub fn summary(&self, graph: &MailGraph, mode: DiameterMode) -> MetricsSummary {
        MetricsSummary {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            density: self.density(graph),
            average_degree: self.average_degree(graph),
            diameter: self.diameter(graph, mode),
            average_path_length: self.average_path_length(graph),
            average_clustering: self.average_clustering(graph),
            triangle_count: self.triangle_count(graph),
        }
    }
}

fn neighbor_sets(view: &UndirectedView) -> Vec<HashSet<usize>> {
    (0..view.node_count())
        .map(|node| view.neighbors(node).iter().map(|&(n, _)| n).collect())
        .collect()
}

fn largest_component(view: &UndirectedView) -> Vec<usize> {
    let n = view.node_count();
    let mut visited = vec![false; n];
    let mut largest: Vec<usize> = Vec::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }
        let mut members = vec![start];
        visited[start] = true;
        let mut cursor = 0;
        while cursor < members.len() {
            let node = members[cursor];
            cursor += 1;
            for &(neighbor, _) in view.neighbors(node) {
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    members.push(neighbor);
                }
            }
        }
        if members.len() > largest.len() {
            largest = members;
        }
    }
    largest
}

impl GraphAlgorithm for NetworkMetrics {
    fn execute(&self, graph: &MailGraph, params: &AlgorithmParams) -> Result<serde_json::Value> {
        let mode: DiameterMode = params.get("diameter_mode").unwrap_or_default();
        let summary = self.summary(graph, mode);
        serde_json::to_value(summary).map_err(GraphError::from)
    }

    fn name(&self) -> &'static str {
        "network_metrics"
    }

    fn description(&self) -> &'static str {
        "Aggregate network statistics: density, diameter, clustering, degree distribution"
    }
}
