use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::algorithms::{AlgorithmParams, GraphAlgorithm};
use crate::error::{GraphError, Result};
use crate::graph::{MailGraph, UndirectedView};

/// Node processing order for the greedy sweep. Descending degree tends to
/// minimize color count on hub-heavy graphs and is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStrategy {
    #[default]
    DegreeDescending,
    InsertionOrder,
    IdentifierAscending,
}

/// A proper coloring of the undirected projection: no two adjacent nodes
/// share a color index. Greedy, so not guaranteed minimal.
#[derive(Debug, Clone, Serialize)]
pub struct ColoringResult {
    pub colors: BTreeMap<String, usize>,
    pub color_count: usize,
}

impl ColoringResult {
    /// Count of nodes per color index.
    pub fn distribution(&self) -> BTreeMap<usize, usize> {
        let mut distribution = BTreeMap::new();
        for &color in self.colors.values() {
            *distribution.entry(color).or_insert(0) += 1;
        }
        distribution
    }

    pub fn nodes_with_color(&self, color: usize) -> Vec<&str> {
        self.colors
            .iter()
            .filter(|&(_, &c)| c == color)
            .map(|(node, _)| node.as_str())
            .collect()
    }
}

pub struct GreedyColoring;

impl GreedyColoring {
    /// Assign each node the smallest color index unused by its
    /// already-colored neighbors, processing nodes in the configured
    /// order. This is a heuristic partitioning tool, not a chromatic-
    /// number solver: coloring optimality is NP-hard and the greedy
    /// approximation is the committed design.
    pub fn compute(&self, graph: &MailGraph, strategy: OrderStrategy) -> Result<ColoringResult> {
        if graph.is_empty() {
            return Err(GraphError::EmptyGraph);
        }

        let n = graph.node_count();
        let view = UndirectedView::build(graph);

        let mut order: Vec<usize> = (0..n).collect();
        match strategy {
            OrderStrategy::DegreeDescending => {
                order.sort_by(|&a, &b| view.degree(b).cmp(&view.degree(a)).then_with(|| a.cmp(&b)));
            }
            OrderStrategy::InsertionOrder => {}
            OrderStrategy::IdentifierAscending => {
                order.sort_by(|&a, &b| graph.node_id(a).cmp(graph.node_id(b)));
            }
        }

        let mut assigned: Vec<Option<usize>> = vec![None; n];
        let mut color_count = 0usize;
        for &node in &order {
            let mut used: Vec<usize> = view
                .neighbors(node)
                .iter()
                .filter_map(|&(neighbor, _)| assigned[neighbor])
                .collect();
            used.sort_unstable();
            used.dedup();

            let mut color = 0usize;
            for taken in used {
                if taken == color {
                    color += 1;
                } else if taken > color {
                    break;
                }
            }
            assigned[node] = Some(color);
            color_count = color_count.max(color + 1);
        }

        let colors = assigned
            .into_iter()
            .enumerate()
            .map(|(node, color)| {
                let color = color.expect("every node is visited by the sweep");
                (graph.node_id(node).to_string(), color)
            })
            .collect();

        Ok(ColoringResult {
            colors,
            color_count,
        })
    }
}

/// True when no undirected edge joins two nodes of the same color.
/// Self-loops are ignored: a node cannot differ from itself.
pub fn is_proper_coloring(graph: &MailGraph, result: &ColoringResult) -> bool {
    let view = UndirectedView::build(graph);
    view.edges().iter().all(|edge| {
        edge.a == edge.b
            || result.colors.get(graph.node_id(edge.a)) != result.colors.get(graph.node_id(edge.b))
    })
}

impl GraphAlgorithm for GreedyColoring {
    fn execute(&self, graph: &MailGraph, params: &AlgorithmParams) -> Result<serde_json::Value> {
        let strategy: OrderStrategy = params.get("order").unwrap_or_default();
        let result = self.compute(graph, strategy)?;
        serde_json::to_value(result).map_err(GraphError::from)
    }

    fn name(&self) -> &'static str {
        "greedy_coloring"
    }

    fn description(&self) -> &'static str {
        "Greedy vertex coloring for conflict-free network segmentation"
    }
}
