use hashbrown::HashMap;

use crate::graph::MailGraph;

/// One undirected candidate edge: anti-parallel directed edges merged,
/// weights summed. `a <= b` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndirectedEdge {
    pub a: usize,
    pub b: usize,
    pub weight: u64,
}

impl UndirectedEdge {
    pub fn cost(&self) -> f64 {
        1.0 / self.weight as f64
    }
}

/// Undirected weight projection of a `MailGraph`.
///
/// Spam relay analysis cares about reachability and link strength, not
/// direction, so the spanning forest, both centrality measures, weak
/// components, coloring, and the global metrics all run over this view.
/// Edge order is first-insertion order of either direction; adjacency is
/// loop-free (self-loops stay in `edges` and are skipped by union-find).
#[derive(Debug, Clone)]
pub struct UndirectedView {
    adjacency: Vec<Vec<(usize, u64)>>,
    edges: Vec<UndirectedEdge>,
}

impl UndirectedView {
    pub fn build(graph: &MailGraph) -> Self {
        let mut pair_index: HashMap<(usize, usize), usize> = HashMap::new();
        let mut edges: Vec<UndirectedEdge> = Vec::new();

        for edge in graph.edges() {
            let key = if edge.source <= edge.target {
                (edge.source, edge.target)
            } else {
                (edge.target, edge.source)
            };
            match pair_index.get(&key) {
                Some(&index) => edges[index].weight += edge.weight,
                None => {
                    pair_index.insert(key, edges.len());
                    edges.push(UndirectedEdge {
                        a: key.0,
                        b: key.1,
                        weight: edge.weight,
                    });
                }
            }
        }

        let mut adjacency = vec![Vec::new(); graph.node_count()];
        for edge in &edges {
            if edge.a != edge.b {
                adjacency[edge.a].push((edge.b, edge.weight));
                adjacency[edge.b].push((edge.a, edge.weight));
            }
        }

        Self { adjacency, edges }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Loop-free neighbors of a node: `(neighbor index, combined weight)`.
    pub fn neighbors(&self, index: usize) -> &[(usize, u64)] {
        &self.adjacency[index]
    }

    /// Merged undirected edges, first-insertion order. Includes self-loops.
    pub fn edges(&self) -> &[UndirectedEdge] {
        &self.edges
    }

    pub fn degree(&self, index: usize) -> usize {
        self.adjacency[index].len()
    }

    /// True when the node has no undirected neighbors (self-loops ignored).
    pub fn is_isolated(&self, index: usize) -> bool {
        self.adjacency[index].is_empty()
    }
}
