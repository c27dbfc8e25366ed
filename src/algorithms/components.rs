use hashbrown::HashMap;
use serde::Serialize;

use crate::algorithms::{AlgorithmParams, GraphAlgorithm};
use crate::error::{GraphError, Result};
use crate::graph::{Direction, MailGraph, UndirectedView};

/// One component of the node partition. `id` is assigned by the first
/// member in node insertion order, so output is deterministic.
#[derive(Debug, Clone, Serialize)]
pub struct Component {
    pub id: usize,
    pub size: usize,
    pub members: Vec<String>,
}

/// Exhaustive, disjoint partition of the node set. Singleton components
/// are valid (an identity seen only via a self-loop forms one).
#[derive(Debug, Clone, Serialize)]
pub struct ComponentsResult {
    pub components: Vec<Component>,
}

impl ComponentsResult {
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn largest(&self) -> Option<&Component> {
        self.components.iter().max_by_key(|component| component.size)
    }
}

pub struct ConnectedComponents;

impl ConnectedComponents {
    /// Weakly connected components: union-find over the undirected
    /// projection, since relay detection cares about reachability, not
    /// direction.
    pub fn compute(&self, graph: &MailGraph) -> Result<ComponentsResult> {
        if graph.is_empty() {
            return Err(GraphError::EmptyGraph);
        }

        let n = graph.node_count();
        let view = UndirectedView::build(graph);
        let mut parent: Vec<usize> = (0..n).collect();

        fn find(parent: &mut Vec<usize>, node: usize) -> usize {
            let mut root = node;
            while parent[root] != root {
                root = parent[root];
            }
            let mut current = node;
            while parent[current] != root {
                let next = parent[current];
                parent[current] = root;
                current = next;
            }
            root
        }

        for edge in view.edges() {
            let root_a = find(&mut parent, edge.a);
            let root_b = find(&mut parent, edge.b);
            if root_a != root_b {
                parent[root_b.max(root_a)] = root_a.min(root_b);
            }
        }

        let mut membership = vec![0usize; n];
        for node in 0..n {
            membership[node] = find(&mut parent, node);
        }

        Ok(group_members(graph, &membership))
    }
}

pub struct StronglyConnectedComponents;

impl StronglyConnectedComponents {
    /// Tarjan's algorithm over the directed graph. Mutually-communicating
    /// groups (potential coordinated rings) collapse into one component.
    pub fn compute(&self, graph: &MailGraph) -> Result<ComponentsResult> {
        if graph.is_empty() {
            return Err(GraphError::EmptyGraph);
        }

        let n = graph.node_count();
        let mut state = TarjanState {
            graph,
            index_counter: 0,
            stack: Vec::new(),
            indices: vec![None; n],
            lowlinks: vec![0; n],
            on_stack: vec![false; n],
            components: Vec::new(),
        };

        for node in 0..n {
            if state.indices[node].is_none() {
                state.strongconnect(node);
            }
        }

        let mut membership = vec![0usize; n];
        for component in &state.components {
            // Tag each SCC by its smallest-index member for determinism.
            let root = *component.iter().min().expect("component is non-empty");
            for &node in component {
                membership[node] = root;
            }
        }

        Ok(group_members(graph, &membership))
    }
}

struct TarjanState<'a> {
    graph: &'a MailGraph,
    index_counter: usize,
    stack: Vec<usize>,
    indices: Vec<Option<usize>>,
    lowlinks: Vec<usize>,
    on_stack: Vec<bool>,
    components: Vec<Vec<usize>>,
}

impl TarjanState<'_> {
    fn strongconnect(&mut self, node: usize) {
        self.indices[node] = Some(self.index_counter);
        self.lowlinks[node] = self.index_counter;
        self.index_counter += 1;
        self.stack.push(node);
        self.on_stack[node] = true;

        let successors: Vec<usize> = self
            .graph
            .adjacent_edges(node, Direction::Out)
            .map(|edge| edge.target)
            .collect();
        for successor in successors {
            match self.indices[successor] {
                None => {
                    self.strongconnect(successor);
                    self.lowlinks[node] = self.lowlinks[node].min(self.lowlinks[successor]);
                }
                Some(successor_index) => {
                    if self.on_stack[successor] {
                        self.lowlinks[node] = self.lowlinks[node].min(successor_index);
                    }
                }
            }
        }

        if self.lowlinks[node] == self.indices[node].expect("node was indexed above") {
            let mut component = Vec::new();
            while let Some(member) = self.stack.pop() {
                self.on_stack[member] = false;
                component.push(member);
                if member == node {
                    break;
                }
            }
            self.components.push(component);
        }
    }
}

/// Group nodes by membership tag; components ordered by their first node
/// in insertion order, members listed in insertion order.
fn group_members(graph: &MailGraph, membership: &[usize]) -> ComponentsResult {
    let mut component_of_tag: HashMap<usize, usize> = HashMap::new();
    let mut components: Vec<Component> = Vec::new();

    for (node, &tag) in membership.iter().enumerate() {
        let slot = match component_of_tag.get(&tag) {
            Some(&slot) => slot,
            None => {
                let slot = components.len();
                component_of_tag.insert(tag, slot);
                components.push(Component {
                    id: slot,
                    size: 0,
                    members: Vec::new(),
                });
                slot
            }
        };
        components[slot].size += 1;
        components[slot].members.push(graph.node_id(node).to_string());
    }

    ComponentsResult { components }
}

impl GraphAlgorithm for ConnectedComponents {
    fn execute(&self, graph: &MailGraph, _params: &AlgorithmParams) -> Result<serde_json::Value> {
        let result = self.compute(graph)?;
        serde_json::to_value(result).map_err(GraphError::from)
    }

    fn name(&self) -> &'static str {
        "connected_components"
    }

    fn description(&self) -> &'static str {
        "Partition nodes into weakly connected components using union-find"
    }
}

impl GraphAlgorithm for StronglyConnectedComponents {
    fn execute(&self, graph: &MailGraph, _params: &AlgorithmParams) -> Result<serde_json::Value> {
        let result = self.compute(graph)?;
        serde_json::to_value(result).map_err(GraphError::from)
    }

    fn name(&self) -> &'static str {
        "strongly_connected_components"
    }

    fn description(&self) -> &'static str {
        "Partition nodes into strongly connected components using Tarjan's algorithm"
    }
}
