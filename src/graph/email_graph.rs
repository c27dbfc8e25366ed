use chrono::{DateTime, Utc};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// Direction of an adjacency or degree query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Out,
    In,
}

/// A single email-address identity in the communication graph.
///
/// Created on first appearance as sender or recipient; mutated only by
/// `MailGraph::add_edge`, which keeps the volume and activity aggregates
/// in sync with the edge set.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub id: String,
    /// Total emails sent (sum of outgoing edge weights).
    pub sent_total: u64,
    /// Total emails received (sum of incoming edge weights).
    pub received_total: u64,
    pub first_seen: Option<DateTime<Utc>>,
    pub last_seen: Option<DateTime<Utc>>,
}

/// A merged directed edge: all emails from one sender to one recipient.
///
/// Repeated insertions for the same ordered pair accumulate into `weight`
/// and append to `timestamps`, so the full send sequence survives merging
/// and remains available to burst detection. Invariant: `weight >= 1`, and
/// `timestamps.len() <= weight` (timestamps are optional per email).
#[derive(Debug, Clone, Serialize)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub weight: u64,
    pub timestamps: Vec<DateTime<Utc>>,
}

impl Edge {
    /// Traversal cost for shortest-path purposes: high traffic means a
    /// cheap edge. Computed on demand; `weight >= 1` keeps this finite.
    pub fn cost(&self) -> f64 {
        1.0 / self.weight as f64
    }
}

/// Boundary record handed in by the ingestion layer. The core does no
/// parsing or validation of identifier syntax; malformed addresses pass
/// through as opaque strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub sender: String,
    pub recipient: String,
    pub weight: u64,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Unweighted and weighted degree of a node in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DegreeStats {
    /// Count of distinct communication partners.
    pub distinct: usize,
    /// Sum of edge weights (total email volume).
    pub weighted: u64,
}

/// Directed weighted multigraph over email identities.
///
/// Nodes and edges live in dense arenas indexed by `usize`; identifiers
/// are interned through a lookup table. Iteration over nodes and edges is
/// insertion order, which keeps every downstream algorithm deterministic.
/// The graph is built once per analysis request and then treated as
/// read-only; it is not internally synchronized.
#[derive(Debug, Clone, Default)]
pub struct MailGraph {
    nodes: Vec<Node>,
    node_index: HashMap<String, usize>,
    edges: Vec<Edge>,
    edge_index: HashMap<(usize, usize), usize>,
    outgoing: Vec<Vec<usize>>,
    incoming: Vec<Vec<usize>>,
}

impl MailGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from the ingestion layer's edge records.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = EdgeRecord>,
    {
        let mut graph = Self::new();
        for record in records {
            graph.add_edge(
                &record.sender,
                &record.recipient,
                record.weight,
                record.timestamp,
            )?;
        }
        Ok(graph)
    }

    fn intern(&mut self, id: &str) -> usize {
        if let Some(&index) = self.node_index.get(id) {
            return index;
        }
        let index = self.nodes.len();
        self.nodes.push(Node {
            id: id.to_string(),
            sent_total: 0,
            received_total: 0,
            first_seen: None,
            last_seen: None,
        });
        self.node_index.insert(id.to_string(), index);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        index
    }

    /// Record email traffic from `sender` to `recipient`.
    ///
    /// Creates both endpoints on first appearance. Repeated insertions for
    /// the same ordered pair merge into one edge: weight accumulates and
    /// the timestamp, if present, is appended. A zero weight is rejected.
    pub fn add_edge(
        &mut self,
        sender: &str,
        recipient: &str,
        weight: u64,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<()> {
        if weight == 0 {
            return Err(GraphError::InvalidWeight(weight));
        }
        let source = self.intern(sender);
        let target = self.intern(recipient);

        match self.edge_index.get(&(source, target)) {
            Some(&edge_index) => {
                let edge = &mut self.edges[edge_index];
                edge.weight += weight;
                if let Some(ts) = timestamp {
                    edge.timestamps.push(ts);
                }
            }
            None => {
                let edge_index = self.edges.len();
                self.edges.push(Edge {
                    source,
                    target,
                    weight,
                    timestamps: timestamp.into_iter().collect(),
                });
                self.edge_index.insert((source, target), edge_index);
                self.outgoing[source].push(edge_index);
                self.incoming[target].push(edge_index);
            }
        }

        self.nodes[source].sent_total += weight;
        self.nodes[target].received_total += weight;
        if let Some(ts) = timestamp {
            for index in [source, target] {
                let node = &mut self.nodes[index];
                node.first_seen = Some(node.first_seen.map_or(ts, |seen| seen.min(ts)));
                node.last_seen = Some(node.last_seen.map_or(ts, |seen| seen.max(ts)));
            }
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Count of merged directed edges (distinct ordered pairs).
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Dense index of an identifier, or `UnknownNode` if never inserted.
    pub fn index_of(&self, id: &str) -> Result<usize> {
        self.node_index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::unknown_node(id))
    }

    pub fn node(&self, id: &str) -> Result<&Node> {
        Ok(&self.nodes[self.index_of(id)?])
    }

    /// Identifier of the node at a dense index.
    pub fn node_id(&self, index: usize) -> &str {
        &self.nodes[index].id
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// All node identifiers in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|node| node.id.as_str())
    }

    /// All merged edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// The merged edge for an ordered pair, if any traffic was recorded.
    pub fn edge_between(&self, sender: &str, recipient: &str) -> Result<Option<&Edge>> {
        let source = self.index_of(sender)?;
        let target = self.index_of(recipient)?;
        Ok(self
            .edge_index
            .get(&(source, target))
            .map(|&index| &self.edges[index]))
    }

    /// Lazy adjacency: `(neighbor identifier, merged weight)` pairs in
    /// edge insertion order.
    pub fn neighbors(
        &self,
        id: &str,
        direction: Direction,
    ) -> Result<impl Iterator<Item = (&str, u64)> + '_> {
        let index = self.index_of(id)?;
        Ok(self.adjacent_edges(index, direction).map(move |edge| {
            let other = match direction {
                Direction::Out => edge.target,
                Direction::In => edge.source,
            };
            (self.nodes[other].id.as_str(), edge.weight)
        }))
    }

    /// Edges incident to a dense index in one direction, insertion order.
    pub fn adjacent_edges(
        &self,
        index: usize,
        direction: Direction,
    ) -> impl Iterator<Item = &Edge> + '_ {
        let list = match direction {
            Direction::Out => &self.outgoing[index],
            Direction::In => &self.incoming[index],
        };
        list.iter().map(move |&edge_index| &self.edges[edge_index])
    }

    /// Weighted and unweighted degree of a node in one direction. The spam
    /// score needs the ratio of the two, so both are computed together.
    pub fn degree(&self, id: &str, direction: Direction) -> Result<DegreeStats> {
        let index = self.index_of(id)?;
        Ok(self.degree_at(index, direction))
    }

    pub(crate) fn degree_at(&self, index: usize, direction: Direction) -> DegreeStats {
        let mut stats = DegreeStats {
            distinct: 0,
            weighted: 0,
        };
        for edge in self.adjacent_edges(index, direction) {
            stats.distinct += 1;
            stats.weighted += edge.weight;
        }
        stats
    }
}
