use hashbrown::HashMap;
use serde::Serialize;

use crate::error::{GraphError, Result};
use crate::graph::MailGraph;

/// A co-projection link: two nodes of the same partition connected through
/// counterparts they share (recipients for senders, senders for recipients).
#[derive(Debug, Clone, Serialize)]
pub struct ProjectedLink {
    pub a: String,
    pub b: String,
    /// Number of shared counterparts.
    pub shared: usize,
}

/// Read-only bipartite projection of the communication graph.
///
/// Senders and recipients form two disjoint partitions; an identity that
/// both sends and receives appears once in each partition under the same
/// identifier string. Partition order is first appearance in the edge
/// sequence.
#[derive(Debug, Clone)]
pub struct BipartiteView {
    senders: Vec<String>,
    recipients: Vec<String>,
    sender_index: HashMap<String, usize>,
    recipient_index: HashMap<String, usize>,
    /// Sender partition index -> (recipient partition index, weight).
    links: Vec<Vec<(usize, u64)>>,
    reverse_links: Vec<Vec<(usize, u64)>>,
}

impl BipartiteView {
    pub fn from_graph(graph: &MailGraph) -> Self {
        let mut view = BipartiteView {
            senders: Vec::new(),
            recipients: Vec::new(),
            sender_index: HashMap::new(),
            recipient_index: HashMap::new(),
            links: Vec::new(),
            reverse_links: Vec::new(),
        };

        for edge in graph.edges() {
            let sender = graph.node_id(edge.source);
            let recipient = graph.node_id(edge.target);

            let s = match view.sender_index.get(sender) {
                Some(&s) => s,
                None => {
                    let s = view.senders.len();
                    view.senders.push(sender.to_string());
                    view.sender_index.insert(sender.to_string(), s);
                    view.links.push(Vec::new());
                    s
                }
            };
            let r = match view.recipient_index.get(recipient) {
                Some(&r) => r,
                None => {
                    let r = view.recipients.len();
                    view.recipients.push(recipient.to_string());
                    view.recipient_index.insert(recipient.to_string(), r);
                    view.reverse_links.push(Vec::new());
                    r
                }
            };

            view.links[s].push((r, edge.weight));
            view.reverse_links[r].push((s, edge.weight));
        }

        view
    }

    /// Sender partition, first-appearance order.
    pub fn senders(&self) -> &[String] {
        &self.senders
    }

    /// Recipient partition, first-appearance order.
    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    /// Number of distinct recipients a sender targets.
    pub fn sender_degree(&self, id: &str) -> Result<usize> {
        let index = self
            .sender_index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::unknown_node(id))?;
        Ok(self.links[index].len())
    }

    /// Number of distinct senders targeting a recipient.
    pub fn recipient_degree(&self, id: &str) -> Result<usize> {
        let index = self
            .recipient_index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::unknown_node(id))?;
        Ok(self.reverse_links[index].len())
    }

    /// Recipients targeted by both senders, in the first sender's link
    /// order. Coordinated campaigns show up as large shared sets.
    pub fn shared_recipients(&self, a: &str, b: &str) -> Result<Vec<String>> {
        let ia = self
            .sender_index
            .get(a)
            .copied()
            .ok_or_else(|| GraphError::unknown_node(a))?;
        let ib = self
            .sender_index
            .get(b)
            .copied()
            .ok_or_else(|| GraphError::unknown_node(b))?;

        let targets_of_b: hashbrown::HashSet<usize> =
            self.links[ib].iter().map(|&(r, _)| r).collect();
        Ok(self.links[ia]
            .iter()
            .filter(|&&(r, _)| targets_of_b.contains(&r))
            .map(|&(r, _)| self.recipients[r].clone())
            .collect())
    }

    /// Sender co-projection: pairs of senders weighted by how many
    /// recipients they share. Reveals spam rings targeting a common pool.
    pub fn project_senders(&self) -> Vec<ProjectedLink> {
        Self::project(&self.reverse_links, &self.senders)
    }

    /// Recipient co-projection: pairs of recipients weighted by how many
    /// senders target both. Reveals common campaign targets.
    pub fn project_recipients(&self) -> Vec<ProjectedLink> {
        Self::project(&self.links, &self.recipients)
    }

    fn project(through: &[Vec<(usize, u64)>], names: &[String]) -> Vec<ProjectedLink> {
        let mut shared: HashMap<(usize, usize), usize> = HashMap::new();
        for incident in through {
            for (i, &(a, _)) in incident.iter().enumerate() {
                for &(b, _) in &incident[i + 1..] {
                    let key = if a < b { (a, b) } else { (b, a) };
                    *shared.entry(key).or_insert(0) += 1;
                }
            }
        }

        let mut pairs: Vec<((usize, usize), usize)> = shared.into_iter().collect();
        pairs.sort_by_key(|&(key, _)| key);
        pairs
            .into_iter()
            .map(|((a, b), count)| ProjectedLink {
                a: names[a].clone(),
                b: names[b].clone(),
                shared: count,
            })
            .collect()
    }
}
