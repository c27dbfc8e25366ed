pub mod bipartite;
pub mod email_graph;
pub mod projection;

pub use bipartite::{BipartiteView, ProjectedLink};
pub use email_graph::{DegreeStats, Direction, Edge, EdgeRecord, MailGraph, Node};
pub use projection::{UndirectedEdge, UndirectedView};
