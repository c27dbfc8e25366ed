pub mod algorithms;
pub mod detection;
pub mod error;
pub mod graph;

pub use graph::{BipartiteView, DegreeStats, Direction, Edge, EdgeRecord, MailGraph, Node, ProjectedLink, UndirectedEdge, UndirectedView};
pub use algorithms::{GraphAlgorithm, AlgorithmParams};
pub use algorithms::pathfinding::{PathMetadata, PathResult, ShortestPath};
pub use algorithms::spanning_tree::{ForestEdge, ForestResult, MinimumSpanningForest};
pub use algorithms::centrality::{BetweennessCentrality, CentralityEngine, CentralityKind, CentralityScore, ClosenessCentrality};
pub use algorithms::components::{Component, ComponentsResult, ConnectedComponents, StronglyConnectedComponents};
pub use algorithms::coloring::{is_proper_coloring, ColoringResult, GreedyColoring, OrderStrategy};
pub use algorithms::metrics::{ClusteringScore, DegreeDistribution, Diameter, DiameterMode, MetricsSummary, NetworkMetrics};
pub use detection::{BurstStrategy, ClassificationSummary, ClassifiedRecord, ClassifierThresholds, DetectionConfig, DetectionPipeline, DetectionReport, ScoreRecord, ScoringWeights, SpamClassifier, SpamScorer, Verdict};
pub use error::{GraphError, Result};

pub mod prelude {
    pub use crate::graph::{BipartiteView, DegreeStats, Direction, Edge, EdgeRecord, MailGraph, Node, UndirectedView};
    pub use crate::algorithms::{GraphAlgorithm, AlgorithmParams};
    pub use crate::algorithms::pathfinding::{PathMetadata, PathResult, ShortestPath};
    pub use crate::algorithms::spanning_tree::{ForestEdge, ForestResult, MinimumSpanningForest};
    pub use crate::algorithms::centrality::{BetweennessCentrality, CentralityEngine, CentralityKind, CentralityScore, ClosenessCentrality};
    pub use crate::algorithms::components::{Component, ComponentsResult, ConnectedComponents, StronglyConnectedComponents};
    pub use crate::algorithms::coloring::{is_proper_coloring, ColoringResult, GreedyColoring, OrderStrategy};
    pub use crate::algorithms::metrics::{Diameter, DiameterMode, MetricsSummary, NetworkMetrics};
    pub use crate::detection::{BurstStrategy, ClassificationSummary, ClassifiedRecord, ClassifierThresholds, DetectionConfig, DetectionPipeline, DetectionReport, ScoreRecord, ScoringWeights, SpamClassifier, SpamScorer, Verdict};
    pub use crate::error::{GraphError, Result};
}
