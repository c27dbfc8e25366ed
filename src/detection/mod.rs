pub mod classifier;
pub mod scorer;

use serde::{Deserialize, Serialize};

pub use classifier::{
    ClassificationSummary, ClassifiedRecord, ClassifierThresholds, SpamClassifier, Verdict,
};
pub use scorer::{BurstStrategy, ScoreRecord, ScoringWeights, SpamScorer};

use crate::algorithms::centrality::CentralityKind;
use crate::algorithms::coloring::OrderStrategy;
use crate::error::Result;
use crate::graph::MailGraph;

/// The full externally-settable configuration surface: scoring weights,
/// classification thresholds, centrality variant, burst strategy, and
/// coloring order. Deserializable from JSON so deployments recalibrate
/// without recompilation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DetectionConfig {
    pub weights: ScoringWeights,
    pub thresholds: ClassifierThresholds,
    pub centrality: CentralityKind,
    pub burst: BurstStrategy,
    pub coloring_order: OrderStrategy,
}

/// Ranked, verdict-tagged output of one detection run.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionReport {
    pub ranked: Vec<ClassifiedRecord>,
    pub summary: ClassificationSummary,
}

/// Scorer and classifier composed over one immutable graph snapshot.
pub struct DetectionPipeline {
    config: DetectionConfig,
}

impl DetectionPipeline {
    /// Validates the configuration up front so a misconfigured deployment
    /// fails at startup, not mid-analysis.
    pub fn new(config: DetectionConfig) -> Result<Self> {
        config.weights.validate()?;
        config.thresholds.validate()?;
        Ok(DetectionPipeline { config })
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    pub fn run(&self, graph: &MailGraph) -> Result<DetectionReport> {
        let scorer = SpamScorer::new(
            self.config.weights,
            self.config.centrality,
            self.config.burst,
        )?;
        let records = scorer.score(graph)?;

        let classifier = SpamClassifier::new(self.config.thresholds)?;
        let summary = classifier.summary(&records);
        let ranked = classifier.classify(&records);
        log::debug!(
            "detection run over {} senders: {} high risk, {} suspicious",
            summary.total,
            summary.high_risk,
            summary.suspicious
        );

        Ok(DetectionReport { ranked, summary })
    }
}
