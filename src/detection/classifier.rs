use serde::{Deserialize, Serialize};

use crate::detection::scorer::ScoreRecord;
use crate::error::{GraphError, Result};

/// Three-tier verdict for a scored sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Legitimate,
    Suspicious,
    HighRisk,
}

/// The two classification cut points over [0,1] scores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierThresholds {
    pub high: f64,
    pub low: f64,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        ClassifierThresholds {
            high: 0.6,
            low: 0.3,
        }
    }
}

impl ClassifierThresholds {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.low) || !(0.0..=1.0).contains(&self.high) {
            return Err(GraphError::invalid_parameter(
                "classification thresholds must lie in [0.0, 1.0]",
            ));
        }
        if self.high <= self.low {
            return Err(GraphError::invalid_parameter(format!(
                "high threshold {} must exceed low threshold {}",
                self.high, self.low
            )));
        }
        Ok(())
    }
}

/// A score record with its verdict attached.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedRecord {
    #[serde(flatten)]
    pub record: ScoreRecord,
    pub verdict: Verdict,
}

/// Tier counts and percentages over one scoring run.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationSummary {
    pub total: usize,
    pub high_risk: usize,
    pub high_risk_percentage: f64,
    pub suspicious: usize,
    pub suspicious_percentage: f64,
    pub legitimate: usize,
    pub legitimate_percentage: f64,
}

/// Applies thresholds to score records and ranks senders. Pure function
/// of its input; holds no graph state.
pub struct SpamClassifier {
    thresholds: ClassifierThresholds,
}

impl SpamClassifier {
    pub fn new(thresholds: ClassifierThresholds) -> Result<Self> {
        thresholds.validate()?;
        Ok(SpamClassifier { thresholds })
    }

    pub fn verdict(&self, score: f64) -> Verdict {
        if score >= self.thresholds.high {
            Verdict::HighRisk
        } else if score >= self.thresholds.low {
            Verdict::Suspicious
        } else {
            Verdict::Legitimate
        }
    }

    /// All records ranked descending by score, ties broken by node
    /// identifier for deterministic output.
    pub fn classify(&self, records: &[ScoreRecord]) -> Vec<ClassifiedRecord> {
        let mut classified: Vec<ClassifiedRecord> = records
            .iter()
            .map(|record| ClassifiedRecord {
                record: record.clone(),
                verdict: self.verdict(record.score),
            })
            .collect();
        classified.sort_by(|a, b| {
            b.record
                .score
                .partial_cmp(&a.record.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.record.node.cmp(&b.record.node))
        });
        classified
    }

    /// The `n` highest-scored senders.
    pub fn top_n(&self, records: &[ScoreRecord], n: usize) -> Vec<ClassifiedRecord> {
        let mut ranked = self.classify(records);
        ranked.truncate(n);
        ranked
    }

    pub fn summary(&self, records: &[ScoreRecord]) -> ClassificationSummary {
        let total = records.len();
        let mut high_risk = 0usize;
        let mut suspicious = 0usize;
        let mut legitimate = 0usize;
        for record in records {
            match self.verdict(record.score) {
                Verdict::HighRisk => high_risk += 1,
                Verdict::Suspicious => suspicious += 1,
                Verdict::Legitimate => legitimate += 1,
            }
        }

        let percentage = |count: usize| {
            if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            }
        };

        ClassificationSummary {
            total,
            high_risk,
            high_risk_percentage: percentage(high_risk),
            suspicious,
            suspicious_percentage: percentage(suspicious),
            legitimate,
            legitimate_percentage: percentage(legitimate),
        }
    }
}
