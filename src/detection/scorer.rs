use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::algorithms::centrality::{CentralityEngine, CentralityKind};
use crate::error::{GraphError, Result};
use crate::graph::{Direction, MailGraph};

/// The three-factor weight triple. A fixed design parameter, not fitted
/// to data; deployments recalibrate it through configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub degree_ratio: f64,
    pub centrality: f64,
    pub burst: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        ScoringWeights {
            degree_ratio: 0.40,
            centrality: 0.35,
            burst: 0.25,
        }
    }
}

impl ScoringWeights {
    /// Weights must each lie in [0,1] and sum to 1, keeping the final
    /// score in [0,1] by construction.
    pub fn validate(&self) -> Result<()> {
        let components = [self.degree_ratio, self.centrality, self.burst];
        if components.iter().any(|w| !(0.0..=1.0).contains(w)) {
            return Err(GraphError::invalid_parameter(
                "scoring weights must each be between 0.0 and 1.0",
            ));
        }
        let sum: f64 = components.iter().sum();
        if (sum - 1.0).abs() > 1e-9 {
            return Err(GraphError::invalid_parameter(format!(
                "scoring weights must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }
}

/// How a sender's timestamp sequence is condensed into a burstiness
/// statistic. Both variants produce a raw value that is then normalized
/// against the maximum observed across all senders; fewer than two
/// timestamps always yields 0 (missing data is a value, not an error).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum BurstStrategy {
    /// Coefficient of variation of inter-arrival gaps, mapped through
    /// cv / (1 + cv) into [0,1). Blast senders have wildly irregular
    /// gaps (long silences between volleys); steady senders sit near 0.
    /// A sequence of identical timestamps is maximal burstiness, 1.
    #[default]
    CoefficientOfVariation,
    /// Largest number of sends inside any sliding window of the given
    /// length, divided by the total send count.
    WindowedMaxRate { window_secs: u64 },
}

impl BurstStrategy {
    fn statistic(&self, timestamps: &mut Vec<DateTime<Utc>>) -> f64 {
        if timestamps.len() < 2 {
            return 0.0;
        }
        timestamps.sort_unstable();

        match *self {
            BurstStrategy::CoefficientOfVariation => {
                let gaps: Vec<f64> = timestamps
                    .windows(2)
                    .map(|pair| (pair[1] - pair[0]).num_milliseconds() as f64 / 1000.0)
                    .collect();
                let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;
                if mean <= 0.0 {
                    // Every email in the same instant: the extreme burst.
                    return 1.0;
                }
                let variance =
                    gaps.iter().map(|gap| (gap - mean).powi(2)).sum::<f64>() / gaps.len() as f64;
                let cv = variance.sqrt() / mean;
                cv / (1.0 + cv)
            }
            BurstStrategy::WindowedMaxRate { window_secs } => {
                let window = chrono::Duration::seconds(window_secs as i64);
                let mut max_in_window = 0usize;
                let mut start = 0usize;
                for end in 0..timestamps.len() {
                    while timestamps[end] - timestamps[start] > window {
                        start += 1;
                    }
                    max_in_window = max_in_window.max(end - start + 1);
                }
                max_in_window as f64 / timestamps.len() as f64
            }
        }
    }
}

/// Per-sender scoring output. Immutable once produced; owned by the
/// caller. All components and the final score lie in [0,1].
#[derive(Debug, Clone, Serialize)]
pub struct ScoreRecord {
    pub node: String,
    pub degree_ratio: f64,
    pub centrality: f64,
    pub burst: f64,
    pub score: f64,
}

/// Combines degree-ratio, centrality, and temporal-burst signals into one
/// normalized score per sender.
pub struct SpamScorer {
    weights: ScoringWeights,
    centrality_kind: CentralityKind,
    burst_strategy: BurstStrategy,
}

impl SpamScorer {
    pub fn new(
        weights: ScoringWeights,
        centrality_kind: CentralityKind,
        burst_strategy: BurstStrategy,
    ) -> Result<Self> {
        weights.validate()?;
        Ok(SpamScorer {
            weights,
            centrality_kind,
            burst_strategy,
        })
    }

    /// Score every sender node (weighted out-degree >= 1), in node
    /// insertion order. An empty graph has no senders and yields an empty
    /// result.
    pub fn score(&self, graph: &MailGraph) -> Result<Vec<ScoreRecord>> {
        if graph.is_empty() {
            return Ok(Vec::new());
        }

        // Graph-relative normalization: centrality against the maximum
        // observed over all nodes, burst against the maximum over senders.
        let centrality = CentralityEngine::new(self.centrality_kind).compute(graph)?;
        let max_centrality = centrality
            .iter()
            .map(|entry| entry.score)
            .fold(0.0f64, f64::max);

        let raw_bursts: Vec<f64> = (0..graph.node_count())
            .map(|node| {
                let mut timestamps: Vec<DateTime<Utc>> = graph
                    .adjacent_edges(node, Direction::Out)
                    .flat_map(|edge| edge.timestamps.iter().copied())
                    .collect();
                self.burst_strategy.statistic(&mut timestamps)
            })
            .collect();
        let max_burst = raw_bursts.iter().copied().fold(0.0f64, f64::max);
        log::debug!(
            "scoring normalizers: max centrality {max_centrality:.6}, max burst {max_burst:.6}"
        );

        let mut records = Vec::new();
        for (index, node) in graph.nodes().enumerate() {
            let out = graph.degree_at(index, Direction::Out);
            if out.weighted == 0 {
                continue;
            }

            // Few distinct recipients at high volume each is the blast
            // signature: 1 - distinct/total approaches 1.
            let degree_ratio =
                (1.0 - out.distinct as f64 / out.weighted as f64).clamp(0.0, 1.0);

            let centrality_component = if max_centrality > 0.0 {
                centrality[index].score / max_centrality
            } else {
                0.0
            };

            let burst_component = if max_burst > 0.0 {
                raw_bursts[index] / max_burst
            } else {
                0.0
            };

            let score = self.weights.degree_ratio * degree_ratio
                + self.weights.centrality * centrality_component
                + self.weights.burst * burst_component;

            records.push(ScoreRecord {
                node: node.id.clone(),
                degree_ratio,
                centrality: centrality_component,
                burst: burst_component,
                score,
            });
        }

        Ok(records)
    }
}
