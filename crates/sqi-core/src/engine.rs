//! Central SQI engine.
//!
//! Scores every attempt, folds the scores into topic and concept totals,
//! ranks the concepts and assembles the rounded result.

use std::sync::Arc;

use crate::aggregate::{aggregate, Aggregation};
use crate::error::SqiError;
use crate::model::{Attempt, SqiInput};
use crate::parser::parse_payload;
use crate::ranker::Ranker;
use crate::report::{ConceptScore, RankedConcept, ResultMetadata, SqiResult, TopicScore};
use crate::scorer::AttemptScorer;
use crate::traits::{Clock, SystemClock};
use crate::weights::ScoringWeights;

/// Decimals kept for overall, topic and concept indices.
const INDEX_DECIMALS: i32 = 1;
/// Decimals kept for ranking weights.
const WEIGHT_DECIMALS: i32 = 2;

/// The SQI engine. Stateless between calls.
pub struct SqiEngine {
    scorer: AttemptScorer,
    ranker: Ranker,
    clock: Arc<dyn Clock>,
}

impl Default for SqiEngine {
    fn default() -> Self {
        Self::new(ScoringWeights::default())
    }
}

impl SqiEngine {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            scorer: AttemptScorer::new(weights.clone()),
            ranker: Ranker::new(weights),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for `metadata.computed_at`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        self.scorer.weights()
    }

    /// Compute the SQI result for one student's attempts.
    pub fn compute(&self, student_id: &str, attempts: &[Attempt]) -> Result<SqiResult, SqiError> {
        let aggregation = aggregate(&self.scorer, attempts)?;
        let result = self.assemble(student_id, &aggregation);
        tracing::debug!(
            student_id,
            overall_sqi = result.overall_sqi,
            ranked = result.ranked_concepts_for_summary.len(),
            "computed SQI"
        );
        Ok(result)
    }

    pub fn compute_input(&self, input: &SqiInput) -> Result<SqiResult, SqiError> {
        self.compute(&input.student_id, &input.attempts)
    }

    /// Parse a JSON payload and compute its result.
    pub fn compute_payload(&self, payload: &str) -> Result<SqiResult, SqiError> {
        let input = parse_payload(payload)?;
        self.compute_input(&input)
    }

    fn assemble(&self, student_id: &str, aggregation: &Aggregation) -> SqiResult {
        let topic_scores = aggregation
            .topics
            .values()
            .map(|t| TopicScore {
                topic: t.topic.clone(),
                sqi: round_to(t.totals.index(), INDEX_DECIMALS),
            })
            .collect();

        let mut concept_scores = Vec::with_capacity(aggregation.concepts.len());
        let mut ranked = Vec::with_capacity(aggregation.concepts.len());
        for acc in aggregation.concepts.values() {
            let priority = self.ranker.rank(acc);
            concept_scores.push(ConceptScore {
                topic: acc.topic.clone(),
                concept: acc.concept.clone(),
                sqi: round_to(priority.concept_sqi, INDEX_DECIMALS),
            });
            ranked.push(RankedConcept {
                topic: acc.topic.clone(),
                concept: acc.concept.clone(),
                weight: round_to(priority.weight, WEIGHT_DECIMALS),
                reasons: priority.reasons,
            });
        }
        // Stable: equal weights keep first-seen order.
        ranked.sort_by(|a, b| b.weight.total_cmp(&a.weight));

        SqiResult {
            student_id: student_id.to_string(),
            overall_sqi: round_to(aggregation.overall.index(), INDEX_DECIMALS),
            topic_scores,
            concept_scores,
            ranked_concepts_for_summary: ranked,
            metadata: ResultMetadata::new(self.clock.now()),
        }
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
