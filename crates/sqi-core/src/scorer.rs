//! Per-attempt weighted scoring.
//!
//! ```text
//! base      = correct ? marks : -neg_marks
//! max       = marks × w_importance × w_difficulty × w_type
//! weighted  = base  × w_importance × w_difficulty × w_type
//!           × time decay (0.8 if ratio > 2.0, 0.9 if ratio > 1.5)
//!           × review miss (0.9 if marked for review and wrong)
//!           + revisit bonus (0.2 × marks if revisited and correct)
//! ```
//!
//! The bonus is not added to `max`, so a single attempt may score above its
//! own maximum. Indices are clamped only once the scores are aggregated.

use serde::{Deserialize, Serialize};

use crate::error::SqiError;
use crate::model::Attempt;
use crate::weights::ScoringWeights;

const SEVERE_OVERTIME_RATIO: f64 = 2.0;
const SEVERE_OVERTIME_FACTOR: f64 = 0.8;
const OVERTIME_RATIO: f64 = 1.5;
const OVERTIME_FACTOR: f64 = 0.9;
const REVIEW_MISS_FACTOR: f64 = 0.9;
const REVISIT_BONUS_SHARE: f64 = 0.2;

/// The weighted outcome of one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AttemptScore {
    /// Realised score after weights and behaviour adjustments. May be negative.
    pub weighted_score: f64,
    /// Score of a fully correct, unpenalised attempt.
    pub max_possible_score: f64,
}

/// Scores attempts against a set of weight tables.
#[derive(Debug, Clone, Default)]
pub struct AttemptScorer {
    weights: ScoringWeights,
}

impl AttemptScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score one attempt. `index` is its position in the input, used only for
    /// error reporting.
    pub fn score(&self, index: usize, attempt: &Attempt) -> Result<AttemptScore, SqiError> {
        if !(attempt.expected_time_sec.is_finite() && attempt.expected_time_sec > 0.0) {
            return Err(SqiError::InvalidAttempt {
                index,
                reason: format!(
                    "expected_time_sec must be > 0, got {}",
                    attempt.expected_time_sec
                ),
            });
        }

        let base = if attempt.correct {
            attempt.marks
        } else {
            -attempt.neg_marks
        };
        let multiplier = self.weights.combined(attempt);

        let max_possible_score = attempt.marks * multiplier;
        let mut weighted_score = base * multiplier;

        weighted_score *= time_decay(attempt.time_ratio());

        if attempt.marked_review && !attempt.correct {
            weighted_score *= REVIEW_MISS_FACTOR;
        }

        if attempt.revisits > 0 && attempt.correct {
            weighted_score += REVISIT_BONUS_SHARE * attempt.marks;
        }

        Ok(AttemptScore {
            weighted_score,
            max_possible_score,
        })
    }
}

/// Decay factor for an attempt that took longer than expected.
fn time_decay(ratio: f64) -> f64 {
    if ratio > SEVERE_OVERTIME_RATIO {
        SEVERE_OVERTIME_FACTOR
    } else if ratio > OVERTIME_RATIO {
        OVERTIME_FACTOR
    } else {
        1.0
    }
}
