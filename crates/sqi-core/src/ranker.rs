//! Remediation-priority ranking for concepts.
//!
//! ```text
//! weight = 0.40 × has_wrong
//!        + 0.25 × max_importance
//!        + 0.20 × time_score
//!        + 0.15 × (1 − concept_sqi / 100)
//! ```

use serde::{Deserialize, Serialize};

use crate::aggregate::ConceptAccumulator;
use crate::weights::ScoringWeights;

const WRONG_SHARE: f64 = 0.40;
const IMPORTANCE_SHARE: f64 = 0.25;
const TIME_SHARE: f64 = 0.20;
const DIAGNOSTIC_SHARE: f64 = 0.15;

const FAST_RATIO: f64 = 0.8;
const SLOW_RATIO: f64 = 1.2;
const LOW_DIAGNOSTIC_SQI: f64 = 60.0;
const TOP_IMPORTANCE: f64 = 1.0;

/// How quickly a concept's questions were solved on average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBand {
    Fast,
    Normal,
    Slow,
}

impl TimeBand {
    pub fn from_ratio(avg_ratio: f64) -> Self {
        if avg_ratio < FAST_RATIO {
            TimeBand::Fast
        } else if avg_ratio > SLOW_RATIO {
            TimeBand::Slow
        } else {
            TimeBand::Normal
        }
    }

    pub fn score(self) -> f64 {
        match self {
            TimeBand::Fast => 1.0,
            TimeBand::Normal => 0.7,
            TimeBand::Slow => 0.4,
        }
    }
}

/// Why a concept was ranked where it was. Serialized as its display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reason {
    #[serde(rename = "Wrong earlier")]
    WrongEarlier,
    #[serde(rename = "High importance (A)")]
    HighImportance,
    #[serde(rename = "Low diagnostic score")]
    LowDiagnosticScore,
    #[serde(rename = "Slow solve time")]
    SlowSolveTime,
}

impl Reason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::WrongEarlier => "Wrong earlier",
            Reason::HighImportance => "High importance (A)",
            Reason::LowDiagnosticScore => "Low diagnostic score",
            Reason::SlowSolveTime => "Slow solve time",
        }
    }
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrounded ranking inputs and output for one concept.
#[derive(Debug, Clone, PartialEq)]
pub struct ConceptPriority {
    pub has_wrong: bool,
    pub max_importance: f64,
    pub avg_time_ratio: f64,
    pub time_band: TimeBand,
    pub concept_sqi: f64,
    pub diagnostic_quality: f64,
    /// Priority in `[0, 1]`, unrounded.
    pub weight: f64,
    pub reasons: Vec<Reason>,
}

/// Derives a priority weight and reason tags for a concept.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    weights: ScoringWeights,
}

impl Ranker {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn rank(&self, acc: &ConceptAccumulator) -> ConceptPriority {
        let has_wrong = acc.wrong_count > 0;

        let max_importance = acc
            .attempts
            .iter()
            .filter_map(|a| self.weights.importance.get(a.importance.label()))
            .fold(0.0_f64, f64::max);

        let avg_time_ratio = if acc.attempts.is_empty() {
            0.0
        } else {
            acc.attempts.iter().map(|a| a.time_ratio()).sum::<f64>() / acc.attempts.len() as f64
        };
        let time_band = TimeBand::from_ratio(avg_time_ratio);

        let concept_sqi = acc.totals.index();
        let diagnostic_quality = 1.0 - concept_sqi / 100.0;

        let wrong = if has_wrong { 1.0 } else { 0.0 };
        let raw = WRONG_SHARE * wrong
            + IMPORTANCE_SHARE * max_importance
            + TIME_SHARE * time_band.score()
            + DIAGNOSTIC_SHARE * diagnostic_quality;
        // Custom importance tables may push the sum outside [0, 1].
        let weight = raw.clamp(0.0, 1.0);

        let mut reasons = Vec::new();
        if has_wrong {
            reasons.push(Reason::WrongEarlier);
        }
        if max_importance == TOP_IMPORTANCE {
            reasons.push(Reason::HighImportance);
        }
        if concept_sqi < LOW_DIAGNOSTIC_SQI {
            reasons.push(Reason::LowDiagnosticScore);
        }
        if time_band == TimeBand::Slow {
            reasons.push(Reason::SlowSolveTime);
        }

        ConceptPriority {
            has_wrong,
            max_importance,
            avg_time_ratio,
            time_band,
            concept_sqi,
            diagnostic_quality,
            weight,
            reasons,
        }
    }
}
