//! Multiplicative weight tables for importance, difficulty and question type.
//!
//! Tables are plain label → multiplier maps so they can be loaded from
//! configuration and swapped in tests. A label that is not in a table is
//! weighted with [`FALLBACK_WEIGHT`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Attempt, Difficulty, Importance, QuestionType};

/// Multiplier applied to labels missing from a table.
pub const FALLBACK_WEIGHT: f64 = 1.0;

/// A label → multiplier lookup table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightTable(BTreeMap<String, f64>);

impl WeightTable {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Returns the configured multiplier, or `None` if the label is absent.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.0.get(label).copied()
    }

    /// Returns the multiplier for `label`, falling back to [`FALLBACK_WEIGHT`].
    pub fn weight_of(&self, label: &str) -> f64 {
        match self.get(label) {
            Some(weight) => weight,
            None => {
                tracing::debug!("no weight for label '{label}', using {FALLBACK_WEIGHT}");
                FALLBACK_WEIGHT
            }
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.contains_key(label)
    }

    /// Overlay `other` on top of this table; entries in `other` win.
    pub fn merge(&mut self, other: &WeightTable) {
        for (label, weight) in &other.0 {
            self.0.insert(label.clone(), *weight);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The three weight tables the scorer and ranker share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    #[serde(default = "default_importance")]
    pub importance: WeightTable,
    #[serde(default = "default_difficulty")]
    pub difficulty: WeightTable,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: WeightTable,
}

fn default_importance() -> WeightTable {
    WeightTable::new([("A", 1.0), ("B", 0.7), ("C", 0.5)])
}

fn default_difficulty() -> WeightTable {
    WeightTable::new([("E", 0.6), ("M", 1.0), ("H", 1.4)])
}

fn default_kind() -> WeightTable {
    WeightTable::new([("Practical", 1.1), ("Theory", 1.0)])
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            importance: default_importance(),
            difficulty: default_difficulty(),
            kind: default_kind(),
        }
    }
}

impl ScoringWeights {
    pub fn importance_weight(&self, importance: &Importance) -> f64 {
        self.importance.weight_of(importance.label())
    }

    pub fn difficulty_weight(&self, difficulty: &Difficulty) -> f64 {
        self.difficulty.weight_of(difficulty.label())
    }

    pub fn type_weight(&self, kind: &QuestionType) -> f64 {
        self.kind.weight_of(kind.label())
    }

    /// Product of the three multipliers for one attempt.
    pub fn combined(&self, attempt: &Attempt) -> f64 {
        self.importance_weight(&attempt.importance)
            * self.difficulty_weight(&attempt.difficulty)
            * self.type_weight(&attempt.kind)
    }

    /// Overlay a partial set of tables on these weights.
    pub fn merged_with(mut self, overrides: &ScoringWeights) -> Self {
        self.importance.merge(&overrides.importance);
        self.difficulty.merge(&overrides.difficulty);
        self.kind.merge(&overrides.kind);
        self
    }
}
