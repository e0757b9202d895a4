//! Folds attempt scores into global, per-topic and per-concept totals.
//!
//! Groups are kept in first-seen order: an index map points each key at its
//! slot in a vector, so output never depends on hash order.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::SqiError;
use crate::model::Attempt;
use crate::scorer::{AttemptScore, AttemptScorer};

/// Insertion-ordered grouping of values by key.
#[derive(Debug, Clone)]
pub struct OrderedGroups<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K, V> Default for OrderedGroups<K, V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Hash + Eq + Clone, V> OrderedGroups<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `key`, inserting `init()` on first sight.
    pub fn entry_or_insert_with(&mut self, key: K, init: impl FnOnce() -> V) -> &mut V {
        let slot = match self.index.get(&key).copied() {
            Some(slot) => slot,
            None => {
                let slot = self.entries.len();
                self.index.insert(key.clone(), slot);
                self.entries.push((key, init()));
                slot
            }
        };
        &mut self.entries[slot].1
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    /// Iterate in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Running weighted/max sums.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreTotals {
    pub weighted: f64,
    pub max: f64,
}

impl ScoreTotals {
    pub fn add(&mut self, score: AttemptScore) {
        self.weighted += score.weighted_score;
        self.max += score.max_possible_score;
    }

    /// Normalised 0–100 index, unrounded. A zero denominator or an
    /// overflowed sum yields 0.
    pub fn index(&self) -> f64 {
        if self.max <= 0.0 {
            return 0.0;
        }
        let pct = self.weighted / self.max * 100.0;
        // Written out rather than `clamp` so -0.0 never reaches the output.
        if !pct.is_finite() || pct <= 0.0 {
            0.0
        } else {
            pct.min(100.0)
        }
    }
}

/// Totals for one topic.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicAccumulator {
    pub topic: String,
    pub totals: ScoreTotals,
}

/// Totals and contributing attempts for one (topic, concept) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ConceptAccumulator {
    pub topic: String,
    pub concept: String,
    pub totals: ScoreTotals,
    pub attempts: Vec<Attempt>,
    pub wrong_count: usize,
    pub total_count: usize,
}

impl ConceptAccumulator {
    fn new(topic: &str, concept: &str) -> Self {
        Self {
            topic: topic.to_string(),
            concept: concept.to_string(),
            totals: ScoreTotals::default(),
            attempts: Vec::new(),
            wrong_count: 0,
            total_count: 0,
        }
    }

    fn push(&mut self, attempt: &Attempt, score: AttemptScore) {
        self.totals.add(score);
        self.attempts.push(attempt.clone());
        if !attempt.correct {
            self.wrong_count += 1;
        }
        self.total_count += 1;
    }
}

/// The result of folding every attempt of one input.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub overall: ScoreTotals,
    pub topics: OrderedGroups<String, TopicAccumulator>,
    pub concepts: OrderedGroups<(String, String), ConceptAccumulator>,
}

impl Aggregation {
    /// Add one scored attempt to every level it belongs to.
    pub fn record(&mut self, attempt: &Attempt, score: AttemptScore) {
        self.overall.add(score);

        self.topics
            .entry_or_insert_with(attempt.topic.clone(), || TopicAccumulator {
                topic: attempt.topic.clone(),
                totals: ScoreTotals::default(),
            })
            .totals
            .add(score);

        self.concepts
            .entry_or_insert_with(
                (attempt.topic.clone(), attempt.concept.clone()),
                || ConceptAccumulator::new(&attempt.topic, &attempt.concept),
            )
            .push(attempt, score);
    }

    pub fn concept(&self, topic: &str, concept: &str) -> Option<&ConceptAccumulator> {
        self.concepts.get(&(topic.to_string(), concept.to_string()))
    }
}

/// Score and fold `attempts` left to right.
pub fn aggregate(scorer: &AttemptScorer, attempts: &[Attempt]) -> Result<Aggregation, SqiError> {
    let mut aggregation = Aggregation::default();
    for (index, attempt) in attempts.iter().enumerate() {
        let score = scorer.score(index, attempt)?;
        aggregation.record(attempt, score);
    }

    let unknown = attempts
        .iter()
        .filter(|a| !(a.importance.is_known() && a.difficulty.is_known() && a.kind.is_known()))
        .count();
    if unknown > 0 {
        tracing::warn!("{unknown} attempt(s) carry unknown labels, weighted with the fallback");
    }

    tracing::debug!(
        attempts = attempts.len(),
        topics = aggregation.topics.len(),
        concepts = aggregation.concepts.len(),
        "aggregated attempts"
    );
    Ok(aggregation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::tests::base_attempt;

    fn attempt(topic: &str, concept: &str, correct: bool) -> Attempt {
        Attempt {
            topic: topic.into(),
            concept: concept.into(),
            correct,
            ..base_attempt()
        }
    }

    #[test]
    fn empty_input_yields_zero_totals() {
        let agg = aggregate(&AttemptScorer::default(), &[]).unwrap();
        assert_eq!(agg.overall, ScoreTotals::default());
        assert!(agg.topics.is_empty());
        assert!(agg.concepts.is_empty());
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let attempts = vec![
            attempt("Zoology", "Cells", true),
            attempt("Algebra", "Matrices", true),
            attempt("Zoology", "Genetics", false),
            attempt("Algebra", "Matrices", false),
        ];
        let agg = aggregate(&AttemptScorer::default(), &attempts).unwrap();

        let topics: Vec<&str> = agg.topics.values().map(|t| t.topic.as_str()).collect();
        assert_eq!(topics, vec!["Zoology", "Algebra"]);

        let concepts: Vec<&str> = agg.concepts.values().map(|c| c.concept.as_str()).collect();
        assert_eq!(concepts, vec!["Cells", "Matrices", "Genetics"]);
    }

    #[test]
    fn concept_counts_and_sums() {
        let attempts = vec![
            attempt("Algebra", "Matrices", true),
            attempt("Algebra", "Matrices", false),
            attempt("Algebra", "Vectors", true),
        ];
        let agg = aggregate(&AttemptScorer::default(), &attempts).unwrap();

        let matrices = agg.concept("Algebra", "Matrices").unwrap();
        assert_eq!(matrices.total_count, 2);
        assert_eq!(matrices.wrong_count, 1);
        assert_eq!(matrices.attempts.len(), 2);
        assert!((matrices.totals.weighted - 8.0).abs() < 1e-9);
        assert!((matrices.totals.max - 20.0).abs() < 1e-9);

        let algebra = agg.topics.get(&"Algebra".to_string()).unwrap();
        assert!((algebra.totals.weighted - 18.0).abs() < 1e-9);
        assert!((agg.overall.max - 30.0).abs() < 1e-9);
    }

    #[test]
    fn index_clamps_and_guards_zero_max() {
        let over = ScoreTotals {
            weighted: 12.0,
            max: 10.0,
        };
        let under = ScoreTotals {
            weighted: -2.0,
            max: 10.0,
        };
        let empty = ScoreTotals {
            weighted: 3.0,
            max: 0.0,
        };
        assert_eq!(over.index(), 100.0);
        assert_eq!(under.index(), 0.0);
        assert_eq!(empty.index(), 0.0);
        assert!((ScoreTotals { weighted: 2.4, max: 3.0 }.index() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn overflowed_totals_index_to_zero() {
        let nan = ScoreTotals {
            weighted: f64::INFINITY,
            max: f64::INFINITY,
        };
        let inf_over_finite = ScoreTotals {
            weighted: f64::INFINITY,
            max: 10.0,
        };
        assert_eq!(nan.index(), 0.0);
        assert_eq!(inf_over_finite.index(), 0.0);
    }

    #[test]
    fn overflowing_marks_do_not_report_full_score() {
        let huge = Attempt {
            marks: 1e308,
            difficulty: crate::model::Difficulty::H,
            ..base_attempt()
        };
        let wrong = Attempt {
            correct: false,
            ..huge.clone()
        };
        let agg = aggregate(&AttemptScorer::default(), &[huge, wrong]).unwrap();
        assert!(agg.overall.weighted.is_infinite());
        assert_eq!(agg.overall.index(), 0.0);
    }

    #[test]
    fn same_concept_name_under_different_topics_is_separate() {
        let attempts = vec![
            attempt("Physics", "Units", true),
            attempt("Chemistry", "Units", false),
        ];
        let agg = aggregate(&AttemptScorer::default(), &attempts).unwrap();
        assert_eq!(agg.concepts.len(), 2);
        assert_eq!(agg.concept("Chemistry", "Units").unwrap().wrong_count, 1);
        assert_eq!(agg.concept("Physics", "Units").unwrap().wrong_count, 0);
    }

    #[test]
    fn invalid_attempt_aborts_the_fold() {
        let mut bad = attempt("Physics", "Units", true);
        bad.expected_time_sec = 0.0;
        let attempts = vec![attempt("Physics", "Units", true), bad];
        let err = aggregate(&AttemptScorer::default(), &attempts).unwrap_err();
        assert!(matches!(err, SqiError::InvalidAttempt { index: 1, .. }));
    }
}
