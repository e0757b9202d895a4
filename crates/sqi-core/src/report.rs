//! SQI result types with JSON persistence.
//!
//! This document is the handoff to the summary agent. Field names and nesting
//! are part of its compatibility surface; changing their shape requires a
//! bump of [`PROMPT_VERSION`] or [`ENGINE_VERSION`].

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ranker::Reason;

/// Diagnostic prompt version the payload is shaped for.
pub const PROMPT_VERSION: &str = "v1";
/// Engine identifier stamped into every result.
pub const ENGINE_VERSION: &str = "sqi-v0.1";

/// A complete SQI computation for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqiResult {
    pub student_id: String,
    /// Overall index in `[0, 100]`, one decimal.
    pub overall_sqi: f64,
    pub topic_scores: Vec<TopicScore>,
    pub concept_scores: Vec<ConceptScore>,
    /// Concepts by descending weight.
    pub ranked_concepts_for_summary: Vec<RankedConcept>,
    pub metadata: ResultMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicScore {
    pub topic: String,
    pub sqi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptScore {
    pub topic: String,
    pub concept: String,
    pub sqi: f64,
}

/// A concept prioritised for the summary agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedConcept {
    pub topic: String,
    pub concept: String,
    /// Priority in `[0, 1]`, two decimals.
    pub weight: f64,
    pub reasons: Vec<Reason>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultMetadata {
    pub diagnostic_prompt_version: String,
    pub computed_at: DateTime<Utc>,
    pub engine: String,
}

impl ResultMetadata {
    pub fn new(computed_at: DateTime<Utc>) -> Self {
        Self {
            diagnostic_prompt_version: PROMPT_VERSION.to_string(),
            computed_at,
            engine: ENGINE_VERSION.to_string(),
        }
    }
}

impl SqiResult {
    /// File name offered for download: `sqi_result_<student_id>.json`.
    pub fn default_file_name(&self) -> String {
        let safe: String = self
            .student_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("sqi_result_{safe}.json")
    }

    /// Serialize to JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        json.context("failed to serialize SQI result")
    }

    /// Save the result as pretty JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json(true)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write result to {}", path.display()))?;
        Ok(())
    }

    /// Load a result from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read result from {}", path.display()))?;
        let result: SqiResult =
            serde_json::from_str(&content).context("failed to parse result JSON")?;
        Ok(result)
    }

    pub fn topic_score(&self, topic: &str) -> Option<f64> {
        self.topic_scores
            .iter()
            .find(|t| t.topic == topic)
            .map(|t| t.sqi)
    }

    pub fn concept_score(&self, topic: &str, concept: &str) -> Option<f64> {
        self.concept_scores
            .iter()
            .find(|c| c.topic == topic && c.concept == concept)
            .map(|c| c.sqi)
    }
}
