//! Scoring configuration and caller-supplied analysis parameters.
//!
//! [`ScoringConfig`] holds the hand-tuned weights, cut-offs and stop words
//! used by the relationship scorer. [`AnalysisParams`] carries the per-run
//! choices a caller makes: the strength threshold and the enabled methods.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::types::RelationshipType;

/// Weight applied to the keyword Jaccard similarity.
pub const KEYWORD_WEIGHT: f64 = 0.4;
/// Flat contribution when two articles share a source.
pub const SOURCE_WEIGHT: f64 = 0.2;
/// Maximum temporal proximity contribution (at zero hours apart).
pub const TEMPORAL_WEIGHT: f64 = 0.3;
/// Weight applied to the description length-ratio similarity.
pub const CONTENT_WEIGHT: f64 = 0.1;
/// Publication gap beyond which temporal proximity contributes nothing.
pub const TEMPORAL_WINDOW_HOURS: f64 = 24.0;
/// Jaccard similarity above which shared keywords are cited as evidence.
pub const KEYWORD_EVIDENCE_MIN: f64 = 0.1;
/// Length ratio above which descriptions are cited as structurally similar.
pub const CONTENT_EVIDENCE_MIN: f64 = 0.8;
/// Maximum number of shared keywords cited in evidence.
pub const MAX_SHARED_KEYWORDS: usize = 3;

/// Fraction of a candidate title's words that must already appear in an
/// accepted title for the candidate to count as a duplicate.
pub const DUPLICATE_TITLE_RATIO: f64 = 0.7;
/// Fraction of query tokens that must match for queries longer than
/// [`RELEVANCE_STRICT_TOKEN_LIMIT`] tokens.
pub const RELEVANCE_MATCH_RATIO: f64 = 0.7;
/// Queries with at most this many tokens must match every token.
pub const RELEVANCE_STRICT_TOKEN_LIMIT: usize = 3;
/// Query tokens of this many characters or fewer never match.
pub const RELEVANCE_MIN_TOKEN_CHARS: usize = 2;

/// Default minimum strength for a pair to be reported.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.6;

/// Function words excluded from keyword overlap.
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should",
];

/// Immutable weights and cut-offs owned by a
/// [`RelationshipScorer`](crate::pipeline::scoring::RelationshipScorer).
///
/// [`ScoringConfig::default()`] reproduces the reference weighting
/// (0.4 / 0.2 / 0.3 / 0.1) exactly.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub keyword_weight: f64,
    pub source_weight: f64,
    pub temporal_weight: f64,
    pub content_weight: f64,
    /// Hours within which two publications count as temporally close.
    pub temporal_window_hours: f64,
    pub keyword_evidence_min: f64,
    pub content_evidence_min: f64,
    pub max_shared_keywords: usize,
    /// Lowercase stop words removed before keyword comparison.
    pub stop_words: HashSet<String>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            keyword_weight: KEYWORD_WEIGHT,
            source_weight: SOURCE_WEIGHT,
            temporal_weight: TEMPORAL_WEIGHT,
            content_weight: CONTENT_WEIGHT,
            temporal_window_hours: TEMPORAL_WINDOW_HOURS,
            keyword_evidence_min: KEYWORD_EVIDENCE_MIN,
            content_evidence_min: CONTENT_EVIDENCE_MIN,
            max_shared_keywords: MAX_SHARED_KEYWORDS,
            stop_words: STOP_WORDS.iter().map(|w| (*w).to_owned()).collect(),
        }
    }
}

impl ScoringConfig {
    /// Replace the stop-word list. Words are lowercased on insertion.
    #[must_use]
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words = words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();
        self
    }

    /// Validates weights and cut-offs.
    ///
    /// Checks:
    /// - every weight is finite and non-negative
    /// - `temporal_window_hours` is finite and greater than 0
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let weights = [
            ("keyword_weight", self.keyword_weight),
            ("source_weight", self.source_weight),
            ("temporal_weight", self.temporal_weight),
            ("content_weight", self.content_weight),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(AnalysisError::Config(format!(
                    "{name} must be a non-negative number"
                )));
            }
        }
        if !self.temporal_window_hours.is_finite() || self.temporal_window_hours <= 0.0 {
            return Err(AnalysisError::Config(
                "temporal_window_hours must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Per-run parameters chosen by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisParams {
    /// Minimum strength, in the open interval `(0, 1)`, for a pair to qualify.
    pub similarity_threshold: f64,
    /// Enabled scoring methods. An empty list is valid and yields no
    /// relationships.
    pub methods: Vec<RelationshipType>,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            methods: vec![
                RelationshipType::KeywordOverlap,
                RelationshipType::ContentSimilarity,
            ],
        }
    }
}

impl AnalysisParams {
    /// Parameters enabling every method at the given threshold.
    pub fn all_methods(similarity_threshold: f64) -> Self {
        Self {
            similarity_threshold,
            methods: RelationshipType::all().to_vec(),
        }
    }

    /// Returns whether `method` is enabled.
    pub fn is_enabled(&self, method: RelationshipType) -> bool {
        self.methods.contains(&method)
    }

    /// Validates the threshold.
    ///
    /// Checks:
    /// - `similarity_threshold` is finite and strictly between 0 and 1
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let t = self.similarity_threshold;
        if !t.is_finite() || t <= 0.0 || t >= 1.0 {
            return Err(AnalysisError::Config(format!(
                "similarity_threshold must be in (0, 1), got {t}"
            )));
        }
        Ok(())
    }
}
