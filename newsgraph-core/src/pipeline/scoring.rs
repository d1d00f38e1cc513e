//! Multi-factor relationship scoring between canonical articles.
//!
//! Every unordered pair `(i, j)` with `i < j` is scored exactly once. Each
//! enabled method adds an independent term to the pair's strength:
//!
//! ```text
//! keyword   = jaccard(title+description words − stop words) × 0.4
//! source    = 0.2                       if source_name is identical
//! temporal  = ((24 − hours) / 24) × 0.3 if hours ≤ 24
//! content   = (1 − |len1 − len2| / max(len1, len2)) × 0.1
//! ```
//!
//! A pair qualifies when `min(strength, 1.0) ≥ threshold`. The label is
//! chosen by fixed evidence precedence (source, keyword, temporal, then
//! content as the fallback), independent of which term contributed most.
//! Qualifying pairs are stably sorted by descending strength, so ties keep
//! pair-generation order.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rayon::prelude::*;

use crate::config::{AnalysisParams, ScoringConfig};
use crate::error::Result;
use crate::types::{Article, Relationship, RelationshipType, RELATIONSHIP_METHOD};

use super::timestamp::{hours_apart, parse_published_at};

/// Evidence used when no individual signal produced a citation.
pub const DEFAULT_EVIDENCE: &str = "Detected similarity";

/// Number of unordered pairs scored for `n` articles.
pub fn pairs_evaluated(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// The score computed for one pair, before threshold admission.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPair {
    pub article1_id: usize,
    pub article2_id: usize,
    /// Strength capped at 1.0.
    pub strength: f64,
    pub relationship_type: RelationshipType,
}

/// Per-article values computed once per scoring pass and shared by every
/// pair the article takes part in.
#[derive(Debug)]
struct ArticleFeatures {
    /// Non-stop-word keywords in first-appearance order.
    keywords: Vec<String>,
    keyword_set: HashSet<String>,
    published: Option<DateTime<Utc>>,
    description_chars: usize,
}

/// Which signals fired for a pair, and the raw values behind them.
#[derive(Debug, Default, Clone, Copy)]
struct Signals {
    strength: f64,
    keyword_cited: bool,
    source_cited: bool,
    temporal_hours: Option<f64>,
    content_cited: bool,
}

impl Signals {
    fn relationship_type(&self) -> RelationshipType {
        if self.source_cited {
            RelationshipType::SourceCrossReference
        } else if self.keyword_cited {
            RelationshipType::KeywordOverlap
        } else if self.temporal_hours.is_some() {
            RelationshipType::TemporalProximity
        } else {
            RelationshipType::ContentSimilarity
        }
    }

    fn capped_strength(&self) -> f64 {
        self.strength.min(1.0)
    }
}

/// Scores article pairs with an immutable [`ScoringConfig`].
#[derive(Debug, Clone, Default)]
pub struct RelationshipScorer {
    config: ScoringConfig,
}

impl RelationshipScorer {
    /// Create a scorer owning `config` without checking it.
    ///
    /// Prefer [`try_new`](Self::try_new) for configs built from user input.
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Create a scorer owning `config` after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Config`](crate::error::AnalysisError::Config) for a negative or non-finite weight,
    /// or a temporal window that is not positive.
    pub fn try_new(config: ScoringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The weights and cut-offs this scorer applies.
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Discover qualifying relationships, sorted by descending strength.
    ///
    /// Returns an empty list without comparing anything when fewer than two
    /// articles are supplied.
    pub fn discover(&self, articles: &[Article], params: &AnalysisParams) -> Vec<Relationship> {
        if articles.len() < 2 {
            return Vec::new();
        }
        let features = self.extract_features(articles);
        let mut relationships: Vec<Relationship> = (0..articles.len())
            .flat_map(|i| self.qualifying_row(articles, &features, i, params))
            .collect();
        sort_by_strength(&mut relationships);
        tracing::debug!(
            articles = articles.len(),
            pairs = pairs_evaluated(articles.len()),
            relationships = relationships.len(),
            "relationship discovery complete"
        );
        relationships
    }

    /// Row-parallel variant of [`discover`](Self::discover).
    ///
    /// Rows are scored on the rayon pool, concatenated in row order and then
    /// stably sorted, so the output is identical to the sequential version.
    pub fn discover_parallel(
        &self,
        articles: &[Article],
        params: &AnalysisParams,
    ) -> Vec<Relationship> {
        if articles.len() < 2 {
            return Vec::new();
        }
        let features = self.extract_features(articles);
        let rows: Vec<Vec<Relationship>> = (0..articles.len())
            .into_par_iter()
            .map(|i| self.qualifying_row(articles, &features, i, params))
            .collect();
        let mut relationships: Vec<Relationship> = rows.into_iter().flatten().collect();
        sort_by_strength(&mut relationships);
        tracing::debug!(
            articles = articles.len(),
            relationships = relationships.len(),
            "parallel relationship discovery complete"
        );
        relationships
    }

    /// Score every pair in generation order, without threshold filtering.
    pub fn score_pairs(&self, articles: &[Article], params: &AnalysisParams) -> Vec<ScoredPair> {
        if articles.len() < 2 {
            return Vec::new();
        }
        let features = self.extract_features(articles);
        let mut pairs = Vec::with_capacity(pairs_evaluated(articles.len()));
        for i in 0..articles.len() {
            for j in (i + 1)..articles.len() {
                let signals = self.signals(&articles[i], &articles[j], &features[i], &features[j], params);
                pairs.push(ScoredPair {
                    article1_id: i,
                    article2_id: j,
                    strength: signals.capped_strength(),
                    relationship_type: signals.relationship_type(),
                });
            }
        }
        pairs
    }

    fn qualifying_row(
        &self,
        articles: &[Article],
        features: &[ArticleFeatures],
        i: usize,
        params: &AnalysisParams,
    ) -> Vec<Relationship> {
        let mut row = Vec::new();
        for j in (i + 1)..articles.len() {
            let signals = self.signals(&articles[i], &articles[j], &features[i], &features[j], params);
            if signals.capped_strength() >= params.similarity_threshold {
                row.push(self.build_relationship(articles, features, i, j, &signals));
            }
        }
        row
    }

    fn extract_features(&self, articles: &[Article]) -> Vec<ArticleFeatures> {
        articles
            .iter()
            .map(|article| {
                let text = format!("{} {}", article.title, article.description).to_lowercase();
                let mut keywords = Vec::new();
                let mut keyword_set = HashSet::new();
                for word in text.split_whitespace() {
                    if self.config.stop_words.contains(word) {
                        continue;
                    }
                    if keyword_set.insert(word.to_owned()) {
                        keywords.push(word.to_owned());
                    }
                }
                ArticleFeatures {
                    keywords,
                    keyword_set,
                    published: parse_published_at(&article.published_at),
                    description_chars: article.description.chars().count(),
                }
            })
            .collect()
    }

    fn signals(
        &self,
        a: &Article,
        b: &Article,
        fa: &ArticleFeatures,
        fb: &ArticleFeatures,
        params: &AnalysisParams,
    ) -> Signals {
        let cfg = &self.config;
        let mut signals = Signals::default();

        if params.is_enabled(RelationshipType::KeywordOverlap)
            && !fa.keyword_set.is_empty()
            && !fb.keyword_set.is_empty()
        {
            let shared = fa
                .keywords
                .iter()
                .filter(|w| fb.keyword_set.contains(*w))
                .count();
            let union = fa.keyword_set.len() + fb.keyword_set.len() - shared;
            let jaccard = shared as f64 / union as f64;
            signals.strength += jaccard * cfg.keyword_weight;
            signals.keyword_cited = jaccard > cfg.keyword_evidence_min;
        }

        if params.is_enabled(RelationshipType::SourceCrossReference)
            && a.source_name == b.source_name
        {
            signals.strength += cfg.source_weight;
            signals.source_cited = true;
        }

        if params.is_enabled(RelationshipType::TemporalProximity) {
            if let (Some(ta), Some(tb)) = (fa.published, fb.published) {
                let hours = hours_apart(ta, tb);
                if hours <= cfg.temporal_window_hours {
                    let window = cfg.temporal_window_hours;
                    signals.strength += ((window - hours) / window) * cfg.temporal_weight;
                    signals.temporal_hours = Some(hours);
                }
            }
        }

        if params.is_enabled(RelationshipType::ContentSimilarity)
            && fa.description_chars > 0
            && fb.description_chars > 0
        {
            let longer = fa.description_chars.max(fb.description_chars) as f64;
            let diff = fa.description_chars.abs_diff(fb.description_chars) as f64;
            let ratio = 1.0 - diff / longer;
            signals.strength += ratio * cfg.content_weight;
            signals.content_cited = ratio > cfg.content_evidence_min;
        }

        signals
    }

    fn build_relationship(
        &self,
        articles: &[Article],
        features: &[ArticleFeatures],
        i: usize,
        j: usize,
        signals: &Signals,
    ) -> Relationship {
        let (a, b) = (&articles[i], &articles[j]);
        let mut evidence: Vec<String> = Vec::new();

        if signals.keyword_cited {
            let shared: Vec<&str> = features[i]
                .keywords
                .iter()
                .filter(|w| features[j].keyword_set.contains(*w))
                .take(self.config.max_shared_keywords)
                .map(String::as_str)
                .collect();
            evidence.push(format!("Shared keywords: {}", shared.join(", ")));
        }
        if signals.source_cited {
            evidence.push(format!("Same source: {}", a.source_name));
        }
        if let Some(hours) = signals.temporal_hours {
            evidence.push(format!("Published within {hours:.1} hours"));
        }
        if signals.content_cited {
            evidence.push("Similar content structure".to_string());
        }

        let evidence = if evidence.is_empty() {
            DEFAULT_EVIDENCE.to_string()
        } else {
            evidence.join("; ")
        };

        Relationship {
            article1_id: i,
            article2_id: j,
            article1_title: a.title.clone(),
            article2_title: b.title.clone(),
            article1_source: a.source_name.clone(),
            article2_source: b.source_name.clone(),
            relationship_type: signals.relationship_type(),
            strength: signals.capped_strength(),
            evidence,
            method: RELATIONSHIP_METHOD.to_string(),
        }
    }
}

/// Stable sort by strength, descending.
fn sort_by_strength(relationships: &mut [Relationship]) {
    relationships.sort_by(|a, b| {
        b.strength
            .partial_cmp(&a.strength)
            .unwrap_or(Ordering::Equal)
    });
}
