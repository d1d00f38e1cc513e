//! Read-only network statistics over an article set and its relationships.
//!
//! Used by reports and dashboards. Every ratio is guarded so empty or
//! single-article sets produce zeros rather than NaN.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::pipeline::scoring::pairs_evaluated;
use crate::pipeline::timestamp::parse_published_at;
use crate::types::{Article, Relationship, RelationshipType, SourceApi};

/// Relationships stronger than this count as strong connections.
pub const STRONG_RELATIONSHIP_MIN: f64 = 0.7;

/// Article count for one outlet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceCount {
    pub source_name: String,
    pub count: usize,
}

/// Article count for one ingestion adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiCount {
    pub source_api: SourceApi,
    pub count: usize,
}

/// Relationship count for one relationship type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub relationship_type: RelationshipType,
    pub count: usize,
}

/// Summary statistics for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub article_count: usize,
    /// Distinct ingestion adapters represented.
    pub api_source_count: usize,
    /// Distinct outlets represented.
    pub news_source_count: usize,
    /// Articles per adapter, most first.
    pub api_counts: Vec<ApiCount>,
    /// Articles per outlet, most first; ties keep first appearance.
    pub source_counts: Vec<SourceCount>,
    pub relationship_count: usize,
    /// Relationships divided by possible pairs; 0 when fewer than two articles.
    pub density: f64,
    pub average_strength: f64,
    pub max_strength: f64,
    pub min_strength: f64,
    /// Relationships with strength above [`STRONG_RELATIONSHIP_MIN`].
    pub strong_relationships: usize,
    /// Relationships per type in first-appearance order.
    pub type_counts: Vec<TypeCount>,
    pub earliest_published: Option<DateTime<Utc>>,
    pub latest_published: Option<DateTime<Utc>>,
    /// Articles per UTC publication date, oldest first. Unparseable
    /// timestamps are left out.
    pub timeline: Vec<(NaiveDate, usize)>,
}

/// Compute summary statistics for `articles` and the `relationships`
/// discovered among them.
pub fn summarize(articles: &[Article], relationships: &[Relationship]) -> NetworkSummary {
    let possible = pairs_evaluated(articles.len());
    let density = if possible == 0 {
        0.0
    } else {
        relationships.len() as f64 / possible as f64
    };

    let strengths: Vec<f64> = relationships.iter().map(|r| r.strength).collect();
    let (average_strength, max_strength, min_strength) = if strengths.is_empty() {
        (0.0, 0.0, 0.0)
    } else {
        let sum: f64 = strengths.iter().sum();
        let max = strengths.iter().copied().fold(f64::MIN, f64::max);
        let min = strengths.iter().copied().fold(f64::MAX, f64::min);
        (sum / strengths.len() as f64, max, min)
    };

    let source_counts: Vec<SourceCount> =
        count_in_order(articles.iter().map(|a| a.source_name.clone()))
            .into_iter()
            .map(|(source_name, count)| SourceCount { source_name, count })
            .collect();
    let api_counts: Vec<ApiCount> = count_in_order(articles.iter().map(|a| a.source_api))
        .into_iter()
        .map(|(source_api, count)| ApiCount { source_api, count })
        .collect();

    let mut type_counts: Vec<TypeCount> = Vec::new();
    for rel in relationships {
        match type_counts
            .iter_mut()
            .find(|t| t.relationship_type == rel.relationship_type)
        {
            Some(entry) => entry.count += 1,
            None => type_counts.push(TypeCount {
                relationship_type: rel.relationship_type,
                count: 1,
            }),
        }
    }

    let published: Vec<DateTime<Utc>> = articles
        .iter()
        .filter_map(|a| parse_published_at(&a.published_at))
        .collect();

    NetworkSummary {
        article_count: articles.len(),
        api_source_count: api_counts.len(),
        news_source_count: source_counts.len(),
        api_counts,
        source_counts,
        relationship_count: relationships.len(),
        density,
        average_strength,
        max_strength,
        min_strength,
        strong_relationships: strengths
            .iter()
            .filter(|s| **s > STRONG_RELATIONSHIP_MIN)
            .count(),
        type_counts,
        earliest_published: published.iter().min().copied(),
        latest_published: published.iter().max().copied(),
        timeline: daily_counts(&published),
    }
}

/// Group timestamps by UTC calendar date in ascending date order.
fn daily_counts(published: &[DateTime<Utc>]) -> Vec<(NaiveDate, usize)> {
    let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for dt in published {
        *days.entry(dt.date_naive()).or_insert(0) += 1;
    }
    days.into_iter().collect()
}

/// Count occurrences, sorted by count descending with first-appearance
/// order breaking ties.
fn count_in_order<T: PartialEq>(items: impl Iterator<Item = T>) -> Vec<(T, usize)> {
    let mut counts: Vec<(T, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(k, _)| *k == item) {
            Some((_, n)) => *n += 1,
            None => counts.push((item, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
