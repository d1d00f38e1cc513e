//! # newsgraph-core
//!
//! Relevance filtering, near-duplicate removal and multi-factor relationship
//! discovery for short news-article records.
//!
//! This crate performs no I/O. Ingestion adapters live in the host crate and
//! hand normalised [`Article`] values to the pipeline here.
//!
//! ## Pipeline
//!
//! ```text
//! raw candidates → relevance filter → dedup → canonical set → scorer → relationships
//! ```
//!
//! - [`pipeline::relevance`] admits candidates that mention enough query tokens
//! - [`pipeline::dedup`] drops later reports of a story whose title words are
//!   mostly covered by an earlier title
//! - [`pipeline::scoring`] scores every pair with keyword, source, temporal and
//!   content signals, labels it, and keeps pairs at or above the threshold
//! - [`analytics`] derives density and strength statistics for reporting
//!
//! Every stage is a total function: malformed timestamps or empty fields
//! degrade to zero contributions rather than errors.

pub mod analytics;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

pub use analytics::{summarize, NetworkSummary};
pub use config::{AnalysisParams, ScoringConfig};
pub use error::{AnalysisError, Result};
pub use pipeline::dedup::deduplicate;
pub use pipeline::relevance::{is_relevant, RelevanceQuery};
pub use pipeline::scoring::RelationshipScorer;
pub use types::{Article, Relationship, RelationshipType, SourceApi, RELATIONSHIP_METHOD};

/// Build the canonical article set from raw candidates.
///
/// Drops candidates with an empty title, applies the relevance filter for
/// `query`, then removes near-duplicate titles. Input order is preserved
/// among survivors.
///
/// # Examples
///
/// ```
/// use newsgraph_core::{canonicalize, Article, SourceApi};
///
/// let make = |title: &str| Article {
///     title: title.into(),
///     description: String::new(),
///     content: String::new(),
///     source_name: "Reuters".into(),
///     source_api: SourceApi::NewsApi,
///     published_at: String::new(),
///     url: None,
///     author: None,
/// };
/// let canonical = canonicalize(
///     vec![make("Budget vote today"), make("Budget vote today"), make("Cup final")],
///     "budget",
/// );
/// assert_eq!(canonical.len(), 1);
/// ```
pub fn canonicalize(candidates: Vec<Article>, query: &str) -> Vec<Article> {
    let relevance = RelevanceQuery::new(query);
    let admitted: Vec<Article> = candidates
        .into_iter()
        .filter(|a| !a.title.trim().is_empty() && relevance.admits(a))
        .collect();
    deduplicate(admitted)
}

/// Discover relationships with the default scoring configuration.
///
/// # Errors
///
/// Returns [`AnalysisError::Config`] if `params.similarity_threshold` is not
/// strictly between 0 and 1. Scoring itself never fails.
///
/// # Examples
///
/// ```
/// use newsgraph_core::{analyze, AnalysisParams};
///
/// let relationships = analyze(&[], &AnalysisParams::default())?;
/// assert!(relationships.is_empty());
/// # Ok::<(), newsgraph_core::AnalysisError>(())
/// ```
pub fn analyze(articles: &[Article], params: &AnalysisParams) -> Result<Vec<Relationship>> {
    params.validate()?;
    Ok(RelationshipScorer::default().discover(articles, params))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_article(title: &str, source: &str) -> Article {
        Article {
            title: title.to_string(),
            description: String::new(),
            content: String::new(),
            source_name: source.to_string(),
            source_api: SourceApi::Guardian,
            published_at: String::new(),
            url: None,
            author: None,
        }
    }

    #[test]
    fn analyze_rejects_out_of_range_threshold() {
        let params = AnalysisParams {
            similarity_threshold: 1.0,
            ..Default::default()
        };
        let result = analyze(&[], &params);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("similarity_threshold"));
    }

    #[test]
    fn analyze_empty_set_is_ok_and_empty() {
        let result = analyze(&[], &AnalysisParams::all_methods(0.5));
        assert!(matches!(result, Ok(ref v) if v.is_empty()));
    }

    #[test]
    fn canonicalize_drops_empty_titles() {
        let candidates = vec![make_article("", "X"), make_article("   ", "X")];
        assert!(canonicalize(candidates, "").is_empty());
    }

    #[test]
    fn canonicalize_filters_then_dedups() {
        let candidates = vec![
            make_article("Election results announced", "A"),
            make_article("Weather update", "B"),
            make_article("Election results announced tonight", "C"),
            make_article("Election turnout record", "D"),
        ];
        let canonical = canonicalize(candidates, "election");
        let titles: Vec<&str> = canonical.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Election results announced", "Election turnout record"]
        );
    }
}
