//! Core types: normalised articles, ingestion tags, and discovered relationships.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AnalysisError;

/// Fixed method tag attached to every relationship.
pub const RELATIONSHIP_METHOD: &str = "Multi-factor Analysis";

/// Which ingestion adapter produced an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceApi {
    /// NewsAPI.org `everything` endpoint.
    NewsApi,
    /// The Guardian content API.
    Guardian,
    /// NewsData.io `news` endpoint.
    NewsData,
}

impl SourceApi {
    /// Returns the lowercase wire tag for this adapter.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::NewsApi => "newsapi",
            Self::Guardian => "guardian",
            Self::NewsData => "newsdata",
        }
    }

    /// Returns the human-readable provider name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NewsApi => "NewsAPI",
            Self::Guardian => "Guardian API",
            Self::NewsData => "NewsData API",
        }
    }

    /// Returns all adapters in collection order.
    pub fn all() -> &'static [SourceApi] {
        &[Self::NewsApi, Self::Guardian, Self::NewsData]
    }
}

impl fmt::Display for SourceApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for SourceApi {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newsapi" => Ok(Self::NewsApi),
            "guardian" => Ok(Self::Guardian),
            "newsdata" => Ok(Self::NewsData),
            other => Err(AnalysisError::Config(format!("unknown source api: {other}"))),
        }
    }
}

/// One normalised news item.
///
/// Produced by an ingestion adapter and never mutated afterwards. The
/// pipeline only ever reads articles through shared references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Headline. Non-empty for every article that survives filtering.
    pub title: String,
    /// Short summary or trail text. May be empty.
    #[serde(default)]
    pub description: String,
    /// Body text. May be empty; only used as a supplementary relevance signal.
    #[serde(default)]
    pub content: String,
    /// The publishing outlet (e.g. "The Guardian", "bbc-news").
    pub source_name: String,
    /// Which adapter produced this article.
    pub source_api: SourceApi,
    /// Publication timestamp as reported by the provider. May be empty or
    /// in a format that does not parse.
    #[serde(default)]
    pub published_at: String,
    /// Link to the full article.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Byline. Multiple authors are joined with `", "`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

/// The relationship categories, which double as the selectable scoring methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipType {
    /// Shared non-stop-word vocabulary in title and description.
    #[serde(rename = "Keyword Overlap")]
    KeywordOverlap,
    /// Both articles come from the same outlet.
    #[serde(rename = "Source Cross-reference")]
    SourceCrossReference,
    /// Published close together in time.
    #[serde(rename = "Temporal Proximity")]
    TemporalProximity,
    /// Descriptions of similar length.
    #[serde(rename = "Content Similarity")]
    ContentSimilarity,
}

impl RelationshipType {
    /// Returns the display name of this relationship type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::KeywordOverlap => "Keyword Overlap",
            Self::SourceCrossReference => "Source Cross-reference",
            Self::TemporalProximity => "Temporal Proximity",
            Self::ContentSimilarity => "Content Similarity",
        }
    }

    /// Returns all relationship types.
    pub fn all() -> &'static [RelationshipType] {
        &[
            Self::KeywordOverlap,
            Self::SourceCrossReference,
            Self::TemporalProximity,
            Self::ContentSimilarity,
        ]
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RelationshipType {
    type Err = AnalysisError;

    /// Accepts the display name in any case, with spaces, hyphens or
    /// underscores as separators (`"keyword-overlap"`, `"Keyword Overlap"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .trim()
            .chars()
            .map(|c| if c == '-' || c == '_' { ' ' } else { c })
            .collect::<String>()
            .to_lowercase();
        match normalised.as_str() {
            "keyword overlap" => Ok(Self::KeywordOverlap),
            "source cross reference" => Ok(Self::SourceCrossReference),
            "temporal proximity" => Ok(Self::TemporalProximity),
            "content similarity" => Ok(Self::ContentSimilarity),
            _ => Err(AnalysisError::UnknownMethod(s.to_string())),
        }
    }
}

/// A discovered pairwise connection between two canonical articles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Index of the first article; always less than `article2_id`.
    pub article1_id: usize,
    /// Index of the second article.
    pub article2_id: usize,
    pub article1_title: String,
    pub article2_title: String,
    pub article1_source: String,
    pub article2_source: String,
    /// Dominant relationship label.
    #[serde(rename = "type")]
    pub relationship_type: RelationshipType,
    /// Composite strength in `[0.0, 1.0]`.
    pub strength: f64,
    /// Signals that fired, joined with `"; "`.
    pub evidence: String,
    /// Always [`RELATIONSHIP_METHOD`].
    pub method: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_api_tags() {
        assert_eq!(SourceApi::NewsApi.to_string(), "newsapi");
        assert_eq!(SourceApi::Guardian.to_string(), "guardian");
        assert_eq!(SourceApi::NewsData.to_string(), "newsdata");
    }

    #[test]
    fn source_api_serializes_lowercase() {
        let json = serde_json::to_string(&SourceApi::NewsData).expect("serialize");
        assert_eq!(json, "\"newsdata\"");
    }

    #[test]
    fn source_api_parses_case_insensitively() {
        assert_eq!("Guardian".parse::<SourceApi>().ok(), Some(SourceApi::Guardian));
        assert!("reuters".parse::<SourceApi>().is_err());
    }

    #[test]
    fn relationship_type_names() {
        assert_eq!(RelationshipType::KeywordOverlap.name(), "Keyword Overlap");
        assert_eq!(
            RelationshipType::SourceCrossReference.to_string(),
            "Source Cross-reference"
        );
        assert_eq!(RelationshipType::all().len(), 4);
    }

    #[test]
    fn relationship_type_parses_display_and_kebab_forms() {
        assert_eq!(
            "Source Cross-reference".parse::<RelationshipType>().ok(),
            Some(RelationshipType::SourceCrossReference)
        );
        assert_eq!(
            "temporal-proximity".parse::<RelationshipType>().ok(),
            Some(RelationshipType::TemporalProximity)
        );
        assert_eq!(
            "CONTENT_SIMILARITY".parse::<RelationshipType>().ok(),
            Some(RelationshipType::ContentSimilarity)
        );
        let err = "Sentiment".parse::<RelationshipType>().unwrap_err();
        assert!(err.to_string().contains("Sentiment"));
    }

    #[test]
    fn relationship_serializes_type_key() {
        let rel = Relationship {
            article1_id: 0,
            article2_id: 1,
            article1_title: "A".into(),
            article2_title: "B".into(),
            article1_source: "X".into(),
            article2_source: "Y".into(),
            relationship_type: RelationshipType::TemporalProximity,
            strength: 0.5,
            evidence: "Published within 2.0 hours".into(),
            method: RELATIONSHIP_METHOD.into(),
        };
        let value = serde_json::to_value(&rel).expect("serialize");
        assert_eq!(value["type"], "Temporal Proximity");
        assert_eq!(value["method"], "Multi-factor Analysis");
    }

    #[test]
    fn article_optional_fields_default() {
        let json = r#"{"title":"T","source_name":"S","source_api":"guardian"}"#;
        let article: Article = serde_json::from_str(json).expect("deserialize");
        assert!(article.description.is_empty());
        assert!(article.published_at.is_empty());
        assert!(article.url.is_none());
        assert!(article.author.is_none());
    }
}
