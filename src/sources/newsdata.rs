//! NewsData.io adapter, using the `/api/1/news` endpoint.
//!
//! The free tier has no date filter, so `from_date` is not sent.

use newsgraph_core::{Article, SourceApi};
use serde::Deserialize;

use super::{admit_candidates, endpoint, non_empty, CollectionRequest, NewsSource};
use crate::config::SourceSettings;
use crate::error::SourceError;
use crate::http;

/// NewsData caps `size` at 50.
pub const MAX_PAGE_SIZE: usize = 50;

/// NewsData.io adapter.
#[derive(Debug, Clone)]
pub struct NewsDataSource {
    api_key: String,
    base_url: String,
}

impl NewsDataSource {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Build from settings, resolving the key from config or `NEWSDATA_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::MissingApiKey`] if no key is available.
    pub fn from_settings(settings: &SourceSettings) -> Result<Self, SourceError> {
        let key = settings
            .resolve_api_key(SourceApi::NewsData)
            .ok_or(SourceError::MissingApiKey(SourceApi::NewsData))?;
        Ok(Self::new(key, settings.base_url.clone()))
    }
}

impl NewsSource for NewsDataSource {
    async fn fetch(
        &self,
        client: &reqwest::Client,
        request: &CollectionRequest,
    ) -> Result<Vec<Article>, SourceError> {
        tracing::trace!(query = %request.query, "NewsData search");

        let params = [
            ("q", request.quoted_query()),
            ("language", "en".to_owned()),
            ("size", request.max_articles.min(MAX_PAGE_SIZE).to_string()),
            ("apikey", self.api_key.clone()),
        ];
        let url = endpoint(&self.base_url, "api/1/news");
        let body = http::get_text(client, SourceApi::NewsData, &url, &params).await?;

        let candidates = parse_newsdata_response(&body)?;
        Ok(admit_candidates(candidates, &request.query))
    }

    fn api(&self) -> SourceApi {
        SourceApi::NewsData
    }
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    results: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    source_id: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    link: Option<String>,
    #[serde(default)]
    creator: Option<Vec<String>>,
    content: Option<String>,
}

/// Parse a NewsData `news` payload.
///
/// Items missing a title or description are skipped. Multiple creators are
/// joined with `", "`.
pub(crate) fn parse_newsdata_response(body: &str) -> Result<Vec<Article>, SourceError> {
    let response: NewsResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::Parse(format!("NewsData payload: {e}")))?;

    let articles: Vec<Article> = response
        .results
        .into_iter()
        .filter_map(|raw| {
            let title = non_empty(raw.title)?;
            let description = non_empty(raw.description)?;
            let author = raw
                .creator
                .filter(|c| !c.is_empty())
                .map(|c| c.join(", "));
            Some(Article {
                title,
                description,
                content: raw.content.unwrap_or_default(),
                source_name: non_empty(raw.source_id).unwrap_or_else(|| "Unknown".to_owned()),
                source_api: SourceApi::NewsData,
                published_at: raw.pub_date.unwrap_or_default(),
                url: non_empty(raw.link),
                author,
            })
        })
        .collect();

    tracing::debug!(count = articles.len(), "NewsData articles parsed");
    Ok(articles)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "status": "success",
        "totalResults": 3,
        "results": [
            {
                "article_id": "a1",
                "title": "Climate summit draws record crowds",
                "link": "https://example.com/nd1",
                "creator": ["Ana Silva", "Tom Reed"],
                "description": "Activists and delegates arrive.",
                "content": "Record crowds at the climate summit",
                "pubDate": "2024-03-01 12:15:00",
                "source_id": "apnews"
            },
            {
                "article_id": "a2",
                "title": "No description here",
                "link": "https://example.com/nd2",
                "creator": null,
                "description": "",
                "pubDate": "2024-03-01 13:00:00",
                "source_id": "afp"
            },
            {
                "article_id": "a3",
                "title": "Climate summit closes",
                "link": "https://example.com/nd3",
                "creator": null,
                "description": "Final statement agreed.",
                "content": null,
                "pubDate": "2024-03-03 08:00:00",
                "source_id": null
            }
        ],
        "nextPage": null
    }"#;

    #[test]
    fn parses_results_and_joins_creators() {
        let articles = parse_newsdata_response(FIXTURE).expect("parse");
        assert_eq!(articles.len(), 2);

        let first = &articles[0];
        assert_eq!(first.title, "Climate summit draws record crowds");
        assert_eq!(first.source_name, "apnews");
        assert_eq!(first.source_api, SourceApi::NewsData);
        assert_eq!(first.author.as_deref(), Some("Ana Silva, Tom Reed"));
        assert_eq!(first.published_at, "2024-03-01 12:15:00");
        assert_eq!(first.url.as_deref(), Some("https://example.com/nd1"));
    }

    #[test]
    fn missing_source_id_defaults_to_unknown() {
        let articles = parse_newsdata_response(FIXTURE).expect("parse");
        let second = &articles[1];
        assert_eq!(second.title, "Climate summit closes");
        assert_eq!(second.source_name, "Unknown");
        assert!(second.author.is_none());
        assert!(second.content.is_empty());
    }

    #[test]
    fn missing_results_is_empty() {
        let articles = parse_newsdata_response(r#"{"status":"success"}"#).expect("parse");
        assert!(articles.is_empty());
    }

    #[test]
    fn invalid_json_is_parse_error() {
        assert!(matches!(
            parse_newsdata_response("[").unwrap_err(),
            SourceError::Parse(_)
        ));
    }
}
