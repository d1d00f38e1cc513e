//! NewsAPI.org adapter, using the `/v2/everything` endpoint.

use newsgraph_core::{Article, SourceApi};
use serde::Deserialize;

use super::{admit_candidates, endpoint, non_empty, CollectionRequest, NewsSource};
use crate::config::SourceSettings;
use crate::error::SourceError;
use crate::http;

/// NewsAPI caps `pageSize` at 100.
pub const MAX_PAGE_SIZE: usize = 100;

/// NewsAPI.org adapter.
#[derive(Debug, Clone)]
pub struct NewsApiSource {
    api_key: String,
    base_url: String,
}

impl NewsApiSource {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Build from settings, resolving the key from config or `NEWSAPI_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::MissingApiKey`] if no key is available.
    pub fn from_settings(settings: &SourceSettings) -> Result<Self, SourceError> {
        let key = settings
            .resolve_api_key(SourceApi::NewsApi)
            .ok_or(SourceError::MissingApiKey(SourceApi::NewsApi))?;
        Ok(Self::new(key, settings.base_url.clone()))
    }
}

impl NewsSource for NewsApiSource {
    async fn fetch(
        &self,
        client: &reqwest::Client,
        request: &CollectionRequest,
    ) -> Result<Vec<Article>, SourceError> {
        tracing::trace!(query = %request.query, "NewsAPI search");

        let params = [
            ("q", request.quoted_query()),
            ("from", request.from_date_param()),
            ("sortBy", "relevancy".to_owned()),
            ("pageSize", request.max_articles.min(MAX_PAGE_SIZE).to_string()),
            ("language", "en".to_owned()),
            ("apiKey", self.api_key.clone()),
        ];
        let url = endpoint(&self.base_url, "v2/everything");
        let body = http::get_text(client, SourceApi::NewsApi, &url, &params).await?;

        let candidates = parse_newsapi_response(&body)?;
        Ok(admit_candidates(candidates, &request.query))
    }

    fn api(&self) -> SourceApi {
        SourceApi::NewsApi
    }
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    #[serde(default)]
    source: Option<RawSource>,
    title: Option<String>,
    description: Option<String>,
    author: Option<String>,
    url: Option<String>,
    published_at: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    name: Option<String>,
}

/// Parse a NewsAPI `everything` payload.
///
/// Items missing a title or description are skipped.
pub(crate) fn parse_newsapi_response(body: &str) -> Result<Vec<Article>, SourceError> {
    let response: EverythingResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::Parse(format!("NewsAPI payload: {e}")))?;

    let articles: Vec<Article> = response
        .articles
        .into_iter()
        .filter_map(|raw| {
            let title = non_empty(raw.title)?;
            let description = non_empty(raw.description)?;
            Some(Article {
                title,
                description,
                content: raw.content.unwrap_or_default(),
                source_name: raw
                    .source
                    .and_then(|s| non_empty(s.name))
                    .unwrap_or_else(|| "Unknown".to_owned()),
                source_api: SourceApi::NewsApi,
                published_at: raw.published_at.unwrap_or_default(),
                url: non_empty(raw.url),
                author: non_empty(raw.author),
            })
        })
        .collect();

    tracing::debug!(count = articles.len(), "NewsAPI articles parsed");
    Ok(articles)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "status": "ok",
        "totalResults": 3,
        "articles": [
            {
                "source": {"id": "reuters", "name": "Reuters"},
                "author": "Jane Doe",
                "title": "Climate summit opens in Geneva",
                "description": "Delegates gather for the climate summit.",
                "url": "https://example.com/a",
                "publishedAt": "2024-03-01T09:00:00Z",
                "content": "Full text of the climate summit story"
            },
            {
                "source": {"id": null, "name": "BBC News"},
                "author": null,
                "title": "Summit without a description",
                "description": null,
                "url": "https://example.com/b",
                "publishedAt": "2024-03-01T10:00:00Z",
                "content": null
            },
            {
                "source": {"id": null, "name": null},
                "title": "Climate summit day two",
                "description": "Talks continue.",
                "url": "",
                "publishedAt": "2024-03-02T10:00:00Z"
            }
        ]
    }"#;

    #[test]
    fn parses_articles_with_title_and_description() {
        let articles = parse_newsapi_response(FIXTURE).expect("parse");
        assert_eq!(articles.len(), 2);

        let first = &articles[0];
        assert_eq!(first.title, "Climate summit opens in Geneva");
        assert_eq!(first.source_name, "Reuters");
        assert_eq!(first.source_api, SourceApi::NewsApi);
        assert_eq!(first.published_at, "2024-03-01T09:00:00Z");
        assert_eq!(first.url.as_deref(), Some("https://example.com/a"));
        assert_eq!(first.author.as_deref(), Some("Jane Doe"));
        assert_eq!(first.content, "Full text of the climate summit story");
    }

    #[test]
    fn missing_source_name_defaults_to_unknown() {
        let articles = parse_newsapi_response(FIXTURE).expect("parse");
        let second = &articles[1];
        assert_eq!(second.source_name, "Unknown");
        assert!(second.url.is_none());
        assert!(second.author.is_none());
        assert!(second.content.is_empty());
    }

    #[test]
    fn missing_articles_key_is_empty() {
        let articles = parse_newsapi_response(r#"{"status":"ok"}"#).expect("parse");
        assert!(articles.is_empty());
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let err = parse_newsapi_response("<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn from_settings_uses_configured_key() {
        let settings = SourceSettings {
            api_key: Some("abc".into()),
            base_url: "https://newsapi.org".into(),
        };
        let source = NewsApiSource::from_settings(&settings).expect("key configured");
        assert_eq!(source.api(), SourceApi::NewsApi);
    }
}
