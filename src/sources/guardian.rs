//! Guardian content API adapter, using the `/search` endpoint.

use newsgraph_core::{Article, SourceApi};
use serde::Deserialize;

use super::{admit_candidates, endpoint, non_empty, CollectionRequest, NewsSource};
use crate::config::SourceSettings;
use crate::error::SourceError;
use crate::http;

/// The Guardian caps `page-size` at 50.
pub const MAX_PAGE_SIZE: usize = 50;

/// Outlet name attached to every Guardian article.
pub const SOURCE_NAME: &str = "The Guardian";

/// Guardian content API adapter.
#[derive(Debug, Clone)]
pub struct GuardianSource {
    api_key: String,
    base_url: String,
}

impl GuardianSource {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Build from settings, resolving the key from config or `GUARDIAN_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::MissingApiKey`] if no key is available.
    pub fn from_settings(settings: &SourceSettings) -> Result<Self, SourceError> {
        let key = settings
            .resolve_api_key(SourceApi::Guardian)
            .ok_or(SourceError::MissingApiKey(SourceApi::Guardian))?;
        Ok(Self::new(key, settings.base_url.clone()))
    }
}

impl NewsSource for GuardianSource {
    async fn fetch(
        &self,
        client: &reqwest::Client,
        request: &CollectionRequest,
    ) -> Result<Vec<Article>, SourceError> {
        tracing::trace!(query = %request.query, "Guardian search");

        let params = [
            ("q", request.quoted_query()),
            ("from-date", request.from_date_param()),
            ("order-by", "relevance".to_owned()),
            ("page-size", request.max_articles.min(MAX_PAGE_SIZE).to_string()),
            ("show-fields", "trailText,byline,bodyText".to_owned()),
            ("api-key", self.api_key.clone()),
        ];
        let url = endpoint(&self.base_url, "search");
        let body = http::get_text(client, SourceApi::Guardian, &url, &params).await?;

        let candidates = parse_guardian_response(&body)?;
        Ok(admit_candidates(candidates, &request.query))
    }

    fn api(&self) -> SourceApi {
        SourceApi::Guardian
    }
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    response: Option<SearchResponse>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResult {
    web_title: Option<String>,
    web_publication_date: Option<String>,
    web_url: Option<String>,
    #[serde(default)]
    fields: RawFields,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFields {
    trail_text: Option<String>,
    byline: Option<String>,
    body_text: Option<String>,
}

/// Parse a Guardian `search` payload.
///
/// Unlike the other providers, a missing trail text is allowed; the
/// description is then empty.
pub(crate) fn parse_guardian_response(body: &str) -> Result<Vec<Article>, SourceError> {
    let envelope: SearchEnvelope = serde_json::from_str(body)
        .map_err(|e| SourceError::Parse(format!("Guardian payload: {e}")))?;

    let articles: Vec<Article> = envelope
        .response
        .map(|r| r.results)
        .unwrap_or_default()
        .into_iter()
        .map(|raw| Article {
            title: raw.web_title.unwrap_or_default(),
            description: raw.fields.trail_text.unwrap_or_default(),
            content: raw.fields.body_text.unwrap_or_default(),
            source_name: SOURCE_NAME.to_owned(),
            source_api: SourceApi::Guardian,
            published_at: raw.web_publication_date.unwrap_or_default(),
            url: non_empty(raw.web_url),
            author: non_empty(raw.fields.byline),
        })
        .collect();

    tracing::debug!(count = articles.len(), "Guardian articles parsed");
    Ok(articles)
}
