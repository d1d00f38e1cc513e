//! Multi-provider collection: concurrent fan-out, per-source accounting, dedup.
//!
//! Queries every enabled provider concurrently, logs per-provider failures
//! at warn level, concatenates survivors in provider order and removes
//! near-duplicate titles.

use chrono::{Days, Local, NaiveDate};
use newsgraph_core::{deduplicate, Article, SourceApi};
use serde::{Deserialize, Serialize};

use crate::config::NewsGraphConfig;
use crate::error::{NewsGraphError, Result, SourceError};
use crate::http;
use crate::sources::{CollectionRequest, GuardianSource, NewsApiSource, NewsDataSource, NewsSource};

/// What one provider contributed to a collection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceReport {
    pub source_api: SourceApi,
    /// Relevant articles returned, before cross-provider dedup.
    pub articles: usize,
    /// Failure message when the provider contributed nothing because of an error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a collection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionOutcome {
    /// The canonical article set, in provider order.
    pub articles: Vec<Article>,
    /// One entry per enabled provider, in provider order.
    pub reports: Vec<SourceReport>,
    /// Articles before cross-provider dedup.
    pub candidates: usize,
}

impl CollectionOutcome {
    /// Number of providers that answered successfully.
    pub fn succeeded(&self) -> usize {
        self.reports.iter().filter(|r| r.error.is_none()).count()
    }
}

/// Collect news for `config.collection.query`, looking back
/// `config.collection.days_back` days from today.
///
/// # Errors
///
/// Returns [`NewsGraphError::Config`] if the configuration is invalid or the
/// query is blank. Provider failures never fail the run.
pub async fn collect_news(config: &NewsGraphConfig) -> Result<CollectionOutcome> {
    let today = Local::now().date_naive();
    let from_date = today
        .checked_sub_days(Days::new(u64::from(config.collection.days_back)))
        .unwrap_or(today);
    collect_news_since(config, from_date).await
}

/// Collect news published on or after `from_date`.
///
/// # Pipeline
///
/// 1. Validate the config and build one HTTP client
/// 2. Fan out to enabled providers concurrently with [`futures::future::join_all`]
/// 3. Log per-provider errors at warn level; they contribute zero articles
/// 4. Concatenate in provider order (NewsAPI, Guardian, NewsData)
/// 5. Remove near-duplicate titles
///
/// # Errors
///
/// Returns [`NewsGraphError::Config`] if the configuration is invalid or the
/// query is blank.
pub async fn collect_news_since(
    config: &NewsGraphConfig,
    from_date: NaiveDate,
) -> Result<CollectionOutcome> {
    config.validate()?;
    let query = config.collection.query.trim();
    if query.is_empty() {
        return Err(NewsGraphError::Config("query must not be empty".into()));
    }

    let client = http::build_client(&config.collection)?;
    let request = CollectionRequest {
        query: query.to_owned(),
        from_date,
        max_articles: config.collection.max_articles,
    };

    let enabled: Vec<SourceApi> = SourceApi::all()
        .iter()
        .copied()
        .filter(|api| config.collection.sources.contains(api))
        .collect();

    tracing::info!(query, %from_date, sources = enabled.len(), "collecting news");

    let futures: Vec<_> = enabled
        .iter()
        .map(|api| {
            let client = &client;
            let request = &request;
            let api = *api;
            async move {
                let result = query_source(api, config, client, request).await;
                (api, result)
            }
        })
        .collect();

    let outcomes = futures::future::join_all(futures).await;

    let mut all_articles: Vec<Article> = Vec::new();
    let mut reports: Vec<SourceReport> = Vec::with_capacity(outcomes.len());

    for (api, outcome) in outcomes {
        match outcome {
            Ok(articles) => {
                let count = articles.len();
                tracing::info!(source = api.name(), count, "source returned articles");
                reports.push(SourceReport {
                    source_api: api,
                    articles: count,
                    error: None,
                });
                all_articles.extend(articles);
            }
            Err(err) => {
                tracing::warn!(source = api.name(), error = %err, "source query failed");
                reports.push(SourceReport {
                    source_api: api,
                    articles: 0,
                    error: Some(err.to_string()),
                });
            }
        }
    }

    let candidates = all_articles.len();
    let articles = deduplicate(all_articles);
    tracing::info!(candidates, unique = articles.len(), "collection complete");

    Ok(CollectionOutcome {
        articles,
        reports,
        candidates,
    })
}

/// Query a single provider, dispatching to the concrete adapter.
async fn query_source(
    api: SourceApi,
    config: &NewsGraphConfig,
    client: &reqwest::Client,
    request: &CollectionRequest,
) -> std::result::Result<Vec<Article>, SourceError> {
    let settings = config.sources.get(api);
    match api {
        SourceApi::NewsApi => {
            fetch_from(NewsApiSource::from_settings(settings)?, client, request).await
        }
        SourceApi::Guardian => {
            fetch_from(GuardianSource::from_settings(settings)?, client, request).await
        }
        SourceApi::NewsData => {
            fetch_from(NewsDataSource::from_settings(settings)?, client, request).await
        }
    }
}

/// Run one adapter, tagging its log lines with the provider it reports.
async fn fetch_from<S: NewsSource>(
    source: S,
    client: &reqwest::Client,
    request: &CollectionRequest,
) -> std::result::Result<Vec<Article>, SourceError> {
    let source_name = source.api().name();
    tracing::debug!(source = source_name, max_articles = request.max_articles, "querying source");
    let articles = source.fetch(client, request).await?;
    tracing::debug!(source = source_name, admitted = articles.len(), "source answered");
    Ok(articles)
}
