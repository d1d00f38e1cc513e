//! Provider adapters that turn news API responses into [`Article`] values.
//!
//! Each adapter implements [`NewsSource`]: it builds the provider request,
//! parses the JSON payload with `serde_json`, drops items with an empty
//! title, and applies the relevance filter before handing articles on.
//! JSON parsing lives in free functions so it can be tested against
//! fixture payloads without a network.

pub mod guardian;
pub mod newsapi;
pub mod newsdata;

pub use guardian::GuardianSource;
pub use newsapi::NewsApiSource;
pub use newsdata::NewsDataSource;

use chrono::NaiveDate;
use newsgraph_core::pipeline::relevance::filter_relevant;
use newsgraph_core::{Article, SourceApi};

use crate::error::SourceError;

/// What to ask every provider for.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionRequest {
    /// Search query, sent as an exact phrase.
    pub query: String,
    /// Earliest publication date to request, where the provider supports it.
    pub from_date: NaiveDate,
    /// Articles requested from each provider before provider caps apply.
    pub max_articles: usize,
}

impl CollectionRequest {
    /// The query wrapped in double quotes for exact phrase matching.
    pub fn quoted_query(&self) -> String {
        format!("\"{}\"", self.query.trim())
    }

    /// `from_date` formatted as `YYYY-MM-DD`.
    pub fn from_date_param(&self) -> String {
        self.from_date.format("%Y-%m-%d").to_string()
    }
}

/// A news provider adapter.
///
/// All implementations must be `Send + Sync` so the collector can query
/// providers concurrently.
pub trait NewsSource: Send + Sync {
    /// Fetch candidate articles for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request fails, the provider answers with
    /// a non-success status, or the body is not the expected JSON shape.
    fn fetch(
        &self,
        client: &reqwest::Client,
        request: &CollectionRequest,
    ) -> impl std::future::Future<Output = Result<Vec<Article>, SourceError>> + Send;

    /// Which provider this adapter talks to.
    fn api(&self) -> SourceApi;
}

/// Drop untitled candidates and those that fail the relevance filter.
pub(crate) fn admit_candidates(candidates: Vec<Article>, query: &str) -> Vec<Article> {
    let titled: Vec<Article> = candidates
        .into_iter()
        .filter(|a| !a.title.trim().is_empty())
        .collect();
    filter_relevant(titled, query)
}

/// Treat a missing or blank string as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Join a URL base and a path without doubling the slash.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_article(title: &str, description: &str) -> Article {
        Article {
            title: title.into(),
            description: description.into(),
            content: String::new(),
            source_name: "Reuters".into(),
            source_api: SourceApi::NewsApi,
            published_at: String::new(),
            url: None,
            author: None,
        }
    }

    #[test]
    fn quoted_query_wraps_trimmed_query() {
        let request = CollectionRequest {
            query: " climate summit ".into(),
            from_date: NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
            max_articles: 20,
        };
        assert_eq!(request.quoted_query(), "\"climate summit\"");
        assert_eq!(request.from_date_param(), "2024-03-01");
    }

    #[test]
    fn admit_drops_untitled_and_irrelevant() {
        let candidates = vec![
            make_article("Climate summit opens", ""),
            make_article("", "climate summit coverage"),
            make_article("Football results", "weekend scores"),
            make_article("Leaders meet", "The climate summit begins"),
        ];
        let admitted = admit_candidates(candidates, "climate summit");
        let titles: Vec<&str> = admitted.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Climate summit opens", "Leaders meet"]);
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        assert_eq!(
            endpoint("https://newsapi.org/", "/v2/everything"),
            "https://newsapi.org/v2/everything"
        );
        assert_eq!(endpoint("http://127.0.0.1:9000", "search"), "http://127.0.0.1:9000/search");
    }

    #[test]
    fn non_empty_filters_blank() {
        assert_eq!(non_empty(Some("  ".into())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("x".into())).as_deref(), Some("x"));
    }

    #[test]
    fn adapters_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NewsApiSource>();
        assert_send_sync::<GuardianSource>();
        assert_send_sync::<NewsDataSource>();
    }
}
