//! Provider adapter contract tests against a mock HTTP server.
//!
//! Verify the exact query parameters each adapter sends, how responses are
//! filtered, and how non-success statuses map to `SourceError::Status`.

use chrono::NaiveDate;
use newsgraph::config::CollectionConfig;
use newsgraph::http::build_client;
use newsgraph::sources::{
    CollectionRequest, GuardianSource, NewsApiSource, NewsDataSource, NewsSource,
};
use newsgraph::{SourceApi, SourceError};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(max_articles: usize) -> CollectionRequest {
    CollectionRequest {
        query: "climate summit".into(),
        from_date: NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
        max_articles,
    }
}

fn client() -> reqwest::Client {
    build_client(&CollectionConfig::default()).expect("client")
}

// ────────────────────────────────────────────────────────────────────────────
// NewsAPI
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn newsapi_sends_expected_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .and(query_param("q", "\"climate summit\""))
        .and(query_param("from", "2024-03-01"))
        .and(query_param("sortBy", "relevancy"))
        .and(query_param("pageSize", "20"))
        .and(query_param("language", "en"))
        .and(query_param("apiKey", "newsapi-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "articles": [
                {
                    "source": {"name": "Reuters"},
                    "title": "Climate summit opens",
                    "description": "Leaders arrive",
                    "publishedAt": "2024-03-01T09:00:00Z",
                    "url": "https://example.com/1"
                },
                {
                    "source": {"name": "Reuters"},
                    "title": "Transfer window news",
                    "description": "Football clubs spend big",
                    "publishedAt": "2024-03-01T10:00:00Z"
                }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = NewsApiSource::new("newsapi-key", mock_server.uri());
    let articles = source.fetch(&client(), &request(20)).await.expect("fetch");

    assert_eq!(articles.len(), 1, "off-topic article should be filtered");
    assert_eq!(articles[0].title, "Climate summit opens");
    assert_eq!(articles[0].source_api, SourceApi::NewsApi);
}

#[tokio::test]
async fn newsapi_error_status_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "status": "error",
            "code": "rateLimited"
        })))
        .mount(&mock_server)
        .await;

    let source = NewsApiSource::new("newsapi-key", mock_server.uri());
    let err = source.fetch(&client(), &request(20)).await.unwrap_err();

    assert!(matches!(
        err,
        SourceError::Status {
            api: SourceApi::NewsApi,
            status: 429
        }
    ));
    assert_eq!(err.to_string(), "newsapi error: 429");
}

// ────────────────────────────────────────────────────────────────────────────
// Guardian
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn guardian_caps_page_size_and_requests_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "\"climate summit\""))
        .and(query_param("from-date", "2024-03-01"))
        .and(query_param("order-by", "relevance"))
        .and(query_param("page-size", "50"))
        .and(query_param("show-fields", "trailText,byline,bodyText"))
        .and(query_param("api-key", "guardian-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "status": "ok",
                "results": [
                    {
                        "webTitle": "What the climate summit means",
                        "webPublicationDate": "2024-03-01T07:30:00Z",
                        "webUrl": "https://www.theguardian.com/a",
                        "fields": {"trailText": "Analysis", "byline": "A Writer"}
                    },
                    {
                        "webTitle": "",
                        "webPublicationDate": "2024-03-01T08:30:00Z",
                        "fields": {"trailText": "climate summit liveblog"}
                    }
                ]
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = GuardianSource::new("guardian-key", mock_server.uri());
    let articles = source.fetch(&client(), &request(80)).await.expect("fetch");

    assert_eq!(articles.len(), 1, "untitled result should be dropped");
    assert_eq!(articles[0].source_name, "The Guardian");
    assert_eq!(articles[0].author.as_deref(), Some("A Writer"));
}

#[tokio::test]
async fn guardian_malformed_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let source = GuardianSource::new("guardian-key", mock_server.uri());
    let err = source.fetch(&client(), &request(10)).await.unwrap_err();
    assert!(matches!(err, SourceError::Parse(_)));
}

// ────────────────────────────────────────────────────────────────────────────
// NewsData
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn newsdata_sends_expected_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/1/news"))
        .and(query_param("q", "\"climate summit\""))
        .and(query_param("language", "en"))
        .and(query_param("size", "10"))
        .and(query_param("apikey", "newsdata-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "results": [
                {
                    "title": "Climate summit ends with deal",
                    "description": "Negotiators agree text",
                    "source_id": "apnews",
                    "pubDate": "2024-03-02 18:00:00",
                    "link": "https://example.com/nd",
                    "creator": ["Ana Silva"]
                }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = NewsDataSource::new("newsdata-key", mock_server.uri());
    let articles = source.fetch(&client(), &request(10)).await.expect("fetch");

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].source_name, "apnews");
    assert_eq!(articles[0].author.as_deref(), Some("Ana Silva"));
    assert_eq!(articles[0].source_api, SourceApi::NewsData);
}

#[tokio::test]
async fn newsdata_unauthorized_is_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/1/news"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let source = NewsDataSource::new("bad-key", mock_server.uri());
    let err = source.fetch(&client(), &request(10)).await.unwrap_err();
    assert!(matches!(err, SourceError::Status { status: 401, .. }));
}

#[tokio::test]
async fn unreachable_host_is_http_error() {
    // Port 9 (discard) is not expected to run an HTTP server.
    let source = NewsDataSource::new("key", "http://127.0.0.1:9");
    let err = source.fetch(&client(), &request(10)).await.unwrap_err();
    assert!(matches!(err, SourceError::Http(_)));
}
