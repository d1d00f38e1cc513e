//! Shared HTTP client for provider API requests.

use std::time::Duration;

use crate::config::CollectionConfig;
use crate::error::SourceError;

/// User-Agent sent with every provider request.
pub const USER_AGENT: &str = concat!("newsgraph/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] for provider API calls.
///
/// The client has:
/// - Timeout from `collection.timeout_seconds`
/// - A fixed `newsgraph/<version>` User-Agent
/// - At most 10 redirects
///
/// # Errors
///
/// Returns [`SourceError::Http`] if the client cannot be constructed.
pub fn build_client(config: &CollectionConfig) -> Result<reqwest::Client, SourceError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SourceError::Http(format!("failed to build HTTP client: {e}")))
}

/// Send a GET request and read the body, mapping non-2xx answers to
/// [`SourceError::Status`].
pub(crate) async fn get_text(
    client: &reqwest::Client,
    api: newsgraph_core::SourceApi,
    url: &str,
    params: &[(&str, String)],
) -> Result<String, SourceError> {
    let response = client
        .get(url)
        .query(params)
        .send()
        .await
        .map_err(|e| SourceError::Http(format!("{} request failed: {e}", api.name())))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            api,
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| SourceError::Http(format!("{} response read failed: {e}", api.name())))?;
    tracing::trace!(api = %api, bytes = body.len(), "response received");
    Ok(body)
}
