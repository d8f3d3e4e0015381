//! HTTP retrieval of the feed document.
//!
//! One request per page build: fire-and-forget with exactly one outcome.
//! There is no retry and no cancellation; the request runs to completion or
//! to a terminal error, and the result is applied exactly once. Every
//! failure class (transport, HTTP status, oversized body, malformed
//! document) recovers identically by substituting the bundled sample
//! snapshot, so loading is never fatal and never user-visible as an error.

use futures::StreamExt;
use thiserror::Error;

use super::model::{parse_snapshot, Snapshot};
use super::sample::sample_snapshot;

/// Response bodies above this size are rejected. A feed document is a few
/// kilobytes; anything near the cap is garbage or abuse.
const MAX_FEED_SIZE: usize = 2 * 1024 * 1024; // 2MB

/// Errors that can occur while fetching and parsing the feed document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Response body exceeded the size limit
    #[error("response too large")]
    ResponseTooLarge,
    /// Body was not a structurally valid feed document
    #[error("malformed feed document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Outcome of a feed load after fallback substitution.
///
/// `fallback` records whether the snapshot is the bundled sample rather than
/// the fetched document. Purely informational; both paths feed the same
/// pipeline.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub snapshot: Snapshot,
    pub fallback: bool,
}

/// Build the HTTP client used for the feed fetch.
pub fn build_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("roost/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Fetch the feed document and return a complete snapshot, substituting the
/// sample snapshot on any failure. Infallible by design: the page must never
/// be empty because the network was.
pub async fn load_feed(client: &reqwest::Client, url: &str) -> LoadOutcome {
    match fetch_snapshot(client, url).await {
        Ok(snapshot) => {
            tracing::info!(url = %url, items = snapshot.items.len(), "feed document loaded");
            LoadOutcome {
                snapshot,
                fallback: false,
            }
        }
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "feed load failed, using sample snapshot");
            LoadOutcome {
                snapshot: sample_snapshot(),
                fallback: true,
            }
        }
    }
}

/// Fetch and parse the feed document. Single attempt.
pub async fn fetch_snapshot(
    client: &reqwest::Client,
    url: &str,
) -> Result<Snapshot, FetchError> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(FetchError::HttpStatus(response.status().as_u16()));
    }

    let bytes = read_limited_bytes(response, MAX_FEED_SIZE).await?;
    Ok(parse_snapshot(&bytes)?)
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: trust Content-Length when the server sends one
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
