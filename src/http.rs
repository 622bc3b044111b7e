//! One-shot JSON GET helper shared by the geocoder and the forecast client.

use crate::error::TransportError;
use reqwest::Client;
use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Thin wrapper around a `reqwest::Client` that never serves cached bodies.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher that sends `user_agent` and no-cache headers on
    /// every request.
    pub fn new(user_agent: &str) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store, no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .map_err(TransportError::Client)?;

        Ok(Self { client })
    }

    /// GET `url` with `query` and decode the body as `T`.
    ///
    /// Single attempt, no retries. A non-success status, a failed send and
    /// an undecodable body are all `TransportError`s.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, TransportError> {
        debug!(url, ?query, "GET");

        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            warn!(url, %status, "upstream returned an error status");
            return Err(TransportError::Status {
                url: url.to_string(),
                status,
            });
        }

        resp.json::<T>().await.map_err(|source| TransportError::Body {
            url: url.to_string(),
            source,
        })
    }
}
