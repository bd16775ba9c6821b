//! Stream relay: re-serves upstream audio under the skill's own host
//!
//! The voice client only plays HTTPS URLs it can reach, while CDN URLs are
//! short lived and IP bound. The skill therefore hands out
//! `{public_base_url}/proxy?url=<upstream>` and pipes the bytes through.

use crate::error::RelayError;
use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::Response;
use futures::StreamExt;
use reqwest::Client;
use url::Url;

/// Path of the relay endpoint
pub const RELAY_PATH: &str = "/proxy";

/// Query parameter carrying the upstream URL
pub const RELAY_URL_PARAM: &str = "url";

/// Content type used when upstream does not declare one
pub const DEFAULT_CONTENT_TYPE: &str = "audio/mp4";

// Headers copied as-is from upstream when present
const FORWARDED_HEADERS: [header::HeaderName; 3] = [
    header::CONTENT_LENGTH,
    header::CONTENT_RANGE,
    header::ACCEPT_RANGES,
];

/// Builds relay URLs from the public base URL
#[derive(Debug, Clone)]
pub struct RelayLinks {
    endpoint: Url,
}

impl RelayLinks {
    pub fn new(public_base_url: &str) -> Result<Self, RelayError> {
        let base = public_base_url.trim().trim_end_matches('/');
        let endpoint = Url::parse(&format!("{}{}", base, RELAY_PATH))
            .map_err(|e| RelayError::InvalidBaseUrl(format!("{}: {}", public_base_url, e)))?;
        if endpoint.cannot_be_a_base() {
            return Err(RelayError::InvalidBaseUrl(public_base_url.to_string()));
        }
        Ok(Self { endpoint })
    }

    /// `{base}/proxy?url=<upstream, percent-encoded>`
    pub fn link_for(&self, upstream: &str) -> String {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair(RELAY_URL_PARAM, upstream);
        url.into()
    }
}

/// Pipes an upstream audio resource back to the caller
#[derive(Debug, Clone, Default)]
pub struct StreamRelay {
    client: Client,
}

impl StreamRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `upstream` and stream it back
    ///
    /// The caller's `Range` header is forwarded, and the upstream status
    /// (200 or 206) is kept. Chunks are relayed as they arrive.
    pub async fn relay(
        &self,
        upstream: Option<&str>,
        request_headers: &HeaderMap,
    ) -> Result<Response, RelayError> {
        let upstream = upstream
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(RelayError::MissingParameter)?;

        let mut request = self.client.get(upstream);
        if let Some(range) = request_headers.get(header::RANGE) {
            request = request.header(header::RANGE, range.clone());
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(upstream, "❌ Relay connection failed: {}", e);
            RelayError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(upstream, %status, "Upstream refused the relay");
            return Err(RelayError::upstream(format!("upstream returned {}", status)));
        }

        let mut headers = HeaderMap::new();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .cloned()
            .unwrap_or(HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
        headers.insert(header::CONTENT_TYPE, content_type);
        for name in FORWARDED_HEADERS {
            if let Some(value) = response.headers().get(&name) {
                headers.insert(name, value.clone());
            }
        }
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        tracing::debug!(upstream, %status, "🔀 Relaying stream");

        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(std::io::Error::other));

        let mut relayed = Response::new(Body::from_stream(stream));
        *relayed.status_mut() = status;
        *relayed.headers_mut() = headers;
        Ok(relayed)
    }
}
