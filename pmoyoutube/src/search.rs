//! Search stage: YouTube Data API v3 client

use crate::error::{Error, Result};
use crate::models::VideoLocator;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;
use std::time::Duration;
use url::Url;

/// Default YouTube Data API base URL
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Default timeout for search requests
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// User-Agent sent with search requests
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// A video search capability returning the single top-ranked result
#[async_trait]
pub trait VideoSearch: Debug + Send + Sync {
    /// Returns the top-ranked video for `query`
    ///
    /// `Ok(None)` means the provider answered with zero results; transport,
    /// quota and parsing failures are reported as `Err`.
    async fn search_top(&self, query: &str) -> Result<Option<VideoLocator>>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    #[serde(default)]
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    #[serde(default)]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: Option<String>,
}

/// YouTube Data API search client
///
/// # Example
///
/// ```no_run
/// use pmoyoutube::{VideoSearch, YouTubeSearchClient};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = YouTubeSearchClient::builder("my-api-key").build()?;
/// if let Some(video) = client.search_top("bohemian rhapsody").await? {
///     println!("{}", video.url);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct YouTubeSearchClient {
    client: Client,
    api_base: String,
    api_key: String,
}

impl YouTubeSearchClient {
    /// Create a builder for configuring the client
    pub fn builder(api_key: impl Into<String>) -> SearchClientBuilder {
        SearchClientBuilder::new(api_key)
    }

    /// URL of the search call for `query` (max one result, videos only)
    fn search_url(&self, query: &str) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/search", self.api_base.trim_end_matches('/')))?;
        url.query_pairs_mut()
            .append_pair("part", "snippet")
            .append_pair("type", "video")
            .append_pair("maxResults", "1")
            .append_pair("q", query)
            .append_pair("key", &self.api_key);
        Ok(url)
    }
}

#[async_trait]
impl VideoSearch for YouTubeSearchClient {
    async fn search_top(&self, query: &str) -> Result<Option<VideoLocator>> {
        let url = self.search_url(query)?;
        tracing::debug!(query, "Searching YouTube");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::api_error(format!("search returned {}: {}", status, body)));
        }

        let search: SearchResponse = response.json().await?;
        let video = search.items.into_iter().find_map(|item| {
            let locator = VideoLocator::from_id(item.id.video_id?);
            Some(match item.snippet.and_then(|s| s.title) {
                Some(title) => locator.with_title(title),
                None => locator,
            })
        });

        Ok(video)
    }
}

/// Builder for [`YouTubeSearchClient`]
#[derive(Debug)]
pub struct SearchClientBuilder {
    client: Option<Client>,
    api_base: String,
    api_key: String,
    timeout: Duration,
    user_agent: String,
}

impl SearchClientBuilder {
    fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: None,
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Use a custom reqwest client
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the API base URL (tests point it at a mock server)
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<YouTubeSearchClient> {
        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .user_agent(&self.user_agent)
                .timeout(self.timeout)
                .build()?,
        };

        Ok(YouTubeSearchClient {
            client,
            api_base: self.api_base,
            api_key: self.api_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_requests_a_single_video() {
        let client = YouTubeSearchClient::builder("KEY")
            .api_base("https://api.example/v3/")
            .build()
            .unwrap();
        let url = client.search_url("los del río & co").unwrap();

        assert_eq!(url.path(), "/v3/search");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("maxResults".into(), "1".into())));
        assert!(pairs.contains(&("type".into(), "video".into())));
        assert!(pairs.contains(&("q".into(), "los del río & co".into())));
        assert!(pairs.contains(&("key".into(), "KEY".into())));
    }

    #[test]
    fn test_items_without_video_id_are_skipped() {
        let json = r#"{"items":[
            {"id":{"kind":"youtube#channel"}},
            {"id":{"videoId":"xyz"},"snippet":{"title":"T"}}
        ]}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.items.len(), 2);
        assert!(response.items[0].id.video_id.is_none());
        assert_eq!(response.items[1].id.video_id.as_deref(), Some("xyz"));
    }
}
