//! Media resolution pipeline: query → video → audio rendition

use crate::extract::{select_best_audio, AudioExtractor};
use crate::models::CandidateStream;
use crate::search::VideoSearch;
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

/// Why a query could not be turned into a playable audio stream
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The search produced nothing usable (zero results or a failed call)
    #[error("no video found for '{0}'")]
    NoMatchFound(String),

    /// The video exists but none of its renditions is M4A audio
    #[error("no compatible audio format for {0}")]
    NoCompatibleAudioFormat(String),

    /// Listing the renditions failed (network, parsing, upstream blocking)
    #[error("audio extraction failed: {0}")]
    ExtractionError(String),
}

/// Turns a free-text query into an audio stream descriptor
#[async_trait]
pub trait MediaResolver: Debug + Send + Sync {
    async fn resolve(&self, query: &str) -> Result<CandidateStream, ResolveError>;
}

/// Two-stage resolver: one search capability plus one extraction backend
///
/// Single attempt at every stage, no retries and no caching.
#[derive(Debug, Clone)]
pub struct YouTubeResolver {
    search: Arc<dyn VideoSearch>,
    extractor: Arc<dyn AudioExtractor>,
}

impl YouTubeResolver {
    pub fn new(search: Arc<dyn VideoSearch>, extractor: Arc<dyn AudioExtractor>) -> Self {
        Self { search, extractor }
    }

    /// Name of the extraction backend in use
    pub fn extractor_name(&self) -> &'static str {
        self.extractor.name()
    }
}

#[async_trait]
impl MediaResolver for YouTubeResolver {
    async fn resolve(&self, query: &str) -> Result<CandidateStream, ResolveError> {
        let video = match self.search.search_top(query).await {
            Ok(Some(video)) => video,
            Ok(None) => {
                tracing::info!(query, "🔍 No search result");
                return Err(ResolveError::NoMatchFound(query.to_string()));
            }
            Err(e) => {
                tracing::error!(query, "❌ YouTube search failed: {}", e);
                return Err(ResolveError::NoMatchFound(query.to_string()));
            }
        };

        tracing::info!(
            query,
            video = %video.url,
            title = video.title.as_deref().unwrap_or(""),
            "🔍 Search matched"
        );

        let renditions = self.extractor.renditions(&video).await.map_err(|e| {
            tracing::error!(
                backend = self.extractor.name(),
                video = %video.url,
                "❌ Audio extraction failed: {}",
                e
            );
            ResolveError::ExtractionError(e.to_string())
        })?;

        let chosen = select_best_audio(&renditions)
            .and_then(|r| CandidateStream::from_rendition(&video, r))
            .ok_or_else(|| {
                tracing::warn!(
                    video = %video.url,
                    formats = renditions.len(),
                    "No compatible audio format"
                );
                ResolveError::NoCompatibleAudioFormat(video.url.clone())
            })?;

        tracing::info!(
            video = %video.url,
            bitrate = chosen.bitrate,
            codec = %chosen.codec,
            "🎵 Audio format selected"
        );

        Ok(chosen)
    }
}
