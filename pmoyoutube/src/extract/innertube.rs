use super::AudioExtractor;
use crate::error::{Error, Result};
use crate::models::{Rendition, VideoLocator};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Default InnerTube host
pub const DEFAULT_INNERTUBE_BASE: &str = "https://www.youtube.com";

/// Default timeout for `/player` calls
pub const DEFAULT_INNERTUBE_TIMEOUT_SECS: u64 = 20;

// Le client Android renvoie des URLs directes (pas de signatureCipher)
// pour la plupart des formats audio.
const CLIENT_NAME: &str = "ANDROID";
const CLIENT_VERSION: &str = "19.44.38";
const ANDROID_SDK_VERSION: u32 = 34;
const USER_AGENT: &str =
    "com.google.android.youtube/19.44.38 (Linux; U; Android 14; en_US; Pixel 8) gzip";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    #[serde(default)]
    playability_status: Option<PlayabilityStatus>,
    #[serde(default)]
    streaming_data: Option<StreamingData>,
    #[serde(default)]
    video_details: Option<VideoDetails>,
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    #[serde(default)]
    status: String,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreamingData {
    #[serde(default)]
    adaptive_formats: Vec<AdaptiveFormat>,
}

#[derive(Debug, Deserialize)]
struct VideoDetails {
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdaptiveFormat {
    itag: i64,
    #[serde(default)]
    url: Option<String>,
    mime_type: String,
    #[serde(default)]
    bitrate: Option<u64>,
    #[serde(default)]
    average_bitrate: Option<u64>,
}

impl AdaptiveFormat {
    /// Maps an InnerTube format onto the yt-dlp shaped [`Rendition`]
    ///
    /// `audio/mp4; codecs="mp4a.40.2"` becomes ext `m4a`, acodec `mp4a.40.2`;
    /// video formats get acodec `none`.
    fn into_rendition(self) -> Rendition {
        let (media_type, codecs) = match self.mime_type.split_once(';') {
            Some((media_type, params)) => (media_type.trim(), parse_codecs(params)),
            None => (self.mime_type.trim(), None),
        };

        let ext = match media_type {
            "audio/mp4" => "m4a",
            "audio/webm" | "video/webm" => "webm",
            "video/mp4" => "mp4",
            other => other.rsplit('/').next().unwrap_or(other),
        }
        .to_string();

        let acodec = if media_type.starts_with("audio/") {
            codecs.unwrap_or_else(|| "unknown".to_string())
        } else {
            "none".to_string()
        };

        let abr = self
            .average_bitrate
            .or(self.bitrate)
            .map(|bps| bps as f64 / 1000.0);

        Rendition {
            format_id: self.itag.to_string(),
            url: self.url,
            ext: Some(ext),
            acodec: Some(acodec),
            mime_type: Some(self.mime_type),
            abr,
        }
    }
}

fn parse_codecs(params: &str) -> Option<String> {
    params.split(';').find_map(|param| {
        let (key, value) = param.split_once('=')?;
        (key.trim() == "codecs").then(|| value.trim().trim_matches('"').to_string())
    })
}

/// Extraction backend calling the InnerTube `/youtubei/v1/player` endpoint
#[derive(Debug, Clone)]
pub struct InnerTubeExtractor {
    client: Client,
    base_url: String,
}

impl InnerTubeExtractor {
    /// Create an extractor against the public YouTube host
    pub fn new() -> Result<Self> {
        Self::with_base_url(
            DEFAULT_INNERTUBE_BASE,
            Duration::from_secs(DEFAULT_INNERTUBE_TIMEOUT_SECS),
        )
    }

    /// Create an extractor against another host (tests use a mock server)
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn player_body(video_id: &str) -> serde_json::Value {
        serde_json::json!({
            "context": {
                "client": {
                    "clientName": CLIENT_NAME,
                    "clientVersion": CLIENT_VERSION,
                    "androidSdkVersion": ANDROID_SDK_VERSION,
                    "hl": "en",
                    "gl": "US",
                    "timeZone": "UTC",
                    "utcOffsetMinutes": 0,
                }
            },
            "videoId": video_id,
            "contentCheckOk": true,
            "racyCheckOk": true,
        })
    }
}

#[async_trait]
impl AudioExtractor for InnerTubeExtractor {
    fn name(&self) -> &'static str {
        "innertube"
    }

    async fn renditions(&self, video: &VideoLocator) -> Result<Vec<Rendition>> {
        let url = format!(
            "{}/youtubei/v1/player?prettyPrint=false",
            self.base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .json(&Self::player_body(&video.video_id))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::api_error(format!(
                "innertube /player returned HTTP {}",
                response.status()
            )));
        }

        let player: PlayerResponse = response.json().await?;

        let status = player
            .playability_status
            .as_ref()
            .map(|s| s.status.as_str())
            .unwrap_or("UNKNOWN");
        if status != "OK" {
            let reason = player
                .playability_status
                .as_ref()
                .and_then(|s| s.reason.clone())
                .unwrap_or_else(|| "unknown reason".to_string());
            return Err(Error::NotPlayable(format!(
                "{}: {} ({})",
                video.video_id, status, reason
            )));
        }

        let formats = player
            .streaming_data
            .map(|data| data.adaptive_formats)
            .unwrap_or_default();

        let renditions: Vec<Rendition> = formats
            .into_iter()
            .filter(|f| f.url.is_some())
            .map(AdaptiveFormat::into_rendition)
            .collect();

        tracing::info!(
            "🎬 innertube listed {} direct formats for {}",
            renditions.len(),
            player
                .video_details
                .and_then(|d| d.title)
                .unwrap_or_else(|| video.video_id.clone())
        );

        Ok(renditions)
    }
}
