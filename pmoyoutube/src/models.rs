//! Data structures shared by the search client and the extraction backends

use serde::{Deserialize, Serialize};

/// MIME type advertised for audio carried in an MPEG-4 container
pub const AUDIO_MP4_MIME: &str = "audio/mp4";

/// Base of the public watch URLs built from a video id
pub const WATCH_URL_BASE: &str = "https://www.youtube.com/watch?v=";

/// A video picked by the search stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoLocator {
    /// YouTube video id (e.g. `dQw4w9WgXcQ`)
    pub video_id: String,
    /// Public watch URL
    pub url: String,
    /// Title reported by the search provider
    #[serde(default)]
    pub title: Option<String>,
}

impl VideoLocator {
    pub fn from_id(video_id: impl Into<String>) -> Self {
        let video_id = video_id.into();
        Self {
            url: format!("{}{}", WATCH_URL_BASE, video_id),
            video_id,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// One encoded variant of a video, as reported by an extraction backend
///
/// The field names follow the yt-dlp JSON dump so that its `formats[]` array
/// deserializes directly; the InnerTube backend maps its own format objects
/// onto this shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rendition {
    #[serde(default)]
    pub format_id: String,
    /// Direct media URL (absent for ciphered formats)
    #[serde(default)]
    pub url: Option<String>,
    /// Container extension (`m4a`, `webm`, `mp4`...)
    #[serde(default)]
    pub ext: Option<String>,
    /// Audio codec, `"none"` for video-only renditions
    #[serde(default)]
    pub acodec: Option<String>,
    #[serde(default, alias = "mimeType")]
    pub mime_type: Option<String>,
    /// Average audio bitrate in kbit/s
    #[serde(default)]
    pub abr: Option<f64>,
}

impl Rendition {
    /// Carries an audio track (codec present and not `"none"`)
    pub fn has_audio(&self) -> bool {
        matches!(self.acodec.as_deref(), Some(codec) if !codec.is_empty() && codec != "none")
    }

    /// Container is the M4A family or the MIME type advertises audio-in-MP4
    pub fn is_mp4_audio_container(&self) -> bool {
        self.ext.as_deref() == Some("m4a")
            || self
                .mime_type
                .as_deref()
                .is_some_and(|mime| mime.contains(AUDIO_MP4_MIME))
    }

    /// Playable by the voice platform's audio client
    pub fn is_compatible(&self) -> bool {
        self.has_audio() && self.is_mp4_audio_container()
    }

    /// Direct media URL, blank values count as missing
    pub fn direct_url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }

    /// Compatible and actually fetchable
    pub fn is_playable(&self) -> bool {
        self.is_compatible() && self.direct_url().is_some()
    }

    /// Ranking key, missing bitrates rank lowest
    pub fn bitrate(&self) -> f64 {
        self.abr.filter(|b| b.is_finite()).unwrap_or(0.0)
    }
}

/// The audio stream selected for a query
///
/// Created fresh for every resolution and never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateStream {
    /// Watch URL of the chosen video
    pub source_url: String,
    /// Direct URL of the selected audio-only rendition
    pub audio_url: String,
    /// Average bitrate in kbit/s
    pub bitrate: f64,
    /// Container extension (`m4a`)
    pub container: String,
    /// Audio codec tag (e.g. `mp4a.40.2`)
    pub codec: String,
    pub mime_type: String,
    pub title: Option<String>,
}

impl CandidateStream {
    /// Builds the candidate from a compatible rendition
    ///
    /// Returns `None` when the rendition has no usable direct URL.
    pub fn from_rendition(video: &VideoLocator, rendition: &Rendition) -> Option<Self> {
        let audio_url = rendition.direct_url()?.to_string();
        Some(Self {
            source_url: video.url.clone(),
            audio_url,
            bitrate: rendition.bitrate(),
            container: rendition.ext.clone().unwrap_or_else(|| "m4a".to_string()),
            codec: rendition.acodec.clone().unwrap_or_default(),
            mime_type: rendition
                .mime_type
                .as_deref()
                .and_then(|m| m.split(';').next())
                .map(|m| m.trim().to_string())
                .unwrap_or_else(|| AUDIO_MP4_MIME.to_string()),
            title: video.title.clone(),
        })
    }
}
