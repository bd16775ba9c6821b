//! Extraction stage: list the renditions of a video and pick the audio stream
//!
//! Two interchangeable backends implement [`AudioExtractor`]:
//!
//! - [`YtDlpExtractor`] drives the `yt-dlp` command line tool
//! - [`InnerTubeExtractor`] queries YouTube's InnerTube `/player` endpoint directly

mod innertube;
mod ytdlp;

pub use innertube::{InnerTubeExtractor, DEFAULT_INNERTUBE_BASE};
pub use ytdlp::{YtDlpExtractor, DEFAULT_YTDLP_BINARY};

use crate::error::Result;
use crate::models::{Rendition, VideoLocator};
use async_trait::async_trait;
use std::fmt::{self, Debug};
use std::str::FromStr;

/// A video-metadata capability listing every rendition of a video
#[async_trait]
pub trait AudioExtractor: Debug + Send + Sync {
    /// Short backend name, used in logs
    fn name(&self) -> &'static str;

    /// Lists the renditions of `video` in provider order
    async fn renditions(&self, video: &VideoLocator) -> Result<Vec<Rendition>>;
}

/// Backend selector, as written in the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractorKind {
    #[default]
    YtDlp,
    InnerTube,
}

impl FromStr for ExtractorKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ytdlp" | "yt-dlp" | "youtube-dl" => Ok(Self::YtDlp),
            "innertube" => Ok(Self::InnerTube),
            other => Err(format!("unknown extractor '{}'", other)),
        }
    }
}

impl fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::YtDlp => f.write_str("ytdlp"),
            Self::InnerTube => f.write_str("innertube"),
        }
    }
}

/// Picks the highest-bitrate audio rendition playable by the voice client
///
/// Only renditions carrying audio in an M4A / audio-in-MP4 container and a
/// direct URL are considered. On equal bitrates the first one in provider
/// order wins.
pub fn select_best_audio(renditions: &[Rendition]) -> Option<&Rendition> {
    renditions
        .iter()
        .filter(|r| r.is_playable())
        .fold(None, |best: Option<&Rendition>, candidate| match best {
            Some(current) if current.bitrate() >= candidate.bitrate() => Some(current),
            _ => Some(candidate),
        })
}
