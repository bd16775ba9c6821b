//! YouTube media resolution for PMOAlexa
//!
//! Turns a spoken song request into a direct, playable audio URL in two
//! independently failable stages:
//!
//! 1. **Search**: the YouTube Data API returns the top-ranked video for the
//!    query ([`YouTubeSearchClient`]).
//! 2. **Extraction**: a backend lists the renditions of that video and the
//!    highest-bitrate M4A audio rendition is selected ([`select_best_audio`]).
//!    Two interchangeable backends exist: [`YtDlpExtractor`] (drives the
//!    `yt-dlp` tool) and [`InnerTubeExtractor`] (HTTP, no external binary).
//!
//! Failures are reported as [`ResolveError`] so that callers can tell
//! "no video found" apart from "video found but no playable audio".
//!
//! # Example
//!
//! ```no_run
//! use pmoyoutube::{MediaResolver, YouTubeResolver, YouTubeSearchClient, YtDlpExtractor};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let search = YouTubeSearchClient::builder("my-api-key").build()?;
//! let resolver = YouTubeResolver::new(Arc::new(search), Arc::new(YtDlpExtractor::new()));
//!
//! let stream = resolver.resolve("bohemian rhapsody").await?;
//! println!("{} @ {} kbit/s", stream.audio_url, stream.bitrate);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod extract;
pub mod models;
pub mod resolver;
pub mod search;

#[cfg(feature = "pmoconfig")]
pub mod config_ext;

pub use error::{Error, Result};
pub use extract::{
    select_best_audio, AudioExtractor, ExtractorKind, InnerTubeExtractor, YtDlpExtractor,
};
pub use models::{CandidateStream, Rendition, VideoLocator, AUDIO_MP4_MIME};
pub use resolver::{MediaResolver, ResolveError, YouTubeResolver};
pub use search::{VideoSearch, YouTubeSearchClient};

#[cfg(feature = "pmoconfig")]
pub use config_ext::YouTubeConfigExt;
