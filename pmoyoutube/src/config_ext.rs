//! Extension pour intégrer la configuration YouTube dans pmoconfig
//!
//! Ce module fournit le trait `YouTubeConfigExt` qui ajoute à
//! `pmoconfig::Config` les réglages du résolveur (clé API, backend
//! d'extraction, chemin de yt-dlp...).
//!
//! ```yaml
//! youtube:
//!   api_key: ""          # ou variable d'environnement YOUTUBE_API_KEY
//!   api_base: "https://www.googleapis.com/youtube/v3"
//!   extractor: ytdlp     # ou innertube
//!   ytdlp:
//!     binary: yt-dlp
//!     cookies: ""
//!     timeout_secs: 60
//!   innertube:
//!     base_url: "https://www.youtube.com"
//!     timeout_secs: 20
//! ```

use crate::extract::{
    AudioExtractor, ExtractorKind, InnerTubeExtractor, YtDlpExtractor, DEFAULT_INNERTUBE_BASE,
    DEFAULT_YTDLP_BINARY,
};
use crate::resolver::YouTubeResolver;
use crate::search::{YouTubeSearchClient, DEFAULT_API_BASE};
use anyhow::{anyhow, Result};
use pmoconfig::Config;
use serde_yaml::Value;
use std::sync::Arc;
use std::time::Duration;

/// Variable d'environnement historique portant la clé API
pub const ENV_YOUTUBE_API_KEY: &str = "YOUTUBE_API_KEY";

/// Trait d'extension pour gérer la configuration YouTube dans pmoconfig
pub trait YouTubeConfigExt {
    /// Clé de l'API YouTube Data (config puis `YOUTUBE_API_KEY`)
    fn get_youtube_api_key(&self) -> Option<String>;

    fn set_youtube_api_key(&self, key: &str) -> Result<()>;

    fn get_youtube_api_base(&self) -> String;

    /// Backend d'extraction choisi (défaut : yt-dlp)
    fn get_youtube_extractor(&self) -> ExtractorKind;

    fn set_youtube_extractor(&self, kind: ExtractorKind) -> Result<()>;

    fn get_ytdlp_binary(&self) -> String;

    /// Fichier de cookies passé à yt-dlp, s'il est configuré
    fn get_ytdlp_cookies(&self) -> Option<String>;

    fn get_ytdlp_timeout(&self) -> Duration;

    fn get_innertube_base_url(&self) -> String;

    fn get_innertube_timeout(&self) -> Duration;

    /// Construit le résolveur complet décrit par la configuration
    fn build_youtube_resolver(&self) -> Result<YouTubeResolver>;
}

impl YouTubeConfigExt for Config {
    fn get_youtube_api_key(&self) -> Option<String> {
        self.get_string_or_env(&["youtube", "api_key"], ENV_YOUTUBE_API_KEY)
    }

    fn set_youtube_api_key(&self, key: &str) -> Result<()> {
        self.set_value(&["youtube", "api_key"], Value::String(key.to_string()))
    }

    fn get_youtube_api_base(&self) -> String {
        self.get_string(&["youtube", "api_base"])
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    }

    fn get_youtube_extractor(&self) -> ExtractorKind {
        match self.get_string(&["youtube", "extractor"]) {
            Some(name) => name.parse().unwrap_or_else(|e| {
                tracing::warn!("{}, falling back to {}", e, ExtractorKind::default());
                ExtractorKind::default()
            }),
            None => ExtractorKind::default(),
        }
    }

    fn set_youtube_extractor(&self, kind: ExtractorKind) -> Result<()> {
        self.set_value(&["youtube", "extractor"], Value::String(kind.to_string()))
    }

    fn get_ytdlp_binary(&self) -> String {
        self.get_string(&["youtube", "ytdlp", "binary"])
            .unwrap_or_else(|| DEFAULT_YTDLP_BINARY.to_string())
    }

    fn get_ytdlp_cookies(&self) -> Option<String> {
        self.get_string(&["youtube", "ytdlp", "cookies"])
    }

    fn get_ytdlp_timeout(&self) -> Duration {
        Duration::from_secs(self.get_u64_or(&["youtube", "ytdlp", "timeout_secs"], 60))
    }

    fn get_innertube_base_url(&self) -> String {
        self.get_string(&["youtube", "innertube", "base_url"])
            .unwrap_or_else(|| DEFAULT_INNERTUBE_BASE.to_string())
    }

    fn get_innertube_timeout(&self) -> Duration {
        Duration::from_secs(self.get_u64_or(&["youtube", "innertube", "timeout_secs"], 20))
    }

    fn build_youtube_resolver(&self) -> Result<YouTubeResolver> {
        let api_key = self.get_youtube_api_key().ok_or_else(|| {
            anyhow!(
                "YouTube API key missing: set youtube.api_key or {}",
                ENV_YOUTUBE_API_KEY
            )
        })?;

        let search = YouTubeSearchClient::builder(api_key)
            .api_base(self.get_youtube_api_base())
            .build()?;

        let extractor: Arc<dyn AudioExtractor> = match self.get_youtube_extractor() {
            ExtractorKind::YtDlp => {
                let mut ytdlp = YtDlpExtractor::new()
                    .binary(self.get_ytdlp_binary())
                    .timeout(self.get_ytdlp_timeout());
                if let Some(cookies) = self.get_ytdlp_cookies() {
                    ytdlp = ytdlp.cookies(cookies);
                }
                Arc::new(ytdlp)
            }
            ExtractorKind::InnerTube => Arc::new(InnerTubeExtractor::with_base_url(
                self.get_innertube_base_url(),
                self.get_innertube_timeout(),
            )?),
        };

        tracing::info!("🎬 YouTube resolver using {} backend", extractor.name());
        Ok(YouTubeResolver::new(Arc::new(search), extractor))
    }
}
