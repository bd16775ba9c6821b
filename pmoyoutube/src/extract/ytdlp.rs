use super::AudioExtractor;
use crate::error::{Error, Result};
use crate::models::{Rendition, VideoLocator};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Default name of the yt-dlp executable (looked up in `PATH`)
pub const DEFAULT_YTDLP_BINARY: &str = "yt-dlp";

/// Default timeout for one yt-dlp run
pub const DEFAULT_YTDLP_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Deserialize)]
struct YtDlpDump {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    formats: Vec<Rendition>,
}

/// Extraction backend running `yt-dlp --dump-single-json`
#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    binary: PathBuf,
    cookies: Option<PathBuf>,
    timeout: Duration,
}

impl Default for YtDlpExtractor {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_YTDLP_BINARY),
            cookies: None,
            timeout: Duration::from_secs(DEFAULT_YTDLP_TIMEOUT_SECS),
        }
    }
}

impl YtDlpExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path or name of the yt-dlp executable
    pub fn binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Netscape cookies file exported from a browser session
    pub fn cookies(mut self, cookies: impl Into<PathBuf>) -> Self {
        self.cookies = Some(cookies.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn args(&self, video_url: &str) -> Vec<String> {
        let mut args = vec![
            "--dump-single-json".to_string(),
            "--no-warnings".to_string(),
            "--no-playlist".to_string(),
            "-f".to_string(),
            "bestaudio".to_string(),
        ];
        if let Some(cookies) = &self.cookies {
            args.push("--cookies".to_string());
            args.push(cookies.to_string_lossy().to_string());
        }
        args.push("--".to_string());
        args.push(video_url.to_string());
        args
    }

    fn parse_dump(stdout: &[u8]) -> Result<(Option<String>, Vec<Rendition>)> {
        let dump: YtDlpDump = serde_json::from_slice(stdout)?;
        Ok((dump.title, dump.formats))
    }
}

#[async_trait]
impl AudioExtractor for YtDlpExtractor {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn renditions(&self, video: &VideoLocator) -> Result<Vec<Rendition>> {
        let mut command = Command::new(&self.binary);
        command
            .args(self.args(&video.url))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(binary = %self.binary.display(), url = %video.url, "Running yt-dlp");

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| Error::Timeout)??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Process(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                stderr.trim()
            )));
        }

        let (title, formats) = Self::parse_dump(&output.stdout)?;
        tracing::info!(
            "🎬 yt-dlp listed {} formats for {}",
            formats.len(),
            title.as_deref().unwrap_or(&video.url)
        );
        Ok(formats)
    }
}
