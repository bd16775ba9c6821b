//! Classification des événements entrants
//!
//! Turns the raw JSON envelope into a [`SkillEvent`] the router can match on.

use crate::error::{EventError, Result};
use crate::protocol::{IntentBody, SkillRequest};

pub const LAUNCH_REQUEST: &str = "LaunchRequest";
pub const INTENT_REQUEST: &str = "IntentRequest";

pub const PLAY_INTENT: &str = "PlayYouTubeIntent";
pub const CHANGE_SONG_INTENT: &str = "ChangeSongIntent";
pub const PAUSE_INTENT: &str = "AMAZON.PauseIntent";
pub const STOP_INTENT: &str = "AMAZON.StopIntent";
pub const RESUME_INTENT: &str = "AMAZON.ResumeIntent";
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";

/// Slot carrying the spoken search text
pub const VIDEO_QUERY_SLOT: &str = "videoQuery";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// `None` when the slot is missing or blank
    Play { query: Option<String> },
    ChangeSong,
    Pause,
    Stop,
    Resume,
    Cancel,
    Unknown(String),
}

impl Intent {
    pub fn from_body(body: &IntentBody) -> Self {
        match body.name.as_str() {
            PLAY_INTENT => Self::Play {
                query: body.slot_value(VIDEO_QUERY_SLOT).map(str::to_string),
            },
            CHANGE_SONG_INTENT => Self::ChangeSong,
            PAUSE_INTENT => Self::Pause,
            STOP_INTENT => Self::Stop,
            RESUME_INTENT => Self::Resume,
            CANCEL_INTENT => Self::Cancel,
            other => Self::Unknown(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillEvent {
    Launch,
    Intent(Intent),
    /// Any other request type (`SessionEndedRequest`, `AudioPlayer.*`...)
    Unsupported(String),
}

impl SkillEvent {
    pub fn from_request(request: &SkillRequest) -> Result<Self> {
        match request.request.kind.as_str() {
            LAUNCH_REQUEST => Ok(Self::Launch),
            INTENT_REQUEST => request
                .request
                .intent
                .as_ref()
                .map(|body| Self::Intent(Intent::from_body(body)))
                .ok_or_else(|| EventError::malformed("IntentRequest without intent")),
            other => Ok(Self::Unsupported(other.to_string())),
        }
    }

    /// Parse and classify a raw request body
    pub fn parse(body: &[u8]) -> Result<Self> {
        let request: SkillRequest = serde_json::from_slice(body)?;
        Self::from_request(&request)
    }
}
