//! Session de lecture partagée entre toutes les requêtes
//!
//! The skill serves one listener, so there is a single [`PlaybackSession`]
//! for the whole process. Track loads race each other (the resolver takes
//! seconds), hence the ticket scheme: every Play takes a [`LoadTicket`]
//! before resolving, and only a ticket newer than the last committed one may
//! replace the session.

use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// What is currently loaded in the voice client's player
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackSession {
    /// Opaque token identifying the loaded track
    pub token: String,
    /// Upstream audio URL, wrapped in a relay link when played
    pub stream_url: String,
    /// Never advanced: progress reports are not consumed
    pub offset_ms: u64,
    /// Spoken search text that produced the track
    pub query: String,
}

impl PlaybackSession {
    /// Fresh session for a newly resolved track, with a new random token
    pub fn load(query: impl Into<String>, stream_url: impl Into<String>) -> Self {
        Self {
            token: Uuid::new_v4().to_string(),
            stream_url: stream_url.into(),
            offset_ms: 0,
            query: query.into(),
        }
    }

    /// A track can be resumed only when both token and URL are set
    pub fn is_loaded(&self) -> bool {
        !self.token.is_empty() && !self.stream_url.is_empty()
    }
}

/// Ordre d'émission d'un chargement de piste
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Default)]
struct SessionState {
    session: PlaybackSession,
    issued: u64,
    committed: u64,
}

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<SessionState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> PlaybackSession {
        self.inner.lock().await.session.clone()
    }

    pub async fn begin_load(&self) -> LoadTicket {
        let mut state = self.inner.lock().await;
        state.issued += 1;
        LoadTicket(state.issued)
    }

    /// Store the resolved track unless a newer load already committed
    ///
    /// Returns the stored session, or `None` when `ticket` was superseded
    /// or `stream_url` is blank. A refused commit leaves the session as is.
    pub async fn commit(
        &self,
        ticket: LoadTicket,
        query: &str,
        stream_url: &str,
    ) -> Option<PlaybackSession> {
        let stream_url = stream_url.trim();
        if stream_url.is_empty() {
            return None;
        }

        let mut state = self.inner.lock().await;
        if ticket.0 <= state.committed {
            return None;
        }

        let mut session = PlaybackSession::load(query, stream_url);
        while session.token == state.session.token {
            session.token = Uuid::new_v4().to_string();
        }

        state.committed = ticket.0;
        state.session = session.clone();
        Some(session)
    }
}
