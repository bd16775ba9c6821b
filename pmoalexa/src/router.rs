//! Intent Router: machine à états de la skill
//!
//! One inbound event in, one well-formed [`SkillResponse`] out. Failures of
//! the resolver become spoken prompts; anything unexpected (malformed body,
//! panic in a handler) becomes the generic apology. The platform always gets
//! HTTP 200 with valid JSON.

use crate::error::EventError;
use crate::intent::{Intent, SkillEvent};
use crate::protocol::{Card, Directive, SkillResponse, Stream};
use crate::relay::RelayLinks;
use crate::session::{PlaybackSession, SessionStore};
use crate::speech::{Locale, Prompts};
use futures::FutureExt;
use pmoyoutube::{MediaResolver, ResolveError};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Default card title
pub const DEFAULT_SKILL_NAME: &str = "YouTube Player";

#[derive(Debug, Clone)]
pub struct IntentRouter {
    resolver: Arc<dyn MediaResolver>,
    links: RelayLinks,
    session: SessionStore,
    locale: Locale,
    skill_name: String,
}

impl IntentRouter {
    pub fn new(resolver: Arc<dyn MediaResolver>, links: RelayLinks) -> Self {
        Self {
            resolver,
            links,
            session: SessionStore::new(),
            locale: Locale::default(),
            skill_name: DEFAULT_SKILL_NAME.to_string(),
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_skill_name(mut self, name: impl Into<String>) -> Self {
        self.skill_name = name.into();
        self
    }

    /// Share an existing session store
    pub fn with_session(mut self, session: SessionStore) -> Self {
        self.session = session;
        self
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn prompts(&self) -> &'static Prompts {
        self.locale.prompts()
    }

    /// Entry point for a raw POST body
    pub async fn handle_body(&self, body: &[u8]) -> SkillResponse {
        match SkillEvent::parse(body) {
            Ok(event) => self.dispatch(event).await,
            Err(EventError::MalformedEvent(reason)) => {
                warn!("Malformed skill event: {}", reason);
                SkillResponse::speak(self.prompts().internal_error, true)
            }
        }
    }

    /// Handle a classified event, turning a panic into the generic apology
    pub async fn dispatch(&self, event: SkillEvent) -> SkillResponse {
        match AssertUnwindSafe(self.handle(event)).catch_unwind().await {
            Ok(response) => response,
            Err(_) => {
                error!("❌ Skill handler panicked");
                SkillResponse::speak(self.prompts().internal_error, true)
            }
        }
    }

    pub async fn handle(&self, event: SkillEvent) -> SkillResponse {
        let prompts = self.prompts();
        match event {
            SkillEvent::Launch => {
                info!("👋 Skill launched");
                SkillResponse::speak(prompts.welcome, false)
            }
            SkillEvent::Intent(intent) => self.handle_intent(intent).await,
            SkillEvent::Unsupported(kind) => {
                warn!(kind = %kind, "Unsupported request type");
                SkillResponse::speak(prompts.unsupported, true)
            }
        }
    }

    async fn handle_intent(&self, intent: Intent) -> SkillResponse {
        let prompts = self.prompts();
        match intent {
            Intent::Play { query: Some(query) } => self.play(&query).await,
            Intent::Play { query: None } => SkillResponse::speak(prompts.which_song, false),
            Intent::ChangeSong => SkillResponse::speak(prompts.change_song, false),
            Intent::Pause | Intent::Stop => {
                info!("⏸️ Pause");
                SkillResponse::speak(prompts.pausing, true).with_directive(Directive::Stop)
            }
            Intent::Resume => self.resume().await,
            Intent::Cancel => {
                info!("👋 Cancel");
                SkillResponse::speak(prompts.farewell, true).with_directive(Directive::Stop)
            }
            Intent::Unknown(name) => {
                warn!(intent = %name, "Unknown intent");
                SkillResponse::speak(prompts.not_understood, false)
            }
        }
    }

    async fn play(&self, query: &str) -> SkillResponse {
        let prompts = self.prompts();
        let ticket = self.session.begin_load().await;

        info!(query, "▶️ Play requested");
        let candidate = match self.resolver.resolve(query).await {
            Ok(candidate) => candidate,
            Err(ResolveError::NoMatchFound(_)) => {
                return SkillResponse::speak(prompts.no_video, false);
            }
            Err(e @ ResolveError::NoCompatibleAudioFormat(_))
            | Err(e @ ResolveError::ExtractionError(_)) => {
                warn!(query, "Cannot play: {}", e);
                return SkillResponse::speak(prompts.no_audio, false);
            }
        };

        if candidate.audio_url.trim().is_empty() {
            warn!(query, "Cannot play: resolver returned an empty audio URL");
            return SkillResponse::speak(prompts.no_audio, false);
        }

        let Some(session) = self
            .session
            .commit(ticket, query, &candidate.audio_url)
            .await
        else {
            info!(query, "Load superseded by a newer request");
            return SkillResponse::speak(prompts.superseded, true);
        };

        let text = format!("{}{}", prompts.playing_prefix, query);
        SkillResponse::speak(text.clone(), true)
            .with_card(Card::simple(&self.skill_name, text))
            .with_directive(self.play_directive(&session))
    }

    async fn resume(&self) -> SkillResponse {
        let prompts = self.prompts();
        let session = self.session.snapshot().await;
        if !session.is_loaded() {
            return SkillResponse::speak(prompts.nothing_to_resume, false);
        }

        info!(query = %session.query, "⏯️ Resume");
        SkillResponse::speak(format!("{}{}", prompts.resuming_prefix, session.query), true)
            .with_directive(self.play_directive(&session))
    }

    fn play_directive(&self, session: &PlaybackSession) -> Directive {
        Directive::play(Stream {
            token: session.token.clone(),
            url: self.links.link_for(&session.stream_url),
            offset_in_milliseconds: session.offset_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pmoyoutube::CandidateStream;

    #[derive(Debug)]
    struct StaticResolver(Result<&'static str, ResolveError>);

    #[async_trait]
    impl MediaResolver for StaticResolver {
        async fn resolve(&self, query: &str) -> Result<CandidateStream, ResolveError> {
            if query == "boom" {
                panic!("resolver exploded");
            }
            self.0.clone().map(|url| CandidateStream {
                source_url: "https://www.youtube.com/watch?v=vid".into(),
                audio_url: url.into(),
                bitrate: 128.0,
                container: "m4a".into(),
                codec: "mp4a.40.2".into(),
                mime_type: pmoyoutube::AUDIO_MP4_MIME.into(),
                title: None,
            })
        }
    }

    fn router(result: Result<&'static str, ResolveError>) -> IntentRouter {
        IntentRouter::new(
            Arc::new(StaticResolver(result)),
            RelayLinks::new("https://skill.test").unwrap(),
        )
    }

    fn play(query: &str) -> SkillEvent {
        SkillEvent::Intent(Intent::Play {
            query: Some(query.to_string()),
        })
    }

    #[tokio::test]
    async fn test_play_then_resume_reuses_token() {
        let router = router(Ok("https://x/a.m4a"));

        let played = router.handle(play("some song")).await;
        assert_eq!(played.text(), "Reproduciendo: some song");
        assert!(played.should_end_session());
        let card = played.response.card.clone().unwrap();
        assert_eq!(card.title, DEFAULT_SKILL_NAME);
        assert_eq!(card.content, "Reproduciendo: some song");

        let stream = played.play_stream().unwrap().clone();
        assert_eq!(
            stream.url,
            "https://skill.test/proxy?url=https%3A%2F%2Fx%2Fa.m4a"
        );
        assert_eq!(stream.offset_in_milliseconds, 0);

        let resumed = router.handle(SkillEvent::Intent(Intent::Resume)).await;
        assert_eq!(resumed.text(), "Reanudando la reproducción de some song");
        assert_eq!(resumed.play_stream(), Some(&stream));
    }

    #[tokio::test]
    async fn test_resolver_failures_keep_session_open() {
        let not_found = router(Err(ResolveError::NoMatchFound("q".into())));
        let response = not_found.handle(play("q")).await;
        assert_eq!(response.text(), Locale::Es.prompts().no_video);
        assert!(!response.should_end_session());
        assert!(response.response.directives.is_empty());

        let no_audio = router(Err(ResolveError::NoCompatibleAudioFormat("v".into())));
        let response = no_audio.handle(play("q")).await;
        assert_eq!(response.text(), Locale::Es.prompts().no_audio);
        assert!(!response.should_end_session());

        let extraction = router(Err(ResolveError::ExtractionError("403".into())));
        let response = extraction.handle(play("q")).await;
        assert_eq!(response.text(), Locale::Es.prompts().no_audio);

        assert!(!extraction.session().snapshot().await.is_loaded());
    }

    #[tokio::test]
    async fn test_empty_audio_url_is_not_played() {
        let router = router(Ok(""));
        let response = router.handle(play("q")).await;

        assert_eq!(response.text(), Locale::Es.prompts().no_audio);
        assert!(!response.should_end_session());
        assert!(response.play_stream().is_none());
        assert!(!router.session().snapshot().await.is_loaded());
        assert_eq!(router.session().snapshot().await.token, "");
    }

    #[tokio::test]
    async fn test_failed_play_keeps_previous_track() {
        let router = router(Ok("https://x/a.m4a"));
        router.handle(play("first")).await;
        let before = router.session().snapshot().await;

        let failing = IntentRouter::new(
            Arc::new(StaticResolver(Err(ResolveError::NoMatchFound("q".into())))),
            RelayLinks::new("https://skill.test").unwrap(),
        )
        .with_session(router.session().clone());
        failing.handle(play("second")).await;

        assert_eq!(router.session().snapshot().await, before);
    }

    #[tokio::test]
    async fn test_resume_without_track() {
        let response = router(Ok("u"))
            .handle(SkillEvent::Intent(Intent::Resume))
            .await;
        assert_eq!(response.text(), Locale::Es.prompts().nothing_to_resume);
        assert!(!response.should_end_session());
        assert!(response.play_stream().is_none());
    }

    #[tokio::test]
    async fn test_missing_query_reprompts() {
        let response = router(Ok("u"))
            .handle(SkillEvent::Intent(Intent::Play { query: None }))
            .await;
        assert_eq!(response.text(), Locale::Es.prompts().which_song);
        assert!(!response.should_end_session());
    }

    #[tokio::test]
    async fn test_pause_stop_and_cancel() {
        let router = router(Ok("u"));
        for intent in [Intent::Pause, Intent::Stop] {
            let response = router.handle(SkillEvent::Intent(intent)).await;
            assert_eq!(response.response.directives, vec![Directive::Stop]);
            assert!(response.should_end_session());
        }

        let cancel = router.handle(SkillEvent::Intent(Intent::Cancel)).await;
        assert_eq!(cancel.text(), Locale::Es.prompts().farewell);
        assert_eq!(cancel.response.directives, vec![Directive::Stop]);
    }

    #[tokio::test]
    async fn test_unknowns() {
        let router = router(Ok("u")).with_locale(Locale::En);

        let intent = router
            .handle(SkillEvent::Intent(Intent::Unknown("AMAZON.HelpIntent".into())))
            .await;
        assert_eq!(intent.text(), Locale::En.prompts().not_understood);
        assert!(!intent.should_end_session());

        let event = router
            .handle(SkillEvent::Unsupported("SessionEndedRequest".into()))
            .await;
        assert_eq!(event.text(), Locale::En.prompts().unsupported);
        assert!(event.should_end_session());
    }

    #[tokio::test]
    async fn test_malformed_body_and_panic_give_generic_error() {
        let router = router(Ok("u"));

        let malformed = router.handle_body(b"{not json").await;
        assert_eq!(malformed.text(), Locale::Es.prompts().internal_error);
        assert!(malformed.should_end_session());

        let panicked = router.dispatch(play("boom")).await;
        assert_eq!(panicked.text(), Locale::Es.prompts().internal_error);
        assert!(panicked.should_end_session());
    }
}
