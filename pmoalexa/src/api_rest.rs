//! Routes HTTP de la skill
//!
//! - `POST /alexa` : événements de la plateforme vocale
//! - `GET /proxy?url=...` : relais du flux audio

use crate::error::RelayError;
use crate::protocol::SkillResponse;
use crate::relay::{StreamRelay, RELAY_PATH};
use crate::router::IntentRouter;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

/// Path of the skill endpoint
pub const SKILL_PATH: &str = "/alexa";

/// État partagé des handlers
#[derive(Clone)]
pub struct AlexaState {
    pub router: Arc<IntentRouter>,
    pub relay: StreamRelay,
}

impl AlexaState {
    pub fn new(router: Arc<IntentRouter>, relay: StreamRelay) -> Self {
        Self { router, relay }
    }
}

#[derive(Debug, Deserialize)]
pub struct RelayQuery {
    #[serde(default)]
    pub url: Option<String>,
}

pub fn create_router(state: AlexaState) -> Router {
    Router::new()
        .route(SKILL_PATH, post(handle_skill_event))
        .route(RELAY_PATH, get(relay_stream))
        .with_state(state)
}

/// POST /alexa
///
/// The body is taken raw so that a malformed event still gets a spoken
/// answer instead of an extractor rejection.
async fn handle_skill_event(State(state): State<AlexaState>, body: Bytes) -> Json<SkillResponse> {
    Json(state.router.handle_body(&body).await)
}

/// GET /proxy?url=<upstream>
async fn relay_stream(
    State(state): State<AlexaState>,
    Query(query): Query<RelayQuery>,
    headers: HeaderMap,
) -> Result<Response, RelayError> {
    state.relay.relay(query.url.as_deref(), &headers).await
}
