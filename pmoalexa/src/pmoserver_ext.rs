//! Extension pmoserver pour la skill
//!
//! Ce module fournit un trait d'extension pour brancher la skill (endpoint
//! vocal et relais audio) sur un serveur pmoserver, sans que pmoserver
//! dépende de pmoalexa.

use crate::api_rest::{create_router, AlexaState, SKILL_PATH};
use crate::config_ext::AlexaConfigExt;
use crate::relay::{RelayLinks, StreamRelay, RELAY_PATH};
use crate::router::IntentRouter;
use anyhow::Result;
use pmoserver::Server;
use pmoyoutube::MediaResolver;
use std::sync::Arc;
use tracing::info;

/// Trait pour étendre pmoserver avec la skill
///
/// # Exemple
///
/// ```rust,no_run
/// use pmoalexa::AlexaExt;
/// use pmoconfig::get_config;
/// use pmoserver::ServerBuilder;
/// use pmoyoutube::YouTubeConfigExt;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let mut server = ServerBuilder::new_configured().build();
///     let resolver = get_config().build_youtube_resolver()?;
///
///     server.init_alexa_skill(Arc::new(resolver)).await?;
///
///     server.start().await;
///     server.wait().await;
///     Ok(())
/// }
/// ```
pub trait AlexaExt {
    /// Construit le routeur d'intents depuis la configuration et enregistre les routes
    ///
    /// # Routes enregistrées
    ///
    /// - `POST /alexa` - Événements de la plateforme
    /// - `GET /proxy?url=...` - Relais du flux audio
    async fn init_alexa_skill(
        &mut self,
        resolver: Arc<dyn MediaResolver>,
    ) -> Result<Arc<IntentRouter>>;

    /// Enregistre les routes avec un routeur déjà construit
    async fn init_alexa_skill_with_router(
        &mut self,
        router: Arc<IntentRouter>,
    ) -> Result<Arc<IntentRouter>>;
}

impl AlexaExt for Server {
    async fn init_alexa_skill(
        &mut self,
        resolver: Arc<dyn MediaResolver>,
    ) -> Result<Arc<IntentRouter>> {
        let config = pmoconfig::get_config();
        let public_base_url = config.get_skill_public_base_url();
        let links = RelayLinks::new(&public_base_url)?;

        let router = IntentRouter::new(resolver, links)
            .with_locale(config.get_skill_locale())
            .with_skill_name(config.get_skill_name());

        info!(
            public_base_url = %public_base_url,
            locale = %router.locale(),
            "🗣️ Alexa skill configured"
        );

        self.init_alexa_skill_with_router(Arc::new(router)).await
    }

    async fn init_alexa_skill_with_router(
        &mut self,
        router: Arc<IntentRouter>,
    ) -> Result<Arc<IntentRouter>> {
        let state = AlexaState::new(router.clone(), StreamRelay::new());
        self.add_router("/", create_router(state)).await;

        info!("✅ Skill routes registered: POST {}, GET {}", SKILL_PATH, RELAY_PATH);
        Ok(router)
    }
}
