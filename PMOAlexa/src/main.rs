use pmoalexa::{AlexaConfigExt, AlexaExt};
use pmoconfig::get_config;
use pmoserver::ServerBuilder;
use pmoyoutube::{MediaResolver, YouTubeConfigExt};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_config();

    let mut server = ServerBuilder::new_configured().build();

    // Logs d'abord, pour voir la suite du démarrage
    server.init_logging().await;

    server
        .add_route("/info", || async {
            serde_json::json!({"version": env!("CARGO_PKG_VERSION")})
        })
        .await;

    // ========== Résolveur YouTube ==========
    info!("🔍 Building YouTube resolver...");
    let resolver: Arc<dyn MediaResolver> = match config.build_youtube_resolver() {
        Ok(resolver) => Arc::new(resolver),
        Err(e) => {
            error!("❌ Cannot start without a YouTube resolver: {}", e);
            return Err(e);
        }
    };

    // ========== Skill ==========
    info!("🗣️ Registering Alexa skill routes...");
    server.init_alexa_skill(resolver).await?;

    let info = server.info();
    info!("📡 Starting {} on port {}", info.name, info.http_port);
    server.start().await;

    info!("✅ Skill endpoint: {}/alexa", info.base_url);
    info!(
        "✅ Relay endpoint: {}/proxy?url=...",
        config.get_skill_public_base_url()
    );
    info!("Press Ctrl+C to stop");

    server.wait().await;
    Ok(())
}
