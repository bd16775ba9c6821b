//! # pmoserver - Serveur web haut niveau basé sur Axum
//!
//! Cette crate fournit une abstraction simple pour créer le serveur HTTP du
//! skill PMOAlexa.
//!
//! ## Fonctionnalités
//!
//! - **API de haut niveau** : routes JSON, handlers avec état, sous-routers
//! - **Logs** : buffer circulaire consultable via `/log-dump`, niveau ajustable
//!   à chaud via `/api/log_setup`
//! - **Arrêt gracieux** : gestion propre de l'arrêt sur Ctrl+C
//!
//! ## Exemple d'utilisation
//!
//! ```rust,no_run
//! use pmoserver::ServerBuilder;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut server = ServerBuilder::new("MyServer", "http://localhost:3000", 3000).build();
//!     server.init_logging().await;
//!
//!     server.add_route("/api/status", || async {
//!         serde_json::json!({"status": "ok"})
//!     }).await;
//!
//!     server.start().await;
//!     server.wait().await;
//! }
//! ```
//!
//! Les crates métier (comme `pmoalexa`) étendent [`Server`] avec des traits
//! d'extension qui enregistrent leurs propres routes.

pub mod logs;
pub mod server;

pub use logs::{LogEntry, LogState, log_dump};
pub use server::{Server, ServerBuilder, ServerInfo};
