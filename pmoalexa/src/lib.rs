//! # pmoalexa - Skill vocale de lecture YouTube
//!
//! Backend d'une skill Alexa : l'utilisateur nomme une chanson, la skill
//! trouve la vidéo YouTube correspondante, choisit son meilleur flux audio
//! M4A et le fait jouer par l'enceinte à travers un relais HTTP.
//!
//! ## Composants
//!
//! - [`IntentRouter`] : machine à états des intents (lecture, pause, reprise...)
//! - [`SessionStore`] : la [`PlaybackSession`] unique du processus
//! - [`StreamRelay`] : `GET /proxy?url=...`, relais octet par octet
//! - [`AlexaExt`] : enregistrement des routes sur un `pmoserver::Server`
//!
//! Media resolution itself lives in `pmoyoutube`.

pub mod api_rest;
pub mod config_ext;
pub mod error;
pub mod intent;
pub mod pmoserver_ext;
pub mod protocol;
pub mod relay;
pub mod router;
pub mod session;
pub mod speech;

pub use api_rest::{create_router, AlexaState, SKILL_PATH};
pub use config_ext::{AlexaConfigExt, ENV_PROXY_BASE_URL};
pub use error::{EventError, RelayError};
pub use intent::{Intent, SkillEvent};
pub use pmoserver_ext::AlexaExt;
pub use protocol::{Card, Directive, PlayBehavior, SkillRequest, SkillResponse, Stream};
pub use relay::{RelayLinks, StreamRelay, RELAY_PATH};
pub use router::IntentRouter;
pub use session::{PlaybackSession, SessionStore};
pub use speech::Locale;
