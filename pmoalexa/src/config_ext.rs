//! Extension pour intégrer la configuration de la skill dans pmoconfig
//!
//! ```yaml
//! skill:
//!   public_base_url: ""   # ou PROXY_BASE_URL, sinon host.base_url
//!   locale: es
//!   name: "YouTube Player"
//! ```

use crate::router::DEFAULT_SKILL_NAME;
use crate::speech::Locale;
use anyhow::Result;
use pmoconfig::Config;
use serde_yaml::Value;

/// Variable d'environnement historique pour l'URL publique du relais
pub const ENV_PROXY_BASE_URL: &str = "PROXY_BASE_URL";

/// Trait d'extension pour gérer la configuration de la skill dans pmoconfig
pub trait AlexaConfigExt {
    /// Base URL under which the platform reaches `/proxy`
    fn get_skill_public_base_url(&self) -> String;

    fn set_skill_public_base_url(&self, url: &str) -> Result<()>;

    fn get_skill_locale(&self) -> Locale;

    fn set_skill_locale(&self, locale: Locale) -> Result<()>;

    /// Titre des cartes affichées
    fn get_skill_name(&self) -> String;
}

impl AlexaConfigExt for Config {
    fn get_skill_public_base_url(&self) -> String {
        self.get_string_or_env(&["skill", "public_base_url"], ENV_PROXY_BASE_URL)
            .unwrap_or_else(|| self.get_base_url())
    }

    fn set_skill_public_base_url(&self, url: &str) -> Result<()> {
        self.set_value(&["skill", "public_base_url"], Value::String(url.to_string()))
    }

    fn get_skill_locale(&self) -> Locale {
        match self.get_string(&["skill", "locale"]) {
            Some(tag) => tag.parse().unwrap_or_else(|e| {
                tracing::warn!("{}, falling back to {}", e, Locale::default());
                Locale::default()
            }),
            None => Locale::default(),
        }
    }

    fn set_skill_locale(&self, locale: Locale) -> Result<()> {
        self.set_value(&["skill", "locale"], Value::String(locale.to_string()))
    }

    fn get_skill_name(&self) -> String {
        self.get_string(&["skill", "name"])
            .unwrap_or_else(|| DEFAULT_SKILL_NAME.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        (dir, config)
    }

    #[test]
    fn test_defaults() {
        let (_dir, config) = config();
        assert_eq!(config.get_skill_locale(), Locale::Es);
        assert_eq!(config.get_skill_name(), DEFAULT_SKILL_NAME);
    }

    #[test]
    fn test_public_base_url_round_trip() {
        let (_dir, config) = config();
        config
            .set_skill_public_base_url("https://skill.example.com")
            .unwrap();
        assert_eq!(
            config.get_skill_public_base_url(),
            "https://skill.example.com"
        );
    }

    #[test]
    fn test_locale_round_trip_and_fallback() {
        let (_dir, config) = config();
        config.set_skill_locale(Locale::En).unwrap();
        assert_eq!(config.get_skill_locale(), Locale::En);

        config
            .set_value(&["skill", "locale"], Value::String("klingon".into()))
            .unwrap();
        assert_eq!(config.get_skill_locale(), Locale::Es);
    }
}
