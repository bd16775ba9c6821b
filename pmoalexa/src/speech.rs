//! Textes parlés par la skill, par langue

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl FromStr for Locale {
    type Err = String;

    /// Accepts bare languages (`es`) and regional tags (`en-US`, `es_MX`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lang = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match lang.as_str() {
            "es" => Ok(Self::Es),
            "en" => Ok(Self::En),
            _ => Err(format!("unsupported locale '{}'", s)),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Es => f.write_str("es"),
            Self::En => f.write_str("en"),
        }
    }
}

#[derive(Debug)]
pub struct Prompts {
    pub welcome: &'static str,
    pub which_song: &'static str,
    pub no_video: &'static str,
    pub no_audio: &'static str,
    pub playing_prefix: &'static str,
    pub superseded: &'static str,
    pub change_song: &'static str,
    pub pausing: &'static str,
    pub resuming_prefix: &'static str,
    pub nothing_to_resume: &'static str,
    pub farewell: &'static str,
    pub not_understood: &'static str,
    pub unsupported: &'static str,
    pub internal_error: &'static str,
}

static ES: Prompts = Prompts {
    welcome: "Bienvenido a YouTube Player Skill. Dime el nombre de la canción que quieres escuchar.",
    which_song: "¿Qué canción quieres escuchar?",
    no_video: "No pude encontrar un video para esa búsqueda. Por favor, intenta con otro término.",
    no_audio: "No pude extraer el audio del video. Por favor, intenta con otro.",
    playing_prefix: "Reproduciendo: ",
    superseded: "Ya estoy cargando otra canción.",
    change_song: "¿Qué canción deseas escuchar ahora?",
    pausing: "Pausando la reproducción.",
    resuming_prefix: "Reanudando la reproducción de ",
    nothing_to_resume: "No hay ninguna reproducción para reanudar. Por favor, busca una canción.",
    farewell: "Gracias por usar YouTube Player Skill. ¡Hasta pronto!",
    not_understood: "No he entendido tu solicitud. Por favor, intenta de nuevo.",
    unsupported: "Lo siento, algo salió mal.",
    internal_error: "Ocurrió un error al procesar tu solicitud.",
};

static EN: Prompts = Prompts {
    welcome: "Welcome to YouTube Player Skill. Tell me the name of the song you want to hear.",
    which_song: "Which song do you want to hear?",
    no_video: "I couldn't find a video for that search. Please try another term.",
    no_audio: "I couldn't extract the audio from the video. Please try another one.",
    playing_prefix: "Playing: ",
    superseded: "I'm already loading another song.",
    change_song: "Which song would you like to hear now?",
    pausing: "Pausing playback.",
    resuming_prefix: "Resuming playback of ",
    nothing_to_resume: "There is nothing to resume. Please search for a song.",
    farewell: "Thanks for using YouTube Player Skill. See you soon!",
    not_understood: "I didn't understand your request. Please try again.",
    unsupported: "Sorry, something went wrong.",
    internal_error: "There was an error processing your request.",
};

impl Locale {
    pub fn prompts(self) -> &'static Prompts {
        match self {
            Self::Es => &ES,
            Self::En => &EN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parsing() {
        assert_eq!("es".parse::<Locale>(), Ok(Locale::Es));
        assert_eq!("es-MX".parse::<Locale>(), Ok(Locale::Es));
        assert_eq!("en_US".parse::<Locale>(), Ok(Locale::En));
        assert!("fr-FR".parse::<Locale>().is_err());
        assert_eq!(Locale::default().to_string(), "es");
    }

    #[test]
    fn test_catalogues_are_complete() {
        for locale in [Locale::Es, Locale::En] {
            let p = locale.prompts();
            for text in [
                p.welcome,
                p.which_song,
                p.no_video,
                p.no_audio,
                p.playing_prefix,
                p.superseded,
                p.change_song,
                p.pausing,
                p.resuming_prefix,
                p.nothing_to_resume,
                p.farewell,
                p.not_understood,
                p.unsupported,
                p.internal_error,
            ] {
                assert!(!text.trim().is_empty(), "empty prompt for {}", locale);
            }
        }
    }
}
