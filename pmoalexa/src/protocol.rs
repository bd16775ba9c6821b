//! Structures JSON du protocole de skill Alexa (requête et réponse)
//!
//! Only the fields the skill reads or writes are modelled; unknown fields of
//! the inbound envelope (`session`, `context`...) are ignored.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Version of the response envelope
pub const RESPONSE_VERSION: &str = "1.0";

/// Requête entrante envoyée par la plateforme
#[derive(Debug, Clone, Deserialize)]
pub struct SkillRequest {
    pub request: RequestBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestBody {
    /// `LaunchRequest`, `IntentRequest`, ...
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub intent: Option<IntentBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntentBody {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

impl IntentBody {
    /// Valeur non vide d'un slot
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.slots
            .get(name)
            .and_then(|slot| slot.value.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub value: Option<String>,
}

/// Réponse renvoyée à la plateforme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillResponse {
    pub version: String,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub output_speech: OutputSpeech,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<Directive>,
    pub should_end_session: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl OutputSpeech {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: "PlainText".to_string(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub content: String,
}

impl Card {
    pub fn simple(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind: "Simple".to_string(),
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Instruction pour le lecteur audio de la plateforme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Directive {
    #[serde(rename = "AudioPlayer.Play", rename_all = "camelCase")]
    Play {
        play_behavior: PlayBehavior,
        audio_item: AudioItem,
    },
    #[serde(rename = "AudioPlayer.Stop")]
    Stop,
}

impl Directive {
    /// Play directive replacing the whole queue
    pub fn play(stream: Stream) -> Self {
        Self::Play {
            play_behavior: PlayBehavior::ReplaceAll,
            audio_item: AudioItem { stream },
        }
    }

    pub fn stream(&self) -> Option<&Stream> {
        match self {
            Self::Play { audio_item, .. } => Some(&audio_item.stream),
            Self::Stop => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayBehavior {
    ReplaceAll,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioItem {
    pub stream: Stream,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    pub token: String,
    pub url: String,
    pub offset_in_milliseconds: u64,
}

impl SkillResponse {
    /// Réponse parlée simple
    pub fn speak(text: impl Into<String>, should_end_session: bool) -> Self {
        Self {
            version: RESPONSE_VERSION.to_string(),
            response: ResponseBody {
                output_speech: OutputSpeech::plain(text),
                card: None,
                directives: Vec::new(),
                should_end_session,
            },
        }
    }

    pub fn with_card(mut self, card: Card) -> Self {
        self.response.card = Some(card);
        self
    }

    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.response.directives.push(directive);
        self
    }

    pub fn text(&self) -> &str {
        &self.response.output_speech.text
    }

    pub fn should_end_session(&self) -> bool {
        self.response.should_end_session
    }

    /// First Play directive, if any
    pub fn play_stream(&self) -> Option<&Stream> {
        self.response.directives.iter().find_map(Directive::stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_play_response_wire_format() {
        let response = SkillResponse::speak("Reproduciendo: x", true)
            .with_card(Card::simple("YouTube Player", "Reproduciendo: x"))
            .with_directive(Directive::play(Stream {
                token: "tok".into(),
                url: "https://relay/proxy?url=a".into(),
                offset_in_milliseconds: 0,
            }));

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "version": "1.0",
                "response": {
                    "outputSpeech": { "type": "PlainText", "text": "Reproduciendo: x" },
                    "card": {
                        "type": "Simple",
                        "title": "YouTube Player",
                        "content": "Reproduciendo: x"
                    },
                    "directives": [{
                        "type": "AudioPlayer.Play",
                        "playBehavior": "REPLACE_ALL",
                        "audioItem": { "stream": {
                            "token": "tok",
                            "url": "https://relay/proxy?url=a",
                            "offsetInMilliseconds": 0
                        }}
                    }],
                    "shouldEndSession": true
                }
            })
        );
    }

    #[test]
    fn test_stop_directive_and_omitted_fields() {
        let value =
            serde_json::to_value(SkillResponse::speak("bye", true).with_directive(Directive::Stop))
                .unwrap();
        assert_eq!(value["response"]["directives"], json!([{ "type": "AudioPlayer.Stop" }]));
        assert!(value["response"].get("card").is_none());

        let plain = serde_json::to_value(SkillResponse::speak("hi", false)).unwrap();
        assert!(plain["response"].get("directives").is_none());
        assert_eq!(plain["response"]["shouldEndSession"], false);
    }

    #[test]
    fn test_request_parsing_ignores_unknown_fields() {
        let request: SkillRequest = serde_json::from_value(json!({
            "version": "1.0",
            "session": { "new": true },
            "context": { "AudioPlayer": {} },
            "request": {
                "type": "IntentRequest",
                "requestId": "amzn1.echo-api.request.1",
                "locale": "es-ES",
                "intent": {
                    "name": "PlayYouTubeIntent",
                    "slots": { "videoQuery": { "name": "videoQuery", "value": "  despacito " } }
                }
            }
        }))
        .unwrap();

        assert_eq!(request.request.kind, "IntentRequest");
        assert!(request.request.intent.is_some());
        let intent = request.request.intent.unwrap();
        assert_eq!(intent.slot_value("videoQuery"), Some("despacito"));
        assert_eq!(intent.slot_value("other"), None);
    }
}
