use anyhow::Context as _;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://lingva.ml/api/v1";

/// Lingva rejects long inputs; both `translate` and `audio` enforce this
/// locally before any network call.
pub const TEXT_LIMIT: usize = 200;

/// Languages offered in the `translate`/`audio` dropdowns, with Portuguese
/// display names.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("Alemão", "de"),
    ("Inglês", "en"),
    ("Chinês", "zh"),
    ("Francês", "fr"),
    ("Espanhol", "es"),
    ("Português", "pt"),
];

pub fn language_name(code: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(_, language)| *language == code)
        .map(|(name, _)| *name)
}

pub fn exceeds_text_limit(text: &str) -> bool {
    text.chars().count() > TEXT_LIMIT
}

/// Client for the Lingva translation and text-to-speech API.
pub struct LingvaClient {
    http: reqwest::Client,
    base_url: String,
}

impl LingvaClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    fn endpoint(&self, segments: &[&str]) -> anyhow::Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| anyhow::anyhow!("Lingva base URL cannot be a base"))?
            .extend(segments);
        Ok(url)
    }

    /// Translates `text` between the two language codes. Returns `None` when
    /// the service answered without a `translation` field.
    pub async fn translate(
        &self,
        source: &str,
        target: &str,
        text: &str,
    ) -> anyhow::Result<Option<String>> {
        let url = self.endpoint(&[source, target, text])?;
        let response: TranslationResponse =
            self.http.get(url).send().await?.json().await?;
        Ok(response.translation)
    }

    /// Synthesizes `text` in the given language. Returns `None` when the
    /// service answered with a non-success status.
    pub async fn audio(&self, language: &str, text: &str) -> anyhow::Result<Option<Vec<u8>>> {
        let url = self.endpoint(&["audio", language, text])?;
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Ok(None);
        }
        let response: AudioResponse = response.json().await?;
        response.audio.decode().map(Some)
    }
}

#[derive(Deserialize, Debug)]
struct TranslationResponse {
    translation: Option<String>,
}

#[derive(Deserialize, Debug)]
struct AudioResponse {
    audio: AudioPayload,
}

/// Lingva instances answer with either a raw byte array or a base64 string.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum AudioPayload {
    Raw(Vec<u8>),
    Base64(String),
}

impl AudioPayload {
    fn decode(self) -> anyhow::Result<Vec<u8>> {
        match self {
            Self::Raw(bytes) => Ok(bytes),
            Self::Base64(encoded) => data_encoding::BASE64
                .decode(encoded.as_bytes())
                .context("audio payload was not valid base64"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_translation_field_is_optional() {
        let response: TranslationResponse =
            serde_json::from_value(json!({ "translation": "Olá" })).unwrap();
        assert_eq!(response.translation.as_deref(), Some("Olá"));

        let response: TranslationResponse =
            serde_json::from_value(json!({ "error": "bad request" })).unwrap();
        assert_eq!(response.translation, None);
    }

    #[test]
    fn test_audio_payload_raw_bytes() {
        let response: AudioResponse =
            serde_json::from_value(json!({ "audio": [73, 68, 51] })).unwrap();
        assert_eq!(response.audio.decode().unwrap(), vec![73, 68, 51]);
    }

    #[test]
    fn test_audio_payload_base64() {
        let response: AudioResponse =
            serde_json::from_value(json!({ "audio": "SUQz" })).unwrap();
        assert_eq!(response.audio.decode().unwrap(), b"ID3".to_vec());
    }

    #[test]
    fn test_text_limit_boundary() {
        assert!(!exceeds_text_limit(&"a".repeat(TEXT_LIMIT)));
        assert!(exceeds_text_limit(&"a".repeat(TEXT_LIMIT + 1)));
        // Counted in characters, not bytes.
        assert!(!exceeds_text_limit(&"ã".repeat(TEXT_LIMIT)));
    }

    #[test]
    fn test_language_names() {
        assert_eq!(language_name("pt"), Some("Português"));
        assert_eq!(language_name("zh"), Some("Chinês"));
        assert_eq!(language_name("ja"), None);
    }

    #[test]
    fn test_endpoint_percent_encodes_segments() {
        let client = LingvaClient::new(reqwest::Client::new());
        let url = client.endpoint(&["en", "pt", "hello world?"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://lingva.ml/api/v1/en/pt/hello%20world%3F"
        );
    }
}
