use anyhow::Context as _;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const MODEL: &str = "gemini-1.5-flash";

/// Client for Google's Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        Self {
            http,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Sends a single free-text prompt and returns the model's text reply.
    pub async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        let url = format!(
            "{}/models/{MODEL}:generateContent?key={}",
            self.base_url, self.api_key
        );

        let response: GenerateContentResponse = self
            .http
            .post(&url)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response.into_text()
    }
}

#[derive(Serialize, Debug)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}
impl GenerateContentRequest {
    fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Debug)]
struct Part {
    text: String,
}

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}
#[derive(Deserialize, Debug)]
struct Candidate {
    content: Content,
}

impl GenerateContentResponse {
    fn into_text(self) -> anyhow::Result<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .context("Gemini response contained no candidates")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_text_extraction() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "4" }], "role": "model" } }
            ]
        }))
        .unwrap();
        assert_eq!(response.into_text().unwrap(), "4");
    }

    #[test]
    fn test_empty_candidates_is_an_error() {
        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.into_text().is_err());
    }

    #[test]
    fn test_request_shape() {
        let request = GenerateContentRequest::from_prompt("hi");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({ "contents": [{ "parts": [{ "text": "hi" }] }] })
        );
    }
}
