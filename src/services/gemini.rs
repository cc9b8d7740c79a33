// gemini generateContent client
use serde::{Deserialize, Serialize};

use super::prompt::RewritePrompt;
use crate::{
    error::{ApiError, Result},
    models::{GENERATIVE_FAILURE_TEXT, REWRITE_FALLBACK_TEXT},
};

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    system_instruction: Content,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

fn text_content(text: &str) -> Content {
    Content {
        parts: vec![Part {
            text: Some(text.to_string()),
        }],
    }
}

pub struct GeminiClient<'a> {
    http: &'a reqwest::Client,
    api_base: &'a str,
}

impl<'a> GeminiClient<'a> {
    /// `api_base` is the endpoint up to and including `key=`.
    pub fn new(http: &'a reqwest::Client, api_base: &'a str) -> Self {
        Self { http, api_base }
    }

    /// Submit the prompt once and return the first candidate's text.
    pub async fn generate(&self, api_key: &str, prompt: &RewritePrompt) -> Result<String> {
        let payload = GenerateRequest {
            contents: vec![text_content(&prompt.text)],
            system_instruction: text_content(&prompt.persona),
        };

        let response = self
            .http
            .post(format!("{}{}", self.api_base, api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                // reqwest errors carry the url, which holds the key
                let e = e.without_url();
                tracing::error!("gemini request failed: {}", e);
                ApiError::Generative(format!("{} {}", GENERATIVE_FAILURE_TEXT, e))
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Internal(e.without_url().to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .and_then(|e| e.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| GENERATIVE_FAILURE_TEXT.to_string());
            tracing::error!("gemini api error ({}): {}", status, message);
            return Err(ApiError::Generative(message));
        }

        let parsed: GenerateResponse = serde_json::from_slice(&body)
            .map_err(|e| ApiError::Internal(format!("invalid gemini response: {}", e)))?;

        Ok(first_text(parsed).unwrap_or_else(|| REWRITE_FALLBACK_TEXT.to_string()))
    }
}

fn first_text(response: GenerateResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?
        .text
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn prompt() -> RewritePrompt {
        RewritePrompt {
            text: "Rewrite: Hello World".into(),
            persona: "You are an editor.".into(),
        }
    }

    #[tokio::test]
    async fn test_returns_first_candidate_text() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/generate")
                    .query_param("key", "secret")
                    .json_body(json!({
                        "contents": [{ "parts": [{ "text": "Rewrite: Hello World" }] }],
                        "systemInstruction": { "parts": [{ "text": "You are an editor." }] }
                    }));
                then.status(200).json_body(json!({
                    "candidates": [
                        { "content": { "parts": [{ "text": "Bonjour" }, { "text": "ignored" }] } },
                        { "content": { "parts": [{ "text": "second" }] } }
                    ]
                }));
            })
            .await;

        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        let base = server.url("/generate?key=");
        let text = GeminiClient::new(&http, &base)
            .generate("secret", &prompt())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(text, "Bonjour");
    }

    #[tokio::test]
    async fn test_missing_structure_uses_fallback() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/generate");
                then.status(200).json_body(json!({ "candidates": [] }));
            })
            .await;

        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        let base = server.url("/generate?key=");
        let text = GeminiClient::new(&http, &base)
            .generate("k", &prompt())
            .await
            .unwrap();

        assert_eq!(text, REWRITE_FALLBACK_TEXT);
    }

    #[tokio::test]
    async fn test_error_message_is_surfaced() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/generate");
                then.status(429)
                    .json_body(json!({ "error": { "code": 429, "message": "quota exceeded" } }));
            })
            .await;

        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        let base = server.url("/generate?key=");
        let err = GeminiClient::new(&http, &base)
            .generate("k", &prompt())
            .await
            .unwrap_err();

        assert!(matches!(&err, ApiError::Generative(m) if m == "quota exceeded"));
    }

    #[tokio::test]
    async fn test_error_without_message_is_generic() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/generate");
                then.status(500).body("upstream exploded");
            })
            .await;

        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        let base = server.url("/generate?key=");
        let err = GeminiClient::new(&http, &base)
            .generate("k", &prompt())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), GENERATIVE_FAILURE_TEXT);
    }

    #[test]
    fn test_first_text_skips_empty() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "" }] } }]
        }))
        .unwrap();
        assert_eq!(first_text(response), None);
    }
}
