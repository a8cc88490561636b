//! Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use mediadex_common::MediaKind;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{TriviaError, TriviaGenerator};
use crate::catalog::provider::fetch_json;
use crate::config::TriviaConfig;

const PROVIDER: &str = "gemini";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, trimmed.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// Build the trivia instruction for a subject.
pub fn trivia_prompt(title: &str, kind: MediaKind, max_words: u32, language: &str) -> String {
    format!(
        "Act as an expert in film, TV series and video game trivia.\n\
         Write ONE surprising behind-the-scenes fact about the {noun} \"{title}\".\n\
         \n\
         Rules:\n\
         1. Keep it short and direct (at most {max_words} words).\n\
         2. Be informative and curious, e.g. \"Originally, X was going to be Y...\" or \"The actor did Z...\".\n\
         3. Do NOT open with \"Did you know\" or \"A fun fact is\". Go straight to the fact.\n\
         4. Answer in {language}.",
        noun = kind.noun(),
    )
}

/// Trivia generator backed by the Gemini API.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    language: String,
    max_words: u32,
}

impl GeminiClient {
    pub fn new(config: &TriviaConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout: {}", e);
                reqwest::Client::new()
            });

        Self {
            client,
            api_key: config.api_key.clone(),
            endpoint: format!(
                "{}/models/{}:generateContent",
                config.base_url.trim_end_matches('/'),
                config.model
            ),
            language: config.language.clone(),
            max_words: config.max_words,
        }
    }
}

#[async_trait]
impl TriviaGenerator for GeminiClient {
    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn generate(&self, title: &str, kind: MediaKind) -> Result<String, TriviaError> {
        if !self.is_available() {
            return Err(TriviaError::NotConfigured);
        }

        let prompt = trivia_prompt(title, kind, self.max_words, &self.language);
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: &prompt }],
            }],
        };

        debug!(title = title, kind = %kind, "Requesting trivia");
        let request = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&body);

        let response: GenerateResponse = fetch_json(PROVIDER, request).await?;
        response.text().ok_or(TriviaError::EmptyResponse)
    }
}
