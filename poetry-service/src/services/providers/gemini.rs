//! Gemini-backed poem generator.
//!
//! Sends a fixed copywriting persona as the system instruction, asks for JSON
//! output, and parses the returned text into a [`Poem`].

use super::{GeneratorError, PoemGenerator};
use crate::config::GeminiConfig;
use crate::models::Poem;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Persona and output contract sent as the system instruction on every call.
const SYSTEM_INSTRUCTION: &str = "You are a top copywriting expert. Based on the user's topic, \
write a short modern poem suitable for posting on social media. \
Output JSON directly, containing \"poetry_content\" (the poem, line breaks preserved) \
and \"suggested_hashtags\" (a list of hashtag strings).";

pub struct GeminiPoemGenerator {
    config: GeminiConfig,
    client: Client,
}

impl GeminiPoemGenerator {
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn api_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.api_base, self.config.model, self.config.api_key
        )
    }

    fn user_prompt(topic: &str) -> String {
        format!("Topic: {}. Write one poem and output it as JSON.", topic)
    }
}

#[async_trait]
impl PoemGenerator for GeminiPoemGenerator {
    async fn generate(&self, topic: &str) -> Result<Poem, GeneratorError> {
        if self.config.api_key.is_empty() {
            return Err(GeneratorError::NotConfigured(
                "GEMINI_API_KEY is not configured".to_string(),
            ));
        }

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![ContentPart {
                    text: Self::user_prompt(topic),
                }],
            }],
            system_instruction: Some(Content {
                role: None,
                parts: vec![ContentPart {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            }),
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
            }),
        };

        tracing::debug!(
            model = %self.config.model,
            topic_len = topic.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.api_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| GeneratorError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Upstream(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::Upstream(format!("Failed to parse response: {}", e)))?;

        let text = api_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| {
                GeneratorError::Upstream("Gemini returned no candidates".to_string())
            })?;

        serde_json::from_str::<Poem>(&text).map_err(|e| {
            // Surface the unparsable text for operator inspection.
            tracing::error!(raw_text = %text, "Gemini returned text that is not valid poem JSON");
            GeneratorError::MalformedOutput(format!("JSON decode error: {}", e))
        })
    }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Content,
}
