use poetry_service::config::{DiscordConfig, GeminiConfig, PoetryConfig};
use poetry_service::startup::Application;
use serde_json::json;
use service_core::config::Config as CoreConfig;
use wiremock::MockServer;

/// A running application with mock servers standing in for the Gemini API
/// and the Discord webhook.
pub struct TestApp {
    pub address: String,
    pub gemini: MockServer,
    pub discord: MockServer,
}

impl TestApp {
    /// Spawn with a valid credential and a webhook URL pointing at the mock.
    pub async fn spawn() -> Self {
        Self::spawn_inner("test-api-key", true).await
    }

    /// Spawn with an empty Gemini credential.
    pub async fn spawn_without_api_key() -> Self {
        Self::spawn_inner("", true).await
    }

    /// Spawn with no webhook URL configured.
    pub async fn spawn_without_webhook() -> Self {
        Self::spawn_inner("test-api-key", false).await
    }

    async fn spawn_inner(api_key: &str, with_webhook: bool) -> Self {
        let gemini = MockServer::start().await;
        let discord = MockServer::start().await;

        let config = PoetryConfig {
            common: CoreConfig { port: 0 },
            gemini: GeminiConfig {
                api_key: api_key.to_string(),
                model: "gemini-2.0-flash".to_string(),
                api_base: gemini.uri(),
            },
            discord: DiscordConfig {
                webhook_url: with_webhook.then(|| format!("{}/webhook", discord.uri())),
                username: "VibePoetry AI".to_string(),
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let port = app.port();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            gemini,
            discord,
        }
    }

    pub fn generate_url(&self) -> String {
        format!("{}/generate_and_post", self.address)
    }
}

/// Gemini generateContent response wrapping the given text as the first
/// candidate part.
pub fn gemini_text_response(text: &str) -> serde_json::Value {
    json!({
        "candidates": [
            {
                "content": {
                    "role": "model",
                    "parts": [{ "text": text }]
                }
            }
        ]
    })
}

pub const GEMINI_GENERATE_PATH: &str = "/models/gemini-2.0-flash:generateContent";
