pub mod discord;
pub mod gemini;

use async_trait::async_trait;
use axum::http::StatusCode;
use thiserror::Error;

pub use discord::DiscordWebhookDelivery;
pub use gemini::GeminiPoemGenerator;

use crate::models::Poem;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Malformed model output: {0}")]
    MalformedOutput(String),
}

impl GeneratorError {
    /// HTTP status the handler should answer with for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GeneratorError::NotConfigured(_)
            | GeneratorError::Upstream(_)
            | GeneratorError::MalformedOutput(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Outcome of a webhook delivery attempt.
///
/// Delivery never signals failure out of band; callers branch on `success`.
#[derive(Debug, Clone)]
pub struct DeliveryOutcome {
    pub success: bool,
    pub detail: String,
}

impl DeliveryOutcome {
    pub fn delivered(detail: impl Into<String>) -> Self {
        Self {
            success: true,
            detail: detail.into(),
        }
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            success: false,
            detail: detail.into(),
        }
    }
}

#[async_trait]
pub trait PoemGenerator: Send + Sync {
    async fn generate(&self, topic: &str) -> Result<Poem, GeneratorError>;
}

#[async_trait]
pub trait MessageDelivery: Send + Sync {
    async fn deliver(&self, content: &str) -> DeliveryOutcome;
}
