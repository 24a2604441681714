//! HTTP handlers for poetry-service.

pub mod health;

pub use health::{health_check, readiness_check};

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Poem;
use crate::startup::AppState;
use service_core::error::AppError;

/// Topic used when the request body does not provide one.
pub const DEFAULT_TOPIC: &str = "random inspiration";

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateAndPostRequest {
    #[validate(length(max = 200, message = "Topic is too long"))]
    pub topic: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateAndPostResponse {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poetry: Option<Poem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Generate a poem for the requested topic and post it to the configured
/// webhook. Single pass, no retries: a generation failure answers before any
/// delivery attempt, a delivery failure after successful generation answers
/// with `partial_success`.
#[tracing::instrument(skip(state, request))]
pub async fn generate_and_post(
    State(state): State<AppState>,
    Json(request): Json<GenerateAndPostRequest>,
) -> Result<(StatusCode, Json<GenerateAndPostResponse>), AppError> {
    request.validate()?;

    let topic = request.topic.unwrap_or_else(|| DEFAULT_TOPIC.to_string());

    let poem = match state.generator.generate(&topic).await {
        Ok(poem) => poem,
        Err(e) => {
            tracing::error!(status = %e.status_code(), details = %e, "Poem generation failed");
            return Ok((
                e.status_code(),
                Json(GenerateAndPostResponse {
                    status: "error",
                    message: "Content generation failed, check the API key or network connection"
                        .to_string(),
                    poetry: None,
                    details: Some(e.to_string()),
                }),
            ));
        }
    };

    let message = poem.to_post_message(&topic);
    let outcome = state.delivery.deliver(&message).await;

    if outcome.success {
        tracing::info!(topic = %topic, "Poem generated and posted");
        Ok((
            StatusCode::OK,
            Json(GenerateAndPostResponse {
                status: "success",
                message: "Poem generated and posted to Discord".to_string(),
                poetry: Some(poem),
                details: None,
            }),
        ))
    } else {
        tracing::warn!(details = %outcome.detail, "Poem generated but delivery failed");
        Ok((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(GenerateAndPostResponse {
                status: "partial_success",
                message: "Posting failed".to_string(),
                poetry: None,
                details: Some(outcome.detail),
            }),
        ))
    }
}
