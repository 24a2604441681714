//! Discord webhook delivery.

use super::{DeliveryOutcome, MessageDelivery};
use crate::config::DiscordConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

pub struct DiscordWebhookDelivery {
    config: DiscordConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
    username: &'a str,
}

impl DiscordWebhookDelivery {
    pub fn new(config: DiscordConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl MessageDelivery for DiscordWebhookDelivery {
    async fn deliver(&self, content: &str) -> DeliveryOutcome {
        let Some(webhook_url) = self.config.webhook_url.as_deref() else {
            return DeliveryOutcome::failed("DISCORD_WEBHOOK_URL is not configured");
        };

        let payload = WebhookPayload {
            content,
            username: &self.config.username,
        };

        match self.client.post(webhook_url).json(&payload).send().await {
            // Discord answers 204 on plain webhook posts, 200 with ?wait=true.
            Ok(response) if matches!(response.status().as_u16(), 200 | 204) => {
                tracing::info!(status = %response.status(), "Message delivered to Discord webhook");
                DeliveryOutcome::delivered("delivered")
            }
            Ok(response) => DeliveryOutcome::failed(format!(
                "Discord API error: {}",
                response.status().as_u16()
            )),
            Err(e) => DeliveryOutcome::failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiscordConfig;

    #[tokio::test]
    async fn missing_webhook_url_fails_without_network_io() {
        let delivery = DiscordWebhookDelivery::new(DiscordConfig {
            webhook_url: None,
            username: "VibePoetry AI".to_string(),
        });

        let outcome = delivery.deliver("a poem").await;
        assert!(!outcome.success);
        assert!(outcome.detail.contains("DISCORD_WEBHOOK_URL"));
    }

    #[test]
    fn payload_serializes_content_and_username() {
        let payload = WebhookPayload {
            content: "a poem",
            username: "VibePoetry AI",
        };
        let json = serde_json::to_value(&payload).expect("payload should serialize");
        assert_eq!(json["content"], "a poem");
        assert_eq!(json["username"], "VibePoetry AI");
    }
}
