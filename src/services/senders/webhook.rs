// src/services/senders/webhook.rs

//! Generic JSON webhook, used for explicit override URLs.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::{CUSTOM_CHANNEL, Sender};
use crate::error::SendError;
use crate::models::Item;

/// Posts each record as a JSON object; any 2xx reply counts as accepted.
pub struct WebhookSender {
    client: Client,
    webhook_url: String,
}

impl WebhookSender {
    pub fn new(client: Client, webhook_url: &str) -> Self {
        Self {
            client,
            webhook_url: webhook_url.to_string(),
        }
    }
}

#[async_trait]
impl Sender for WebhookSender {
    fn channel(&self) -> &str {
        CUSTOM_CHANNEL
    }

    async fn send(&self, item: &Item) -> Result<bool, SendError> {
        let response = self.client.post(&self.webhook_url).json(item).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("Webhook answered {} for {}", status, item.url);
        }
        Ok(status.is_success())
    }

    fn validate_config(&self) -> bool {
        Url::parse(&self.webhook_url)
            .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
            .unwrap_or(false)
    }
}
