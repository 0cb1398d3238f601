// src/services/senders/unsupported.rs

//! Registered channel types without an implementation.

use async_trait::async_trait;

use super::Sender;
use crate::error::SendError;
use crate::models::{BatchOutcome, Item};

/// Reports every record as failed with [`SendError::Unsupported`].
pub struct UnsupportedSender {
    channel: &'static str,
}

impl UnsupportedSender {
    pub fn new(channel: &'static str) -> Self {
        Self { channel }
    }
}

#[async_trait]
impl Sender for UnsupportedSender {
    fn channel(&self) -> &str {
        self.channel
    }

    async fn send(&self, _item: &Item) -> Result<bool, SendError> {
        Err(SendError::Unsupported(self.channel.to_string()))
    }

    async fn send_batch(&self, items: &[Item]) -> BatchOutcome {
        log::warn!(
            "{}; {} records not sent",
            SendError::Unsupported(self.channel.to_string()),
            items.len()
        );
        BatchOutcome::all_failed(items.len())
    }

    fn validate_config(&self) -> bool {
        false
    }
}
