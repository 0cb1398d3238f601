// src/services/senders/mod.rs

//! Push channel delivery.
//!
//! A [`Sender`] delivers records to one destination of one channel type.
//! Senders are built per dispatch from the [`SenderRegistry`], which maps a
//! channel type to a factory taking the shared push client and the
//! destination URL.

mod unsupported;
mod webhook;
mod wechat;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::SendError;
use crate::models::{BatchOutcome, Item};

pub use unsupported::UnsupportedSender;
pub use webhook::WebhookSender;
pub use wechat::WechatSender;

/// Channel type used for explicit override URLs.
pub const CUSTOM_CHANNEL: &str = "custom";

/// Channel-specific delivery capability.
#[async_trait]
pub trait Sender: Send + Sync {
    /// Channel type this sender implements.
    fn channel(&self) -> &str;

    /// Deliver one record. `Ok(true)` iff the channel accepted it.
    async fn send(&self, item: &Item) -> Result<bool, SendError>;

    /// Deliver records one after another, counting each exactly once.
    ///
    /// A failing record is logged and counted; the rest are still sent.
    async fn send_batch(&self, items: &[Item]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for item in items {
            match self.send(item).await {
                Ok(true) => outcome.success += 1,
                Ok(false) => outcome.failed += 1,
                Err(e) => {
                    log::warn!("{} send failed for {}: {}", self.channel(), item.url, e);
                    outcome.failed += 1;
                }
            }
        }
        outcome
    }

    /// Whether the destination looks right for this channel.
    fn validate_config(&self) -> bool;
}

/// Builds a sender for a destination URL.
pub type SenderFactory = fn(Client, &str) -> Box<dyn Sender>;

/// Channel types keyed by name, in registration order.
#[derive(Debug, Clone, Default)]
pub struct SenderRegistry {
    factories: Vec<(String, SenderFactory)>,
}

impl SenderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every shipped channel type, stubs included.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("wechat", |client, url| Box::new(WechatSender::new(client, url)));
        registry.register(CUSTOM_CHANNEL, |client, url| {
            Box::new(WebhookSender::new(client, url))
        });
        registry.register("dingtalk", |_, _| Box::new(UnsupportedSender::new("dingtalk")));
        registry.register("email", |_, _| Box::new(UnsupportedSender::new("email")));
        registry.register("qq", |_, _| Box::new(UnsupportedSender::new("qq")));
        registry
    }

    /// Register or replace a channel type.
    pub fn register(&mut self, channel: impl Into<String>, factory: SenderFactory) {
        let channel = channel.into();
        match self.factories.iter_mut().find(|(c, _)| *c == channel) {
            Some((_, existing)) => *existing = factory,
            None => self.factories.push((channel, factory)),
        }
    }

    /// Build a sender for `channel`, or `None` if the type is unknown.
    pub fn create(&self, channel: &str, client: Client, url: &str) -> Option<Box<dyn Sender>> {
        self.factories
            .iter()
            .find(|(c, _)| c == channel)
            .map(|(_, factory)| factory(client, url))
    }

    pub fn channels(&self) -> Vec<&str> {
        self.factories.iter().map(|(c, _)| c.as_str()).collect()
    }
}
