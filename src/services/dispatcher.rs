// src/services/dispatcher.rs

//! Push dispatch across configured targets.
//!
//! Targets are handled one after another. A missing target, a target
//! without a webhook or an unknown channel type counts the whole batch as
//! failed for that target only.

use std::sync::Arc;

use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::{BatchOutcome, Item, PushConfig, PushResult, TargetScope, TargetRegistry};
use crate::services::senders::{CUSTOM_CHANNEL, SenderRegistry};
use crate::utils::http::create_push_client;

/// Requesting this name selects every enabled target.
pub const ALL_TARGETS: &str = "all";

/// Delivers record batches to named targets through channel senders.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    targets: Arc<TargetRegistry>,
    senders: SenderRegistry,
    client: Client,
}

impl Dispatcher {
    /// Build a dispatcher with its own push client.
    pub fn new(targets: Arc<TargetRegistry>, senders: SenderRegistry, config: &PushConfig) -> Result<Self> {
        let client = create_push_client(config)?;
        Ok(Self::with_client(targets, senders, client))
    }

    pub fn with_client(targets: Arc<TargetRegistry>, senders: SenderRegistry, client: Client) -> Self {
        Self {
            targets,
            senders,
            client,
        }
    }

    pub fn targets(&self) -> &TargetRegistry {
        &self.targets
    }

    pub fn senders(&self) -> &SenderRegistry {
        &self.senders
    }

    /// Resolve requested names to the effective target set.
    ///
    /// Empty input or the `all` sentinel selects every enabled target;
    /// otherwise the names are used as given.
    pub fn effective_targets(&self, requested: &[String]) -> (TargetScope, Vec<String>) {
        if requested.is_empty() || requested.iter().any(|name| name == ALL_TARGETS) {
            (TargetScope::All, self.targets.enabled_names())
        } else {
            (TargetScope::Batch, requested.to_vec())
        }
    }

    /// Push `items` to every requested target.
    ///
    /// Fails with [`AppError::NoTargets`] when the effective set is empty.
    /// Otherwise each record is counted once per target, as either a success
    /// or a failure.
    pub async fn push(&self, items: &[Item], requested: &[String]) -> Result<PushResult> {
        let (scope, names) = self.effective_targets(requested);
        if names.is_empty() {
            return Err(AppError::NoTargets);
        }
        log::info!("Pushing {} items to {} targets", items.len(), names.len());

        let mut outcomes = Vec::with_capacity(names.len());
        for name in &names {
            outcomes.push(self.push_target(name, items).await);
        }

        let result = PushResult::from_outcomes(scope, &outcomes);
        log::info!(
            "Push finished: {} succeeded, {} failed",
            result.success_count,
            result.failed_count
        );
        Ok(result)
    }

    /// Push `items` to an explicit webhook through the `custom` channel.
    pub async fn push_to_url(&self, items: &[Item], webhook_url: &str) -> Result<PushResult> {
        let webhook_url = webhook_url.trim();
        if webhook_url.is_empty() {
            return Err(AppError::NoTargets);
        }

        let outcome = self.send_via(CUSTOM_CHANNEL, webhook_url, items).await;
        Ok(PushResult::from_outcomes(TargetScope::Custom, &[outcome]))
    }

    async fn push_target(&self, name: &str, items: &[Item]) -> BatchOutcome {
        let Some(target) = self.targets.get(name) else {
            log::warn!("Target config not found: {}", name);
            return BatchOutcome::all_failed(items.len());
        };

        let webhook_url = match target.webhook_url.as_deref() {
            Some(url) if target.is_enabled() => url.trim(),
            _ => {
                log::warn!("Target {} has no webhook configured", name);
                return BatchOutcome::all_failed(items.len());
            }
        };

        let outcome = self.send_via(&target.channel_type, webhook_url, items).await;
        log::info!(
            "Target {} ({}): {} succeeded, {} failed",
            name,
            target.channel_type,
            outcome.success,
            outcome.failed
        );
        outcome
    }

    async fn send_via(&self, channel: &str, webhook_url: &str, items: &[Item]) -> BatchOutcome {
        match self.senders.create(channel, self.client.clone(), webhook_url) {
            Some(sender) => sender.send_batch(items).await,
            None => {
                log::warn!("Unknown channel type: {}", channel);
                BatchOutcome::all_failed(items.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PushStatus, TargetDescriptor};

    fn target(name: &str, channel: &str, url: Option<String>) -> TargetDescriptor {
        TargetDescriptor {
            name: name.to_string(),
            channel_type: channel.to_string(),
            webhook_url: url,
        }
    }

    fn dispatcher(targets: Vec<TargetDescriptor>) -> Dispatcher {
        Dispatcher::new(
            Arc::new(TargetRegistry::new(targets)),
            SenderRegistry::builtin(),
            &PushConfig::default(),
        )
        .unwrap()
    }

    fn items(count: usize) -> Vec<Item> {
        (0..count)
            .map(|i| Item::new(format!("Item {i}"), format!("https://news.example.com/{i}"), "sina"))
            .collect()
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    async fn wechat_mock(server: &mut mockito::Server, path: &str, errcode: i32) -> mockito::Mock {
        server
            .mock("POST", path)
            .with_body(format!(r#"{{"errcode":{errcode},"errmsg":"x"}}"#))
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_push_all_accepted() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/wechat")
            .match_header("user-agent", "NewsFlow-Pusher/1.0")
            .with_body(r#"{"errcode":0,"errmsg":"ok"}"#)
            .expect(5)
            .create_async()
            .await;

        let dispatcher = dispatcher(vec![target(
            "wechat_main",
            "wechat",
            Some(format!("{}/wechat", server.url())),
        )]);
        let result = dispatcher.push(&items(5), &names(&["wechat_main"])).await.unwrap();

        assert_eq!(result.success_count, 5);
        assert_eq!(result.failed_count, 0);
        assert_eq!(result.status, PushStatus::Success);
        assert_eq!(result.target_type, TargetScope::Batch);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_push_conserves_record_count() {
        let mut server = mockito::Server::new_async().await;
        let _ok = wechat_mock(&mut server, "/ok", 0).await;
        let _bad = wechat_mock(&mut server, "/bad", 93000).await;

        let dispatcher = dispatcher(vec![
            target("ok", "wechat", Some(format!("{}/ok", server.url()))),
            target("bad", "wechat", Some(format!("{}/bad", server.url()))),
            target("ding", "dingtalk", Some("https://oapi.dingtalk.com/robot".to_string())),
            target("odd", "telegram", Some("https://t.example.com".to_string())),
            target("off", "wechat", None),
        ]);
        let records = items(3);
        let requested = names(&["ok", "bad", "ding", "odd", "off", "ghost"]);
        let result = dispatcher.push(&records, &requested).await.unwrap();

        assert_eq!(result.success_count + result.failed_count, records.len() * requested.len());
        assert_eq!(result.success_count, 3);
        assert_eq!(result.failed_count, 15);
        assert_eq!(result.status, PushStatus::Success);
    }

    #[tokio::test]
    async fn test_all_expands_to_enabled_targets() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/wechat")
            .with_body(r#"{"errcode":0}"#)
            .expect(2)
            .create_async()
            .await;

        let dispatcher = dispatcher(vec![
            target("main", "wechat", Some(format!("{}/wechat", server.url()))),
            target("ding", "dingtalk", None),
        ]);
        assert_eq!(
            dispatcher.effective_targets(&[]),
            (TargetScope::All, names(&["main"]))
        );

        let result = dispatcher.push(&items(2), &names(&["all"])).await.unwrap();
        assert_eq!(result.target_type, TargetScope::All);
        assert_eq!(result.success_count, 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_no_enabled_targets_is_fatal() {
        let dispatcher = dispatcher(vec![target("ding", "dingtalk", None)]);
        let err = dispatcher.push(&items(1), &[]).await.unwrap_err();
        assert!(matches!(err, AppError::NoTargets));
    }

    #[tokio::test]
    async fn test_stub_channel_fails_whole_batch() {
        let dispatcher = dispatcher(vec![target(
            "qq_group",
            "qq",
            Some("https://qq.example.com/hook".to_string()),
        )]);
        let result = dispatcher.push(&items(4), &names(&["qq_group"])).await.unwrap();

        assert_eq!(result.success_count, 0);
        assert_eq!(result.failed_count, 4);
        assert_eq!(result.status, PushStatus::Failed);
    }

    #[tokio::test]
    async fn test_push_to_url_uses_custom_channel() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/hook")
            .with_status(200)
            .expect(3)
            .create_async()
            .await;

        let dispatcher = dispatcher(vec![]);
        let result = dispatcher
            .push_to_url(&items(3), &format!("{}/hook", server.url()))
            .await
            .unwrap();

        assert_eq!(result.target_type, TargetScope::Custom);
        assert_eq!(result.success_count, 3);
        mock.assert_async().await;

        assert!(matches!(
            dispatcher.push_to_url(&items(1), " ").await,
            Err(AppError::NoTargets)
        ));
    }
}
