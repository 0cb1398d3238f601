// src/services/senders/wechat.rs

//! WeChat Work group robot.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;

use super::Sender;
use crate::error::SendError;
use crate::models::Item;

const WEBHOOK_HOST: &str = "qyapi.weixin.qq.com";

/// Robot reply; `errcode` 0 means the message was accepted.
#[derive(Debug, Deserialize)]
struct WechatReply {
    errcode: i64,
    #[serde(default)]
    errmsg: String,
}

pub struct WechatSender {
    client: Client,
    webhook_url: String,
}

impl WechatSender {
    pub fn new(client: Client, webhook_url: &str) -> Self {
        Self {
            client,
            webhook_url: webhook_url.to_string(),
        }
    }

    /// Markdown message body for one record.
    pub fn payload(item: &Item) -> Value {
        let content = format!(
            "# {}\n> 来源：{}\n---\n[点击查看详情]({})",
            item.title,
            item.source_name(),
            item.url
        );
        json!({
            "msgtype": "markdown",
            "markdown": { "content": content },
        })
    }
}

#[async_trait]
impl Sender for WechatSender {
    fn channel(&self) -> &str {
        "wechat"
    }

    async fn send(&self, item: &Item) -> Result<bool, SendError> {
        let reply: WechatReply = self
            .client
            .post(&self.webhook_url)
            .json(&Self::payload(item))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if reply.errcode != 0 {
            log::warn!(
                "WeChat rejected {}: errcode {} ({})",
                item.url,
                reply.errcode,
                reply.errmsg
            );
            return Ok(false);
        }
        Ok(true)
    }

    fn validate_config(&self) -> bool {
        Url::parse(&self.webhook_url)
            .map(|url| url.scheme() == "https" && url.host_str() == Some(WEBHOOK_HOST))
            .unwrap_or(false)
    }
}
