// src/services/fetcher.rs

//! Document retrieval with a bounded number of requests in flight.

use std::future::Future;

use futures::stream::{self, StreamExt};
use reqwest::Client;

use crate::error::{FetchError, Result};
use crate::models::{Document, FetchConfig};
use crate::utils::http::create_fetch_client;

/// Retrieves source documents over a shared HTTP client.
///
/// The client carries the configured timeout and browser headers. It is
/// cheap to clone and its connection pool is released when the last clone
/// drops.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    default_concurrency: usize,
}

impl Fetcher {
    /// Build a fetcher from configuration.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = create_fetch_client(config)?;
        Ok(Self::with_client(client, config.max_concurrency))
    }

    pub fn with_client(client: Client, default_concurrency: usize) -> Self {
        Self {
            client,
            default_concurrency: default_concurrency.max(1),
        }
    }

    pub fn default_concurrency(&self) -> usize {
        self.default_concurrency
    }

    /// Fetch one document. Non-2xx statuses are errors.
    pub async fn fetch(&self, url: &str) -> std::result::Result<Document, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| FetchError::from_reqwest(url, &e))?;

        let final_url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, &e))?;

        log::debug!("Fetched {} ({} bytes)", final_url, body.len());
        Ok(Document::new(final_url, body))
    }

    /// Fetch many documents, at most `limit` at a time.
    ///
    /// `None` uses the configured default. Result slots follow input order and
    /// each slot succeeds or fails on its own.
    pub async fn fetch_many(
        &self,
        urls: &[String],
        limit: Option<usize>,
    ) -> Vec<std::result::Result<Document, FetchError>> {
        let limit = limit.unwrap_or(self.default_concurrency);
        fetch_bounded(urls, limit, |url| self.fetch(url)).await
    }
}

/// Run `fetch` over `urls` with at most `limit` futures in flight.
///
/// Output order matches input order regardless of completion order.
pub async fn fetch_bounded<'a, T, F, Fut>(urls: &'a [String], limit: usize, fetch: F) -> Vec<T>
where
    F: Fn(&'a str) -> Fut,
    Fut: Future<Output = T>,
{
    stream::iter(urls.iter().map(String::as_str))
        .map(fetch)
        .buffered(limit.max(1))
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    fn fetcher() -> Fetcher {
        Fetcher::new(&FetchConfig {
            timeout_secs: 5,
            ..FetchConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_bounded_never_exceeds_limit() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let urls: Vec<String> = (0..20).map(|i| format!("https://example.com/{i}")).collect();
        let limit = 3;

        let results = fetch_bounded(&urls, limit, |url| {
            let in_flight = Arc::clone(&in_flight);
            let peak = Arc::clone(&peak);
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                assert!(now <= limit, "in flight {now} exceeds limit {limit}");
                peak.fetch_max(now, Ordering::SeqCst);
                // Later URLs finish first to shuffle completion order.
                let index: u64 = url.rsplit('/').next().unwrap().parse().unwrap();
                tokio::time::sleep(Duration::from_millis(20 - index)).await;
                assert!(in_flight.load(Ordering::SeqCst) <= limit);
                in_flight.fetch_sub(1, Ordering::SeqCst);
                url.to_string()
            }
        })
        .await;

        assert_eq!(results, urls);
        assert_eq!(peak.load(Ordering::SeqCst), limit);
    }

    #[tokio::test]
    async fn test_fetch_bounded_zero_limit_still_progresses() {
        let urls = vec!["a".to_string(), "b".to_string()];
        let results = fetch_bounded(&urls, 0, |url| async move { url.len() }).await;
        assert_eq!(results, vec![1, 1]);
    }

    #[tokio::test]
    async fn test_fetch_success_sends_browser_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/news")
            .match_header("user-agent", mockito::Matcher::Regex("Mozilla/5.0".into()))
            .match_header("accept-language", "zh-CN,zh;q=0.9,en;q=0.8")
            .with_status(200)
            .with_body("<html><body>ok</body></html>")
            .create_async()
            .await;

        let url = format!("{}/news", server.url());
        let document = fetcher().fetch(&url).await.unwrap();

        assert_eq!(document.url, url);
        assert!(document.body.contains("ok"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_non_2xx_is_status_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let url = format!("{}/missing", server.url());
        let err = fetcher().fetch(&url).await.unwrap_err();
        assert_eq!(err, FetchError::Status { url, status: 404 });
    }

    #[tokio::test]
    async fn test_fetch_stalled_body_is_timeout() {
        let mut server = mockito::Server::new_async().await;
        let _slow = server
            .mock("GET", "/slow")
            .with_chunked_body(|w| {
                std::thread::sleep(Duration::from_secs(2));
                w.write_all(b"late")
            })
            .create_async()
            .await;

        let fetcher = Fetcher::new(&FetchConfig {
            timeout_secs: 1,
            ..FetchConfig::default()
        })
        .unwrap();
        let url = format!("{}/slow", server.url());
        let err = fetcher.fetch(&url).await.unwrap_err();

        assert_eq!(err, FetchError::Timeout { url });
    }

    #[tokio::test]
    async fn test_fetch_connection_failure() {
        let err = fetcher().fetch("http://127.0.0.1:1/").await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Connect { .. } | FetchError::Request { .. }
        ));
    }

    #[tokio::test]
    async fn test_fetch_many_isolates_failures() {
        let mut server = mockito::Server::new_async().await;
        let _ok = server
            .mock("GET", "/a")
            .with_body("a")
            .create_async()
            .await;
        let _bad = server
            .mock("GET", "/b")
            .with_status(500)
            .create_async()
            .await;
        let _ok2 = server
            .mock("GET", "/c")
            .with_body("c")
            .create_async()
            .await;

        let urls: Vec<String> = ["/a", "/b", "/c"]
            .iter()
            .map(|p| format!("{}{}", server.url(), p))
            .collect();
        let results = fetcher().fetch_many(&urls, Some(2)).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().body, "a");
        assert!(matches!(
            results[1],
            Err(FetchError::Status { status: 500, .. })
        ));
        assert_eq!(results[2].as_ref().unwrap().body, "c");
    }
}
