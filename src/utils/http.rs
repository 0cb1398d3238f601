// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};

use crate::error::{AppError, Result};
use crate::models::{FetchConfig, PushConfig};

/// Create the client used to retrieve source documents.
///
/// Carries a browser-like header set; several sources refuse other agents.
pub fn create_fetch_client(config: &FetchConfig) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, header_value("fetch.accept", &config.accept)?);
    headers.insert(
        ACCEPT_LANGUAGE,
        header_value("fetch.accept_language", &config.accept_language)?,
    );

    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Create the client used to post to push channels.
pub fn create_push_client(config: &PushConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

fn header_value(field: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| AppError::config(format!("{field} is not a valid header value: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clients_build_from_defaults() {
        assert!(create_fetch_client(&FetchConfig::default()).is_ok());
        assert!(create_push_client(&PushConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_header_rejected() {
        let config = FetchConfig {
            accept_language: "zh\nCN".to_string(),
            ..FetchConfig::default()
        };
        assert!(matches!(
            create_fetch_client(&config),
            Err(AppError::Config(_))
        ));
    }
}
