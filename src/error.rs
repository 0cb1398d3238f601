// src/error.rs

//! Unified error handling for the collection and push pipeline.
//!
//! `AppError` covers faults that abort an operation. `FetchError` and
//! `SendError` are per-source and per-record values: they are recorded in
//! results and never abort a batch.

use std::fmt;

use thiserror::Error;

/// Result type alias for newsflow operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client could not be built or a request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error (unknown source, target, channel or extractor)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unrecognized format kind
    #[error("Unknown format type: {0}")]
    Format(String),

    /// Push request resolved to an empty target set
    #[error("No available targets")]
    NoTargets,

    /// A single fetch failed where a document was required
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// A processor stage failed
    #[error("Processor '{stage}' failed: {message}")]
    Processor { stage: String, message: String },
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an unknown-format error.
    pub fn format(kind: impl Into<String>) -> Self {
        Self::Format(kind.into())
    }

    /// Create a processor stage error.
    pub fn processor(stage: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Processor {
            stage: stage.into(),
            message: message.to_string(),
        }
    }
}

/// Failure of a single document retrieval.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request did not complete within the client timeout
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// The connection could not be established
    #[error("connection to {url} failed: {message}")]
    Connect { url: String, message: String },

    /// The server answered with a non-2xx status
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Any other transport or body decoding failure
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
}

impl FetchError {
    /// Classify a reqwest error for the given URL.
    pub fn from_reqwest(url: &str, error: &reqwest::Error) -> Self {
        let url = url.to_string();
        if error.is_timeout() {
            Self::Timeout { url }
        } else if error.is_connect() {
            Self::Connect {
                url,
                message: error.to_string(),
            }
        } else if let Some(status) = error.status() {
            Self::Status {
                url,
                status: status.as_u16(),
            }
        } else {
            Self::Request {
                url,
                message: error.to_string(),
            }
        }
    }
}

/// Failure to deliver one record to a channel.
#[derive(Error, Debug)]
pub enum SendError {
    /// Transport failure while posting to the channel
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The channel type is registered but has no implementation yet
    #[error("channel '{0}' is not yet supported")]
    Unsupported(String),
}
