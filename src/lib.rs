// src/lib.rs

//! NewsFlow: news collection and push pipeline library

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
#[cfg(feature = "server")]
pub mod server;
pub mod services;
pub mod utils;
