//! Service layer for the collection and push pipeline.
//!
//! This module contains the core logic for:
//! - Document retrieval with a concurrency bound (`Fetcher`)
//! - Per-source item extraction (`Extractor`, `ExtractorRegistry`)
//! - Collection across sources (`Collector`)
//! - Per-channel delivery (`Sender`, `SenderRegistry`)
//! - Dispatch across targets (`Dispatcher`)

pub mod collector;
pub mod dispatcher;
pub mod extractors;
pub mod fetcher;
pub mod senders;

pub use collector::Collector;
pub use dispatcher::Dispatcher;
pub use extractors::{Extractor, ExtractorRegistry};
pub use fetcher::Fetcher;
pub use senders::{Sender, SenderRegistry};
