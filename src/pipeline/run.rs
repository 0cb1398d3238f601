// src/pipeline/run.rs

//! End-to-end run: collect, transform, push.

use serde::Deserialize;

use crate::error::Result;
use crate::models::{CollectionResult, Item, ItemsBySource, PushResult};
use crate::pipeline::processor::ProcessorChain;
use crate::services::{Collector, Dispatcher};

/// What a full run produced.
#[derive(Debug)]
pub struct RunReport {
    pub collection: CollectionResult,
    /// `None` when nothing was left to push
    pub push: Option<PushResult>,
}

/// Collect from `sources`, run the processor chain and push to `targets`.
///
/// Collection problems are reported in the collection result. Processor
/// failures and an empty target set abort the run.
pub async fn run_pipeline(
    collector: &Collector,
    chain: &ProcessorChain,
    dispatcher: &Dispatcher,
    sources: &[String],
    targets: &[String],
) -> Result<RunReport> {
    let collection = collector.collect(sources, None).await;
    let items = chain
        .run_with_raw_output(collection.items_by_source.all_items())
        .await?;

    if items.is_empty() {
        log::warn!("Nothing to push after processing; skipping dispatch");
        return Ok(RunReport {
            collection,
            push: None,
        });
    }

    for item in &items {
        log::debug!("{}", chain.format().render(item));
    }

    let push = dispatcher.push(&items, targets).await?;
    Ok(RunReport {
        collection,
        push: Some(push),
    })
}

/// Records to push, as a bare list or a saved collection result.
#[derive(Deserialize)]
#[serde(untagged)]
enum PushInput {
    Items(Vec<Item>),
    Collection { items_by_source: ItemsBySource },
}

/// Parse push input: a JSON list of records or a collection result.
pub fn parse_push_input(json: &str) -> Result<Vec<Item>> {
    let items = match serde_json::from_str::<PushInput>(json)? {
        PushInput::Items(items) => items,
        PushInput::Collection { items_by_source } => items_by_source.all_items(),
    };
    Ok(items)
}
