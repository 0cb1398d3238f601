//! Post-collection processing and pipeline entry points.
//!
//! - `format_item` / `format_batch`: Render items as markdown, text or plain
//! - `ProcessorChain`: Ordered transform stages between collection and push
//! - `run_pipeline`: Collect, process and push in one run

pub mod format;
pub mod processor;
pub mod run;

pub use format::{FormatKind, format_batch, format_item};
pub use processor::{Processor, ProcessorChain, ProcessorFactory, ProcessorRegistry};
pub use run::{RunReport, parse_push_input, run_pipeline};
