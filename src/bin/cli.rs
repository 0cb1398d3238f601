// src/bin/cli.rs

//! NewsFlow CLI
//!
//! Runs a collection or push from the command line, or serves one of the
//! two request surfaces.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
#[cfg(feature = "server")]
use clap::ValueEnum;

use newsflow::config::load_all;
use newsflow::error::{AppError, Result};
use newsflow::models::{Config, Item, SourceRegistry, TargetRegistry};
use newsflow::pipeline::{
    FormatKind, ProcessorChain, ProcessorRegistry, format_batch, parse_push_input, run_pipeline,
};
use newsflow::services::{Collector, Dispatcher, Fetcher, SenderRegistry};

#[derive(Parser, Debug)]
#[command(
    name = "newsflow",
    version,
    about = "Collect news items and push them to chat webhooks"
)]

/// CLI Arguments
struct Cli {
    /// Configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "NEWSFLOW_CONFIG",
        default_value = "data/config.toml"
    )]
    config: PathBuf,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Process role for `serve`
#[cfg(feature = "server")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Role {
    Collector,
    Pusher,
}

/// CLI Commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the collector or pusher request surface
    #[cfg(feature = "server")]
    Serve {
        #[arg(long, value_enum)]
        role: Option<Role>,
    },
    /// Collect items once and print them
    Collect {
        /// Source names (default: all)
        #[arg(long, value_delimiter = ',')]
        sources: Vec<String>,
        #[arg(long)]
        concurrency: Option<usize>,
        /// Output format: markdown, text or plain
        #[arg(long)]
        format: Option<String>,
        /// Print the raw collection result as JSON
        #[arg(long)]
        raw: bool,
    },
    /// Push items from a JSON file
    Push {
        /// Target names (default: all enabled)
        #[arg(long, value_delimiter = ',')]
        targets: Vec<String>,
        /// Push to this webhook instead of configured targets
        #[arg(long)]
        webhook: Option<String>,
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Collect, process and push in one go
    Run {
        #[arg(long, value_delimiter = ',')]
        sources: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        targets: Vec<String>,
    },
    /// List configured sources
    Sources,
    /// List configured targets
    Targets,
    /// Validate configuration
    Validate,
}

/// Main entry point
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "json-logs"))]
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

#[cfg(feature = "json-logs")]
fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json())
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let (config, sources, targets) = load_all(&cli.config)?;
    let sources = Arc::new(sources);
    let targets = Arc::new(targets);

    match cli.command {
        #[cfg(feature = "server")]
        Command::Serve { role } => serve(&config, sources, targets, role).await?,
        Command::Collect {
            sources: requested,
            concurrency,
            format,
            raw,
        } => {
            let collector = collector(&config, sources)?;
            let result = collector
                .collect(&requested, concurrency.filter(|&n| n > 0))
                .await;
            if raw {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                let kind = format.as_deref().unwrap_or(&config.pipeline.format);
                let items = result.items_by_source.all_items();
                for line in format_batch(&items, kind)? {
                    println!("{line}\n");
                }
                for error in &result.errors {
                    log::warn!("{}", error);
                }
            }
        }
        Command::Push {
            targets: requested,
            webhook,
            input,
        } => {
            let items = read_items(&input).await?;
            let dispatcher = dispatcher(&config, targets)?;
            let result = match webhook {
                Some(url) => dispatcher.push_to_url(&items, &url).await?,
                None => dispatcher.push(&items, &requested).await?,
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Run {
            sources: requested_sources,
            targets: requested_targets,
        } => {
            let collector = collector(&config, sources)?;
            let dispatcher = dispatcher(&config, targets)?;
            let chain = processor_chain(&config)?;

            let report = run_pipeline(
                &collector,
                &chain,
                &dispatcher,
                &requested_sources,
                &requested_targets,
            )
            .await?;

            println!("{}", serde_json::to_string_pretty(&report.collection)?);
            match report.push {
                Some(push) => println!("{}", serde_json::to_string_pretty(&push)?),
                None => log::warn!("Nothing was pushed"),
            }
        }
        Command::Sources => print_sources(&sources),
        Command::Targets => print_targets(&targets),
        Command::Validate => validate(&config, &targets)?,
    }

    Ok(())
}

fn collector(config: &Config, sources: Arc<SourceRegistry>) -> Result<Collector> {
    Ok(Collector::new(sources, Fetcher::new(&config.fetch)?))
}

fn dispatcher(config: &Config, targets: Arc<TargetRegistry>) -> Result<Dispatcher> {
    Dispatcher::new(targets, SenderRegistry::builtin(), &config.push)
}

/// Build the processor chain named in `[pipeline]`.
fn processor_chain(config: &Config) -> Result<ProcessorChain> {
    let format: FormatKind = config.pipeline.format.parse()?;
    ProcessorRegistry::new().build_chain(&config.pipeline.processors, format)
}

async fn read_items(path: &Path) -> Result<Vec<Item>> {
    let content = tokio::fs::read_to_string(path).await?;
    let items = parse_push_input(&content)?;
    if items.is_empty() {
        return Err(AppError::validation(format!("No items in {}", path.display())));
    }
    Ok(items)
}

#[cfg(feature = "server")]
async fn serve(
    config: &Config,
    sources: Arc<SourceRegistry>,
    targets: Arc<TargetRegistry>,
    role: Option<Role>,
) -> Result<()> {
    use newsflow::server;

    let role = match role {
        Some(role) => role,
        None => Role::from_str(&config.server.default_role, true).map_err(|_| {
            AppError::config(format!(
                "Unknown server role: {}",
                config.server.default_role
            ))
        })?,
    };

    match role {
        Role::Collector => {
            let router = server::collect::router(Arc::new(collector(config, sources)?));
            log::info!("Starting collector");
            server::serve(router, &config.server.collector_host, config.server.collector_port).await
        }
        Role::Pusher => {
            let router = server::push::router(Arc::new(dispatcher(config, targets)?));
            log::info!("Starting pusher");
            server::serve(router, &config.server.pusher_host, config.server.pusher_port).await
        }
    }
}

fn print_sources(sources: &SourceRegistry) {
    for source in sources.iter() {
        println!("{:<12} {:<10} {}", source.name, source.extractor_kind, source.home_url);
    }
}

fn print_targets(targets: &TargetRegistry) {
    for info in targets.infos() {
        let state = if info.enabled { "enabled" } else { "disabled" };
        println!("{:<16} {:<10} {}", info.name, info.channel_type, state);
    }
}

/// Check the processor chain and report targets whose webhook does not
/// suit their channel.
fn validate(config: &Config, targets: &TargetRegistry) -> Result<()> {
    let chain = processor_chain(config)?;
    if !chain.validate_config() {
        return Err(AppError::validation("a processor stage rejected its configuration"));
    }

    let senders = SenderRegistry::builtin();
    let client = reqwest::Client::new();

    for target in targets.iter() {
        let Some(url) = target.webhook_url.as_deref().filter(|_| target.is_enabled()) else {
            log::info!("{}: disabled (no webhook)", target.name);
            continue;
        };
        match senders.create(&target.channel_type, client.clone(), url) {
            Some(sender) if sender.validate_config() => log::info!("{}: ok", target.name),
            Some(_) => log::warn!(
                "{}: webhook not valid for channel {}",
                target.name,
                target.channel_type
            ),
            None => log::warn!("{}: unknown channel {}", target.name, target.channel_type),
        }
    }
    log::info!("Configuration is valid");
    Ok(())
}
