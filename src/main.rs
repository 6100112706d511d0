use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dxsource::aws::client::{AwsJsonClient, DescribeClient};
use dxsource::aws::http::format_transport_error;
use dxsource::aws::limit::{LimitBucket, LimitConfig};
use dxsource::aws::scope::format_scope;
use dxsource::config::Config;
use dxsource::directconnect;
use dxsource::source::{get_all_item_types, get_metadata, Item, Source, SourceError};
use futures::future::try_join_all;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Map AWS Direct Connect resources into blast-radius graph items
#[derive(Parser, Debug)]
#[command(name = "dxsource", version = dxsource::VERSION, about, long_about = None)]
struct Args {
    /// AWS account the items are scoped to
    #[arg(short, long)]
    account: Option<String>,

    /// AWS region to describe
    #[arg(short, long)]
    region: Option<String>,

    /// Describe endpoint (signing proxy, LocalStack, ...)
    #[arg(long)]
    endpoint: Option<String>,

    /// Maximum concurrent describe calls
    #[arg(long)]
    max_in_flight: Option<usize>,

    /// Maximum describe calls per second
    #[arg(long)]
    rps: Option<u32>,

    /// Give up after this many seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    output: OutputFormat,

    /// Remember --account and --region for next time
    #[arg(long)]
    save: bool,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every supported item type
    Types,
    /// Get one item by its unique attribute
    Get { item_type: String, query: String },
    /// List items of one type, or of every type
    List { item_type: Option<String> },
    /// Search items of a type by ARN
    Search { item_type: String, query: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("dxsource started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("dxsource").join("dxsource.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".dxsource").join("dxsource.log");
    }
    PathBuf::from("dxsource.log")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    if let Command::Types = args.command {
        print_types();
        return Ok(());
    }

    let mut config = Config::load();

    let account = args
        .account
        .clone()
        .or_else(|| config.effective_account())
        .context("No AWS account configured. Set AWS_ACCOUNT_ID or use --account")?;
    let region = args
        .region
        .clone()
        .unwrap_or_else(|| config.effective_region());

    if args.save {
        config
            .set_scope(&account, &region)
            .context("Failed to save configuration")?;
    }

    let endpoint = args
        .endpoint
        .clone()
        .unwrap_or_else(|| config.effective_endpoint(&region));
    let defaults = config.limit_config();
    let limits = LimitConfig {
        max_in_flight: args.max_in_flight.unwrap_or(defaults.max_in_flight),
        requests_per_second: args.rps.or(defaults.requests_per_second),
    };

    tracing::info!(
        "Using account: {}, region: {}, endpoint: {}, limits: {:?}",
        account,
        region,
        endpoint,
        limits
    );

    let client: Arc<dyn DescribeClient> = Arc::new(
        AwsJsonClient::new(&endpoint).with_context(|| format!("Bad endpoint {}", endpoint))?,
    );
    let limit = Arc::new(LimitBucket::new(limits));
    let sources = directconnect::sources(client, &account, &region, limit);
    let scope = format_scope(&account, &region);

    let cancel = CancellationToken::new();
    spawn_cancellation(cancel.clone(), args.timeout);

    let items = run(&args.command, &sources, &cancel, &scope)
        .await
        .map_err(with_hint)?;

    print_items(&items, args.output)
}

/// Cancel on Ctrl-C, or once the timeout elapses
fn spawn_cancellation(cancel: CancellationToken, timeout: Option<u64>) {
    tokio::spawn(async move {
        let deadline = async {
            match timeout {
                Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => tracing::warn!("Interrupted, cancelling"),
            _ = deadline => tracing::warn!("Timed out, cancelling"),
            _ = cancel.cancelled() => return,
        }
        cancel.cancel();
    });
}

async fn run(
    command: &Command,
    sources: &[Arc<dyn Source>],
    cancel: &CancellationToken,
    scope: &str,
) -> Result<Vec<Item>, RunError> {
    match command {
        Command::Types => Ok(Vec::new()),
        Command::Get { item_type, query } => {
            let source = find_source(sources, item_type)?;
            Ok(vec![source.get(cancel, scope, query).await?])
        }
        Command::List {
            item_type: Some(item_type),
        } => Ok(find_source(sources, item_type)?.list(cancel, scope).await?),
        Command::List { item_type: None } => {
            let pages = try_join_all(sources.iter().map(|s| s.list(cancel, scope))).await?;
            Ok(pages.into_iter().flatten().collect())
        }
        Command::Search { item_type, query } => {
            let source = find_source(sources, item_type)?;
            Ok(source.search(cancel, scope, query).await?)
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error("Unknown type: {0} (see `dxsource types`)")]
    UnknownType(String),

    #[error(transparent)]
    Source(#[from] SourceError),
}

fn find_source<'a>(sources: &'a [Arc<dyn Source>], item_type: &str) -> Result<&'a dyn Source, RunError> {
    sources
        .iter()
        .find(|s| s.item_type() == item_type)
        .map(|s| &**s)
        .ok_or_else(|| RunError::UnknownType(item_type.to_string()))
}

/// Attach the user-facing transport hint to upstream failures
fn with_hint(err: RunError) -> anyhow::Error {
    let hint = match &err {
        RunError::Source(SourceError::Upstream { source, .. }) => Some(format_transport_error(source)),
        _ => None,
    };

    let err = anyhow::Error::new(err);
    match hint {
        Some(hint) => err.context(hint),
        None => err,
    }
}

fn print_items(items: &[Item], format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(items)?,
        OutputFormat::Yaml => serde_yaml::to_string(items)?,
    };
    println!("{}", rendered);
    Ok(())
}

fn print_types() {
    for item_type in get_all_item_types() {
        let Some(metadata) = get_metadata(item_type) else {
            continue;
        };

        let methods: Vec<&str> = metadata
            .supported_methods()
            .iter()
            .map(|m| m.as_str())
            .collect();
        let terraform: Vec<String> = metadata
            .terraform_query_map
            .iter()
            .map(|m| m.path())
            .collect();

        println!(
            "{:<36} {:<24} {:<18} {}",
            item_type,
            metadata.descriptive_name,
            methods.join(","),
            terraform.join(",")
        );
    }
}
