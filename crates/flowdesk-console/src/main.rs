/*
[INPUT]:  CLI arguments, YAML configuration file, OS shutdown signals
[OUTPUT]: Running task console with graceful shutdown
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

use std::path::PathBuf;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use flowdesk_adapter::{ClientConfig, FlowdeskClient, TaskQuery};
use flowdesk_console::config::{ConsoleConfig, DashboardConfig, ServerConfig};
use flowdesk_console::refresh::Refresher;
use flowdesk_console::tui::{LOG_BUFFER_CAPACITY, LogBuffer, LogWriterFactory, run_console};

#[derive(Parser, Debug)]
#[command(name = "flowdesk-console", version, about = "Operator console for workflow engine tasks")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    /// Engine base URL; overrides the config file
    #[arg(long = "server", value_name = "URL")]
    server: Option<String>,
    /// Bearer token; overrides the config file
    #[arg(long = "token", value_name = "TOKEN")]
    token: Option<String>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    /// Validate configuration and exit
    #[arg(long = "dry-run")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let log_buffer = Arc::new(StdMutex::new(LogBuffer::new(LOG_BUFFER_CAPACITY)));
    init_tracing(&args.log_level, LogWriterFactory::new(log_buffer.clone()))?;

    let config = load_config(&args)?;
    info!(base_url = %config.server.base_url, "configuration loaded");

    if args.dry_run {
        info!("dry-run requested; configuration validated");
        return Ok(());
    }

    let client = build_client(&config.server)?;
    let client = Arc::new(client);

    let query = TaskQuery {
        page: 1,
        page_size: config.dashboard.page_size,
        status: None,
    };
    let (query_tx, query_rx) = watch::channel(query);
    let (event_tx, event_rx) = mpsc::channel(16);

    let refresher = Refresher::new(client.clone(), query_rx, event_tx);
    let shutdown = CancellationToken::new();
    setup_signal_handler(shutdown.clone());

    let poll_interval = Duration::from_secs(config.dashboard.poll_interval_secs.max(1));
    let poller = refresher.spawn_poller(poll_interval, shutdown.clone());
    info!(interval_secs = poll_interval.as_secs(), "dashboard poller started");

    let result = run_console(
        client,
        refresher,
        query_tx,
        event_rx,
        shutdown.clone(),
        log_buffer,
    )
    .await;

    shutdown.cancel();
    poller.await.context("join dashboard poller")?;
    info!("console shutdown complete");

    result
}

fn init_tracing(log_level: &str, writer: LogWriterFactory) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(args: &Cli) -> Result<ConsoleConfig> {
    let path = args
        .config_path
        .clone()
        .unwrap_or_else(ConsoleConfig::default_path);

    let mut config = if path.exists() {
        let path_str = path.to_str().context("config path must be valid utf-8")?;
        ConsoleConfig::from_file(path_str).context("load config")?
    } else if let Some(server) = &args.server {
        // No config file; a --server flag is enough to get going.
        ConsoleConfig {
            server: ServerConfig {
                base_url: server.clone(),
                auth_token: None,
                timeout_secs: 30,
            },
            dashboard: DashboardConfig::default(),
        }
    } else {
        return Err(anyhow!(
            "no config file at {} and no --server flag given",
            path.display()
        ));
    };

    if let Some(server) = &args.server {
        config.server.base_url = server.clone();
    }
    if let Some(token) = &args.token {
        config.server.auth_token = Some(token.clone());
    }
    Ok(config)
}

fn build_client(server: &ServerConfig) -> Result<FlowdeskClient> {
    let client_config = ClientConfig {
        timeout: Duration::from_secs(server.timeout_secs),
        ..ClientConfig::default()
    };
    let mut client = FlowdeskClient::with_config(client_config, &server.base_url)
        .context("build engine client")?;
    if let Some(token) = &server.auth_token {
        client.set_auth_token(token.clone());
    }
    Ok(client)
}

fn setup_signal_handler(shutdown: CancellationToken) {
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown.cancel();
    });
}
