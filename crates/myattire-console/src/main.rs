/*
[INPUT]:  CLI arguments, YAML configuration file, OS shutdown signals
[OUTPUT]: Running admin console with graceful shutdown
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use myattire_adapter::{MyAttireClient, SessionManager};
use myattire_console::cli;
use myattire_console::config::ConsoleConfig;
use myattire_console::session_store::SessionStore;
use myattire_console::tui::{self, LogBuffer, LogBufferHandle, LogWriterFactory};

#[derive(Parser, Debug)]
#[command(
    name = "myattire-console",
    version,
    about = "Admin console for the My Attire task service"
)]
struct Cli {
    /// Configuration file; defaults apply when it does not exist
    #[arg(long = "config", value_name = "PATH", default_value = "myattire.yaml")]
    config_path: PathBuf,
    /// Overrides the configured tracing filter
    #[arg(long = "log-level", value_name = "LEVEL")]
    log_level: Option<String>,
    /// Generate a configuration file and exit
    #[arg(long = "init")]
    init: bool,
    /// Probe the configured service and exit
    #[arg(long = "check")]
    check: bool,
    /// Prompt-based flow instead of the full-screen interface
    #[arg(long = "interactive")]
    interactive: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    if args.init {
        return cli::init::run_init(args.config_path);
    }

    let config_path = args
        .config_path
        .to_str()
        .context("config path must be valid utf-8")?;
    let config = ConsoleConfig::load_or_default(config_path).context("load config")?;
    let log_level = args
        .log_level
        .as_deref()
        .unwrap_or(&config.log.level)
        .to_string();

    if args.check || args.interactive {
        init_plain_tracing(&log_level)?;

        let (client, store) = open_session(&config).await?;
        if args.check {
            return cli::run_check(&client).await;
        }
        return cli::interactive::run_interactive(client, store).await;
    }

    let log_buffer: LogBufferHandle =
        Arc::new(StdMutex::new(LogBuffer::new(tui::LOG_BUFFER_CAPACITY)));
    let _log_guard = init_tui_tracing(&log_level, config.log.file.as_deref(), log_buffer.clone())?;

    info!(
        config_path = %args.config_path.display(),
        base_url = %config.api.base_url,
        "starting myattire-console"
    );

    let (client, store) = open_session(&config).await?;

    let shutdown = CancellationToken::new();
    setup_signal_handlers(shutdown.clone());

    // tokio panics on a zero interval
    let tick_interval = Duration::from_millis(config.ui.tick_ms.max(50));
    tui::run_tui(client, store, log_buffer, tick_interval, shutdown).await
}

/// Open the persisted session store and build an API client around whatever
/// session it still holds.
async fn open_session(config: &ConsoleConfig) -> Result<(MyAttireClient, SessionStore)> {
    let store = SessionStore::open().await.context("open session store")?;
    let session = SessionManager::new();
    match store.restore_into(&session).await {
        Ok(true) => info!("session restored"),
        Ok(false) => {}
        Err(err) => warn!(error = %err, "failed to restore session"),
    }

    let client = MyAttireClient::with_config_and_session(config.client_config(), session)
        .context("create API client")?;
    Ok((client, store))
}

fn init_plain_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

/// TUI tracing goes to the in-memory buffer behind the Logs tab, plus an
/// optional file. Stdout would corrupt the alternate screen.
fn init_tui_tracing(
    log_level: &str,
    log_file: Option<&str>,
    buffer: LogBufferHandle,
) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    let buffer_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(LogWriterFactory::new(buffer));
    let registry = tracing_subscriber::registry().with(filter).with(buffer_layer);

    match log_file {
        Some(raw_path) => {
            let path = Path::new(raw_path);
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let file_name = path.file_name().context("log file needs a file name")?;
            let (writer, guard) = tracing_appender::non_blocking(
                tracing_appender::rolling::never(dir, file_name),
            );
            let file_layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            registry
                .with(file_layer)
                .try_init()
                .map_err(|err| anyhow!(err))
                .context("initialize tracing subscriber")?;
            Ok(Some(guard))
        }
        None => {
            registry
                .try_init()
                .map_err(|err| anyhow!(err))
                .context("initialize tracing subscriber")?;
            Ok(None)
        }
    }
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
