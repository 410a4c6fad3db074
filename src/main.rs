//! Mini Cache - an in-process key-value cache with TTL and LRU eviction
//!
//! Runs the cache behind an HTTP server (`serve`) or an interactive shell
//! (`repl`).

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mini_cache::{api::create_router, repl::run_repl, AppState, Cache, Config};

#[derive(Debug, Parser)]
#[command(name = "mini_cache", version, about)]
struct Cli {
    /// YAML config file (defaults to ./config.yaml when present)
    #[arg(short, long, global = true, env = "MINI_CACHE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve the cache over HTTP
    Serve {
        /// Port to listen on, overriding the configured one
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Drive the cache from an interactive shell
    Repl,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            init_tracing("mini_cache=info,tower_http=info", false);
            let mut config = load_config(cli.config)?;
            if let Some(port) = port {
                config.server_port = port;
            }
            serve(config).await
        }
        Commands::Repl => {
            init_tracing("mini_cache=warn", true);
            repl(load_config(cli.config)?).await
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides `default_filter`.
fn init_tracing(default_filter: &str, to_stderr: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    let registry = tracing_subscriber::registry().with(filter);

    if to_stderr {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config = Config::load(path.as_deref()).context("Failed to load configuration")?;
    info!(
        "Configuration loaded: max_entries={}, default_ttl={}s, port={}, cleanup_interval={}s, sweep_limit={}",
        config.max_entries,
        config.default_ttl,
        config.server_port,
        config.cleanup_interval,
        config.sweep_limit
    );
    Ok(config)
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting Mini Cache server");

    let state = AppState::from_config(&config).context("Failed to create cache")?;
    let cache = state.cache.clone();
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if cache.stop() {
        info!("Cleanup task stopped");
    }
    info!("Server shutdown complete");
    Ok(())
}

async fn repl(config: Config) -> Result<()> {
    let cache = Cache::from_config(&config).context("Failed to create cache")?;

    println!(
        "Mini Cache shell (max entries: {}, cleanup interval: {}s)",
        config.max_entries, config.cleanup_interval
    );
    println!("Type 'help' for available commands.");

    let stdin = BufReader::new(tokio::io::stdin());
    run_repl(&cache, stdin, tokio::io::stdout())
        .await
        .context("Failed to read input")?;

    cache.stop();
    Ok(())
}

/// Waits for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
