//! mentorlink server
//!
//! Loads configuration, opens the store and serves the HTTP API until
//! Ctrl+C.

use std::net::SocketAddr;
use std::process::ExitCode;

use clap::Parser;
use mentorlink_api::{create_router, AppState, Config, ServiceError};
use mentorlink_store::Store;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// mentorlink - assign students to mentors over HTTP
///
/// Settings are read from DATABASE_URL, DATABASE_AUTH_TOKEN, HOST and PORT
/// (or a `.env` file); flags override them.
#[derive(Parser, Debug)]
#[command(name = "mentorlink")]
#[command(version, about, long_about = None)]
struct Args {
    /// Port for the HTTP server (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// libSQL file path or remote URL (overrides DATABASE_URL)
    #[arg(short, long, value_name = "URL")]
    database_url: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Applies flag overrides on top of the loaded configuration.
    fn apply(&self, config: &mut Config) {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(ref host) = self.host {
            config.host.clone_from(host);
        }
        if let Some(ref url) = self.database_url {
            config.database_url.clone_from(url);
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if args.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("mentorlink starting");

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Runs the server until shutdown.
async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    args.apply(&mut config);
    config.validate()?;

    print_config(&config);

    let store = open_store(&config).await?;
    let addr = config.socket_addr().await?;
    let listener = bind_listener(addr).await?;

    let router = create_router(AppState::new(store.clone()));

    println!("HTTP server running on http://{addr}");
    println!("Press Ctrl+C to stop");

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    store.close();
    tracing::info!("mentorlink stopped");

    served.map_err(|e| anyhow::anyhow!("HTTP server error: {e}"))
}

/// Opens the configured store, running migrations.
async fn open_store(config: &Config) -> mentorlink_api::Result<Store> {
    let location = config.store_location();
    Store::open(location.clone()).await.map_err(|e| {
        tracing::error!(location = %location, error = %e, "Failed to open store");
        ServiceError::from(e)
    })
}

/// Binds the HTTP listener.
async fn bind_listener(addr: SocketAddr) -> mentorlink_api::Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServiceError::bind(addr, source))
}

/// Resolves when Ctrl+C is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Prints the effective configuration.
fn print_config(config: &Config) {
    println!("Configuration loaded:");
    println!("  Database: {}", config.store_location());
    println!(
        "  Auth token: {}",
        if config.database_auth_token.is_some() {
            "set"
        } else {
            "not set"
        }
    );
    println!("  Listen: {}:{}", config.host, config.port);
}
