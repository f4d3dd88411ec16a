//! worklog server binary.
//!
//! Reads `worklog.toml` (or the path given with `--config`) layered under
//! `WORKLOG_*` environment variables, opens the SQLite store, and serves the
//! work log over HTTP until Ctrl-C.

mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use worklog_api::AppState;
use worklog_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "Daily work log server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "worklog.toml")]
  config: PathBuf,

  /// Print the effective configuration (secret redacted) and exit.
  #[arg(long)]
  print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = settings::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  if cli.print_config {
    println!("{}", serde_json::to_string_pretty(&server_cfg.redacted())?);
    return Ok(());
  }

  // Open the store; this also creates any missing tables. Startup stops here
  // when the database cannot be opened.
  let store = SqliteStore::open_url(&server_cfg.database_url)
    .await
    .inspect_err(|e| tracing::error!(error = %e, "database unavailable at startup"))
    .with_context(|| format!("failed to open store at {:?}", server_cfg.database_url))?;

  let app = worklog_api::router(AppState::new(store.clone()))
    .layer(TraceLayer::new_for_http());
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  tracing::info!("closing application lifespan");
  store.close().await.context("failed to close store")?;

  Ok(())
}

/// Resolve on Ctrl-C. If the signal cannot be watched, never resolve.
async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(error = %e, "failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
}
