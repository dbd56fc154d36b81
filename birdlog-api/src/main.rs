//! birdlog-api - Bird checklist service
//!
//! `serve` runs the HTTP API; `import` loads the reference CSV files into an
//! empty database.

use std::path::PathBuf;

use anyhow::{Context, Result};
use birdlog_api::{build_router, AppState};
use birdlog_common::config::{CliOverrides, Config, TomlConfig};
use birdlog_common::db::init_database;
use birdlog_common::seed::{seed_all, SeedOutcome};
use clap::{Args, Parser, Subcommand};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "birdlog-api")]
#[command(about = "Bird checklist logging service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        #[command(flatten)]
        common: CommonArgs,
    },
    /// Load species, sightings and checklists from CSV into empty tables
    Import {
        /// Directory holding the seed CSV files
        #[arg(long)]
        seed_dir: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// SQLite database file
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, env = "BIRDLOG_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (overrides, config_path, serve) = match cli.command {
        Command::Serve { port, host, common } => (
            CliOverrides {
                database_path: common.database,
                host,
                port,
                seed_dir: None,
            },
            common.config,
            true,
        ),
        Command::Import { seed_dir, common } => (
            CliOverrides {
                database_path: common.database,
                seed_dir,
                ..Default::default()
            },
            common.config,
            false,
        ),
    };

    let file = TomlConfig::load_or_default(config_path.as_deref())
        .context("Failed to load config file")?;
    let config = Config::resolve(overrides, file).context("Invalid configuration")?;

    init_tracing(&config.log_level);

    info!(
        "Starting birdlog-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Database: {}", config.database_path.display());

    let pool = init_database(&config.database_path)
        .await
        .context("Failed to initialize database")?;

    if serve {
        run_server(pool, &config).await
    } else {
        run_import(pool, &config).await
    }
}

fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "birdlog_api={level},birdlog_common={level},tower_http={level}",
                    level = level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run_server(pool: sqlx::SqlitePool, config: &Config) -> Result<()> {
    let app = build_router(AppState::new(pool));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("birdlog-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn run_import(pool: sqlx::SqlitePool, config: &Config) -> Result<()> {
    info!("Seed directory: {}", config.seed_dir.display());

    let outcomes = seed_all(&pool, &config.seed_dir)
        .await
        .context("Seed import failed")?;

    let imported: usize = outcomes
        .iter()
        .map(|(_, outcome)| match outcome {
            SeedOutcome::Imported(n) => *n,
            _ => 0,
        })
        .sum();
    info!("Import complete: {} rows", imported);

    pool.close().await;
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
