//! profile-board - Profile board web service
//!
//! Single-process HTTP service: user profiles, a shared message board, an
//! SSE event stream, and SQLite persistence under a resolvable data root
//! folder.

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use profile_board::config::{self, FileConfig};
use profile_board::events::EventBus;
use profile_board::{build_router, db, AppState};

/// Command-line arguments (highest-priority configuration tier)
#[derive(Debug, Parser)]
#[command(name = "profile-board", version, about = "Profile board web service")]
struct Args {
    /// Data root folder (database lives here)
    #[arg(long)]
    root_folder: Option<String>,

    /// Bind host
    #[arg(long)]
    host: Option<String>,

    /// Bind port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting profile-board v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    // Resolution order for every tunable: CLI > env > config file > default
    let file_config = FileConfig::load();

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref(), &file_config);
    config::ensure_root_folder(&root_folder)?;
    info!("Root folder: {}", root_folder.display());

    let db_path = config::database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = match db::init_database_pool(&db_path).await {
        Ok(pool) => {
            info!("✓ Connected to database");
            pool
        }
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e);
        }
    };

    // Event bus for SSE broadcasting
    let event_bus = EventBus::new(100);

    // Create application state and router
    let state = AppState::new(pool, event_bus);
    let app = build_router(state);

    let (host, port) = config::resolve_listen(args.host.as_deref(), args.port, &file_config);
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    info!("profile-board listening on http://{}:{}", host, port);
    info!("Heartbeat: http://{}:{}/heartbeat", host, port);
    info!("Health check: http://{}:{}/health", host, port);

    axum::serve(listener, app).await?;

    Ok(())
}
