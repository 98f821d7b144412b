use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use multiclinicas_api::{
    app::{app, cors_layer},
    config,
    database::DatabaseManager,
    state::AppState,
};

#[derive(Debug, Parser)]
#[command(name = "multiclinicas-api", version, about = "Multi-tenant clinic management API")]
struct Args {
    /// Port to listen on (overrides SERVER_PORT/PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Keep all data in process memory instead of PostgreSQL
    #[arg(long)]
    in_memory: bool,

    /// Create tables and unique indexes before serving
    #[arg(long, conflicts_with = "in_memory")]
    init_schema: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so DATABASE_URL and friends are picked up
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let args = Args::parse();
    let config = config::config();
    tracing::info!("Starting Multiclínicas API in {:?} mode", config.environment);

    let state = if args.in_memory {
        tracing::warn!("Running with the in-memory store; data is lost on exit");
        AppState::in_memory(config.tenant.clone())
    } else {
        let manager = DatabaseManager::connect(&config.database)
            .await
            .context("failed to connect to PostgreSQL")?;
        if args.init_schema {
            manager.ensure_schema().await.context("failed to apply schema")?;
        }
        AppState::postgres(manager, config.tenant.clone())
    };
    let database = state.database.clone();

    let mut router = app(state);
    if let Some(cors) = cors_layer(&config.security) {
        router = router.layer(cors);
    }

    let port = args.port.unwrap_or(config.server.port);
    let bind_addr = format!("{}:{}", config.server.host, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(database) = database {
        database.close().await;
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
