use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sidebar_server::config::AppConfig;
use sidebar_server::db::pool::{create_pool, run_migrations};
use sidebar_server::engine::directory::Directory;
use sidebar_server::web::app_state::AppState;
use sidebar_server::web::router::build_router;

#[derive(Parser)]
#[command(name = "sidebar-server", about = "Server creation and sidebar navigation API")]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, default_value = "sidebar.toml")]
    config: String,

    /// Apply database migrations and exit.
    #[arg(long)]
    migrate_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;

    let pool = create_pool(&config.database.url)
        .await
        .context("failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("failed to run database migrations")?;

    if cli.migrate_only {
        info!("migrations complete, exiting");
        return Ok(());
    }

    let app_state = Arc::new(AppState {
        directory: Directory::new(pool, config.to_limits()),
        identity_header: config.identity.header.clone(),
        public_url: config.server.public_url.clone(),
    });
    let app = build_router(app_state);

    info!("Sidebar server starting on {}", config.server.web_address);

    let listener = tokio::net::TcpListener::bind(&config.server.web_address)
        .await
        .with_context(|| format!("failed to bind {}", config.server.web_address))?;

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
