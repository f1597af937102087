//! PiNet web dashboard
//!
//! Lists the hosts from a static file and proxies ping and Wake-on-LAN
//! requests to a PiNet API through `pinet-client`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod config;
mod dashboard;
mod error;
mod hosts;
mod router;
mod state;

use config::Config;
use state::AppState;

/// PiNet web dashboard
#[derive(Parser, Debug)]
#[command(name = "pinet-dashboard", version, about)]
struct Args {
    /// Configuration file (defaults to the usual search paths)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // A missing .env is fine; values may come from the real environment
    dotenv::dotenv().ok();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    }
    .with_env();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.dashboard.log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.api.credentials().is_err() {
        tracing::warn!("PiNet API is not configured; set PINET_API_URL and PINET_API_KEY");
    }

    let bind = config.dashboard.bind.clone();
    let app = router::create_router(Arc::new(AppState::new(config)));

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!("pinet-dashboard listening on http://{bind}");
    axum::serve(listener, app).await?;

    Ok(())
}
