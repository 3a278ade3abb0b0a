//! Parley API server binary.
//!
//! Wires the completion and scheduling clients into the HTTP router. The
//! scheduling token exchange runs to completion (or failure) before the
//! listener binds, so handlers only ever read the cache.

use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use parley_api::config::ApiConfig;
use parley_core::completion::CompletionClient;
use parley_core::scheduling::SchedulingClient;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "parley_api_server", about = "Parley chat relay server")]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,parley_api=debug,parley_core=debug".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    let mut config = ApiConfig::from_env();
    config.bind_addr = format!("0.0.0.0:{}", args.port);

    if config.completion.api_key.is_empty() {
        warn!("OPENAI_API_KEY is not set; completion requests will fail upstream");
    }

    let completion = CompletionClient::new(&config.completion)?;

    // Must finish before the listener binds; the cache is read-only afterwards.
    let scheduling = SchedulingClient::connect(&config.scheduling).await?;

    let state = parley_api::AppState {
        completion: Arc::new(completion),
        scheduling: Arc::new(scheduling),
    };

    let app = parley_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    info!(addr = %local_addr, "chatbot backend listening");

    axum::serve(listener, app).await?;

    Ok(())
}
