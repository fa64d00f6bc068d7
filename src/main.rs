//! HTTP server for the Teller Shift Engine.

use teller_shift_engine::api::{AppState, create_router};
use teller_shift_engine::config::ConfigLoader;
use teller_shift_engine::engine::InMemoryEngine;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,teller_shift_engine=debug".into()),
        )
        .with(fmt::layer())
        .init();

    let config = match ConfigLoader::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    let engine = match InMemoryEngine::in_memory(&config) {
        Ok(engine) => engine,
        Err(e) => {
            error!(error = %e, "Failed to build engine");
            std::process::exit(1);
        }
    };

    let address = config.server().bind_address();
    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(address = %address, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };

    info!(address = %address, "Teller shift engine listening");
    if let Err(e) = axum::serve(listener, create_router(AppState::new(engine))).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
