//! HTTP server exposing the city weather facade.

mod handlers;
mod routes;

pub use routes::create_router;

use std::sync::Arc;

use weather_core::{Config, Facade, upstream_from_config};

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub facade: Arc<Facade>,
}

impl AppState {
    pub fn new(facade: Facade) -> Self {
        Self { facade: Arc::new(facade) }
    }
}

/// Start the web server and run until Ctrl-C.
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let upstream = upstream_from_config(config)?;
    let state = AppState::new(Facade::from_config(Arc::new(upstream), config));
    let app = create_router(state);

    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    tracing::info!("Starting server at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
