//! Server Implementation
//!
//! HTTP 服务器启动和管理

use axum::Router;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::core::{Config, ServerState};
use crate::relay::worker::RelayWorker;
use crate::utils::time::parse_send_time;

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (for tests)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config)?,
        };

        let cancel = CancellationToken::new();

        // Relay worker only runs when an endpoint is configured
        if let Some(relay) = state.relay.clone() {
            let worker = RelayWorker::new(
                state.storage.clone(),
                relay,
                parse_send_time(&self.config.relay_send_time),
                state.orders.subscribe(),
                cancel.clone(),
            );
            tokio::spawn(worker.run());
        } else {
            tracing::info!("RELAY_URL not set, report relay disabled");
        }

        let app = build_router(state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("🍛 Tiffin POS server starting on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
                cancel.cancel();
            })
            .await?;

        Ok(())
    }
}

/// Assemble the full application router
pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .merge(api::health::router())
        .merge(api::menu_items::router())
        .merge(api::cart::router())
        .merge(api::orders::router())
        .merge(api::reports::router())
        .merge(api::store_info::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
