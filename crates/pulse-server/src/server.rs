use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use parking_lot::Mutex;
use pulse_core::Bankroll;
use pulse_store::SessionStore;
use tower_http::cors::CorsLayer;

use crate::handlers;

/// Server configuration.
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 5000 }
    }
}

/// Shared application state passed to Axum handlers.
///
/// The bankroll lock is never held across an await point, so handler
/// futures stay `Send` despite the synchronous mutex.
#[derive(Clone)]
pub struct AppState {
    pub bankroll: Arc<Mutex<Bankroll>>,
    pub store: SessionStore,
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/history", get(handlers::get_history))
        .route(
            "/api/sessions",
            get(handlers::list_sessions).post(handlers::create_session),
        )
        .route(
            "/api/sessions/{index}",
            axum::routing::put(handlers::update_session).delete(handlers::delete_session),
        )
        .route("/api/stats/advanced", get(handlers::stats_advanced))
        .route("/api/stats/tags", get(handlers::stats_tags))
        .route(
            "/api/stats/session_length",
            get(handlers::stats_session_length),
        )
        .route("/api/export/csv", get(handlers::export_csv))
        .route("/api/health", get(handlers::health))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Create and start the server. Returns a handle to shut it down.
pub async fn start(
    config: ServerConfig,
    bankroll: Bankroll,
    store: SessionStore,
) -> Result<ServerHandle, std::io::Error> {
    let state = AppState {
        bankroll: Arc::new(Mutex::new(bankroll)),
        store,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(port = local_addr.port(), "ProfitPulse server started");

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    Ok(ServerHandle {
        port: local_addr.port(),
        _server: server_handle,
    })
}

/// Handle returned by `start()` — keeps the serve task alive.
pub struct ServerHandle {
    pub port: u16,
    _server: tokio::task::JoinHandle<()>,
}
