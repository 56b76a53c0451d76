//! REST API over the store and the search engine.
//!
//! Read-mostly JSON endpoints plus the two counter increments. Each request
//! is independent; shared state is the database handle and search settings.

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tracing::info;

use crate::error::{EditoraError, Result};
use crate::search::SearchSettings;
use crate::storage::Database;

pub mod error;
pub mod handlers;
pub mod middleware;

pub use error::ApiError;

#[derive(Clone)]
pub struct ServerState {
    pub db: Arc<Database>,
    pub settings: SearchSettings,
}

impl ServerState {
    pub const fn new(db: Arc<Database>, settings: SearchSettings) -> Self {
        Self { db, settings }
    }
}

pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/api/editors/search", get(handlers::search_editors))
        .route("/api/editors/:id", get(handlers::editor))
        .route("/api/editors/:id/view", post(handlers::record_view))
        .route(
            "/api/editors/:id/contact-click",
            post(handlers::record_contact_click),
        )
        .route("/api/editors/:id/portfolio", get(handlers::portfolio))
        .route("/api/editors/:id/reviews", get(handlers::reviews))
        .route("/api/users/:id", get(handlers::user))
        .route("/api/briefs", get(handlers::open_briefs))
        .layer(from_fn(middleware::request_tracing))
        .with_state(state)
}

/// Bind `bind` and serve until SIGINT or SIGTERM.
pub async fn serve(state: ServerState, bind: &str) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .map_err(|err| EditoraError::Server(format!("bind {bind} failed: {err}")))?;
    serve_on(listener, state, wait_for_shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve_on<F>(listener: TcpListener, state: ServerState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "editora API listening");
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|err| EditoraError::Server(format!("server failed: {err}")))?;
    info!("editora API stopped");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
