// ABOUTME: HTTP server assembly for the admin panel
// ABOUTME: Mounts /admin routes with request tracing and binds the configured address

use anyhow::{Context, Result};
use axum::{response::Redirect, routing::get, Router};
use qa_core::config::Config;
use qa_core::SharedQuestionStore;
use tower_http::trace::TraceLayer;

use crate::admin::{admin_router, AdminState};

/// Full application router
pub fn build_router(state: AdminState) -> Router {
    let admin_routes = admin_router().with_state(state);

    Router::new()
        .route("/", get(|| async { Redirect::permanent("/admin") }))
        .route("/health", get(|| async { "ok" }))
        .nest("/admin", admin_routes)
        .layer(TraceLayer::new_for_http())
}

/// Serve the admin panel until the process is stopped
pub async fn serve(config: &Config, store: SharedQuestionStore) -> Result<()> {
    let state = AdminState {
        store,
        display: config.display.clone(),
    };
    let app = build_router(state);

    let addr = config.bind_addr();
    tracing::info!(addr = %addr, "Starting admin server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Admin server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
