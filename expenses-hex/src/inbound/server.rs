//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use expenses_types::PaymentRepository;

use super::handlers::{self, AppState};
use crate::PaymentService;

/// HTTP Server for the expense payments API.
pub struct HttpServer<R: PaymentRepository> {
    state: Arc<AppState<R>>,
}

impl<R: PaymentRepository> HttpServer<R> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: PaymentService<R>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api-docs/openapi.json", get(handlers::openapi_json))
            .route(
                "/api/companies/{cid}/payments",
                get(handlers::index::<R>).post(handlers::store::<R>),
            )
            .route(
                "/api/companies/{cid}/payments/new",
                get(handlers::create_form::<R>),
            )
            .route(
                "/api/companies/{cid}/payments/import",
                post(handlers::import_payments::<R>),
            )
            .route(
                "/api/companies/{cid}/payments/{id}/duplicate",
                post(handlers::duplicate::<R>),
            )
            .route(
                "/api/companies/{cid}/payments/{id}/edit",
                get(handlers::edit_form::<R>),
            )
            .route(
                "/api/companies/{cid}/payments/{id}",
                put(handlers::update::<R>).delete(handlers::destroy::<R>),
            )
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
