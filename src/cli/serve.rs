//! HTTP endpoint exposing the calculator.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument};

use crate::core::{ConversionRequest, ExchangeCalculator};

/// Builds the router. The calculator holds no mutable state, so handlers share it freely.
pub fn router(calculator: Arc<ExchangeCalculator>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/exchange/{currency}/{amount}", get(exchange))
        .layer(TraceLayer::new_for_http())
        .with_state(calculator)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

#[instrument(skip(calculator))]
async fn exchange(
    State(calculator): State<Arc<ExchangeCalculator>>,
    Path((currency, amount)): Path<(String, f64)>,
) -> Response {
    let request = match ConversionRequest::new(amount, &currency) {
        Ok(request) => request,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let result = calculator.convert(&request).await;
    (result.status, result.body).into_response()
}

/// Runs the server on `addr` until Ctrl+C or SIGTERM.
pub async fn run_server(calculator: Arc<ExchangeCalculator>, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, router(calculator))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server");
}
