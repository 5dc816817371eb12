//! HTTP boundary - axum router, shared state, and error translation.
//!
//! Route handlers stay thin: they deserialize the request, invoke one core
//! workflow, and serialize the result. All workflow errors funnel through the
//! [`IntoResponse`] impl below into a uniform `{success: false, message}` body
//! with a status matching the error class.

use crate::errors::Error;
use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: DatabaseConnection,
}

/// Converts a workflow error into an HTTP response.
///
/// Client-class errors echo their message text; internal failures are logged
/// in full and echoed as a generic message.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::Validation { .. } => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::NotFound { .. } => (StatusCode::NOT_FOUND, self.to_string()),
            Error::CapacityExceeded { .. }
            | Error::InvalidState { .. }
            | Error::ExceedsBalance { .. } => (StatusCode::CONFLICT, self.to_string()),
            Error::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
            Error::Config { .. } | Error::Io(_) | Error::EnvVar(_) => {
                tracing::error!(error = ?self, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        if status.is_client_error() {
            tracing::warn!(%status, %message, "Request rejected");
        }

        let body = Json(json!({ "success": false, "message": message }));
        (status, body).into_response()
    }
}

/// Builds the application router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/students/register", post(handlers::register_student))
        .route("/api/students/:student_id", get(handlers::get_student))
        .route("/api/students/:student_id/fee", post(handlers::record_payment))
        .route("/api/fees", get(handlers::list_fees))
        .route("/api/fees/statistics", get(handlers::fee_statistics))
        .route(
            "/api/wallet/transactions",
            get(handlers::list_wallet_transactions),
        )
        .route(
            "/api/wallet/transactions/:transaction_id/approve",
            post(handlers::approve_wallet_transaction),
        )
        .with_state(state)
}

/// Configures and runs the web server until shutdown.
pub async fn run_server(addr: SocketAddr, db: DatabaseConnection) -> crate::errors::Result<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router(AppState { db })
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
