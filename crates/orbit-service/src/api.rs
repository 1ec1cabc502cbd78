//! HTTP API for intent resolution.

use crate::service::{OrbitService, ServiceError};
use axum::{
	extract::{rejection::JsonRejection, State},
	http::StatusCode,
	response::{IntoResponse, Json, Response},
	routing::{get, post},
	Router,
};
use orbit_types::{SwapRoute, UserIntent};
use std::future::Future;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[derive(Clone)]
struct AppState {
	service: Arc<OrbitService>,
}

impl IntoResponse for ServiceError {
	fn into_response(self) -> Response {
		let status =
			StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
		(status, Json(self.to_response())).into_response()
	}
}

/// Builds the application router.
pub fn router(service: Arc<OrbitService>) -> Router {
	Router::new()
		.route("/", get(root))
		.route("/health", get(health_check))
		.route("/solve_intent", post(solve_intent))
		.with_state(AppState { service })
		.layer(TraceLayer::new_for_http())
		.layer(CorsLayer::permissive())
}

/// Serves the API until `shutdown` resolves.
pub async fn start_http_server(
	service: Arc<OrbitService>,
	host: &str,
	port: u16,
	shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
	let listener = tokio::net::TcpListener::bind((host, port)).await?;
	info!("Orbit API listening on {}", listener.local_addr()?);

	axum::serve(listener, router(service))
		.with_graceful_shutdown(shutdown)
		.await
}

async fn root(State(state): State<AppState>) -> Json<serde_json::Value> {
	Json(serde_json::json!({
		"system": "Orbit Protocol",
		"status": "online",
		"mode": state.service.mode(),
	}))
}

async fn health_check() -> Json<serde_json::Value> {
	Json(serde_json::json!({
		"status": "ok",
		"blockchain_connection": "pending",
		"timestamp": chrono::Utc::now().timestamp(),
	}))
}

/// Handles POST /solve_intent.
///
/// Dropping the connection drops this future, which cancels any in-flight
/// model or price request.
async fn solve_intent(
	State(state): State<AppState>,
	payload: Result<Json<UserIntent>, JsonRejection>,
) -> Result<Json<SwapRoute>, ServiceError> {
	let Json(intent) = payload.map_err(|e| ServiceError::InvalidRequest(e.body_text()))?;
	let route = state.service.solve(intent).await?;
	Ok(Json(route))
}
