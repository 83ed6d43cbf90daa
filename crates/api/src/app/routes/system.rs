use axum::{Json, http::StatusCode, response::IntoResponse};

/// Liveness probe.
pub async fn health() -> axum::response::Response {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" }))).into_response()
}
