pub mod banner;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::app::AppState;

/// GET / - service description
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "Banner API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "list": "GET /banner (public)",
            "show": "GET /banner/:banner_id (User, Admin)",
            "create": "POST /banner (Admin)",
            "update": "PUT /banner (Admin)",
            "delete": "DELETE /banner/:banner_id (Admin)",
            "health": "GET /health (public)"
        }
    }))
}

/// GET /health - liveness plus a store connectivity check
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.repository.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
