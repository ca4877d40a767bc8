use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / and GET /health
/// Liveness probe: reports store connectivity and the current timestamp.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let store_connected = state.store.ping().await.is_ok();
    Json(json!({
        "status": if store_connected { "healthy" } else { "degraded" },
        "message": "Resume Analyzer API is running",
        "service": "resume-analyzer-api",
        "version": env!("CARGO_PKG_VERSION"),
        "scoring_model": state.scorer.name(),
        "store_connected": store_connected,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
