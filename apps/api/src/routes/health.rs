use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Root liveness message, kept for compatibility with existing probes.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Recommendation service is running",
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /health
/// Returns a simple status object with service version. The engine has no
/// external dependency to be unhealthy against, so a running process is a
/// healthy one.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
