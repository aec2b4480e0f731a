use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::api::openapi_document;
use crate::routes::CONNECTIONS_PATH;
use crate::state::AppState;

/// GET / - service descriptor
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "Organization Datasource Connections API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "list": format!("GET {}", CONNECTIONS_PATH),
            "get": format!("GET {}/:id", CONNECTIONS_PATH),
            "update": format!("PATCH {}/:id", CONNECTIONS_PATH),
            "health": "GET /health",
            "docs": "GET /openapi.json",
        }
    }))
}

/// GET /health - liveness plus store size
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "connections": state.connections.count().await,
    }))
}

/// GET /openapi.json
pub async fn openapi() -> Json<Value> {
    Json(openapi_document())
}
