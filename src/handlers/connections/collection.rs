use axum::{extract::State, Json};

use crate::database::models::Connection;
use crate::state::AppState;

/// GET /backend/datasources/organizations/connections - every connection, in seed order
pub async fn list(State(state): State<AppState>) -> Json<Vec<Connection>> {
    let connections = state.connections.list().await;
    tracing::debug!("Listing {} connections", connections.len());
    Json(connections)
}
