use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;

use crate::database::models::Connection;
use crate::error::ApiError;
use crate::state::AppState;

use super::requests::PatchConnectionRequest;

/// GET /backend/datasources/organizations/connections/:id - single connection by id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Connection>, ApiError> {
    let connection = state.connections.get(&id).await?;
    Ok(Json(connection))
}

/// PATCH /backend/datasources/organizations/connections/:id - set last_sync_at
///
/// The body is validated before the lookup, and nothing is written unless
/// both succeed.
pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Connection>, ApiError> {
    let Json(body) = body?;
    let payload = PatchConnectionRequest::from_body(body)?;

    let last_sync_at = payload.validate().map_err(|err| {
        tracing::warn!(connection_id = %id, "Rejected last_sync_at update: {}", err.to_json());
        err
    })?;

    let updated = state
        .connections
        .update_last_sync_at(&id, last_sync_at)
        .await?;

    Ok(Json(updated))
}
