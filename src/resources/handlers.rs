use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::{to_document, Resource};
use crate::{
    auth::dto::MessageResponse, error::ApiError, extract::ValidatedJson, state::AppState,
};

/// Ids that do not parse cannot name a record, so they read as "not found".
fn parse_id<R: Resource>(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| {
        warn!(collection = %R::COLLECTION, id = raw, "malformed id");
        ApiError::NotFound(R::NOT_FOUND.into())
    })
}

fn internal<R: Resource>(op: &'static str, e: impl std::fmt::Display) -> ApiError {
    error!(collection = %R::COLLECTION, op, error = %e, "store operation failed");
    ApiError::Internal("Server Error".into())
}

#[instrument(skip_all)]
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<R::New>,
) -> Result<(StatusCode, Json<R>), ApiError> {
    let doc = to_document(&body).map_err(|e| internal::<R>("create", e))?;
    let record = state
        .records
        .insert(R::COLLECTION, doc)
        .await
        .map_err(|e| internal::<R>("create", e))?;
    let id = record.id;
    let resource = R::from_record(record).map_err(|e| internal::<R>("create", e))?;

    info!(collection = %R::COLLECTION, %id, "record created");
    Ok((StatusCode::CREATED, Json(resource)))
}

#[instrument(skip_all)]
pub async fn list<R: Resource>(State(state): State<AppState>) -> Result<Json<Vec<R>>, ApiError> {
    let records = state
        .records
        .find_all(R::COLLECTION)
        .await
        .map_err(|e| internal::<R>("list", e))?;
    let items = records
        .into_iter()
        .map(R::from_record)
        .collect::<anyhow::Result<Vec<_>>>()
        .map_err(|e| internal::<R>("list", e))?;
    Ok(Json(items))
}

#[instrument(skip(state))]
pub async fn get<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<R>, ApiError> {
    let id = parse_id::<R>(&id)?;
    let record = state
        .records
        .find_by_id(R::COLLECTION, id)
        .await
        .map_err(|e| internal::<R>("get", e))?
        .ok_or_else(|| ApiError::NotFound(R::NOT_FOUND.into()))?;
    let resource = R::from_record(record).map_err(|e| internal::<R>("get", e))?;
    Ok(Json(resource))
}

#[instrument(skip(state, body))]
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<R::Changes>,
) -> Result<Json<R>, ApiError> {
    let id = parse_id::<R>(&id)?;
    let changes = to_document(&body).map_err(|e| internal::<R>("update", e))?;
    let record = state
        .records
        .update_by_id(R::COLLECTION, id, changes)
        .await
        .map_err(|e| internal::<R>("update", e))?
        .ok_or_else(|| ApiError::NotFound(R::NOT_FOUND.into()))?;
    let resource = R::from_record(record).map_err(|e| internal::<R>("update", e))?;

    info!(collection = %R::COLLECTION, %id, "record updated");
    Ok(Json(resource))
}

/// Succeeds whether or not the record existed.
#[instrument(skip(state))]
pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if let Ok(id) = Uuid::parse_str(&id) {
        let removed = state
            .records
            .delete_by_id(R::COLLECTION, id)
            .await
            .map_err(|e| internal::<R>("delete", e))?;
        info!(collection = %R::COLLECTION, %id, removed, "record delete");
    }
    Ok(Json(MessageResponse::new(R::DELETED)))
}
