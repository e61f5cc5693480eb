//! API request handlers for the record collections

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use collection_store::{Collection, Record, StoreError};

use crate::AppState;

/// API Error type
///
/// Every operation failure is classified here, once, before it reaches the
/// wire: validation problems carry their violation list, lookups carry the
/// collection and id, and storage faults surface as a generic server error.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

impl ApiError {
    fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: serde_json::json!({ "error": message.into() }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(violations) => Self {
                status: StatusCode::BAD_REQUEST,
                body: serde_json::json!({ "errorList": violations }),
            },
            StoreError::NotFound { .. } => Self::message(StatusCode::NOT_FOUND, err.to_string()),
            StoreError::Read(_) | StoreError::Write(_) | StoreError::Other(_) => {
                Self::message(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        }
    }
}

/// Resolve a collection by route name.
fn lookup<'a>(state: &'a AppState, name: &str) -> Result<&'a Mutex<Collection>, ApiError> {
    state.collection(name).ok_or_else(|| {
        ApiError::message(StatusCode::NOT_FOUND, format!("no such collection: {name}"))
    })
}

/// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "campus-api"
    }))
}

/// Create a record from the request body; responds 201 with the new id.
pub async fn create_record_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(payload): Json<Record>,
) -> Result<(StatusCode, String), ApiError> {
    info!("Creating record in {}", name);

    let collection = lookup(&state, &name)?.lock().await;
    let id = collection.create(payload).await?;

    Ok((StatusCode::CREATED, id))
}

/// List the full collection.
pub async fn list_records_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Record>>, ApiError> {
    info!("Listing {}", name);

    let collection = lookup(&state, &name)?.lock().await;
    let records = collection.list().await?;

    Ok(Json(records))
}

/// Get one record by id.
pub async fn get_record_handler(
    State(state): State<Arc<AppState>>,
    Path((name, id)): Path<(String, String)>,
) -> Result<Json<Record>, ApiError> {
    info!("Getting record {} from {}", id, name);

    let collection = lookup(&state, &name)?.lock().await;
    let record = collection.get(&id).await?;

    Ok(Json(record))
}

/// Replace a record wholesale; inserts if the id is unknown.
pub async fn replace_record_handler(
    State(state): State<Arc<AppState>>,
    Path((name, id)): Path<(String, String)>,
    Json(payload): Json<Record>,
) -> Result<Json<Record>, ApiError> {
    info!("Replacing record {} in {}", id, name);

    let collection = lookup(&state, &name)?.lock().await;
    let record = collection.replace(&id, payload).await?;

    Ok(Json(record))
}

/// Delete a record by id; responds 204 whether or not it existed.
pub async fn delete_record_handler(
    State(state): State<Arc<AppState>>,
    Path((name, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    info!("Deleting record {} from {}", id, name);

    let collection = lookup(&state, &name)?.lock().await;
    collection.delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
