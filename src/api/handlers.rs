//! API Handlers
//!
//! HTTP request handlers mapping each endpoint onto the cache contract.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::Cache;
use crate::error::{CacheError, Result};
use crate::models::{GetResponse, HealthResponse, SetRequest, WriteResponse};

/// Application state shared across all handlers.
///
/// Holds the backend behind the capability contract, so handlers work the
/// same whichever variant the server was started with.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache backend
    pub cache: Arc<dyn Cache<String>>,
}

impl AppState {
    /// Creates a new AppState around the given backend.
    pub fn new(cache: Arc<dyn Cache<String>>) -> Self {
        Self { cache }
    }
}

/// Handler for PUT /set
///
/// Stores a key-value pair in the cache.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<WriteResponse>> {
    // Validate request
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    state.cache.set(req.key.clone(), req.value).await;

    Ok(Json(WriteResponse::stored(req.key)))
}

/// Handler for GET /get/:key
///
/// Retrieves a live value from the cache by key.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.cache.get(&key).await {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
///
/// Deletes a key from the cache. Deleting a missing key still succeeds.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<WriteResponse> {
    state.cache.delete(&key).await;

    Json(WriteResponse::deleted(key))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
