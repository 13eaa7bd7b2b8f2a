//! Handler for `GET /health`.

use std::sync::Arc;

use axum::{Json, extract::State};
use contactos_core::store::DirectoryStore;
use serde_json::{Value, json};

use crate::error::ApiError;

/// `GET /health`: 200 when the store answers a trivial query, 500 otherwise.
pub async fn handler<S>(State(store): State<Arc<S>>) -> Result<Json<Value>, ApiError>
where
  S: DirectoryStore,
{
  store.ping().await.map_err(ApiError::from_store)?;
  Ok(Json(json!({ "status": "ok" })))
}
