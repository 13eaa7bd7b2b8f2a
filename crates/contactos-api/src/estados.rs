//! Handlers for `/estados` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/estados` | Ordered by code |
//! | `POST` | `/estados` | Body: `{"codigo":"tx","nombre":"Texas"}`; upsert by code, 201 |
//! | `PUT`  | `/estados/{codigo}` | Body: `{"nombre":"..."}`; 404 if the code is unknown |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use contactos_core::{
  reference::{Estado, NewEstado},
  store::DirectoryStore,
};
use serde::Deserialize;

use crate::error::{ApiError, ApiJson, ApiPath};

/// `GET /estados`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Estado>>, ApiError>
where
  S: DirectoryStore,
{
  let estados = store.list_estados().await.map_err(ApiError::from_store)?;
  Ok(Json(estados))
}

/// `POST /estados`: returns 201 + the stored (or existing) state.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<NewEstado>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore,
{
  let estado = store.upsert_estado(body).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(estado)))
}

#[derive(Debug, Deserialize)]
pub struct RenameBody {
  pub nombre: String,
}

/// `PUT /estados/{codigo}`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  ApiPath(codigo): ApiPath<String>,
  ApiJson(body): ApiJson<RenameBody>,
) -> Result<Json<Estado>, ApiError>
where
  S: DirectoryStore,
{
  let estado = store
    .update_estado(codigo.clone(), body.nombre)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("estado {codigo} not found")))?;
  Ok(Json(estado))
}
