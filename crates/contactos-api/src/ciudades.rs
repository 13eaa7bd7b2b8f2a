//! Handlers for `/ciudades` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/ciudades` | Optional `?estado=TX` |
//! | `POST` | `/ciudades` | Body: `{"nombre":"Austin","estado_codigo":"TX"}`; 404 if the state is unknown |
//! | `PUT`  | `/ciudades/{id}` | Same body; 404 if the city or state is unknown |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use contactos_core::{
  reference::{Ciudad, NewCiudad},
  store::DirectoryStore,
};
use serde::Deserialize;

use crate::error::{ApiError, ApiJson, ApiPath, ApiQuery};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Two-letter state code, any case.
  pub estado: Option<String>,
}

/// `GET /ciudades[?estado=<codigo>]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Vec<Ciudad>>, ApiError>
where
  S: DirectoryStore,
{
  let ciudades = store
    .list_ciudades(params.estado)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(ciudades))
}

/// `POST /ciudades`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<NewCiudad>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore,
{
  let ciudad = store.upsert_ciudad(body).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(ciudad)))
}

/// `PUT /ciudades/{id}`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  ApiPath(id): ApiPath<i64>,
  ApiJson(body): ApiJson<NewCiudad>,
) -> Result<Json<Ciudad>, ApiError>
where
  S: DirectoryStore,
{
  let ciudad = store
    .update_ciudad(id, body)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("ciudad {id} not found")))?;
  Ok(Json(ciudad))
}
