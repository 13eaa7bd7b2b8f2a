//! Handlers for `/telefonos` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/telefonos/{email}` | 404 if the contact is unknown |
//! | `POST` | `/telefonos` | Body: `{"email", "tipo": "principal"\|"alterno", "numero"}`; 201 |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use contactos_core::{
  contacto::{Telefono, TelefonoInput},
  store::DirectoryStore,
};

use crate::error::{ApiError, ApiJson, ApiPath};

/// `GET /telefonos/{email}`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  ApiPath(email): ApiPath<String>,
) -> Result<Json<Vec<Telefono>>, ApiError>
where
  S: DirectoryStore,
{
  let telefonos = store
    .list_telefonos(email.clone())
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("contacto {email} not found")))?;
  Ok(Json(telefonos))
}

/// `POST /telefonos`
pub async fn upsert<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<TelefonoInput>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore,
{
  let telefono = store.upsert_telefono(body).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(telefono)))
}
