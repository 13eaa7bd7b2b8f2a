//! Handlers for `/direcciones` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/direcciones/{email}` | 404 if the contact is unknown |
//! | `POST` | `/direcciones` | Body: `{"email", "address", "zip", "ciudad", "estado"}`; 201 |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use contactos_core::{
  contacto::{Direccion, DireccionInput},
  store::DirectoryStore,
};

use crate::error::{ApiError, ApiJson, ApiPath};

/// `GET /direcciones/{email}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  ApiPath(email): ApiPath<String>,
) -> Result<Json<Direccion>, ApiError>
where
  S: DirectoryStore,
{
  let direccion = store
    .get_direccion(email.clone())
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("contacto {email} not found")))?;
  Ok(Json(direccion))
}

/// `POST /direcciones`: sets the one address of an existing contact.
pub async fn upsert<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<DireccionInput>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore,
{
  let direccion = store.upsert_direccion(body).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(direccion)))
}
