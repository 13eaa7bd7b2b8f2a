//! Handlers for `/contactos` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/contactos` | Optional `limit` (default 20) and `offset` |
//! | `GET`  | `/contactos/{email}` | Case-insensitive; 404 if not found |
//! | `POST` | `/contactos` | Body: [`ContactoInput`]; 201, 409 on duplicate email |
//! | `PUT`  | `/contactos/{email}` | Full replace; omitted phones are deleted |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use contactos_core::{
  contacto::{ContactoInput, ContactoView, Page},
  store::DirectoryStore,
};
use serde::Deserialize;

use crate::error::{ApiError, ApiJson, ApiPath, ApiQuery};

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  pub limit:  Option<u32>,
  pub offset: Option<u32>,
}

/// `GET /contactos[?limit=...][&offset=...]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Vec<ContactoView>>, ApiError>
where
  S: DirectoryStore,
{
  let page = Page::new(params.limit, params.offset).map_err(ApiError::from_store)?;
  let contactos = store.list_contactos(page).await.map_err(ApiError::from_store)?;
  Ok(Json(contactos))
}

/// `GET /contactos/{email}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  ApiPath(email): ApiPath<String>,
) -> Result<Json<ContactoView>, ApiError>
where
  S: DirectoryStore,
{
  let contacto = store
    .get_contacto(email.clone())
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("contacto {email} not found")))?;
  Ok(Json(contacto))
}

/// `POST /contactos`: returns 201 + the assembled contact view.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<ContactoInput>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore,
{
  let contacto = store.create_contacto(body).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(contacto)))
}

/// `PUT /contactos/{email}`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  ApiPath(email): ApiPath<String>,
  ApiJson(body): ApiJson<ContactoInput>,
) -> Result<Json<ContactoView>, ApiError>
where
  S: DirectoryStore,
{
  let contacto = store
    .update_contacto(email, body)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(contacto))
}
