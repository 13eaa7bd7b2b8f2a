//! Handlers for the `/empresas` and `/departamentos` catalogs.
//!
//! Both share one shape:
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/empresas` | Ordered by name |
//! | `POST` | `/empresas` | Body: `{"nombre":"Acme"}`; upsert by name, 201 |
//! | `PUT`  | `/empresas/{id}` | Body: `{"nombre":"..."}`; 404 if unknown |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use contactos_core::{
  reference::{Departamento, Empresa},
  store::DirectoryStore,
};
use serde::Deserialize;

use crate::error::{ApiError, ApiJson, ApiPath};

/// Body of every catalog `POST` and `PUT`.
#[derive(Debug, Deserialize)]
pub struct NombreBody {
  pub nombre: String,
}

// ─── Empresas ────────────────────────────────────────────────────────────────

/// `GET /empresas`
pub async fn list_empresas<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Empresa>>, ApiError>
where
  S: DirectoryStore,
{
  let empresas = store.list_empresas().await.map_err(ApiError::from_store)?;
  Ok(Json(empresas))
}

/// `POST /empresas`
pub async fn create_empresa<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<NombreBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore,
{
  let empresa = store
    .upsert_empresa(body.nombre)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(empresa)))
}

/// `PUT /empresas/{id}`
pub async fn update_empresa<S>(
  State(store): State<Arc<S>>,
  ApiPath(id): ApiPath<i64>,
  ApiJson(body): ApiJson<NombreBody>,
) -> Result<Json<Empresa>, ApiError>
where
  S: DirectoryStore,
{
  let empresa = store
    .update_empresa(id, body.nombre)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("empresa {id} not found")))?;
  Ok(Json(empresa))
}

// ─── Departamentos ───────────────────────────────────────────────────────────

/// `GET /departamentos`
pub async fn list_departamentos<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Departamento>>, ApiError>
where
  S: DirectoryStore,
{
  let departamentos = store
    .list_departamentos()
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(departamentos))
}

/// `POST /departamentos`
pub async fn create_departamento<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<NombreBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore,
{
  let departamento = store
    .upsert_departamento(body.nombre)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(departamento)))
}

/// `PUT /departamentos/{id}`
pub async fn update_departamento<S>(
  State(store): State<Arc<S>>,
  ApiPath(id): ApiPath<i64>,
  ApiJson(body): ApiJson<NombreBody>,
) -> Result<Json<Departamento>, ApiError>
where
  S: DirectoryStore,
{
  let departamento = store
    .update_departamento(id, body.nombre)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("departamento {id} not found")))?;
  Ok(Json(departamento))
}
