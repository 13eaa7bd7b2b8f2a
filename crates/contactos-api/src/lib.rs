//! JSON REST API for the contact directory.
//!
//! Exposes an axum [`Router`] backed by any [`contactos_core::store::DirectoryStore`].
//! TLS, tracing layers and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = contactos_api::api_router(Arc::new(store));
//! ```

pub mod catalogos;
pub mod ciudades;
pub mod contactos;
pub mod direcciones;
pub mod error;
pub mod estados;
pub mod health;
pub mod telefonos;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use contactos_core::store::DirectoryStore;

pub use error::{ApiError, ApiJson, ApiPath, ApiQuery};

/// Build the API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: DirectoryStore + 'static,
{
  Router::new()
    .route("/health", get(health::handler::<S>))
    // Reference data
    .route("/estados", get(estados::list::<S>).post(estados::create::<S>))
    .route("/estados/{codigo}", put(estados::update::<S>))
    .route(
      "/empresas",
      get(catalogos::list_empresas::<S>).post(catalogos::create_empresa::<S>),
    )
    .route("/empresas/{id}", put(catalogos::update_empresa::<S>))
    .route(
      "/departamentos",
      get(catalogos::list_departamentos::<S>)
        .post(catalogos::create_departamento::<S>),
    )
    .route("/departamentos/{id}", put(catalogos::update_departamento::<S>))
    .route("/ciudades", get(ciudades::list::<S>).post(ciudades::create::<S>))
    .route("/ciudades/{id}", put(ciudades::update::<S>))
    // Contacts
    .route("/contactos", get(contactos::list::<S>).post(contactos::create::<S>))
    .route(
      "/contactos/{email}",
      get(contactos::get_one::<S>).put(contactos::update::<S>),
    )
    .route("/direcciones", post(direcciones::upsert::<S>))
    .route("/direcciones/{email}", get(direcciones::get_one::<S>))
    .route("/telefonos", post(telefonos::upsert::<S>))
    .route("/telefonos/{email}", get(telefonos::list::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────
