//! The `DirectoryStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `contactos-store-sqlite`).
//! The HTTP layer (`contactos-api`) depends on this abstraction, not on any
//! concrete backend.
//!
//! Backends normalize every input (see [`crate::validate`]) before touching
//! storage, so callers may pass raw request data straight through.

use std::future::Future;

use crate::{
  DomainError,
  contacto::{
    ContactoInput, ContactoView, Direccion, DireccionInput, Page, Telefono,
    TelefonoInput,
  },
  reference::{Ciudad, Departamento, Empresa, Estado, NewCiudad, NewEstado},
};

/// Abstraction over a contact-directory backend.
///
/// Reference rows (states, cities, companies, departments) are deduplicated
/// by natural key: every `upsert_*` returns the existing row when the key is
/// already present. Contact writes are all-or-nothing across the contact,
/// address and phone rows.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait DirectoryStore: Send + Sync {
  type Error: std::error::Error + DomainError + Send + Sync + 'static;

  /// Run a trivial query to prove the store is reachable.
  fn ping(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── States ────────────────────────────────────────────────────────────

  /// All states, ordered by code.
  fn list_estados(
    &self,
  ) -> impl Future<Output = Result<Vec<Estado>, Self::Error>> + Send + '_;

  /// Insert a state or, if the code exists, refresh its name (when one is
  /// supplied) and return the existing row.
  fn upsert_estado(
    &self,
    input: NewEstado,
  ) -> impl Future<Output = Result<Estado, Self::Error>> + Send + '_;

  /// Rename the state with `codigo`. Returns `None` if the code is unknown.
  fn update_estado(
    &self,
    codigo: String,
    nombre: String,
  ) -> impl Future<Output = Result<Option<Estado>, Self::Error>> + Send + '_;

  // ── Cities ────────────────────────────────────────────────────────────

  /// All cities, optionally restricted to one state code.
  fn list_ciudades(
    &self,
    estado: Option<String>,
  ) -> impl Future<Output = Result<Vec<Ciudad>, Self::Error>> + Send + '_;

  /// Insert-or-return a city. Fails with `NotFound` if the state is unknown.
  fn upsert_ciudad(
    &self,
    input: NewCiudad,
  ) -> impl Future<Output = Result<Ciudad, Self::Error>> + Send + '_;

  /// Replace a city's name and state. Returns `None` if `id` is unknown.
  fn update_ciudad(
    &self,
    id: i64,
    input: NewCiudad,
  ) -> impl Future<Output = Result<Option<Ciudad>, Self::Error>> + Send + '_;

  // ── Companies ─────────────────────────────────────────────────────────

  fn list_empresas(
    &self,
  ) -> impl Future<Output = Result<Vec<Empresa>, Self::Error>> + Send + '_;

  fn upsert_empresa(
    &self,
    nombre: String,
  ) -> impl Future<Output = Result<Empresa, Self::Error>> + Send + '_;

  fn update_empresa(
    &self,
    id: i64,
    nombre: String,
  ) -> impl Future<Output = Result<Option<Empresa>, Self::Error>> + Send + '_;

  // ── Departments ───────────────────────────────────────────────────────

  fn list_departamentos(
    &self,
  ) -> impl Future<Output = Result<Vec<Departamento>, Self::Error>> + Send + '_;

  fn upsert_departamento(
    &self,
    nombre: String,
  ) -> impl Future<Output = Result<Departamento, Self::Error>> + Send + '_;

  fn update_departamento(
    &self,
    id: i64,
    nombre: String,
  ) -> impl Future<Output = Result<Option<Departamento>, Self::Error>> + Send + '_;

  // ── Contacts ──────────────────────────────────────────────────────────

  fn list_contactos(
    &self,
    page: Page,
  ) -> impl Future<Output = Result<Vec<ContactoView>, Self::Error>> + Send + '_;

  /// Look a contact up by e-mail, case-insensitively.
  fn get_contacto(
    &self,
    email: String,
  ) -> impl Future<Output = Result<Option<ContactoView>, Self::Error>> + Send + '_;

  /// Create a contact with its references, address and phones in one
  /// transaction. Fails with `Conflict` if the e-mail is taken.
  fn create_contacto(
    &self,
    input: ContactoInput,
  ) -> impl Future<Output = Result<ContactoView, Self::Error>> + Send + '_;

  /// Fully replace the contact identified by `email`. Fails with `NotFound`
  /// if it does not exist.
  fn update_contacto(
    &self,
    email: String,
    input: ContactoInput,
  ) -> impl Future<Output = Result<ContactoView, Self::Error>> + Send + '_;

  // ── Addresses & phones ────────────────────────────────────────────────

  /// The address of a contact. `None` if the contact does not exist; a
  /// contact without an address yields an all-`None` [`Direccion`].
  fn get_direccion(
    &self,
    email: String,
  ) -> impl Future<Output = Result<Option<Direccion>, Self::Error>> + Send + '_;

  fn upsert_direccion(
    &self,
    input: DireccionInput,
  ) -> impl Future<Output = Result<Direccion, Self::Error>> + Send + '_;

  /// The phones of a contact. `None` if the contact does not exist.
  fn list_telefonos(
    &self,
    email: String,
  ) -> impl Future<Output = Result<Option<Vec<Telefono>>, Self::Error>> + Send + '_;

  fn upsert_telefono(
    &self,
    input: TelefonoInput,
  ) -> impl Future<Output = Result<Telefono, Self::Error>> + Send + '_;
}
