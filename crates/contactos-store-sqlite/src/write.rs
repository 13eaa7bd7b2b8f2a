//! Multi-table contact writes.
//!
//! Each function opens one transaction, runs every statement inside it and
//! commits only at the end. Any early return drops the [`Transaction`], which
//! rolls it back, so a failed write never leaves partial rows behind.

use chrono::Utc;
use contactos_core::contacto::{ContactoInput, ContactoView, Direccion};
use rusqlite::{Connection, Transaction, params};

use crate::{
  Error, Result,
  encode::encode_dt,
  error::is_unique_violation,
  upsert,
};

/// References resolved for one contact payload.
struct Refs {
  empresa_id:      Option<i64>,
  departamento_id: Option<i64>,
  ciudad_id:       Option<i64>,
}

fn resolve_refs(tx: &Transaction<'_>, input: &ContactoInput) -> Result<Refs> {
  Ok(Refs {
    empresa_id:      upsert::named_id(tx, "empresa", input.empresa.as_deref())?,
    departamento_id: upsert::named_id(
      tx,
      "departamento",
      input.departamento.as_deref(),
    )?,
    ciudad_id:       upsert::resolve_ciudad(tx, &input.direccion)?,
  })
}

/// Full replace of the address: no address fields means no address row.
fn sync_direccion(
  tx: &Transaction<'_>,
  contacto_id: i64,
  ciudad_id: Option<i64>,
  dir: &Direccion,
) -> Result<()> {
  if dir.is_empty() {
    upsert::delete_direccion(tx, contacto_id)
  } else {
    upsert::direccion(tx, contacto_id, ciudad_id, dir)
  }
}

fn conflict(email: &str) -> Error {
  contactos_core::Error::Conflict(format!("contacto {email} already exists")).into()
}

fn assembled(conn: &Connection, email: &str) -> Result<ContactoView> {
  upsert::contacto_view(conn, email)?.ok_or_else(|| {
    Error::Decode(format!("contacto {email} vanished after write"))
  })
}

/// Create a contact together with its address and phones.
///
/// `input` must already be normalized.
pub fn create_contacto(
  conn: &mut Connection,
  input: &ContactoInput,
) -> Result<ContactoView> {
  let tx = conn.transaction()?;
  if upsert::contacto_id(&tx, &input.email)?.is_some() {
    return Err(conflict(&input.email));
  }
  let refs = resolve_refs(&tx, input)?;
  let now = encode_dt(Utc::now());

  let inserted = tx.execute(
    "INSERT INTO contacto (
       first_name, last_name, email, empresa_id, departamento_id,
       creado_en, actualizado_en
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    params![
      input.first_name,
      input.last_name,
      input.email,
      refs.empresa_id,
      refs.departamento_id,
      now,
    ],
  );
  // Another writer can still win the race between the check and the insert.
  if let Err(e) = &inserted
    && is_unique_violation(e, "contacto.email")
  {
    return Err(conflict(&input.email));
  }
  inserted?;
  let contacto_id = tx.last_insert_rowid();

  sync_direccion(&tx, contacto_id, refs.ciudad_id, &input.direccion)?;
  for (tipo, numero) in input.telefonos() {
    upsert::telefono(&tx, contacto_id, tipo, numero)?;
  }

  tx.commit()?;
  tracing::info!(email = %input.email, contacto_id, "created contacto");
  assembled(conn, &input.email)
}

/// Replace every mutable field of the contact at `email`.
///
/// Phones are deleted and re-inserted from the payload, so a phone field left
/// out of `input` removes the stored phone. `email` and `input` must already
/// be normalized.
pub fn update_contacto(
  conn: &mut Connection,
  email: &str,
  input: &ContactoInput,
) -> Result<ContactoView> {
  if email != input.email {
    return Err(
      contactos_core::Error::validation(
        "email in path and body must match",
      )
      .into(),
    );
  }

  let tx = conn.transaction()?;
  let contacto_id = upsert::require_contacto(&tx, email)?;
  let refs = resolve_refs(&tx, input)?;

  tx.execute(
    "UPDATE contacto
     SET first_name      = ?2,
         last_name       = ?3,
         empresa_id      = ?4,
         departamento_id = ?5,
         actualizado_en  = ?6
     WHERE contacto_id = ?1",
    params![
      contacto_id,
      input.first_name,
      input.last_name,
      refs.empresa_id,
      refs.departamento_id,
      encode_dt(Utc::now()),
    ],
  )?;

  sync_direccion(&tx, contacto_id, refs.ciudad_id, &input.direccion)?;
  let removed = upsert::delete_telefonos(&tx, contacto_id)?;
  for (tipo, numero) in input.telefonos() {
    upsert::telefono(&tx, contacto_id, tipo, numero)?;
  }

  tx.commit()?;
  tracing::info!(%email, contacto_id, phones_replaced = removed, "updated contacto");
  assembled(conn, email)
}
