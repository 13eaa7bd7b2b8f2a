//! Integration tests for `SqliteStore` against an in-memory database.

use std::path::PathBuf;

use contactos_core::{
  contacto::{ContactoInput, Direccion, DireccionInput, Page, TelefonoInput, TipoTelefono},
  reference::{NewCiudad, NewEstado},
  store::DirectoryStore,
};

use crate::{Error, Location, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn domain(err: Error) -> contactos_core::Error {
  match err {
    Error::Core(e) => e,
    other => panic!("expected a domain error, got {other:?}"),
  }
}

fn estado(codigo: &str, nombre: &str) -> NewEstado {
  NewEstado { codigo: codigo.into(), nombre: Some(nombre.into()) }
}

fn ana() -> ContactoInput {
  ContactoInput {
    first_name:   "Ana".into(),
    last_name:    "Pérez".into(),
    email:        "Ana@Example.com".into(),
    empresa:      Some("Acme".into()),
    departamento: Some("Ventas".into()),
    direccion:    Direccion {
      address: Some("100 Congress Ave".into()),
      zip:     Some("78701".into()),
      ciudad:  Some("Austin".into()),
      estado:  Some("tx".into()),
    },
    phone1:       Some("512-555-0101".into()),
    phone2:       Some("512-555-0102".into()),
  }
}

// ─── Location ────────────────────────────────────────────────────────────────

#[test]
fn location_parses_url_forms() {
  assert_eq!(Location::parse("sqlite::memory:"), Location::Memory);
  assert_eq!(Location::parse(":memory:"), Location::Memory);
  assert_eq!(
    Location::parse("sqlite://data/contactos.db"),
    Location::File(PathBuf::from("data/contactos.db"))
  );
  assert_eq!(
    Location::parse("sqlite:contactos.db"),
    Location::File(PathBuf::from("contactos.db"))
  );
  assert_eq!(
    Location::parse("/var/lib/contactos.db"),
    Location::File(PathBuf::from("/var/lib/contactos.db"))
  );
}

#[tokio::test]
async fn connect_in_memory_and_ping() {
  let s = SqliteStore::connect("sqlite::memory:").await.unwrap();
  s.ping().await.unwrap();
}

// ─── States ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn estado_upsert_is_idempotent_and_uppercases() {
  let s = store().await;

  let first = s.upsert_estado(estado("tx", "Texas")).await.unwrap();
  let second = s.upsert_estado(estado("TX", "Texas")).await.unwrap();

  assert_eq!(first.codigo, "TX");
  assert_eq!(first.estado_id, second.estado_id);

  let all = s.list_estados().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].nombre.as_deref(), Some("Texas"));
}

#[tokio::test]
async fn estado_upsert_refreshes_name_but_never_clears_it() {
  let s = store().await;
  let original = s.upsert_estado(estado("nl", "Nuevo Leon")).await.unwrap();

  let renamed = s.upsert_estado(estado("NL", "Nuevo León")).await.unwrap();
  assert_eq!(renamed.estado_id, original.estado_id);
  assert_eq!(renamed.nombre.as_deref(), Some("Nuevo León"));

  let unnamed = s
    .upsert_estado(NewEstado { codigo: "nl".into(), nombre: None })
    .await
    .unwrap();
  assert_eq!(unnamed.nombre.as_deref(), Some("Nuevo León"));
}

#[tokio::test]
async fn estado_code_must_be_two_letters() {
  let s = store().await;
  let err = s.upsert_estado(estado("TEX", "Texas")).await.unwrap_err();
  assert!(matches!(domain(err), contactos_core::Error::Validation(_)));
}

#[tokio::test]
async fn update_estado_by_code() {
  let s = store().await;
  s.upsert_estado(estado("TX", "Tejas")).await.unwrap();

  let updated = s
    .update_estado("tx".into(), "Texas".into())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(updated.nombre.as_deref(), Some("Texas"));

  let missing = s.update_estado("ZZ".into(), "Nowhere".into()).await.unwrap();
  assert!(missing.is_none());
}

#[tokio::test]
async fn concurrent_upserts_converge_on_one_row() {
  let s = store().await;

  let handles: Vec<_> = (0..16)
    .map(|_| {
      let s = s.clone();
      tokio::spawn(async move { s.upsert_empresa("Acme".into()).await.unwrap() })
    })
    .collect();

  let mut ids = Vec::new();
  for h in handles {
    ids.push(h.await.unwrap().empresa_id);
  }
  ids.dedup();
  assert_eq!(ids.len(), 1);
  assert_eq!(s.list_empresas().await.unwrap().len(), 1);
}

// ─── Cities ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ciudad_requires_existing_estado() {
  let s = store().await;
  let err = s
    .upsert_ciudad(NewCiudad { nombre: "Austin".into(), estado_codigo: "TX".into() })
    .await
    .unwrap_err();
  assert!(matches!(domain(err), contactos_core::Error::NotFound(_)));
  assert!(s.list_estados().await.unwrap().is_empty());
}

#[tokio::test]
async fn ciudad_upsert_is_idempotent_per_state() {
  let s = store().await;
  s.upsert_estado(estado("TX", "Texas")).await.unwrap();
  s.upsert_estado(estado("GA", "Georgia")).await.unwrap();

  let a = s
    .upsert_ciudad(NewCiudad { nombre: "Austin".into(), estado_codigo: "tx".into() })
    .await
    .unwrap();
  let b = s
    .upsert_ciudad(NewCiudad { nombre: "Austin".into(), estado_codigo: "TX".into() })
    .await
    .unwrap();
  let other = s
    .upsert_ciudad(NewCiudad { nombre: "Austin".into(), estado_codigo: "GA".into() })
    .await
    .unwrap();

  assert_eq!(a.ciudad_id, b.ciudad_id);
  assert_ne!(a.ciudad_id, other.ciudad_id);
  assert_eq!(a.estado_codigo, "TX");

  assert_eq!(s.list_ciudades(None).await.unwrap().len(), 2);
  let texas = s.list_ciudades(Some("tx".into())).await.unwrap();
  assert_eq!(texas.len(), 1);
  assert_eq!(texas[0].ciudad_id, a.ciudad_id);
}

#[tokio::test]
async fn update_ciudad_moves_it_between_states() {
  let s = store().await;
  s.upsert_estado(estado("TX", "Texas")).await.unwrap();
  s.upsert_estado(estado("GA", "Georgia")).await.unwrap();
  let city = s
    .upsert_ciudad(NewCiudad { nombre: "Athens".into(), estado_codigo: "TX".into() })
    .await
    .unwrap();

  let moved = s
    .update_ciudad(
      city.ciudad_id,
      NewCiudad { nombre: "Athens".into(), estado_codigo: "GA".into() },
    )
    .await
    .unwrap()
    .unwrap();
  assert_eq!(moved.estado_codigo, "GA");

  let missing = s
    .update_ciudad(999, NewCiudad { nombre: "X".into(), estado_codigo: "GA".into() })
    .await
    .unwrap();
  assert!(missing.is_none());
}

// ─── Companies & departments ─────────────────────────────────────────────────

#[tokio::test]
async fn empresa_and_departamento_dedupe_by_name() {
  let s = store().await;

  let a = s.upsert_empresa("Acme".into()).await.unwrap();
  let b = s.upsert_empresa("  Acme ".into()).await.unwrap();
  assert_eq!(a.empresa_id, b.empresa_id);

  let d1 = s.upsert_departamento("Ventas".into()).await.unwrap();
  let d2 = s.upsert_departamento("Ventas".into()).await.unwrap();
  assert_eq!(d1.departamento_id, d2.departamento_id);
  assert_eq!(s.list_departamentos().await.unwrap().len(), 1);
}

#[tokio::test]
async fn rename_empresa_onto_existing_name_is_rejected() {
  let s = store().await;
  let acme = s.upsert_empresa("Acme".into()).await.unwrap();
  s.upsert_empresa("Globex".into()).await.unwrap();

  let err = s
    .update_empresa(acme.empresa_id, "Globex".into())
    .await
    .unwrap_err();
  assert!(matches!(domain(err), contactos_core::Error::Validation(_)));

  let renamed = s
    .update_empresa(acme.empresa_id, "Acme Corp".into())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(renamed.nombre, "Acme Corp");
  assert!(s.update_empresa(999, "Nope".into()).await.unwrap().is_none());
}

// ─── Contacts ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_contacto_round_trips_every_field() {
  let s = store().await;
  s.upsert_estado(estado("TX", "Texas")).await.unwrap();

  let created = s.create_contacto(ana()).await.unwrap();
  let fetched = s
    .get_contacto("ana@example.com".into())
    .await
    .unwrap()
    .unwrap();

  assert_eq!(created, fetched);
  assert_eq!(fetched.email, "ana@example.com");
  assert_eq!(fetched.first_name, "Ana");
  assert_eq!(fetched.last_name, "Pérez");
  assert_eq!(fetched.empresa.as_deref(), Some("Acme"));
  assert_eq!(fetched.departamento.as_deref(), Some("Ventas"));
  assert_eq!(fetched.address.as_deref(), Some("100 Congress Ave"));
  assert_eq!(fetched.zip.as_deref(), Some("78701"));
  assert_eq!(fetched.ciudad.as_deref(), Some("Austin"));
  assert_eq!(fetched.estado.as_deref(), Some("TX"));
  assert_eq!(fetched.phone1.as_deref(), Some("512-555-0101"));
  assert_eq!(fetched.phone2.as_deref(), Some("512-555-0102"));
}

#[tokio::test]
async fn get_contacto_is_case_insensitive() {
  let s = store().await;
  s.upsert_estado(estado("TX", "Texas")).await.unwrap();
  s.create_contacto(ana()).await.unwrap();

  let found = s.get_contacto("ANA@EXAMPLE.COM".into()).await.unwrap();
  assert!(found.is_some());
  assert!(s.get_contacto("bob@example.com".into()).await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_email_conflicts_and_leaves_original_untouched() {
  let s = store().await;
  s.upsert_estado(estado("TX", "Texas")).await.unwrap();
  let original = s.create_contacto(ana()).await.unwrap();

  let mut dup = ana();
  dup.email = "ANA@example.COM".into();
  dup.first_name = "Impostor".into();
  dup.empresa = Some("Globex".into());
  let err = s.create_contacto(dup).await.unwrap_err();
  assert!(matches!(domain(err), contactos_core::Error::Conflict(_)));

  let after = s.get_contacto(original.email.clone()).await.unwrap().unwrap();
  assert_eq!(after, original);
  // The company upsert ran inside the rolled-back transaction.
  let empresas = s.list_empresas().await.unwrap();
  assert_eq!(empresas.len(), 1);
  assert_eq!(empresas[0].nombre, "Acme");
}

#[tokio::test]
async fn duplicate_email_conflicts_before_references_resolve() {
  let s = store().await;
  let mut first = ana();
  first.direccion = Direccion::default();
  s.create_contacto(first).await.unwrap();

  let mut dup = ana();
  dup.direccion.estado = Some("ZZ".into());
  let err = s.create_contacto(dup).await.unwrap_err();
  assert!(matches!(domain(err), contactos_core::Error::Conflict(_)));
  assert!(s.list_ciudades(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_state_aborts_the_whole_contact_write() {
  let s = store().await;

  let mut input = ana();
  input.direccion.estado = Some("ZZ".into());
  let err = s.create_contacto(input).await.unwrap_err();
  assert!(matches!(domain(err), contactos_core::Error::NotFound(_)));

  assert!(s.get_contacto("ana@example.com".into()).await.unwrap().is_none());
  assert!(s.get_direccion("ana@example.com".into()).await.unwrap().is_none());
  assert!(s.list_empresas().await.unwrap().is_empty());
  assert!(s.list_ciudades(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn contact_without_optional_fields() {
  let s = store().await;
  let created = s
    .create_contacto(ContactoInput {
      first_name:   "Bob".into(),
      last_name:    "Smith".into(),
      email:        "bob@example.com".into(),
      empresa:      None,
      departamento: Some("   ".into()),
      direccion:    Direccion::default(),
      phone1:       None,
      phone2:       None,
    })
    .await
    .unwrap();

  assert_eq!(created.empresa, None);
  assert_eq!(created.departamento, None);
  assert_eq!(created.address, None);
  assert_eq!(created.phone1, None);
  assert!(s.list_departamentos().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_with_only_phone1_drops_alterno() {
  let s = store().await;
  s.upsert_estado(estado("TX", "Texas")).await.unwrap();
  let created = s.create_contacto(ana()).await.unwrap();

  let mut replacement = ana();
  replacement.phone1 = Some("512-555-0199".into());
  replacement.phone2 = None;
  let updated = s
    .update_contacto("ana@example.com".into(), replacement)
    .await
    .unwrap();

  assert_eq!(updated.contacto_id, created.contacto_id);
  assert_eq!(updated.phone1.as_deref(), Some("512-555-0199"));
  assert_eq!(updated.phone2, None);
  assert!(updated.actualizado_en >= created.actualizado_en);
  assert_eq!(updated.creado_en, created.creado_en);

  let phones = s
    .list_telefonos("ana@example.com".into())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(phones.len(), 1);
  assert_eq!(phones[0].tipo, TipoTelefono::Principal);
}

#[tokio::test]
async fn update_replaces_fields_and_clears_address() {
  let s = store().await;
  s.upsert_estado(estado("TX", "Texas")).await.unwrap();
  s.create_contacto(ana()).await.unwrap();

  let mut replacement = ana();
  replacement.last_name = "García".into();
  replacement.empresa = None;
  replacement.direccion = Direccion::default();
  let updated = s
    .update_contacto("ANA@example.com".into(), replacement)
    .await
    .unwrap();

  assert_eq!(updated.last_name, "García");
  assert_eq!(updated.empresa, None);
  assert_eq!(updated.address, None);
  assert_eq!(updated.ciudad, None);
  assert_eq!(
    s.get_direccion("ana@example.com".into()).await.unwrap(),
    Some(Direccion::default())
  );
}

#[tokio::test]
async fn update_missing_contact_is_not_found() {
  let s = store().await;
  let mut input = ana();
  input.direccion = Direccion::default();
  let err = s
    .update_contacto("ana@example.com".into(), input)
    .await
    .unwrap_err();
  assert!(matches!(domain(err), contactos_core::Error::NotFound(_)));
}

#[tokio::test]
async fn update_rejects_mismatched_email() {
  let s = store().await;
  s.upsert_estado(estado("TX", "Texas")).await.unwrap();
  s.create_contacto(ana()).await.unwrap();

  let mut input = ana();
  input.email = "other@example.com".into();
  let err = s
    .update_contacto("ana@example.com".into(), input)
    .await
    .unwrap_err();
  assert!(matches!(domain(err), contactos_core::Error::Validation(_)));
}

#[tokio::test]
async fn list_contactos_pages_in_id_order() {
  let s = store().await;
  for i in 0..5 {
    s.create_contacto(ContactoInput {
      first_name:   format!("User{i}"),
      last_name:    "Test".into(),
      email:        format!("user{i}@example.com"),
      empresa:      None,
      departamento: None,
      direccion:    Direccion::default(),
      phone1:       None,
      phone2:       None,
    })
    .await
    .unwrap();
  }

  let first = s.list_contactos(Page { limit: 2, offset: 0 }).await.unwrap();
  let rest = s.list_contactos(Page { limit: 10, offset: 2 }).await.unwrap();

  assert_eq!(first.len(), 2);
  assert_eq!(rest.len(), 3);
  assert_eq!(first[0].email, "user0@example.com");
  assert_eq!(rest[0].email, "user2@example.com");
}

// ─── Standalone address & phone ──────────────────────────────────────────────

#[tokio::test]
async fn direccion_upsert_requires_contact() {
  let s = store().await;
  let err = s
    .upsert_direccion(DireccionInput {
      email:  "ghost@example.com".into(),
      fields: Direccion { address: Some("1 Main".into()), ..Default::default() },
    })
    .await
    .unwrap_err();
  assert!(matches!(domain(err), contactos_core::Error::NotFound(_)));
}

#[tokio::test]
async fn direccion_upsert_overwrites_the_single_row() {
  let s = store().await;
  s.upsert_estado(estado("TX", "Texas")).await.unwrap();
  s.create_contacto(ana()).await.unwrap();

  let dir = s
    .upsert_direccion(DireccionInput {
      email:  "ana@example.com".into(),
      fields: Direccion {
        address: Some("200 Lavaca St".into()),
        zip:     None,
        ciudad:  Some("Dallas".into()),
        estado:  Some("tx".into()),
      },
    })
    .await
    .unwrap();

  assert_eq!(dir.address.as_deref(), Some("200 Lavaca St"));
  assert_eq!(dir.zip, None);
  assert_eq!(dir.ciudad.as_deref(), Some("Dallas"));
  assert_eq!(dir.estado.as_deref(), Some("TX"));

  let view = s.get_contacto("ana@example.com".into()).await.unwrap().unwrap();
  assert_eq!(view.ciudad.as_deref(), Some("Dallas"));
  assert_eq!(s.list_ciudades(Some("TX".into())).await.unwrap().len(), 2);
}

#[tokio::test]
async fn telefono_upsert_by_slot() {
  let s = store().await;
  s.upsert_estado(estado("TX", "Texas")).await.unwrap();
  s.create_contacto(ana()).await.unwrap();

  s.upsert_telefono(TelefonoInput {
    email:  "ANA@example.com".into(),
    tipo:   TipoTelefono::Alterno,
    numero: "  512-555-0999 ".into(),
  })
  .await
  .unwrap();

  let phones = s
    .list_telefonos("ana@example.com".into())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(phones.len(), 2);
  let alterno = phones
    .iter()
    .find(|t| t.tipo == TipoTelefono::Alterno)
    .unwrap();
  assert_eq!(alterno.numero, "512-555-0999");

  assert!(s.list_telefonos("ghost@example.com".into()).await.unwrap().is_none());
}

#[tokio::test]
async fn telefono_rejects_short_numbers() {
  let s = store().await;
  let err = s
    .upsert_telefono(TelefonoInput {
      email:  "ana@example.com".into(),
      tipo:   TipoTelefono::Principal,
      numero: "123".into(),
    })
    .await
    .unwrap_err();
  assert!(matches!(domain(err), contactos_core::Error::Validation(_)));
}
