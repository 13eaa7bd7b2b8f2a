//! Contacts and their dependent rows (one address, up to two phones).
//!
//! The e-mail address is a contact's external identity. It is always
//! lower-cased before it reaches the store.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, validate};

// ─── Phones ──────────────────────────────────────────────────────────────────

/// The phone slot. A contact has at most one phone per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoTelefono {
  /// Filled from `phone1` in contact payloads.
  Principal,
  /// Filled from `phone2` in contact payloads.
  Alterno,
}

impl TipoTelefono {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Principal => "principal",
      Self::Alterno => "alterno",
    }
  }
}

impl fmt::Display for TipoTelefono {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for TipoTelefono {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "principal" => Ok(Self::Principal),
      "alterno" => Ok(Self::Alterno),
      other => Err(Error::validation(format!(
        "tipo must be 'principal' or 'alterno', got {other:?}"
      ))),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Telefono {
  pub tipo:   TipoTelefono,
  pub numero: String,
}

/// Input to [`crate::store::DirectoryStore::upsert_telefono`].
#[derive(Debug, Clone, Deserialize)]
pub struct TelefonoInput {
  pub email:  String,
  pub tipo:   TipoTelefono,
  pub numero: String,
}

impl TelefonoInput {
  pub fn normalize(self) -> Result<Self> {
    Ok(Self {
      email:  validate::email(&self.email)?,
      tipo:   self.tipo,
      numero: validate::numero(&self.numero)?,
    })
  }
}

// ─── Address ─────────────────────────────────────────────────────────────────

/// The address of a contact, with city and state resolved for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Direccion {
  pub address: Option<String>,
  pub zip:     Option<String>,
  pub ciudad:  Option<String>,
  /// Upper-case state code.
  pub estado:  Option<String>,
}

/// Input to [`crate::store::DirectoryStore::upsert_direccion`].
#[derive(Debug, Clone, Deserialize)]
pub struct DireccionInput {
  pub email:   String,
  #[serde(flatten)]
  pub fields:  Direccion,
}

impl DireccionInput {
  pub fn normalize(self) -> Result<Self> {
    Ok(Self {
      email:  validate::email(&self.email)?,
      fields: self.fields.normalize()?,
    })
  }
}

impl Direccion {
  /// Trim every field and validate the city/state pairing.
  pub fn normalize(self) -> Result<Self> {
    let ciudad = validate::optional(self.ciudad);
    let estado = validate::optional_codigo(self.estado)?;
    validate::city_needs_state(&ciudad, &estado)?;
    Ok(Self {
      address: validate::optional(self.address),
      zip: validate::optional(self.zip),
      ciudad,
      estado,
    })
  }

  pub fn is_empty(&self) -> bool {
    self.address.is_none()
      && self.zip.is_none()
      && self.ciudad.is_none()
      && self.estado.is_none()
  }
}

// ─── Contact ─────────────────────────────────────────────────────────────────

/// Payload for creating or fully replacing a contact.
///
/// Replacement is destructive: any phone field left out on update deletes the
/// stored phone in that slot, and leaving out every address field deletes the
/// address.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactoInput {
  pub first_name:   String,
  pub last_name:    String,
  pub email:        String,
  #[serde(default)]
  pub empresa:      Option<String>,
  #[serde(default)]
  pub departamento: Option<String>,
  #[serde(flatten)]
  pub direccion:    Direccion,
  /// Stored in the [`TipoTelefono::Principal`] slot.
  #[serde(default)]
  pub phone1:       Option<String>,
  /// Stored in the [`TipoTelefono::Alterno`] slot.
  #[serde(default)]
  pub phone2:       Option<String>,
}

impl ContactoInput {
  pub fn normalize(self) -> Result<Self> {
    Ok(Self {
      first_name:   validate::required("first_name", &self.first_name)?,
      last_name:    validate::required("last_name", &self.last_name)?,
      email:        validate::email(&self.email)?,
      empresa:      validate::optional(self.empresa),
      departamento: validate::optional(self.departamento),
      direccion:    self.direccion.normalize()?,
      phone1:       validate::optional_numero(self.phone1)?,
      phone2:       validate::optional_numero(self.phone2)?,
    })
  }

  /// The phones present in this payload, by slot.
  pub fn telefonos(&self) -> impl Iterator<Item = (TipoTelefono, &str)> + '_ {
    [
      (TipoTelefono::Principal, self.phone1.as_deref()),
      (TipoTelefono::Alterno, self.phone2.as_deref()),
    ]
    .into_iter()
    .filter_map(|(tipo, numero)| numero.map(|n| (tipo, n)))
  }
}

/// The flattened, read-only projection of a contact with every reference
/// resolved to its display value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactoView {
  pub contacto_id:    i64,
  pub first_name:     String,
  pub last_name:      String,
  pub email:          String,
  pub empresa:        Option<String>,
  pub departamento:   Option<String>,
  pub address:        Option<String>,
  pub zip:            Option<String>,
  pub ciudad:         Option<String>,
  pub estado:         Option<String>,
  pub phone1:         Option<String>,
  pub phone2:         Option<String>,
  pub creado_en:      DateTime<Utc>,
  pub actualizado_en: DateTime<Utc>,
}

// ─── Paging ──────────────────────────────────────────────────────────────────

/// Limit/offset window over the contact listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
  pub limit:  u32,
  pub offset: u32,
}

impl Default for Page {
  fn default() -> Self {
    Self { limit: validate::DEFAULT_LIMIT, offset: 0 }
  }
}

impl Page {
  pub fn new(limit: Option<u32>, offset: Option<u32>) -> Result<Self> {
    let limit = limit.unwrap_or(validate::DEFAULT_LIMIT);
    if limit == 0 || limit > validate::MAX_LIMIT {
      return Err(Error::validation(format!(
        "limit must be between 1 and {}",
        validate::MAX_LIMIT
      )));
    }
    Ok(Self { limit, offset: offset.unwrap_or(0) })
  }
}
