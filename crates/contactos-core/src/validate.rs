//! Field normalization shared by every write path.
//!
//! Every helper trims its input first. Required fields that end up empty are
//! rejected; optional fields that end up empty become `None`.

use crate::{Error, Result};

/// Minimum length of a phone number after trimming.
pub const MIN_NUMERO_LEN: usize = 5;

/// Largest page accepted by contact listings.
pub const MAX_LIMIT: u32 = 1000;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_LIMIT: u32 = 20;

/// Lower-case and sanity-check an e-mail address.
pub fn email(raw: &str) -> Result<String> {
  let email = raw.trim().to_lowercase();
  let invalid = || Error::validation(format!("invalid email: {raw:?}"));

  if email.chars().any(char::is_whitespace) {
    return Err(invalid());
  }
  let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
  if local.is_empty() || domain.contains('@') {
    return Err(invalid());
  }
  let labels_ok = domain.contains('.')
    && domain.split('.').all(|label| !label.is_empty());
  if !labels_ok {
    return Err(invalid());
  }
  Ok(email)
}

/// Upper-case a two-letter state code.
pub fn codigo(raw: &str) -> Result<String> {
  let code = raw.trim();
  if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
    return Err(Error::validation(format!(
      "state code must be two letters, got {raw:?}"
    )));
  }
  Ok(code.to_ascii_uppercase())
}

/// A required, non-blank text field.
pub fn required(field: &str, raw: &str) -> Result<String> {
  let value = raw.trim();
  if value.is_empty() {
    return Err(Error::validation(format!("{field} must not be empty")));
  }
  Ok(value.to_owned())
}

/// An optional text field; blank collapses to `None`.
pub fn optional(raw: Option<String>) -> Option<String> {
  raw
    .map(|s| s.trim().to_owned())
    .filter(|s| !s.is_empty())
}

/// A phone number.
pub fn numero(raw: &str) -> Result<String> {
  let value = raw.trim();
  if value.chars().count() < MIN_NUMERO_LEN {
    return Err(Error::validation(format!(
      "phone number must have at least {MIN_NUMERO_LEN} characters"
    )));
  }
  Ok(value.to_owned())
}

/// An optional two-letter state code.
pub fn optional_codigo(raw: Option<String>) -> Result<Option<String>> {
  optional(raw).as_deref().map(codigo).transpose()
}

/// An optional phone number.
pub fn optional_numero(raw: Option<String>) -> Result<Option<String>> {
  optional(raw).as_deref().map(numero).transpose()
}

/// A city is only meaningful together with its state.
pub fn city_needs_state(
  ciudad: &Option<String>,
  estado: &Option<String>,
) -> Result<()> {
  if ciudad.is_some() && estado.is_none() {
    return Err(Error::validation("ciudad requires estado"));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn email_is_lowercased_and_trimmed() {
    assert_eq!(email("  A@Example.com ").unwrap(), "a@example.com");
  }

  #[test]
  fn email_rejects_garbage() {
    for bad in ["", "plain", "@example.com", "a@", "a@b", "a@@b.com", "a b@c.com", "a@b..com"] {
      assert!(
        matches!(email(bad), Err(Error::Validation(_))),
        "accepted {bad:?}"
      );
    }
  }

  #[test]
  fn codigo_is_uppercased() {
    assert_eq!(codigo("tx").unwrap(), "TX");
    assert_eq!(codigo(" Nl ").unwrap(), "NL");
  }

  #[test]
  fn codigo_must_be_two_letters() {
    for bad in ["", "T", "TXS", "T1", "ñx"] {
      assert!(codigo(bad).is_err(), "accepted {bad:?}");
    }
  }

  #[test]
  fn blank_optional_is_none() {
    assert_eq!(optional(Some("   ".into())), None);
    assert_eq!(optional(Some(" Acme ".into())), Some("Acme".into()));
    assert_eq!(optional(None), None);
  }

  #[test]
  fn numero_minimum_length() {
    assert!(numero("1234").is_err());
    assert_eq!(numero(" 55-1234 ").unwrap(), "55-1234");
  }

  #[test]
  fn city_without_state_is_rejected() {
    assert!(city_needs_state(&Some("Austin".into()), &None).is_err());
    assert!(city_needs_state(&None, &Some("TX".into())).is_ok());
  }
}
