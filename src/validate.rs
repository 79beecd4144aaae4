//! Field-name legality and duplicate detection (§4.I).

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::limits::{is_fieldname_char, MAX_FIELDNAME_LENGTH, MAX_NUM_FIELDS, RESERVED_FIELDNAME};

/// A single field name: non-empty, strictly shorter than `MAX_FIELDNAME_LENGTH`, every byte drawn
/// from `FIELDNAME_CHARS`, and not equal to `"time"`.
pub fn validate_fieldname(name: &str) -> Result<()> {
  if name == RESERVED_FIELDNAME {
    return Err(Error::InvalidFieldname);
  }
  if name.is_empty() || name.len() >= MAX_FIELDNAME_LENGTH {
    return Err(Error::InvalidFieldname);
  }
  if !name.bytes().all(is_fieldname_char) {
    return Err(Error::InvalidFieldname);
  }
  Ok(())
}

/// Validates the whole field-name list `open` is called with: count ceiling, per-name legality,
/// and pairwise distinctness.
pub fn validate_fieldnames(names: &[String]) -> Result<()> {
  if names.len() > MAX_NUM_FIELDS {
    return Err(Error::TooManyFields);
  }

  let mut seen = HashSet::with_capacity(names.len());
  for name in names {
    if !seen.insert(name.as_str()) {
      return Err(Error::DuplicateFields);
    }
  }

  for name in names {
    validate_fieldname(name)?;
  }

  Ok(())
}

#[cfg(test)]
mod __test__ {
  use super::*;

  #[test]
  fn accepts_plain_name() {
    assert!(validate_fieldname("username").is_ok());
  }

  #[test]
  fn rejects_reserved_time() {
    assert!(matches!(validate_fieldname("time"), Err(Error::InvalidFieldname)));
  }

  #[test]
  fn rejects_empty_name() {
    assert!(matches!(validate_fieldname(""), Err(Error::InvalidFieldname)));
  }

  #[test]
  fn rejects_illegal_byte() {
    assert!(matches!(validate_fieldname("user-name"), Err(Error::InvalidFieldname)));
  }

  #[test]
  fn accepts_name_at_max_length_minus_one() {
    let name = "a".repeat(MAX_FIELDNAME_LENGTH - 1);
    assert!(validate_fieldname(&name).is_ok());
  }

  #[test]
  fn rejects_name_at_max_length() {
    let name = "a".repeat(MAX_FIELDNAME_LENGTH);
    assert!(matches!(validate_fieldname(&name), Err(Error::InvalidFieldname)));
  }

  #[test]
  fn rejects_duplicate_fieldnames() {
    let names = vec!["x".to_string(), "x".to_string()];
    assert!(matches!(validate_fieldnames(&names), Err(Error::DuplicateFields)));
  }

  #[test]
  fn rejects_too_many_fields() {
    let names: Vec<String> = (0..MAX_NUM_FIELDS + 1).map(|i| format!("f{i}")).collect();
    assert!(matches!(validate_fieldnames(&names), Err(Error::TooManyFields)));
  }

  #[test]
  fn accepts_zero_fields() {
    assert!(validate_fieldnames(&[]).is_ok());
  }
}
