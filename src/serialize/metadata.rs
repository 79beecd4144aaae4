//! Writes the `version` and `fields` files.
//!
//! Ported from the reference encoder's `store_version` (decimal text, no trailing newline) and
//! the per-field-name loop in `store_lexicons` (one name per line).

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};
use crate::limits::VERSION_LATEST;

pub fn store_version(path: &Path) -> Result<()> {
  let mut file = File::create(path).map_err(Error::IoOpen)?;
  write!(file, "{VERSION_LATEST}").map_err(Error::IoWrite)
}

pub fn store_fields(field_names: &[String], path: &Path) -> Result<()> {
  let mut file = File::create(path).map_err(Error::IoOpen)?;
  for name in field_names {
    writeln!(file, "{name}").map_err(Error::IoWrite)?;
  }
  Ok(())
}
