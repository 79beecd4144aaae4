//! Writes the `uuids` file: one 16-byte UUID per trail, in the trail index's fold order.
//!
//! Ported from the reference encoder's `store_uuids`. `MAX_NUM_TRAILS` exists so that
//! `num_trails * 16` cannot overflow a signed 64-bit file offset.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};
use crate::limits::MAX_NUM_TRAILS;
use crate::trail_index::TrailIndex;

pub fn store(trails: &TrailIndex, path: &Path) -> Result<()> {
  let num_trails = trails.num_keys();
  if num_trails > MAX_NUM_TRAILS {
    return Err(Error::TooManyTrails);
  }

  let mut file = File::create(path).map_err(Error::IoOpen)?;
  file.set_len(num_trails * 16).map_err(Error::IoTruncate)?;

  let mut write_err = None;
  trails.fold(|uuid, _head| {
    if write_err.is_some() {
      return;
    }
    // `Cons` packs the 16 raw UUID bytes into this `u128` via `from_ne_bytes`; unpacking with
    // `to_ne_bytes` here is what makes that reversible on the same platform.
    if let Err(e) = file.write_all(&uuid.to_ne_bytes()) {
      write_err = Some(e);
    }
  });
  if let Some(e) = write_err {
    return Err(Error::IoWrite(e));
  }

  Ok(())
}
