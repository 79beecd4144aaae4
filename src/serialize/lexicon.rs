//! Writes one `lexicon.<fieldname>` file per output field.
//!
//! Format (ported from the reference encoder's `lexicon_store`):
//! ```text
//! [ number of values N ]  4 or 8 bytes
//! [ value offsets ...  ]  N * (4 or 8 bytes)
//! [ last value offset  ]  4 or 8 bytes
//! [ values ...         ]  X bytes
//! ```
//! Offsets are relative to the start of the file and point at the first byte of each value; the
//! final offset (at index `N + 1`) marks the end of the last value, so a value's length is always
//! `offset[id + 1] - offset[id]`. The offset table uses 4-byte little-endian words unless the
//! total file size would overflow `u32`, in which case it widens to 8 bytes (mirroring the
//! reference encoder's threshold check against `UINT32_MAX`).

use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::{Error, Result};
use crate::limits::MAX_LEXICON_SIZE;
use crate::string_interner::Lexicon;

pub fn store(lexicon: &Lexicon, path: &Path) -> Result<()> {
  let count = lexicon.num_keys() as u64;

  let mut width: u64 = 4;
  let mut size = (count + 2) * 4 + lexicon.values_size();
  if size > u32::MAX as u64 {
    width = 8;
    size = (count + 2) * 8 + lexicon.values_size();
  }
  if size > MAX_LEXICON_SIZE {
    return Err(Error::LexiconTooLarge);
  }

  let mut file = File::create(path).map_err(Error::IoOpen)?;
  file.set_len(size).map_err(Error::IoTruncate)?;

  write_word(&mut file, 0, width, count)?;

  let mut offset = (count + 2) * width;
  let header_end = offset;
  let mut value_cursor = header_end;

  lexicon.fold(|id, bytes| {
    // Errors inside `fold`'s closure cannot propagate through its `FnMut` signature, so offset
    // writes here are infallible by construction: `size` was computed to fit every seek below.
    write_word(&mut file, id as u64 * width, width, value_cursor).expect("lexicon offset write");
    file.seek(SeekFrom::Start(value_cursor)).expect("lexicon value seek");
    file.write_all(bytes).expect("lexicon value write");
    value_cursor += bytes.len() as u64;
  });
  offset = value_cursor;

  write_word(&mut file, (count + 1) * width, width, offset)?;

  Ok(())
}

fn write_word(file: &mut File, at: u64, width: u64, value: u64) -> Result<()> {
  file.seek(SeekFrom::Start(at)).map_err(Error::IoWrite)?;
  if width == 4 {
    file.write_u32::<LittleEndian>(value as u32).map_err(Error::IoWrite)
  } else {
    file.write_u64::<LittleEndian>(value).map_err(Error::IoWrite)
  }
}
