//! Error taxonomy for the constructor.
//!
//! A flat, closed enum rather than `Box<dyn std::error::Error>` or an opaque string, so callers
//! can match on the failure kind (`Error::ValueTooLong`, etc.). Modeled on the reference C
//! library's Rust binding, which exposes the same shape of enum for the equivalent FFI error
//! codes.

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum Error {
  /// Allocation failed, or a lexicon ran out of distinct value ids (`u32::MAX` per field).
  NoMem,
  /// Opening a file under the output directory failed.
  IoOpen(io::Error),
  /// Reading from a file (e.g. the flushed items temp file) failed.
  IoRead(io::Error),
  /// Writing to a file under the output directory failed.
  IoWrite(io::Error),
  /// Closing a file handle failed.
  IoClose(io::Error),
  /// Truncating/sizing a file failed.
  IoTruncate(io::Error),
  /// `open` was called on a constructor that was already opened.
  HandleAlreadyOpened,
  /// More field names were supplied than `MAX_NUM_FIELDS`.
  TooManyFields,
  /// Two or more field names were identical.
  DuplicateFields,
  /// A field name was empty, too long, contained an illegal byte, or was `"time"`.
  InvalidFieldname,
  /// A value passed to `add` exceeded `MAX_VALUE_SIZE`.
  ValueTooLong,
  /// The number of distinct trails exceeded `MAX_NUM_TRAILS`.
  TooManyTrails,
  /// A lexicon's serialized size exceeded `MAX_LEXICON_SIZE`.
  LexiconTooLarge,
  /// `append`'s source field count/names did not match this constructor's fields.
  AppendFieldsMismatch,
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Error::NoMem => write!(f, "out of memory"),
      Error::IoOpen(e) => write!(f, "failed to open file: {e}"),
      Error::IoRead(e) => write!(f, "failed to read file: {e}"),
      Error::IoWrite(e) => write!(f, "failed to write file: {e}"),
      Error::IoClose(e) => write!(f, "failed to close file: {e}"),
      Error::IoTruncate(e) => write!(f, "failed to truncate/size file: {e}"),
      Error::HandleAlreadyOpened => write!(f, "constructor was already opened"),
      Error::TooManyFields => write!(f, "too many fields"),
      Error::DuplicateFields => write!(f, "duplicate field names"),
      Error::InvalidFieldname => write!(f, "invalid field name"),
      Error::ValueTooLong => write!(f, "value exceeds the maximum allowed length"),
      Error::TooManyTrails => write!(f, "too many trails"),
      Error::LexiconTooLarge => write!(f, "lexicon exceeds the maximum allowed size"),
      Error::AppendFieldsMismatch => write!(f, "appended database's fields do not match"),
    }
  }
}

impl std::error::Error for Error {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Error::IoOpen(e) | Error::IoRead(e) | Error::IoWrite(e) | Error::IoClose(e) | Error::IoTruncate(e) => Some(e),
      _ => None,
    }
  }
}

pub type Result<T> = std::result::Result<T, Error>;
