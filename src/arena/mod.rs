//! Append-only buffer of fixed-size records, optionally spilling to a backing file.
//!
//! An unbounded append-only arena with stable, never-invalidated indices: growth never moves a
//! record once it has been handed an index, so `prev_event_idx`-style back-references into the
//! same arena stay valid across further `add` calls.

mod __test__;

use std::fs::File;
use std::io::Write;
use std::path::Path;

use memmap2::Mmap;

use crate::error::{Error, Result};

/// An append-only buffer of `T` records. Items are assigned a stable 1-based index on insertion
/// (see the per-UUID chain convention in the data model: index `0` doubles as "no prior event").
pub struct Arena<T: Copy> {
  buf: Vec<T>,
  /// Total records ever added, including ones already flushed to the backing file.
  next: u64,
  /// Records flushed to `file` so far; `buf` holds only the unflushed tail.
  flushed: u64,
  increment: usize,
  file: Option<File>,
}

impl<T: Copy> Arena<T> {
  /// Creates an in-memory-only arena. `flush` is then a no-op.
  pub fn new(increment: usize) -> Self {
    Self {
      buf: Vec::with_capacity(increment.min(1024)),
      next: 0,
      flushed: 0,
      increment,
      file: None,
    }
  }

  /// Creates an arena backed by a freshly created, truncated file at `path`.
  pub fn with_backing_file(increment: usize, path: &Path) -> Result<Self> {
    let file = File::create(path).map_err(Error::IoOpen)?;
    Ok(Self::from_file(increment, file))
  }

  /// Creates an arena backed by an already-open, empty file (e.g. a named temp file whose
  /// lifetime the caller manages separately).
  pub fn from_file(increment: usize, file: File) -> Self {
    Self {
      buf: Vec::with_capacity(increment.min(1024)),
      next: 0,
      flushed: 0,
      increment,
      file: Some(file),
    }
  }

  /// Appends `record`, returning its stable 1-based index.
  ///
  /// The abstract arena contract hands back a writable slot for the caller to fill in; the
  /// safe-Rust realization instead takes the fully constructed record and pushes it, which is
  /// semantically equivalent here since no caller retains a slot reference across a second
  /// `add` call.
  ///
  /// File-backed arenas flush opportunistically once the in-memory buffer reaches `increment`,
  /// so a dataset that exceeds available memory never has to sit in `buf` in full — the whole
  /// point of giving the arena a backing file in the first place. In-memory-only arenas never
  /// flush here; they must fit in memory for their whole lifetime regardless.
  pub fn add(&mut self, record: T) -> Result<u64> {
    if self.buf.len() == self.buf.capacity() && self.buf.capacity() > 0 {
      self.buf.reserve(self.increment);
    }
    self.buf.push(record);
    self.next += 1;
    if self.file.is_some() && self.buf.len() >= self.increment {
      self.flush()?;
    }
    Ok(self.next)
  }

  /// Total number of records ever added.
  #[inline]
  pub fn len(&self) -> u64 {
    self.next
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.next == 0
  }

  /// Total serialized byte length the arena would occupy once fully flushed.
  #[inline]
  pub fn byte_len(&self) -> u64 {
    self.next * std::mem::size_of::<T>() as u64
  }

  /// Looks up a record by its stable 1-based index, if it is still in the in-memory tail (i.e.
  /// has not yet been flushed, opportunistically or otherwise). Used by the in-memory reader
  /// contract implementation; callers relying on it to see the whole history of a file-backed
  /// arena must do so before that arena has grown past one `increment` of records.
  pub fn get(&self, index: u64) -> Option<&T> {
    let zero_based = index.checked_sub(self.flushed + 1)?;
    self.buf.get(zero_based as usize)
  }

  /// The unflushed in-memory tail, in insertion order.
  #[inline]
  pub fn as_slice(&self) -> &[T] {
    &self.buf
  }

  /// Writes the current in-memory tail to the backing file (if any) and clears it.
  ///
  /// A no-op for arenas with no backing file (they must fit in memory for their whole
  /// lifetime) and for arenas with nothing buffered.
  pub fn flush(&mut self) -> Result<()> {
    let Some(file) = self.file.as_mut() else {
      return Ok(());
    };
    if self.buf.is_empty() {
      return Ok(());
    }

    // SAFETY: T: Copy is Sized with a fixed, well-defined layout; we only ever read these bytes
    // back through the same T in `into_mmap`'s consumers, on the same platform that wrote them.
    let bytes: &[u8] = unsafe {
      std::slice::from_raw_parts(self.buf.as_ptr() as *const u8, std::mem::size_of_val(self.buf.as_slice()))
    };
    file.write_all(bytes).map_err(Error::IoWrite)?;
    self.flushed += self.buf.len() as u64;
    self.buf.clear();
    Ok(())
  }

  /// Consumes a file-backed, already-flushed arena and memory-maps it read-only.
  ///
  /// Returns `Ok(None)` if the arena is empty — nothing to map. Panics (via `expect`) if called
  /// on an arena with unflushed records or no backing file, since that indicates a caller bug in
  /// the finalize sequencing rather than a recoverable runtime error.
  pub fn into_mmap(mut self) -> Result<Option<Mmap>> {
    assert!(self.buf.is_empty(), "into_mmap called with unflushed records buffered");
    let Some(file) = self.file.take() else {
      panic!("into_mmap called on an arena with no backing file");
    };
    if self.flushed == 0 {
      return Ok(None);
    }
    // SAFETY: the file was exclusively written by `flush` above and is not concurrently
    // modified by any other process for the duration of this mapping (single-writer, §5).
    let mmap = unsafe { Mmap::map(&file) }.map_err(Error::IoRead)?;
    Ok(Some(mmap))
  }
}

/// Reinterprets a read-only mapped byte region as a slice of `T`.
///
/// # Safety
/// `bytes` must have been produced by flushing an `Arena<T>` of the same `T` on a
/// compatible platform (no cross-endian/cross-width reuse).
pub unsafe fn mmap_as_slice<T: Copy>(bytes: &[u8]) -> &[T] {
  let count = bytes.len() / std::mem::size_of::<T>();
  std::slice::from_raw_parts(bytes.as_ptr() as *const T, count)
}
