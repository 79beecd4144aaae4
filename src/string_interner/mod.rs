//! # String Interner (lexicon)
//!
//! Per-field injective mapping from value bytes to a dense 1-based id, the on-disk unit the
//! lexicon serializer (`crate::serialize::lexicon`) turns into `lexicon.<fieldname>`.
//!
//! One generic per-field interner with no thread-local caching tier: the constructor is
//! single-threaded, so there is no contended path for a cache to amortize. The lookup table is
//! keyed on the value bytes themselves (`HashMap<Box<[u8]>, u32>`) rather than on a hash alone,
//! so two distinct values can never be treated as equal because of a hash collision.

mod __test__;

use std::collections::HashMap;

use crate::error::{Error, Result};

/// A per-field string interner. Ids are 1-based so that `0` is free to mean "null" at the item
/// layer (see `crate::item::make_item`).
#[derive(Debug, Default)]
pub struct Lexicon {
  /// Values in id order: `values[0]` is id `1`, etc.
  values: Vec<Box<[u8]>>,
  lookup: HashMap<Box<[u8]>, u32>,
  values_size: u64,
}

impl Lexicon {
  pub fn new() -> Self {
    Self::default()
  }

  /// Interns `bytes`, returning its 1-based id. Duplicate inserts return the existing id.
  ///
  /// `bytes` must be non-empty — callers treat an empty value as the null id `0` and must not
  /// pass it here (see `crate::cons::Cons::add`).
  pub fn insert(&mut self, bytes: &[u8]) -> Result<u32> {
    debug_assert!(!bytes.is_empty(), "the empty value must never be interned");

    if let Some(&id) = self.lookup.get(bytes) {
      return Ok(id);
    }

    let next_id = self.values.len() as u32 + 1;
    if next_id == u32::MAX {
      return Err(Error::NoMem);
    }

    let boxed: Box<[u8]> = bytes.into();
    self.values.push(boxed.clone());
    self.lookup.insert(boxed, next_id);
    self.values_size += bytes.len() as u64;

    Ok(next_id)
  }

  /// Number of distinct values interned so far (`N`, the lexicon's key count).
  #[inline]
  pub fn num_keys(&self) -> u32 {
    self.values.len() as u32
  }

  /// Sum of the byte lengths of every interned value.
  #[inline]
  pub fn values_size(&self) -> u64 {
    self.values_size
  }

  /// Looks up the bytes for a 1-based id previously returned by `insert`.
  pub fn value(&self, id: u32) -> Option<&[u8]> {
    id.checked_sub(1).and_then(|idx| self.values.get(idx as usize)).map(|b| &**b)
  }

  /// Invokes `f(id, bytes)` once for every id in `[1, N]`, in id order.
  ///
  /// Id order is a valid choice under the "unspecified but deterministic" fold contract, and is
  /// exactly what the lexicon serializer's offset-table write relies on visiting every id once.
  pub fn fold<F: FnMut(u32, &[u8])>(&self, mut f: F) {
    for (idx, value) in self.values.iter().enumerate() {
      f(idx as u32 + 1, value);
    }
  }
}
