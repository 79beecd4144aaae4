//! The trail database constructor.
//!
//! Owns everything a writer session needs: the items and events arenas, the trail index, one
//! lexicon per output field, and the pending output directory. Mirrors the reference engine's
//! `tdb_cons` lifecycle (`init` / `open` / repeated `add` or `append` / `finalize` or `close`),
//! realized as a struct that starts unopened and is opened exactly once.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument, trace};

use crate::arena::Arena;
use crate::cons_event::ConsEvent;
use crate::encoder::Encoder;
use crate::error::{Error, Result};
use crate::item::{make_item, val_of, Field, Item, Timestamp, Uuid, Val};
use crate::limits::{EVENTS_ARENA_INCREMENT, ITEMS_ARENA_INCREMENT, MAX_VALUE_SIZE};
use crate::serialize::{lexicon as lexicon_serializer, metadata, uuids as uuids_serializer};
use crate::source::FinalizedSource;
use crate::string_interner::Lexicon;
use crate::trail_index::TrailIndex;
use crate::validate::validate_fieldnames;

/// A trail database under construction. Not yet opened (see `open`) cannot usefully be used for
/// anything but being opened.
pub struct Cons {
  opened: bool,
  root: PathBuf,
  field_names: Vec<String>,
  events: Arena<ConsEvent>,
  items: Arena<Item>,
  // Kept alive only so the backing temp file is unlinked when the constructor is dropped,
  // whether or not `finalize` ran to completion. Not read directly; `items` owns the open
  // `File` handle used for writes and the later read-only mmap.
  items_tempfile: Option<tempfile::TempPath>,
  trails: TrailIndex,
  lexicons: Vec<Lexicon>,
  min_timestamp: Timestamp,
}

impl Cons {
  /// Creates an unopened constructor. Call `open` before `add`/`append`/`finalize`.
  pub fn init() -> Self {
    Self {
      opened: false,
      root: PathBuf::new(),
      field_names: Vec::new(),
      events: Arena::new(EVENTS_ARENA_INCREMENT),
      items: Arena::new(ITEMS_ARENA_INCREMENT),
      items_tempfile: None,
      trails: TrailIndex::new(),
      lexicons: Vec::new(),
      min_timestamp: Timestamp::MAX,
    }
  }

  /// Configures the output directory and output field names. May be called only once per
  /// constructor; a second call returns `Error::HandleAlreadyOpened`.
  #[instrument(skip(self), fields(root = %root.as_ref().display(), num_fields = field_names.len()))]
  pub fn open(&mut self, root: impl AsRef<Path>, field_names: &[String]) -> Result<()> {
    if self.opened {
      return Err(Error::HandleAlreadyOpened);
    }
    validate_fieldnames(field_names)?;

    let root = root.as_ref();
    // Opportunistic: we don't care whether the directory already existed.
    let _ = fs::create_dir_all(root);

    let named = tempfile::Builder::new()
      .prefix("tmp.items.")
      .tempfile_in(root)
      .map_err(Error::IoOpen)?;
    let (file, temp_path) = named.into_parts();

    self.root = root.to_path_buf();
    self.field_names = field_names.to_vec();
    self.items = Arena::from_file(ITEMS_ARENA_INCREMENT, file);
    self.items_tempfile = Some(temp_path);
    self.lexicons = (0..field_names.len()).map(|_| Lexicon::new()).collect();
    self.opened = true;

    info!(num_fields = field_names.len(), "opened trail database constructor");
    Ok(())
  }

  #[inline]
  pub fn num_ofields(&self) -> usize {
    self.field_names.len()
  }

  #[inline]
  pub fn field_names(&self) -> &[String] {
    &self.field_names
  }

  #[inline]
  pub fn min_timestamp(&self) -> Timestamp {
    self.min_timestamp
  }

  #[inline]
  pub fn num_trails(&self) -> u64 {
    self.trails.num_keys()
  }

  pub(crate) fn trails(&self) -> &TrailIndex {
    &self.trails
  }

  pub(crate) fn lexicons(&self) -> &[Lexicon] {
    &self.lexicons
  }

  pub(crate) fn events(&self) -> &Arena<ConsEvent> {
    &self.events
  }

  pub(crate) fn items(&self) -> &Arena<Item> {
    &self.items
  }

  /// Records one event. `values[i]` is the raw bytes for output field `i`; an empty slice means
  /// null. `values` must have exactly `num_ofields()` entries.
  #[instrument(skip(self, values), fields(num_values = values.len()))]
  pub fn add(&mut self, uuid: Uuid, timestamp: Timestamp, values: &[&[u8]]) -> Result<()> {
    debug_assert_eq!(values.len(), self.field_names.len(), "values must match the field count open() was called with");

    for v in values {
      if v.len() as u64 > MAX_VALUE_SIZE {
        return Err(Error::ValueTooLong);
      }
    }

    let uuid_key = u128::from_ne_bytes(uuid);
    let prev_slot = self.trails.insert(uuid_key);
    let prev_event_idx = *prev_slot;

    let item_zero = self.items.len() + 1;
    let mut num_items = 0u32;
    for (i, v) in values.iter().enumerate() {
      let field = (i + 1) as Field;
      let val: Val = if v.is_empty() { 0 } else { self.lexicons[i].insert(v)? as Val };
      self.items.add(make_item(field, val))?;
      // every field counts, including nulls: this replicates the reference engine's
      // tdb_cons_add exactly (see the asymmetry with append below).
      num_items += 1;
    }

    let event = ConsEvent { item_zero, num_items, timestamp, prev_event_idx };
    let event_idx = self.events.add(event)?;
    *prev_slot = event_idx;

    if timestamp < self.min_timestamp {
      self.min_timestamp = timestamp;
    }

    Ok(())
  }

  /// Appends every trail in `other` to this constructor, translating `other`'s per-field value
  /// ids into this constructor's lexicons. `other`'s fields (after its implicit field 0, the
  /// timestamp) must match this constructor's output fields positionally, by name, or this
  /// returns `Error::AppendFieldsMismatch`.
  #[instrument(skip(self, other))]
  pub fn append(&mut self, other: &dyn FinalizedSource) -> Result<()> {
    let num_ofields = self.field_names.len();
    if other.num_fields() != num_ofields + 1 {
      return Err(Error::AppendFieldsMismatch);
    }
    for field in 0..num_ofields {
      if self.field_names[field] != other.field_name(field + 1) {
        return Err(Error::AppendFieldsMismatch);
      }
    }

    if other.min_timestamp() < self.min_timestamp {
      self.min_timestamp = other.min_timestamp();
    }

    // Translate each of `other`'s per-field value ids into this constructor's lexicons up
    // front, the same way the reference engine's append_lexicons does, so the per-trail loop
    // below only ever does an array lookup rather than a second interning pass per item.
    let mut lexicon_maps: Vec<Vec<Val>> = Vec::with_capacity(num_ofields);
    for field in 0..num_ofields {
      let n = other.lexicon_num_keys(field);
      let mut map = Vec::with_capacity(n as usize);
      for id in 1..=n {
        let bytes = other.lexicon_value(field, id).expect("lexicon id out of range");
        map.push(self.lexicons[field].insert(bytes)? as Val);
      }
      lexicon_maps.push(map);
    }

    for trail in 0..other.num_trails() {
      let uuid_key = u128::from_ne_bytes(other.trail_uuid(trail));
      let prev_slot = self.trails.insert(uuid_key);
      let mut prev_event_idx = *prev_slot;

      for window in other.trail_raw_items(trail) {
        let timestamp = window[0];
        let item_zero = self.items.len() + 1;
        let mut num_items = 0u32;
        for field in 1..=num_ofields {
          let val = val_of(window[field]);
          if val != 0 {
            let translated = lexicon_maps[field - 1][(val - 1) as usize];
            self.items.add(make_item(field as Field, translated))?;
            num_items += 1;
          }
        }

        let event = ConsEvent { item_zero, num_items, timestamp, prev_event_idx };
        prev_event_idx = self.events.add(event)?;
      }

      *prev_slot = prev_event_idx;
    }

    trace!(num_trails = other.num_trails(), "appended source into constructor");
    Ok(())
  }

  /// Flushes the items arena, writes `lexicon.*`/`fields`/`uuids`/`version`, then hands the
  /// encoder the mapped item stream. Consumes the constructor: there is nothing useful left to
  /// do with it afterwards.
  #[instrument(skip(self, encoder))]
  pub fn finalize(mut self, encoder: &mut dyn Encoder) -> Result<()> {
    self.items.flush()?;
    let mmap = std::mem::replace(&mut self.items, Arena::new(0)).into_mmap()?;
    let mapped_items: &[Item] = match &mmap {
      Some(mmap) => unsafe { crate::arena::mmap_as_slice(mmap) },
      None => &[],
    };

    for (i, name) in self.field_names.iter().enumerate() {
      let path = self.root.join(format!("lexicon.{name}"));
      lexicon_serializer::store(&self.lexicons[i], &path)?;
    }
    metadata::store_fields(&self.field_names, &self.root.join("fields"))?;
    uuids_serializer::store(&self.trails, &self.root.join("uuids"))?;
    metadata::store_version(&self.root.join("version"))?;

    encoder.encode(&self, mapped_items)?;

    info!(num_trails = self.trails.num_keys(), num_events = self.events.len(), "finalized trail database");
    Ok(())
  }

  /// Discards the constructor without finalizing. Equivalent to dropping it; kept as an
  /// explicit, named call site for callers that want to make the intent visible.
  pub fn close(self) {}
}

#[cfg(test)]
mod __test__ {
  use super::*;
  use crate::encoder::NoopEncoder;

  #[test]
  fn num_items_counts_every_field_on_add_but_only_non_null_on_append() {
    let dir_source = tempfile::tempdir().unwrap();
    let mut source = Cons::init();
    source.open(dir_source.path(), &["user".to_string(), "action".to_string()]).unwrap();
    source.add([1u8; 16], 10, &[b"alice", b""]).unwrap();

    let source_event = *source.events().get(1).unwrap();
    assert_eq!(source_event.num_items, 2, "add must count every field, including the null `action`");

    let dir_dest = tempfile::tempdir().unwrap();
    let mut dest = Cons::init();
    dest.open(dir_dest.path(), &["user".to_string(), "action".to_string()]).unwrap();
    dest.append(&source).unwrap();

    let dest_event = *dest.events().get(1).unwrap();
    assert_eq!(dest_event.num_items, 1, "append must count only the non-null `user` item");

    source.finalize(&mut NoopEncoder).unwrap();
    dest.finalize(&mut NoopEncoder).unwrap();
  }
}
