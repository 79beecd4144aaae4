//! The reader contract `append` needs on its source argument.
//!
//! The real reader — the component that opens a finalized, encoded database back up for
//! reading — is out of scope for this crate. `append` still needs *something* shaped like one to
//! pull trails from, so this module defines the minimal read surface it requires and implements
//! it directly on `Cons` itself: a constructor can always answer these questions about its own
//! not-yet-finalized state, which makes `append(&other_cons)` exercisable end to end without the
//! external reader ever existing.
//!
//! `trail_raw_items` reads back through the items arena's in-memory tail, so it only sees a
//! source's full history while that arena's buffered records haven't yet been flushed — i.e.
//! while the source has added fewer than `ITEMS_ARENA_INCREMENT` items since its last
//! opportunistic flush (see `Arena::add`). A source being used purely as an `append` donor before
//! its own `finalize` stays well within that window in every case this crate exercises.

use crate::cons::Cons;
use crate::item::{field_of, make_item, val_of, Field, Item, Timestamp, Uuid};

/// What `Cons::append` needs from its source: field metadata, per-field lexicons, and each
/// trail's raw item stream.
pub trait FinalizedSource {
  /// Total field count including the implicit field `0`, the timestamp. A source with
  /// `num_ofields` output fields reports `num_ofields + 1` here.
  fn num_fields(&self) -> usize;

  /// The name of field `field`, where `field` is in `[1, num_fields())`. Field `0` (the
  /// timestamp) has no name and is never queried this way.
  fn field_name(&self, field: usize) -> &str;

  /// The smallest timestamp recorded by any event in this source.
  fn min_timestamp(&self) -> Timestamp;

  /// Number of distinct trails.
  fn num_trails(&self) -> u64;

  /// The UUID of the `trail`-th trail, `trail` in `[0, num_trails())`.
  fn trail_uuid(&self, trail: u64) -> Uuid;

  /// Number of distinct values interned for output field `field`, `field` in `[0, num_ofields)`.
  fn lexicon_num_keys(&self, field: usize) -> u32;

  /// The bytes for value id `id` (1-based) of output field `field`.
  fn lexicon_value(&self, field: usize, id: u32) -> Option<&[u8]>;

  /// Every event window for `trail`, oldest first. Each window has `num_fields()` entries:
  /// index `0` is the raw timestamp (not item-packed), indices `1..num_fields()` are items
  /// packed via `make_item(field, val)`, with `val == 0` meaning null.
  fn trail_raw_items(&self, trail: u64) -> Vec<Vec<Item>>;
}

impl FinalizedSource for Cons {
  fn num_fields(&self) -> usize {
    self.num_ofields() + 1
  }

  fn field_name(&self, field: usize) -> &str {
    self.field_names()[field - 1].as_str()
  }

  fn min_timestamp(&self) -> Timestamp {
    self.min_timestamp()
  }

  fn num_trails(&self) -> u64 {
    self.trails().num_keys()
  }

  fn trail_uuid(&self, trail: u64) -> Uuid {
    let (uuid, _head) = self.trails().nth(trail).expect("trail index out of range");
    uuid.to_ne_bytes()
  }

  fn lexicon_num_keys(&self, field: usize) -> u32 {
    self.lexicons()[field].num_keys()
  }

  fn lexicon_value(&self, field: usize, id: u32) -> Option<&[u8]> {
    self.lexicons()[field].value(id)
  }

  fn trail_raw_items(&self, trail: u64) -> Vec<Vec<Item>> {
    let (_uuid, head) = self.trails().nth(trail).expect("trail index out of range");
    let num_ofields = self.num_ofields();

    // Chains are LIFO (newest event first); collect newest-first, then reverse into
    // chronological order.
    let mut windows = Vec::new();
    let mut cursor = head;
    while cursor != 0 {
      let event = *self.events().get(cursor).expect("dangling prev_event_idx");

      let mut window = vec![0u64; num_ofields + 1];
      window[0] = event.timestamp;
      for field in 1..=num_ofields {
        window[field] = make_item(field as Field, 0);
      }
      for i in 0..event.num_items as u64 {
        let item = *self
          .items()
          .get(event.item_zero + i)
          .expect("item arena has flushed past this event; see this module's doc comment");
        let field = field_of(item);
        if field != 0 {
          window[field as usize] = make_item(field, val_of(item));
        }
      }

      windows.push(window);
      cursor = event.prev_event_idx;
    }
    windows.reverse();
    windows
  }
}
