//! The per-event record stored in the events arena.

use crate::item::Timestamp;

/// One event in a UUID's chain. `prev_event_idx == 0` marks the first event in the chain (the
/// arena's stable indices are 1-based, so index `0` can never be a real event).
#[derive(Debug, Clone, Copy)]
pub struct ConsEvent {
  /// Index into the items arena of this event's first item.
  pub item_zero: u64,
  /// Count of items written for this event. `add` counts every field (including null ones);
  /// `append` counts only non-null items — the documented asymmetry inherited from the
  /// reference engine (see SPEC_FULL.md §4.D and DESIGN.md's open-question resolution).
  pub num_items: u32,
  pub timestamp: Timestamp,
  pub prev_event_idx: u64,
}
