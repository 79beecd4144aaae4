//! The packed `(field, value-id)` item encoding and the small value types that travel alongside it.
//!
//! The item layout is an implementation decision local to this constructor, since the bijection
//! is otherwise the external encoder's business: the low 16 bits hold the 1-based field index,
//! the high 48 bits hold the value id. `field = 0` never occurs for a real item (fields are
//! 1-based); it is reserved for the zero-item end-of-event delimiter.

/// An opaque 16-byte subject identifier. Two UUIDs compare by raw bytes.
pub type Uuid = [u8; 16];

/// Event timestamp, caller-defined units (commonly Unix epoch seconds or milliseconds).
pub type Timestamp = u64;

/// A 1-based output field index.
pub type Field = u32;

/// A 1-based value id within one field's lexicon; `0` means "null".
pub type Val = u64;

/// A packed `(field, value-id)` pair.
pub type Item = u64;

const FIELD_BITS: u32 = 16;
const FIELD_MASK: u64 = (1 << FIELD_BITS) - 1;

/// Packs `field` and `val` into a single item. `make_item(f, 0)` is the null value for field `f`.
#[inline]
pub fn make_item(field: Field, val: Val) -> Item {
  debug_assert!((field as u64) <= FIELD_MASK, "field index does not fit in the item encoding");
  ((val << FIELD_BITS) | (field as u64 & FIELD_MASK)) as Item
}

/// Recovers the field index packed into `item`.
#[inline]
pub fn field_of(item: Item) -> Field {
  (item & FIELD_MASK) as Field
}

/// Recovers the value id packed into `item`.
#[inline]
pub fn val_of(item: Item) -> Val {
  item >> FIELD_BITS
}

/// `true` if `item` encodes the null value for its field.
#[inline]
pub fn is_null(item: Item) -> bool {
  val_of(item) == 0
}

#[cfg(test)]
mod __test__ {
  use super::*;

  #[test]
  fn roundtrips_field_and_val() {
    let item = make_item(7, 12345);
    assert_eq!(field_of(item), 7);
    assert_eq!(val_of(item), 12345);
    assert!(!is_null(item));
  }

  #[test]
  fn make_item_zero_val_is_null() {
    let item = make_item(3, 0);
    assert_eq!(field_of(item), 3);
    assert!(is_null(item));
  }

  #[test]
  fn large_field_and_val_survive_roundtrip() {
    let item = make_item(65535, (1u64 << 48) - 1);
    assert_eq!(field_of(item), 65535);
    assert_eq!(val_of(item), (1u64 << 48) - 1);
  }
}
