//! Size ceilings and other compile-time constants shared across the constructor.
//!
//! Mirrors the `TDB_MAX_*` family of constants in the reference engine. `MAX_NUM_FIELDS`,
//! `MAX_VALUE_SIZE`, `MAX_LEXICON_SIZE`, and `MAX_FIELDNAME_LENGTH` are tunable ceilings; the
//! values below are this implementation's concrete defaults (see DESIGN.md).

/// Maximum number of output fields a single constructor may be opened with.
pub const MAX_NUM_FIELDS: usize = 4096;

/// Maximum number of trails (distinct UUIDs), chosen so `|trails| * 16 <= i64::MAX`.
pub const MAX_NUM_TRAILS: u64 = (1u64 << 59) - 1;

/// Maximum length, in bytes, of a single field value passed to `add`.
pub const MAX_VALUE_SIZE: u64 = 62_500_000;

/// Maximum serialized size, in bytes, of any one field's lexicon file.
pub const MAX_LEXICON_SIZE: u64 = 1 << 34;

/// Maximum length, in bytes, of a field name (the name itself must be strictly shorter).
pub const MAX_FIELDNAME_LENGTH: usize = 512;

/// Legal characters in a field name: ASCII letters, digits, and underscore.
pub fn is_fieldname_char(byte: u8) -> bool {
  byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Field name reserved for the implicit timestamp column.
pub const RESERVED_FIELDNAME: &str = "time";

/// Latest on-disk format version written by `store_version`.
pub const VERSION_LATEST: u64 = 1;

/// Growth increment, in records, for the events arena.
pub const EVENTS_ARENA_INCREMENT: usize = 1_000_000;

/// Growth increment, in records, for the items arena.
pub const ITEMS_ARENA_INCREMENT: usize = 1_000_000;
