//! On-disk artifact writers invoked by `Cons::finalize`.
//!
//! Each submodule owns one artifact family, mirroring the reference encoder's `store_lexicons` /
//! `store_uuids` / `store_version` split (see `tdb_cons.c`).

pub mod lexicon;
pub mod metadata;
pub mod uuids;
