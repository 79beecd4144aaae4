//! A constructor (writer) for immutable, compact on-disk trail databases.
//!
//! A trail database groups events by a 128-bit UUID subject into chronologically ordered,
//! append-only "trails". This crate builds one: string-interning every field value into a
//! per-field lexicon, chaining each UUID's events through an arena, and finally serializing the
//! lexicons, UUID index, and field metadata to disk. The packed item stream handed to
//! [`Encoder::encode`] at the end of [`Cons::finalize`] is this crate's last responsibility; the
//! encoder that turns it into the queryable, packed trail file is a separate concern.
//!
//! ```no_run
//! use traildb_cons::cons::Cons;
//! use traildb_cons::encoder::NoopEncoder;
//!
//! let mut cons = Cons::init();
//! cons.open("/tmp/my.tdb", &["user".to_string(), "action".to_string()])?;
//! cons.add([0u8; 16], 1_700_000_000, &[b"alice", b"login"])?;
//! cons.finalize(&mut NoopEncoder)?;
//! # Ok::<(), traildb_cons::error::Error>(())
//! ```

pub mod arena;
pub mod cons;
pub mod cons_event;
pub mod encoder;
pub mod error;
pub mod item;
pub mod limits;
pub mod serialize;
pub mod source;
pub mod string_interner;
pub mod trail_index;
pub mod validate;

pub use cons::Cons;
pub use encoder::{Encoder, NoopEncoder};
pub use error::{Error, Result};
pub use source::FinalizedSource;
