//! The external encoder contract.
//!
//! The encoder — the component that compresses the mapped item stream into the packed trail
//! file (`trails.data`/`trails.toc`) — is explicitly out of scope for this crate (see
//! SPEC_FULL.md §1). `finalize` only needs *a* call site with the right shape to hand off to;
//! that shape is this trait.

use crate::cons::Cons;
use crate::error::Result;
use crate::item::Item;

/// Invoked by `Cons::finalize` once the lexicons, uuids, and version files have been written.
pub trait Encoder {
  /// `mapped_items` is the read-only view of the flushed items arena (empty if there were no
  /// events or no fields — see `Cons::finalize`).
  fn encode(&mut self, cons: &Cons, mapped_items: &[Item]) -> Result<()>;
}

/// An encoder that does nothing. Useful for exercising the constructor's own on-disk artifacts
/// (`version`, `fields`, `lexicon.*`, `uuids`) in isolation, since the packed trail file itself
/// is produced by a real encoder this crate does not implement.
#[derive(Debug, Default)]
pub struct NoopEncoder;

impl Encoder for NoopEncoder {
  fn encode(&mut self, _cons: &Cons, _mapped_items: &[Item]) -> Result<()> {
    Ok(())
  }
}
