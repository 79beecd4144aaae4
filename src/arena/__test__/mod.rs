#[cfg(test)]
mod __test__ {
  use crate::arena::{mmap_as_slice, Arena};
  use tempfile::tempdir;

  #[test]
  fn add_returns_stable_1_based_indices() {
    let mut arena: Arena<u64> = Arena::new(4);
    assert_eq!(arena.add(10).unwrap(), 1);
    assert_eq!(arena.add(20).unwrap(), 2);
    assert_eq!(arena.add(30).unwrap(), 3);
    assert_eq!(arena.len(), 3);
  }

  #[test]
  fn in_memory_arena_flush_is_noop() {
    let mut arena: Arena<u64> = Arena::new(4);
    arena.add(1).unwrap();
    arena.flush().unwrap();
    assert_eq!(arena.len(), 1);
  }

  #[test]
  fn empty_backed_arena_maps_to_none() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("items");
    let mut arena: Arena<u64> = Arena::with_backing_file(4, &path).unwrap();
    arena.flush().unwrap();
    assert!(arena.into_mmap().unwrap().is_none());
  }

  #[test]
  fn flush_then_mmap_round_trips_records() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("items");
    let mut arena: Arena<u64> = Arena::with_backing_file(2, &path).unwrap();
    for v in [11u64, 22, 33, 44, 55] {
      arena.add(v).unwrap();
    }
    arena.flush().unwrap();
    let mmap = arena.into_mmap().unwrap().expect("non-empty arena maps");
    let slice: &[u64] = unsafe { mmap_as_slice(&mmap) };
    assert_eq!(slice, &[11, 22, 33, 44, 55]);
  }

  #[test]
  fn get_reads_back_unflushed_records_by_1_based_index() {
    let mut arena: Arena<u64> = Arena::new(4);
    arena.add(10).unwrap();
    arena.add(20).unwrap();
    assert_eq!(arena.get(1), Some(&10));
    assert_eq!(arena.get(2), Some(&20));
    assert_eq!(arena.get(3), None);
    assert_eq!(arena.as_slice(), &[10, 20]);
  }

  #[test]
  fn get_returns_none_for_flushed_records() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("items");
    let mut arena: Arena<u64> = Arena::with_backing_file(2, &path).unwrap();
    arena.add(1).unwrap();
    arena.flush().unwrap();
    arena.add(2).unwrap();
    // index 1 was flushed out of the in-memory tail; only index 2 remains resident.
    assert_eq!(arena.get(1), None);
    assert_eq!(arena.get(2), Some(&2));
  }

  #[test]
  fn flush_is_incremental() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("items");
    let mut arena: Arena<u64> = Arena::with_backing_file(3, &path).unwrap();
    arena.add(1).unwrap();
    arena.add(2).unwrap();
    arena.flush().unwrap();
    arena.add(3).unwrap();
    arena.flush().unwrap();
    let mmap = arena.into_mmap().unwrap().unwrap();
    let slice: &[u64] = unsafe { mmap_as_slice(&mmap) };
    assert_eq!(slice, &[1, 2, 3]);
  }

  #[test]
  fn add_flushes_opportunistically_once_increment_is_reached() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("items");
    let mut arena: Arena<u64> = Arena::with_backing_file(2, &path).unwrap();
    arena.add(1).unwrap();
    // still under the increment: nothing flushed yet, so index 1 is still in the tail.
    assert_eq!(arena.get(1), Some(&1));
    arena.add(2).unwrap();
    // reaching the increment triggers a flush with no explicit `flush()` call: both records
    // left the in-memory tail, even though only `add` was called.
    assert_eq!(arena.get(1), None);
    assert_eq!(arena.get(2), None);
    assert_eq!(arena.len(), 2);

    arena.add(3).unwrap();
    assert_eq!(arena.get(3), Some(&3));

    arena.flush().unwrap();
    let mmap = arena.into_mmap().unwrap().unwrap();
    let slice: &[u64] = unsafe { mmap_as_slice(&mmap) };
    assert_eq!(slice, &[1, 2, 3]);
  }
}
