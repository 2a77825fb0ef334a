// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Identifier generation policies

use crate::Id;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// A source of fresh, unique [`Id`]s for `T`.
///
/// Generators are shared between builders, possibly across threads.
pub trait IdGenerator<T: ?Sized>: Send + Sync {
    /// Hand out an id that this generator has not handed out before.
    fn next_id(&self) -> Id<T>;
}

/// Generates random (v4) ids. This is the default policy.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl<T: ?Sized> IdGenerator<T> for RandomIds {
    fn next_id(&self) -> Id<T> {
        Id::new()
    }
}

/// Generates ids from a block number and a monotonically increasing counter.
///
/// The upper 64 bits of every id hold the block, the lower 64 bits the counter, which starts at 1.
/// Two generators with distinct blocks never collide.
#[derive(Debug)]
pub struct SequentialIds {
    block: u64,
    next: AtomicU64,
}

impl SequentialIds {
    /// Create a generator for `block`.
    #[must_use]
    pub const fn new(block: u64) -> Self {
        Self {
            block,
            next: AtomicU64::new(1),
        }
    }

    /// The block this generator allocates from.
    #[must_use]
    pub const fn block(&self) -> u64 {
        self.block
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::Relaxed) - 1
    }
}

impl<T: ?Sized> IdGenerator<T> for SequentialIds {
    fn next_id(&self) -> Id<T> {
        let seq = self.next.fetch_add(1, Ordering::Relaxed);
        Id::from_raw(Uuid::from_u64_pair(self.block, seq))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // valid in tests
mod test {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn sequential_ids_count_from_one() {
        let idgen = SequentialIds::new(0);
        let a: Id<()> = idgen.next_id();
        let b: Id<()> = idgen.next_id();
        assert_eq!(a.into_raw(), Uuid::from_u64_pair(0, 1));
        assert_eq!(b.into_raw(), Uuid::from_u64_pair(0, 2));
        assert_eq!(a.fingerprint(), 1);
        assert_eq!(idgen.issued(), 2);
    }

    #[test]
    fn sequential_blocks_do_not_collide() {
        let first = SequentialIds::new(1);
        let second = SequentialIds::new(2);
        bolero::check!().with_type().for_each(|n: &u8| {
            for _ in 0..*n {
                let a: Id<()> = first.next_id();
                let b: Id<()> = second.next_id();
                assert_ne!(a, b);
                assert_eq!(a.into_raw().as_u64_pair().0, first.block());
            }
        });
    }

    #[test]
    fn sequential_ids_are_unique_across_threads() {
        let idgen = Arc::new(SequentialIds::new(7));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let idgen = idgen.clone();
                std::thread::spawn(move || {
                    (0..256)
                        .map(|_| IdGenerator::<()>::next_id(idgen.as_ref()))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(seen.len(), 4 * 256);
        assert_eq!(idgen.issued(), 4 * 256);
    }

    #[test]
    fn random_ids_differ() {
        let a: Id<()> = RandomIds.next_id();
        let b: Id<()> = RandomIds.next_id();
        assert_ne!(a, b);
    }
}
