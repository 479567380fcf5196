//! In-memory repository adapters.
//!
//! Used by tests and local runs without a database. Each store keeps its
//! rows behind a lock and hands out ids from a monotonic sequence. The
//! rating store checks the one-active-rating-per-pair constraint while
//! holding its lock, so concurrent inserts cannot both succeed.

mod account_repository;
mod catalog_repository;
mod comment_repository;
mod rating_repository;
mod recipe_repository;

pub use account_repository::InMemoryAccountRepository;
pub use catalog_repository::InMemoryCatalogRepository;
pub use comment_repository::InMemoryCommentRepository;
pub use rating_repository::InMemoryRatingRepository;
pub use recipe_repository::InMemoryRecipeRepository;

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::PoisonError;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Maps a poisoned lock into a domain error.
fn poisoned<T>(_: PoisonError<T>) -> DomainError {
    DomainError::new(ErrorCode::InternalError, "In-memory store lock poisoned")
}

/// Monotonic id source starting at 1.
#[derive(Debug)]
struct IdSequence(AtomicI64);

impl IdSequence {
    fn new() -> Self {
        Self(AtomicI64::new(0))
    }

    fn next(&self) -> i64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Ensures later ids are greater than `seen`.
    fn observe(&self, seen: i64) {
        self.0.fetch_max(seen, Ordering::SeqCst);
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_starts_at_one_and_skips_observed_ids() {
        let seq = IdSequence::new();
        assert_eq!(seq.next(), 1);
        seq.observe(10);
        assert_eq!(seq.next(), 11);
        seq.observe(3);
        assert_eq!(seq.next(), 12);
    }
}
