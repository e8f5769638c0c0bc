//! Reputation storage.
//!
//! Backends provide three primitives; the reputation operations used by the
//! governance engine are provided methods built on top of them. A user with
//! no stored entry has an implicit score of 0.

use crate::StoreError;
use rbg_types::{UserId, SEED_REPUTATION};

/// Mapping from user identity to reputation score.
pub trait ReputationStore {
    /// Write a user's score, overwriting any prior value.
    fn put_reputation(&self, user: &UserId, score: u64) -> Result<(), StoreError>;

    /// Read a user's stored score, `None` if the user has no entry.
    fn get_raw_reputation(&self, user: &UserId) -> Result<Option<u64>, StoreError>;

    /// Number of users with a stored entry.
    fn reputation_count(&self) -> Result<u64, StoreError>;

    /// Set the user's reputation to the seed value, unconditionally.
    fn initialize_reputation(&self, user: &UserId) -> Result<(), StoreError> {
        self.put_reputation(user, SEED_REPUTATION)?;
        tracing::debug!(user = %user, score = SEED_REPUTATION, "reputation initialized");
        Ok(())
    }

    /// The user's score, or 0 when absent.
    ///
    /// Never fails: a backend read error is logged and treated as no entry.
    fn get_reputation(&self, user: &UserId) -> u64 {
        match self.get_raw_reputation(user) {
            Ok(score) => score.unwrap_or(0),
            Err(e) => {
                tracing::warn!(user = %user, error = %e, "reputation read failed, treating as 0");
                0
            }
        }
    }

    /// Apply a signed delta, clamping at 0 and `u64::MAX`. Returns the new score.
    fn adjust_reputation(&self, user: &UserId, delta: i64) -> Result<u64, StoreError> {
        let current = self.get_raw_reputation(user)?.unwrap_or(0);
        let updated = if delta >= 0 {
            current.saturating_add(delta.unsigned_abs())
        } else {
            current.saturating_sub(delta.unsigned_abs())
        };
        self.put_reputation(user, updated)?;
        tracing::debug!(user = %user, delta, score = updated, "reputation adjusted");
        Ok(updated)
    }
}

impl<T: ReputationStore + ?Sized> ReputationStore for &T {
    fn put_reputation(&self, user: &UserId, score: u64) -> Result<(), StoreError> {
        (**self).put_reputation(user, score)
    }

    fn get_raw_reputation(&self, user: &UserId) -> Result<Option<u64>, StoreError> {
        (**self).get_raw_reputation(user)
    }

    fn reputation_count(&self) -> Result<u64, StoreError> {
        (**self).reputation_count()
    }
}

impl<T: ReputationStore + ?Sized> ReputationStore for std::sync::Arc<T> {
    fn put_reputation(&self, user: &UserId, score: u64) -> Result<(), StoreError> {
        (**self).put_reputation(user, score)
    }

    fn get_raw_reputation(&self, user: &UserId) -> Result<Option<u64>, StoreError> {
        (**self).get_raw_reputation(user)
    }

    fn reputation_count(&self) -> Result<u64, StoreError> {
        (**self).reputation_count()
    }
}
