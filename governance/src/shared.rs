//! Thread-safe handle to a single engine.
//!
//! Every operation takes the one engine-wide lock, so no caller observes a
//! partially applied create or vote.

use std::sync::{Arc, Mutex, MutexGuard};

use rbg_store::ReputationStore;
use rbg_types::{BlockHeight, ProposalId, UserId};

use crate::engine::GovernanceEngine;
use crate::error::GovernanceError;
use crate::proposal::Proposal;
use crate::stats::GovernanceStats;

/// Cloneable, lock-protected [`GovernanceEngine`].
pub struct SharedGovernance<R> {
    inner: Arc<Mutex<GovernanceEngine<R>>>,
}

impl<R> Clone for SharedGovernance<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: ReputationStore> SharedGovernance<R> {
    pub fn new(engine: GovernanceEngine<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    // Engine methods validate fully before writing, so state behind a
    // poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, GovernanceEngine<R>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Seed a user's reputation under the engine lock.
    pub fn initialize_reputation(&self, user: &UserId) -> Result<(), GovernanceError> {
        Ok(self.lock().reputation().initialize_reputation(user)?)
    }

    pub fn get_reputation(&self, user: &UserId) -> u64 {
        self.lock().reputation().get_reputation(user)
    }

    /// Apply a signed reputation delta under the engine lock. Returns the new score.
    pub fn adjust_reputation(&self, user: &UserId, delta: i64) -> Result<u64, GovernanceError> {
        Ok(self.lock().reputation().adjust_reputation(user, delta)?)
    }

    pub fn create_proposal(
        &self,
        creator: &UserId,
        title: impl Into<String>,
        current_block: BlockHeight,
    ) -> Result<ProposalId, GovernanceError> {
        self.lock().create_proposal(creator, title, current_block)
    }

    pub fn vote(
        &self,
        voter: &UserId,
        proposal_id: ProposalId,
        vote_for: bool,
        current_block: BlockHeight,
    ) -> Result<(), GovernanceError> {
        self.lock().vote(voter, proposal_id, vote_for, current_block)
    }

    pub fn deactivate_proposal(&self, proposal_id: ProposalId) -> Result<(), GovernanceError> {
        self.lock().deactivate_proposal(proposal_id)
    }

    /// A copy of the proposal as of this call.
    pub fn proposal(&self, proposal_id: ProposalId) -> Option<Proposal> {
        self.lock().proposal(proposal_id).cloned()
    }

    pub fn proposal_count(&self) -> u64 {
        self.lock().proposal_count()
    }

    pub fn stats(&self) -> GovernanceStats {
        self.lock().stats()
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with_engine<T>(&self, f: impl FnOnce(&mut GovernanceEngine<R>) -> T) -> T {
        f(&mut *self.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbg_nullables::NullReputationStore;
    use std::thread;

    fn user(n: usize) -> UserId {
        UserId::new(format!("wallet_{n}"))
    }

    #[test]
    fn concurrent_votes_are_all_counted() {
        let store = Arc::new(NullReputationStore::new());
        for n in 0..8 {
            store.initialize_reputation(&user(n)).unwrap();
        }
        let shared = SharedGovernance::new(GovernanceEngine::new(Arc::clone(&store)));
        let id = shared
            .create_proposal(&user(0), "T", BlockHeight::new(0))
            .unwrap();

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        shared
                            .vote(&user(n), id, n % 2 == 0, BlockHeight::new(1))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let p = shared.proposal(id).unwrap();
        assert_eq!(p.votes_for, 4 * 25 * 100);
        assert_eq!(p.votes_against, 4 * 25 * 100);
        assert_eq!(shared.stats().votes_cast, 200);
    }

    #[test]
    fn concurrent_creates_get_distinct_gapless_ids() {
        let store = Arc::new(NullReputationStore::new());
        store.initialize_reputation(&user(0)).unwrap();
        let shared = SharedGovernance::new(GovernanceEngine::new(Arc::clone(&store)));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    (0..10)
                        .map(|_| {
                            shared
                                .create_proposal(&user(0), "T", BlockHeight::new(0))
                                .unwrap()
                                .get()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        let mut ids: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=40).collect::<Vec<_>>());
    }

    #[test]
    fn reputation_is_managed_through_the_handle() {
        let shared = SharedGovernance::new(GovernanceEngine::new(NullReputationStore::new()));
        assert_eq!(shared.get_reputation(&user(1)), 0);

        shared.initialize_reputation(&user(1)).unwrap();
        assert_eq!(shared.get_reputation(&user(1)), 100);
        let id = shared
            .create_proposal(&user(1), "T", BlockHeight::new(0))
            .unwrap();

        assert_eq!(shared.adjust_reputation(&user(1), -25).unwrap(), 75);
        shared.vote(&user(1), id, false, BlockHeight::new(1)).unwrap();
        assert_eq!(shared.proposal(id).unwrap().votes_against, 75);
    }

    #[test]
    fn concurrent_initialization_and_votes() {
        let shared = SharedGovernance::new(GovernanceEngine::new(NullReputationStore::new()));
        shared.initialize_reputation(&user(0)).unwrap();
        let id = shared
            .create_proposal(&user(0), "T", BlockHeight::new(0))
            .unwrap();

        let handles: Vec<_> = (1..=6)
            .map(|n| {
                let shared = shared.clone();
                thread::spawn(move || {
                    shared.initialize_reputation(&user(n)).unwrap();
                    shared.vote(&user(n), id, true, BlockHeight::new(2)).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(shared.proposal(id).unwrap().votes_for, 600);
    }

    #[test]
    fn with_engine_gives_exclusive_access() {
        let store = NullReputationStore::new();
        store.initialize_reputation(&user(1)).unwrap();
        let shared = SharedGovernance::new(GovernanceEngine::new(Arc::new(store)));
        let id = shared
            .with_engine(|engine| engine.create_proposal(&user(1), "T", BlockHeight::new(3)))
            .unwrap();
        shared.deactivate_proposal(id).unwrap();
        assert!(!shared.with_engine(|engine| engine.is_open(id, BlockHeight::new(4))));
        assert_eq!(shared.proposal_count(), 1);
    }
}
