//! Nullable stores: thread-safe in-memory storage for testing.

use rbg_store::{ProposalStore, ReputationStore, StoreError};
use rbg_types::{ProposalId, UserId};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// An in-memory reputation store for testing.
/// Thread-safe for use behind a shared engine.
pub struct NullReputationStore {
    scores: Mutex<HashMap<UserId, u64>>,
    fail_reads: AtomicBool,
}

impl NullReputationStore {
    pub fn new() -> Self {
        Self {
            scores: Mutex::new(HashMap::new()),
            fail_reads: AtomicBool::new(false),
        }
    }

    /// Make every subsequent read return a backend error.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

impl Default for NullReputationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReputationStore for NullReputationStore {
    fn put_reputation(&self, user: &UserId, score: u64) -> Result<(), StoreError> {
        self.scores.lock().unwrap().insert(user.clone(), score);
        Ok(())
    }

    fn get_raw_reputation(&self, user: &UserId) -> Result<Option<u64>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("simulated read failure".to_string()));
        }
        Ok(self.scores.lock().unwrap().get(user).copied())
    }

    fn reputation_count(&self) -> Result<u64, StoreError> {
        Ok(self.scores.lock().unwrap().len() as u64)
    }
}

/// An in-memory proposal store for testing.
pub struct NullProposalStore {
    proposals: Mutex<BTreeMap<ProposalId, Vec<u8>>>,
}

impl NullProposalStore {
    pub fn new() -> Self {
        Self {
            proposals: Mutex::new(BTreeMap::new()),
        }
    }
}

impl Default for NullProposalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProposalStore for NullProposalStore {
    fn put_proposal(&self, id: ProposalId, data: &[u8]) -> Result<(), StoreError> {
        self.proposals.lock().unwrap().insert(id, data.to_vec());
        Ok(())
    }

    fn get_proposal(&self, id: ProposalId) -> Result<Vec<u8>, StoreError> {
        self.proposals
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn proposal_ids(&self) -> Result<Vec<ProposalId>, StoreError> {
        Ok(self.proposals.lock().unwrap().keys().copied().collect())
    }

    fn proposal_count(&self) -> Result<u64, StoreError> {
        Ok(self.proposals.lock().unwrap().len() as u64)
    }
}
