//! Engine persistence.
//!
//! Two forms: a single bincode blob of the whole engine ([`GovernanceSnapshot`])
//! and one record per proposal in a [`ProposalStore`]. Reputation is not part
//! of either; it lives in its own store.

use std::collections::{BTreeMap, BTreeSet};

use rbg_store::{ProposalStore, ReputationStore};
use rbg_types::{ProposalId, UserId};
use serde::{Deserialize, Serialize};

use crate::engine::GovernanceEngine;
use crate::error::GovernanceError;
use crate::proposal::Proposal;

/// Serializable snapshot of the engine's proposal state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceSnapshot {
    pub next_id: ProposalId,
    pub proposals: Vec<Proposal>,
    pub voters: Vec<(ProposalId, Vec<UserId>)>,
}

/// Per-proposal record written to a [`ProposalStore`].
#[derive(Serialize, Deserialize)]
struct StoredProposal {
    proposal: Proposal,
    voters: Vec<UserId>,
}

impl<R: ReputationStore> GovernanceEngine<R> {
    pub fn snapshot(&self) -> GovernanceSnapshot {
        GovernanceSnapshot {
            next_id: self.next_id,
            proposals: self.proposals.values().cloned().collect(),
            voters: self
                .voters
                .iter()
                .map(|(id, set)| (*id, set.iter().cloned().collect()))
                .collect(),
        }
    }

    /// Rebuild an engine from a snapshot. The duplicate-vote guard starts disabled.
    ///
    /// Proposal ids must be exactly `1..=n`, `next_id` must be `n + 1`, and
    /// every voter entry must name a stored proposal.
    pub fn from_snapshot(
        snapshot: GovernanceSnapshot,
        reputation: R,
    ) -> Result<Self, GovernanceError> {
        if snapshot.next_id < ProposalId::FIRST {
            return Err(GovernanceError::Serialization(format!(
                "next id {} is not positive",
                snapshot.next_id
            )));
        }

        let mut proposals = BTreeMap::new();
        for proposal in snapshot.proposals {
            let id = proposal.id;
            if proposals.insert(id, proposal).is_some() {
                return Err(GovernanceError::Serialization(format!(
                    "proposal {id} appears twice"
                )));
            }
        }
        let mut expected_next = ProposalId::FIRST;
        for id in proposals.keys() {
            if *id != expected_next {
                return Err(GovernanceError::Serialization(format!(
                    "proposal ids are not contiguous: found {id}, expected {expected_next}"
                )));
            }
            expected_next = id.next().ok_or(GovernanceError::IdSpaceExhausted)?;
        }
        if snapshot.next_id != expected_next {
            return Err(GovernanceError::Serialization(format!(
                "next id {} does not follow highest proposal (expected {expected_next})",
                snapshot.next_id
            )));
        }

        let mut voters = BTreeMap::new();
        for (id, users) in snapshot.voters {
            if !proposals.contains_key(&id) {
                return Err(GovernanceError::Serialization(format!(
                    "voters recorded for unknown proposal {id}"
                )));
            }
            voters
                .entry(id)
                .or_insert_with(BTreeSet::new)
                .extend(users);
        }

        let mut engine = Self::new(reputation);
        engine.proposals = proposals;
        engine.next_id = snapshot.next_id;
        engine.voters = voters;
        Ok(engine)
    }

    /// Serialize the engine's proposal state to bytes.
    pub fn save_state(&self) -> Result<Vec<u8>, GovernanceError> {
        bincode::serialize(&self.snapshot())
            .map_err(|e| GovernanceError::Serialization(e.to_string()))
    }

    /// Restore an engine from bytes produced by [`save_state`](Self::save_state).
    pub fn load_state(data: &[u8], reputation: R) -> Result<Self, GovernanceError> {
        let snapshot: GovernanceSnapshot = bincode::deserialize(data)
            .map_err(|e| GovernanceError::Serialization(e.to_string()))?;
        Self::from_snapshot(snapshot, reputation)
    }

    /// Write every proposal (with its voter set) to `store`.
    pub fn persist_to<S: ProposalStore>(&self, store: &S) -> Result<(), GovernanceError> {
        for proposal in self.proposals.values() {
            let record = StoredProposal {
                proposal: proposal.clone(),
                voters: self
                    .voters
                    .get(&proposal.id)
                    .map(|set| set.iter().cloned().collect())
                    .unwrap_or_default(),
            };
            let bytes = bincode::serialize(&record)
                .map_err(|e| GovernanceError::Serialization(e.to_string()))?;
            store.put_proposal(proposal.id, &bytes)?;
        }
        tracing::debug!(count = self.proposals.len(), "proposals persisted");
        Ok(())
    }

    /// Rebuild an engine from the records in `store`.
    ///
    /// The next id is one past the highest stored id, so ids are never reused.
    /// Stored ids must be gapless from 1, as [`from_snapshot`](Self::from_snapshot) requires.
    pub fn restore_from<S: ProposalStore>(store: &S, reputation: R) -> Result<Self, GovernanceError> {
        let mut snapshot = GovernanceSnapshot {
            next_id: ProposalId::FIRST,
            proposals: Vec::new(),
            voters: Vec::new(),
        };
        for id in store.proposal_ids()? {
            let bytes = store.get_proposal(id)?;
            let record: StoredProposal = bincode::deserialize(&bytes)
                .map_err(|e| GovernanceError::Serialization(e.to_string()))?;
            if record.proposal.id != id {
                return Err(GovernanceError::Serialization(format!(
                    "record stored under {} holds proposal {}",
                    id, record.proposal.id
                )));
            }
            if id >= snapshot.next_id {
                snapshot.next_id = id.next().ok_or_else(|| {
                    GovernanceError::Serialization(format!(
                        "stored proposal {id} exhausts the id space"
                    ))
                })?;
            }
            if !record.voters.is_empty() {
                snapshot.voters.push((id, record.voters));
            }
            snapshot.proposals.push(record.proposal);
        }
        tracing::info!(
            count = snapshot.proposals.len(),
            next_id = %snapshot.next_id,
            "proposals restored"
        );
        Self::from_snapshot(snapshot, reputation)
    }
}
