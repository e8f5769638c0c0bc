//! Core governance engine: proposal creation and reputation-weighted voting.

use std::collections::{BTreeMap, BTreeSet};

use rbg_store::ReputationStore;
use rbg_types::{
    BlockHeight, ProposalId, UserId, PROPOSAL_REPUTATION_THRESHOLD, VOTING_WINDOW_BLOCKS,
};

use crate::config::GovernanceConfig;
use crate::error::GovernanceError;
use crate::proposal::{Proposal, ProposalStatus};
use crate::stats::GovernanceStats;

/// Owns every proposal and reads voter reputation from `R`.
///
/// All operations are synchronous state transitions. A failed call never
/// mutates state: every check runs before the first write.
pub struct GovernanceEngine<R> {
    pub(crate) reputation: R,
    pub(crate) proposals: BTreeMap<ProposalId, Proposal>,
    /// The id the next proposal will receive.
    pub(crate) next_id: ProposalId,
    /// proposal → users who have cast an accepted vote on it.
    pub(crate) voters: BTreeMap<ProposalId, BTreeSet<UserId>>,
    pub(crate) reject_duplicate_votes: bool,
    pub(crate) stats: GovernanceStats,
}

impl<R: ReputationStore> GovernanceEngine<R> {
    pub fn new(reputation: R) -> Self {
        Self {
            reputation,
            proposals: BTreeMap::new(),
            next_id: ProposalId::FIRST,
            voters: BTreeMap::new(),
            reject_duplicate_votes: false,
            stats: GovernanceStats::default(),
        }
    }

    pub fn with_config(reputation: R, config: &GovernanceConfig) -> Self {
        Self::new(reputation).reject_duplicate_votes(config.reject_duplicate_votes)
    }

    /// Enable or disable the one-vote-per-user guard.
    pub fn reject_duplicate_votes(mut self, enabled: bool) -> Self {
        self.reject_duplicate_votes = enabled;
        self
    }

    /// The reputation store votes are weighted by.
    pub fn reputation(&self) -> &R {
        &self.reputation
    }

    /// Create a proposal open for voting until `current_block + VOTING_WINDOW_BLOCKS`.
    pub fn create_proposal(
        &mut self,
        creator: &UserId,
        title: impl Into<String>,
        current_block: BlockHeight,
    ) -> Result<ProposalId, GovernanceError> {
        let have = self.reputation.get_reputation(creator);
        if have < PROPOSAL_REPUTATION_THRESHOLD {
            self.stats.proposals_rejected += 1;
            tracing::debug!(creator = %creator, have, "proposal rejected: insufficient reputation");
            return Err(GovernanceError::InsufficientReputation {
                have,
                need: PROPOSAL_REPUTATION_THRESHOLD,
            });
        }

        let id = self.next_id;
        let next_id = id.next().ok_or(GovernanceError::IdSpaceExhausted)?;
        let proposal = Proposal {
            id,
            title: title.into(),
            creator: creator.clone(),
            votes_for: 0,
            votes_against: 0,
            status: ProposalStatus::Active,
            created_at: current_block,
            end_block: current_block.offset(VOTING_WINDOW_BLOCKS),
        };
        tracing::info!(
            proposal = %id,
            creator = %creator,
            end_block = %proposal.end_block,
            "proposal created"
        );
        self.proposals.insert(id, proposal);
        self.next_id = next_id;
        self.stats.proposals_created += 1;
        Ok(id)
    }

    /// Cast a vote weighted by the voter's current reputation.
    ///
    /// Checks, in order: the proposal exists, the voter has reputation, the
    /// proposal is active, and `end_block > current_block`. Votes never change
    /// the proposal's status.
    pub fn vote(
        &mut self,
        voter: &UserId,
        proposal_id: ProposalId,
        vote_for: bool,
        current_block: BlockHeight,
    ) -> Result<(), GovernanceError> {
        let weight = match self.check_vote(voter, proposal_id, current_block) {
            Ok(weight) => weight,
            Err(e) => {
                self.stats.votes_rejected += 1;
                tracing::debug!(voter = %voter, proposal = %proposal_id, error = %e, "vote rejected");
                return Err(e);
            }
        };

        let proposal = self
            .proposals
            .get_mut(&proposal_id)
            .ok_or(GovernanceError::ProposalNotFound(proposal_id))?;
        proposal.add_weight(vote_for, weight);
        self.voters
            .entry(proposal_id)
            .or_default()
            .insert(voter.clone());
        self.stats.votes_cast += 1;
        self.stats.weight_cast = self.stats.weight_cast.saturating_add(weight);
        tracing::debug!(
            voter = %voter,
            proposal = %proposal_id,
            vote_for,
            weight,
            "vote recorded"
        );
        Ok(())
    }

    fn check_vote(
        &self,
        voter: &UserId,
        proposal_id: ProposalId,
        current_block: BlockHeight,
    ) -> Result<u64, GovernanceError> {
        let proposal = self
            .proposals
            .get(&proposal_id)
            .ok_or(GovernanceError::ProposalNotFound(proposal_id))?;

        let weight = self.reputation.get_reputation(voter);
        if weight == 0 {
            return Err(GovernanceError::NoReputation(voter.clone()));
        }
        if !proposal.is_active() {
            return Err(GovernanceError::ProposalNotActive(proposal_id));
        }
        if proposal.is_expired(current_block) {
            return Err(GovernanceError::ProposalExpired {
                id: proposal_id,
                end_block: proposal.end_block,
                current_block,
            });
        }
        if self.reject_duplicate_votes && self.has_voted(proposal_id, voter) {
            return Err(GovernanceError::AlreadyVoted {
                id: proposal_id,
                voter: voter.clone(),
            });
        }
        Ok(weight)
    }

    /// Close a proposal to further votes. Idempotent.
    pub fn deactivate_proposal(&mut self, proposal_id: ProposalId) -> Result<(), GovernanceError> {
        let proposal = self
            .proposals
            .get_mut(&proposal_id)
            .ok_or(GovernanceError::ProposalNotFound(proposal_id))?;
        if proposal.status == ProposalStatus::Active {
            proposal.status = ProposalStatus::Inactive;
            self.stats.proposals_deactivated += 1;
            tracing::info!(
                proposal = %proposal_id,
                votes_for = proposal.votes_for,
                votes_against = proposal.votes_against,
                total_weight = proposal.total_weight(),
                "proposal deactivated"
            );
        }
        Ok(())
    }

    pub fn proposal(&self, proposal_id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(&proposal_id)
    }

    /// All proposals in id order, including inactive and expired ones.
    pub fn proposals(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.values()
    }

    pub fn proposal_count(&self) -> u64 {
        self.proposals.len() as u64
    }

    /// Whether `proposal_id` would currently accept a vote from a reputable user.
    pub fn is_open(&self, proposal_id: ProposalId, current_block: BlockHeight) -> bool {
        self.proposals
            .get(&proposal_id)
            .is_some_and(|p| p.is_open(current_block))
    }

    pub fn has_voted(&self, proposal_id: ProposalId, voter: &UserId) -> bool {
        self.voters
            .get(&proposal_id)
            .is_some_and(|set| set.contains(voter))
    }

    pub fn stats(&self) -> GovernanceStats {
        self.stats
    }
}
