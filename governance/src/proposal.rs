//! Governance proposals and their status.

use rbg_types::{BlockHeight, ProposalId, UserId};
use serde::{Deserialize, Serialize};

/// Proposal status. The only transition is `Active` → `Inactive`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Accepting votes until the end block.
    Active,
    /// Closed by an explicit external action. Terminal.
    Inactive,
}

/// A governance proposal.
///
/// `creator` and `title` never change after creation; the tallies only grow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    /// Opaque title text, recorded verbatim.
    pub title: String,
    pub creator: UserId,
    /// Sum of the reputation of every `for` vote.
    pub votes_for: u64,
    /// Sum of the reputation of every `against` vote.
    pub votes_against: u64,
    pub status: ProposalStatus,
    /// Height supplied at creation.
    pub created_at: BlockHeight,
    /// Height at which voting closes.
    pub end_block: BlockHeight,
}

impl Proposal {
    pub fn is_active(&self) -> bool {
        self.status == ProposalStatus::Active
    }

    /// Whether the voting window has closed as of `current_block`.
    pub fn is_expired(&self, current_block: BlockHeight) -> bool {
        self.end_block.has_passed(current_block)
    }

    /// Active and inside the voting window.
    pub fn is_open(&self, current_block: BlockHeight) -> bool {
        self.is_active() && !self.is_expired(current_block)
    }

    /// Total reputation weight cast on this proposal.
    pub fn total_weight(&self) -> u64 {
        self.votes_for.saturating_add(self.votes_against)
    }

    pub(crate) fn add_weight(&mut self, vote_for: bool, weight: u64) {
        if vote_for {
            self.votes_for = self.votes_for.saturating_add(weight);
        } else {
            self.votes_against = self.votes_against.saturating_add(weight);
        }
    }
}
