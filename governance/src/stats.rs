//! Engine counters.

/// Running totals of engine activity since construction (not persisted).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GovernanceStats {
    pub proposals_created: u64,
    pub proposals_rejected: u64,
    pub proposals_deactivated: u64,
    pub votes_cast: u64,
    pub votes_rejected: u64,
    /// Reputation weight added across all accepted votes.
    pub weight_cast: u64,
}
