//! Fixed governance constants.
//!
//! These are design constants, not configuration. The proposal threshold is
//! deliberately equal to the seed reputation: only users who have never lost
//! reputation may create proposals.

/// Reputation assigned by `initialize_reputation`.
pub const SEED_REPUTATION: u64 = 100;

/// Minimum reputation required to create a proposal.
pub const PROPOSAL_REPUTATION_THRESHOLD: u64 = 100;

/// Number of blocks a proposal accepts votes for after creation.
pub const VOTING_WINDOW_BLOCKS: u64 = 10;
