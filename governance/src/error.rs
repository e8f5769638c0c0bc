use rbg_store::StoreError;
use rbg_types::{BlockHeight, ProposalId, UserId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("insufficient reputation to create a proposal: {have} < {need}")]
    InsufficientReputation { have: u64, need: u64 },

    #[error("proposal {0} not found")]
    ProposalNotFound(ProposalId),

    #[error("user {0} has no reputation")]
    NoReputation(UserId),

    #[error("proposal {0} is not active")]
    ProposalNotActive(ProposalId),

    #[error("proposal {id} has ended: end block {end_block} <= current block {current_block}")]
    ProposalExpired {
        id: ProposalId,
        end_block: BlockHeight,
        current_block: BlockHeight,
    },

    #[error("user {voter} has already voted on proposal {id}")]
    AlreadyVoted { id: ProposalId, voter: UserId },

    #[error("proposal id space exhausted")]
    IdSpaceExhausted,

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("config error: {0}")]
    Config(String),
}
